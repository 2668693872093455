//! Observation generation.
//!
//! Pairs each [`SampledPoint`](crate::SampledPoint) with its day on the raster and the subject
//! reference, and passes the result through [`Observation::build`].

use crate::raster::{day_raster, DayRaster};
use crate::sampler::{SampleRequest, Sampler};
use crate::VitalsResult;
use chrono::{DateTime, FixedOffset};
use fhir::{Observation, ObservationData};
use rand::Rng;

/// Lazy sequence of heart-rate observations for one subject, oldest first.
///
/// Items are yielded as they are sampled, so a consumer can see a prefix of the series before a
/// later item fails.
#[derive(Debug)]
pub struct ObservationStream<R> {
    subject_reference: String,
    points: Sampler<R>,
    raster: DayRaster,
}

impl<R: Rng> Iterator for ObservationStream<R> {
    type Item = VitalsResult<ObservationData>;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.points.next()?;
        let effective = self.raster.next()?;
        Some(point.map(|p| Observation::build(self.subject_reference.clone(), p.value, effective)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl<R: Rng> ExactSizeIterator for ObservationStream<R> {}

/// Generate `request.count()` daily observations for `subject_reference`, the last dated `now`.
///
/// # Errors
///
/// Returns [`VitalsError::InvalidArgument`](crate::VitalsError::InvalidArgument) if the series
/// reaches back beyond a representable date. Sampling errors surface per item.
pub fn generate_observations<R: Rng>(
    subject_reference: &str,
    request: SampleRequest,
    rng: R,
    now: DateTime<FixedOffset>,
) -> VitalsResult<ObservationStream<R>> {
    let raster = day_raster(now, request.count())?;

    tracing::debug!(
        subject = subject_reference,
        count = request.count(),
        trend = %request.trend(),
        "generating observations"
    );

    Ok(ObservationStream {
        subject_reference: subject_reference.to_string(),
        points: Sampler::new(request, rng),
        raster,
    })
}

/// Eager form of [`generate_observations`]: all observations, or the first error.
pub fn collect_observations<R: Rng>(
    subject_reference: &str,
    request: SampleRequest,
    rng: R,
    now: DateTime<FixedOffset>,
) -> VitalsResult<Vec<ObservationData>> {
    generate_observations(subject_reference, request, rng, now)?.collect()
}
