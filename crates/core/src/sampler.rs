//! Bounded Gaussian sampling.
//!
//! [`bounded_gaussian`] is the sampling primitive: one normal draw, then optional clamps.
//! [`Sampler`] drives it across a [`SampleRequest`], asking the request's [`Trend`] for the
//! parameters of each index.
//!
//! The random source is always passed in. Seeding it (for example with
//! `rand::rngs::StdRng::seed_from_u64`) makes a run reproducible.

use crate::trend::Trend;
use crate::{VitalsError, VitalsResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Optional clamps applied after drawing.
///
/// `Some(0.0)` is a real bound: a zero minimum clamps negative draws to zero.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    minimum: Option<f64>,
    maximum: Option<f64>,
}

impl Bounds {
    /// Create bounds, rejecting NaN limits and a minimum above the maximum.
    pub fn new(minimum: Option<f64>, maximum: Option<f64>) -> VitalsResult<Self> {
        if minimum.is_some_and(f64::is_nan) || maximum.is_some_and(f64::is_nan) {
            return Err(VitalsError::InvalidArgument("bounds cannot be NaN".into()));
        }

        if let (Some(min), Some(max)) = (minimum, maximum) {
            if min > max {
                return Err(VitalsError::InvalidArgument(format!(
                    "minimum {min} is greater than maximum {max}"
                )));
            }
        }

        Ok(Self { minimum, maximum })
    }

    /// No clamping.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Heart rate cannot be negative; there is no upper clamp.
    pub fn heart_rate() -> Self {
        Self {
            minimum: Some(0.0),
            maximum: None,
        }
    }

    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    /// Clamp `value` to the minimum, then to the maximum.
    pub fn apply(&self, value: f64) -> f64 {
        let mut clamped = value;
        if let Some(min) = self.minimum {
            clamped = clamped.max(min);
        }
        if let Some(max) = self.maximum {
            clamped = clamped.min(max);
        }
        clamped
    }
}

/// Draw one value from `Normal(mean, std_dev)` and clamp it to `bounds`.
///
/// # Errors
///
/// Returns [`VitalsError::SamplingFailure`] if the parameters do not describe a valid normal
/// distribution (non-finite mean, negative or non-finite standard deviation).
pub fn bounded_gaussian<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f64,
    std_dev: f64,
    bounds: Bounds,
) -> VitalsResult<f64> {
    if !mean.is_finite() {
        return Err(VitalsError::SamplingFailure(format!("mean must be finite, got {mean}")));
    }

    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(VitalsError::SamplingFailure(format!(
            "standard deviation must be finite and non-negative, got {std_dev}"
        )));
    }

    let normal = Normal::new(mean, std_dev).map_err(|e| {
        VitalsError::SamplingFailure(format!("N({mean}, {std_dev}) is not a valid normal: {e}"))
    })?;

    let raw = normal.sample(rng);
    let value = bounds.apply(raw);
    if value != raw {
        tracing::debug!(raw, value, "clamped sampled value");
    }
    Ok(value)
}

/// Parameters for one generated series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRequest {
    count: usize,
    base_mean: f64,
    base_std_dev: f64,
    trend: Trend,
    bounds: Bounds,
}

impl SampleRequest {
    /// Validate and create a request.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::InvalidArgument`] if `count` is zero, `base_mean` is not finite,
    /// or `base_std_dev` is negative or not finite.
    pub fn new(
        count: usize,
        base_mean: f64,
        base_std_dev: f64,
        trend: Trend,
        bounds: Bounds,
    ) -> VitalsResult<Self> {
        if count == 0 {
            return Err(VitalsError::InvalidArgument("count must be at least 1".into()));
        }

        if !base_mean.is_finite() {
            return Err(VitalsError::InvalidArgument(format!(
                "base mean must be finite, got {base_mean}"
            )));
        }

        if !base_std_dev.is_finite() || base_std_dev < 0.0 {
            return Err(VitalsError::InvalidArgument(format!(
                "base standard deviation must be finite and non-negative, got {base_std_dev}"
            )));
        }

        Ok(Self {
            count,
            base_mean,
            base_std_dev,
            trend,
            bounds,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn base_mean(&self) -> f64 {
        self.base_mean
    }

    pub fn base_std_dev(&self) -> f64 {
        self.base_std_dev
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }
}

/// One sampled value together with the parameters it was drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledPoint {
    pub index: usize,
    pub value: f64,
    pub effective_mean: f64,
    pub effective_std_dev: f64,
}

/// Lazy, finite sequence of [`SampledPoint`]s in index order.
///
/// Each call to `next` draws from the random source, so a sampler cannot be replayed; build a
/// new one with an identically seeded generator to reproduce a series.
#[derive(Debug)]
pub struct Sampler<R> {
    request: SampleRequest,
    rng: R,
    next_index: usize,
}

impl<R: Rng> Sampler<R> {
    pub fn new(request: SampleRequest, rng: R) -> Self {
        Self {
            request,
            rng,
            next_index: 0,
        }
    }
}

impl<R: Rng> Iterator for Sampler<R> {
    type Item = VitalsResult<SampledPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        let count = self.request.count;
        if self.next_index >= count {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;

        let params = self.request.trend.parameters(
            index,
            count,
            self.request.base_mean,
            self.request.base_std_dev,
        );

        let point = bounded_gaussian(
            &mut self.rng,
            params.mean,
            params.std_dev,
            self.request.bounds,
        )
        .map(|value| SampledPoint {
            index,
            value,
            effective_mean: params.mean,
            effective_std_dev: params.std_dev,
        });

        if let Ok(p) = &point {
            tracing::debug!(
                index = p.index,
                value = p.value,
                mean = p.effective_mean,
                std_dev = p.effective_std_dev,
                "sampled point"
            );
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.request.count - self.next_index;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Sampler<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HEART_RATE_BASE_MEAN, HEART_RATE_STANDARD_DEVIATION};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn heart_rate_request(count: usize, trend: Trend) -> SampleRequest {
        SampleRequest::new(
            count,
            HEART_RATE_BASE_MEAN,
            HEART_RATE_STANDARD_DEVIATION,
            trend,
            Bounds::heart_rate(),
        )
        .expect("valid request")
    }

    fn sample_all(request: SampleRequest, seed: u64) -> Vec<SampledPoint> {
        Sampler::new(request, StdRng::seed_from_u64(seed))
            .collect::<VitalsResult<Vec<_>>>()
            .expect("sampling succeeds")
    }

    #[test]
    fn flat_trend_matches_base_distribution() {
        let n = 10_000;
        let points = sample_all(heart_rate_request(n, Trend::None), 42);
        assert_eq!(points.len(), n);

        for p in &points {
            assert_eq!(p.effective_mean, HEART_RATE_BASE_MEAN);
            assert_eq!(p.effective_std_dev, HEART_RATE_STANDARD_DEVIATION);
        }

        let sample_mean = points.iter().map(|p| p.value).sum::<f64>() / n as f64;
        let standard_error = HEART_RATE_STANDARD_DEVIATION / (n as f64).sqrt();
        assert!(
            (sample_mean - HEART_RATE_BASE_MEAN).abs() < 3.0 * standard_error,
            "sample mean {sample_mean} too far from {HEART_RATE_BASE_MEAN}"
        );
    }

    #[test]
    fn rising_spike_means_rise_then_jump() {
        let n = 12;
        let points = sample_all(heart_rate_request(n, Trend::RisingSpike), 7);

        for pair in points[..n - 1].windows(2) {
            assert!(pair[1].effective_mean >= pair[0].effective_mean);
        }

        let last = points[n - 1];
        let max_before = points[..n - 1]
            .iter()
            .map(|p| p.effective_mean)
            .fold(f64::MIN, f64::max);
        assert!(last.effective_mean > max_before + HEART_RATE_STANDARD_DEVIATION);
        assert_eq!(last.effective_std_dev, HEART_RATE_STANDARD_DEVIATION / 2.0);
    }

    #[test]
    fn points_are_ordered_by_index() {
        let points = sample_all(heart_rate_request(5, Trend::RisingSpike), 1);
        let indices: Vec<_> = points.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn negative_draws_clamp_to_zero() {
        // A mean this far below zero makes every raw draw negative.
        let request = SampleRequest::new(200, -1_000.0, 1.0, Trend::None, Bounds::heart_rate())
            .expect("valid request");

        for p in sample_all(request, 3) {
            assert_eq!(p.value, 0.0);
        }
    }

    #[test]
    fn fixed_negative_draw_clamps_to_zero() {
        // Zero spread makes every raw draw exactly -5.0.
        let mut rng = StdRng::seed_from_u64(21);
        let unclamped = bounded_gaussian(&mut rng, -5.0, 0.0, Bounds::unbounded()).expect("sample");
        assert_eq!(unclamped, -5.0);

        let clamped = bounded_gaussian(&mut rng, -5.0, 0.0, Bounds::heart_rate()).expect("sample");
        assert_eq!(clamped, 0.0);
    }

    #[test]
    fn zero_minimum_is_applied() {
        assert_eq!(Bounds::heart_rate().minimum(), Some(0.0));
        assert_eq!(Bounds::heart_rate().apply(-12.5), 0.0);
        assert_eq!(Bounds::heart_rate().apply(64.0), 64.0);
    }

    #[test]
    fn maximum_clamps_when_supplied() {
        let bounds = Bounds::new(Some(40.0), Some(180.0)).expect("valid bounds");
        assert_eq!(bounds.apply(250.0), 180.0);
        assert_eq!(bounds.apply(10.0), 40.0);
        assert_eq!(bounds.apply(90.0), 90.0);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let v = bounded_gaussian(&mut rng, 500.0, 1.0, bounds).expect("sample");
            assert_eq!(v, 180.0);
        }
    }

    #[test]
    fn unbounded_leaves_negative_values() {
        assert_eq!(Bounds::unbounded().apply(-3.0), -3.0);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = Bounds::new(Some(10.0), Some(5.0)).expect_err("min above max");
        match err {
            VitalsError::InvalidArgument(msg) => assert!(msg.contains("greater")),
            other => panic!("expected InvalidArgument error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_count() {
        let err = SampleRequest::new(
            0,
            HEART_RATE_BASE_MEAN,
            HEART_RATE_STANDARD_DEVIATION,
            Trend::None,
            Bounds::heart_rate(),
        )
        .expect_err("zero count");
        match err {
            VitalsError::InvalidArgument(msg) => assert!(msg.contains("count")),
            other => panic!("expected InvalidArgument error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_std_dev() {
        let err = SampleRequest::new(3, 70.0, -1.0, Trend::None, Bounds::heart_rate())
            .expect_err("negative std dev");
        assert!(matches!(err, VitalsError::InvalidArgument(_)));
    }

    #[test]
    fn invalid_distribution_is_a_sampling_failure() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = bounded_gaussian(&mut rng, 70.0, -1.0, Bounds::unbounded())
            .expect_err("negative std dev");
        match err {
            VitalsError::SamplingFailure(_) => {}
            other => panic!("expected SamplingFailure error, got {other:?}"),
        }

        let err = bounded_gaussian(&mut rng, f64::NAN, 1.0, Bounds::unbounded())
            .expect_err("NaN mean");
        assert!(matches!(err, VitalsError::SamplingFailure(_)));

        let err = bounded_gaussian(&mut rng, 70.0, f64::INFINITY, Bounds::unbounded())
            .expect_err("infinite std dev");
        assert!(matches!(err, VitalsError::SamplingFailure(_)));
    }

    #[test]
    fn same_seed_reproduces_series() {
        let request = heart_rate_request(20, Trend::RisingSpike);
        assert_eq!(sample_all(request, 99), sample_all(request, 99));
        assert_ne!(sample_all(request, 99), sample_all(request, 100));
    }

    #[test]
    fn sampler_is_finite_and_exact_size() {
        let mut sampler = Sampler::new(
            heart_rate_request(3, Trend::None),
            StdRng::seed_from_u64(5),
        );
        assert_eq!(sampler.len(), 3);
        assert!(sampler.next().is_some());
        assert_eq!(sampler.len(), 2);
        assert!(sampler.next().is_some());
        assert!(sampler.next().is_some());
        assert!(sampler.next().is_none());
        assert!(sampler.next().is_none());
    }
}
