//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the generator and the submission client. Environment variables are read by the
//! binary only; the helpers here take the raw `Option<String>` so they stay pure and testable.

use crate::constants::{
    DEFAULT_FHIR_BASE_URL, DEFAULT_SUBMISSION_TIMEOUT_SECS, HEART_RATE_BASE_MEAN,
    HEART_RATE_STANDARD_DEVIATION, OBSERVATION_ENDPOINT,
};
use crate::sampler::{Bounds, SampleRequest};
use crate::trend::Trend;
use crate::{VitalsError, VitalsResult};
use std::time::Duration;

/// Baseline distribution for generated values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    base_mean: f64,
    base_std_dev: f64,
    bounds: Bounds,
}

impl GeneratorConfig {
    /// Create a new `GeneratorConfig`.
    pub fn new(base_mean: f64, base_std_dev: f64, bounds: Bounds) -> VitalsResult<Self> {
        // Same checks as a request; count is irrelevant here.
        SampleRequest::new(1, base_mean, base_std_dev, Trend::None, bounds)?;

        Ok(Self {
            base_mean,
            base_std_dev,
            bounds,
        })
    }

    /// Resting heart rate baseline, clamped at zero.
    pub fn heart_rate() -> Self {
        Self {
            base_mean: HEART_RATE_BASE_MEAN,
            base_std_dev: HEART_RATE_STANDARD_DEVIATION,
            bounds: Bounds::heart_rate(),
        }
    }

    pub fn base_mean(&self) -> f64 {
        self.base_mean
    }

    pub fn base_std_dev(&self) -> f64 {
        self.base_std_dev
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Build a [`SampleRequest`] for `count` observations with this baseline.
    pub fn sample_request(&self, count: usize, trend: Trend) -> VitalsResult<SampleRequest> {
        SampleRequest::new(count, self.base_mean, self.base_std_dev, trend, self.bounds)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::heart_rate()
    }
}

/// Where and how to submit observations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionConfig {
    base_url: String,
    timeout: Duration,
}

impl SubmissionConfig {
    /// Create a new `SubmissionConfig`.
    ///
    /// Trailing slashes on `base_url` are removed.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::InvalidArgument`] if `base_url` is not an absolute `http`/`https`
    /// URL or `timeout` is zero.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> VitalsResult<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();

        let parsed = reqwest::Url::parse(&base_url).map_err(|e| {
            VitalsError::InvalidArgument(format!("invalid FHIR base URL '{base_url}': {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(VitalsError::InvalidArgument(format!(
                "FHIR base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if timeout.is_zero() {
            return Err(VitalsError::InvalidArgument(
                "submission timeout must be greater than zero".into(),
            ));
        }

        Ok(Self { base_url, timeout })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base_url}/Observation`
    pub fn observation_url(&self) -> String {
        format!("{}/{}", self.base_url, OBSERVATION_ENDPOINT)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the RNG seed from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `None` (seed from entropy).
pub fn seed_from_env_value(value: Option<String>) -> VitalsResult<Option<u64>> {
    non_blank(value)
        .map(|v| {
            v.parse::<u64>().map_err(|e| {
                VitalsError::InvalidArgument(format!("invalid seed '{v}': {e}"))
            })
        })
        .transpose()
}

/// Resolve the FHIR base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_FHIR_BASE_URL`].
pub fn base_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_FHIR_BASE_URL.to_string())
}

/// Parse the submission timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_SUBMISSION_TIMEOUT_SECS`].
pub fn timeout_from_env_value(value: Option<String>) -> VitalsResult<Duration> {
    let secs = non_blank(value)
        .map(|v| {
            v.parse::<u64>().map_err(|e| {
                VitalsError::InvalidArgument(format!("invalid timeout '{v}': {e}"))
            })
        })
        .transpose()?;

    Ok(Duration::from_secs(secs.unwrap_or(DEFAULT_SUBMISSION_TIMEOUT_SECS)))
}
