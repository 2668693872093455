//! Constants used throughout the vitalsim core crate.
//!
//! Defaults for generation and submission live here so the CLI and the library agree on them.

/// Mean resting heart rate (beats/minute) used as the baseline.
///
/// Source: <https://www.researchgate.net/figure/A-Mean-and-standard-deviation-of-participants-heart-rate-obtained-from-TOI-and_fig5_323013847>
pub const HEART_RATE_BASE_MEAN: f64 = 70.59;

/// Standard deviation of resting heart rate (beats/minute), from the same source.
pub const HEART_RATE_STANDARD_DEVIATION: f64 = 8.36;

/// Subject reference used when none is given.
pub const DEFAULT_SUBJECT: &str = "Patient/example";

/// Number of daily observations generated when none is given.
pub const DEFAULT_OBSERVATION_COUNT: usize = 10;

/// Public HAPI test server. Do not submit anything but synthetic data here.
pub const DEFAULT_FHIR_BASE_URL: &str = "http://hapi.fhir.org/baseR4";

/// HTTP timeout for a single submission.
pub const DEFAULT_SUBMISSION_TIMEOUT_SECS: u64 = 30;

/// Path segment for the Observation endpoint, relative to the FHIR base URL.
pub const OBSERVATION_ENDPOINT: &str = "Observation";
