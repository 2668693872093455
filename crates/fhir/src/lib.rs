//! FHIR wire/boundary support for synthetic vital-sign data.
//!
//! This crate provides **wire models** and **format/translation helpers** for the FHIR resources
//! that vitalsim emits:
//! - JSON `Observation` resources (the format FHIR servers accept)
//! - YAML renderings of the same resources, for human inspection
//!
//! This crate focuses on:
//! - FHIR semantic alignment of the heart-rate vital sign profile
//! - serialisation/deserialisation
//! - translation between domain primitives and wire structs
//!
//! It does not talk to servers. HTTP submission lives in `vitalsim-core`.

pub mod constants;
pub mod observation;
pub mod timestamp;

// Re-export facades
pub use observation::Observation;

// Re-export public domain-level types
pub use observation::ObservationData;
pub use timestamp::{format_effective_date_time, parse_effective_date_time};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
