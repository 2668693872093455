//! # vitalsim Core
//!
//! Core logic for generating synthetic heart-rate observations.
//!
//! This crate contains:
//! - Trended, bounded Gaussian sampling ([`Sampler`], [`Trend`], [`Bounds`])
//! - The daily timestamp raster ([`day_raster`])
//! - Composition of the two into FHIR observations ([`generate_observations`])
//! - A blocking submission client for a FHIR server ([`FhirHttpClient`])
//!
//! **No CLI concerns**: argument parsing, environment reading and output formatting belong in
//! the `vitalsim` binary. FHIR wire formats belong in the `fhir` crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod generate;
pub mod raster;
pub mod sampler;
pub mod submission;
pub mod trend;

pub use config::{GeneratorConfig, SubmissionConfig};
pub use constants::*;
pub use error::{VitalsError, VitalsResult};
pub use generate::{collect_observations, generate_observations, ObservationStream};
pub use raster::{day_raster, local_now, truncate_to_second, DayRaster};
pub use sampler::{bounded_gaussian, Bounds, SampleRequest, SampledPoint, Sampler};
pub use submission::{FhirHttpClient, ObservationSubmitter};
pub use trend::{Trend, TrendParameters};

pub use fhir::{Observation, ObservationData};
