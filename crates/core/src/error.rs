#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("sampling failed: {0}")]
    SamplingFailure(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("failed to submit observation: {0}")]
    SubmissionFailure(reqwest::Error),

    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
}

pub type VitalsResult<T> = std::result::Result<T, VitalsError>;
