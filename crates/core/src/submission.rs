//! Submission of observations to a FHIR server.
//!
//! Each observation is sent as its own `POST {base}/Observation` with a FHIR JSON body. There is
//! no retry and the response body is returned as-is without interpretation.

use crate::config::SubmissionConfig;
use crate::{VitalsError, VitalsResult};
use fhir::constants::FHIR_JSON_CONTENT_TYPE;
use fhir::{Observation, ObservationData};
use reqwest::header::CONTENT_TYPE;

/// Something that can accept an observation and report the server's reply.
pub trait ObservationSubmitter {
    /// Submit one observation, returning the raw response body.
    fn submit(&self, observation: &ObservationData) -> VitalsResult<String>;
}

/// Blocking HTTP client for a FHIR server's Observation endpoint.
#[derive(Clone, Debug)]
pub struct FhirHttpClient {
    client: reqwest::blocking::Client,
    observation_url: String,
}

impl FhirHttpClient {
    /// Build a client with the configured timeout.
    pub fn new(config: &SubmissionConfig) -> VitalsResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(VitalsError::HttpClient)?;

        Ok(Self::with_client(client, config))
    }

    /// Use an existing `reqwest` client. The client's own timeout applies.
    pub fn with_client(client: reqwest::blocking::Client, config: &SubmissionConfig) -> Self {
        Self {
            client,
            observation_url: config.observation_url(),
        }
    }

    pub fn observation_url(&self) -> &str {
        &self.observation_url
    }
}

impl ObservationSubmitter for FhirHttpClient {
    fn submit(&self, observation: &ObservationData) -> VitalsResult<String> {
        let body = Observation::render_json(observation)?;

        tracing::debug!(url = %self.observation_url, "posting observation");

        let response = self
            .client
            .post(&self.observation_url)
            .header(CONTENT_TYPE, FHIR_JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(VitalsError::SubmissionFailure)?;

        let status = response.status();
        let text = response.text().map_err(VitalsError::SubmissionFailure)?;

        tracing::info!(
            status = status.as_u16(),
            subject = observation.subject_reference(),
            effective = %observation.effective_date_time(),
            "observation submitted"
        );

        Ok(text)
    }
}
