//! Fixed codings for the FHIR heart-rate vital sign profile.
//!
//! See <https://www.hl7.org/fhir/heartrate.html>.

/// FHIR resource type emitted by this crate.
pub const OBSERVATION_RESOURCE_TYPE: &str = "Observation";

/// Observation status for generated readings.
pub const OBSERVATION_STATUS_FINAL: &str = "final";

/// LOINC code system URI.
pub const LOINC_SYSTEM: &str = "http://loinc.org";

/// LOINC code for heart rate.
pub const HEART_RATE_LOINC_CODE: &str = "8867-4";

/// Display text for the heart rate LOINC code.
pub const HEART_RATE_DISPLAY: &str = "Heart rate";

/// HL7 observation category code system URI.
pub const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";

/// Observation category code for vital signs.
pub const VITAL_SIGNS_CATEGORY_CODE: &str = "vital-signs";

/// UCUM code system URI.
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

/// Human-readable unit label for heart rate.
pub const HEART_RATE_UNIT: &str = "beats/minute";

/// UCUM code for "per minute".
pub const HEART_RATE_UCUM_CODE: &str = "/min";

/// Media type for FHIR JSON payloads.
pub const FHIR_JSON_CONTENT_TYPE: &str = "application/fhir+json";
