//! FHIR-aligned heart-rate Observation wire models and translation helpers.
//!
//! This module provides both the domain-level carrier and the wire model for heart-rate
//! `Observation` resources, following the FHIR vital signs profile.
//!
//! Responsibilities:
//! - Define the public domain-level type for external API use
//! - Define a strict wire model for serialisation/deserialisation
//! - Provide translation helpers between domain primitives and the wire model
//! - Validate the fixed codings when reading a resource back
//!
//! Notes:
//! - The coding, category and unit blocks are fixed; only subject, time and value vary
//! - JSON field names and order are part of the contract with downstream FHIR consumers

use crate::constants::{
    HEART_RATE_DISPLAY, HEART_RATE_LOINC_CODE, HEART_RATE_UCUM_CODE, HEART_RATE_UNIT,
    LOINC_SYSTEM, OBSERVATION_CATEGORY_SYSTEM, OBSERVATION_RESOURCE_TYPE,
    OBSERVATION_STATUS_FINAL, UCUM_SYSTEM, VITAL_SIGNS_CATEGORY_CODE,
};
use crate::timestamp::{format_effective_date_time, parse_effective_date_time};
use crate::FhirError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for a single heart-rate observation.
///
/// Only the parts that vary between observations are held here. The LOINC code, vital-signs
/// category and UCUM unit are added by the wire layer. Values are fixed at construction; use
/// [`Observation::build`] to create one.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationData {
    subject_reference: String,
    effective: DateTime<FixedOffset>,
    value: f64,
}

impl ObservationData {
    /// Subject reference, exactly as supplied by the caller (e.g. `Patient/42`).
    pub fn subject_reference(&self) -> &str {
        &self.subject_reference
    }

    /// When the measurement was taken.
    pub fn effective(&self) -> DateTime<FixedOffset> {
        self.effective
    }

    /// Heart rate in beats per minute.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The `effectiveDateTime` string as it appears on the wire.
    pub fn effective_date_time(&self) -> String {
        format_effective_date_time(&self.effective)
    }
}

// ============================================================================
// Public Observation operations
// ============================================================================

/// Heart-rate Observation operations.
///
/// This is a zero-sized type used for namespacing observation-related operations.
/// All methods are associated functions.
pub struct Observation;

impl Observation {
    /// Build a heart-rate observation.
    ///
    /// This is a pure constructor. The subject reference is not validated and is carried
    /// verbatim into `subject.reference`.
    ///
    /// # Arguments
    ///
    /// * `subject_reference` - FHIR reference to the subject, for example `Patient/42`.
    /// * `value` - Heart rate in beats per minute.
    /// * `effective` - Time of measurement, with its UTC offset.
    pub fn build(
        subject_reference: impl Into<String>,
        value: f64,
        effective: DateTime<FixedOffset>,
    ) -> ObservationData {
        ObservationData {
            subject_reference: subject_reference.into(),
            effective,
            value,
        }
    }

    /// Convert an observation to a `serde_json::Value` in FHIR JSON shape.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidInput`] if the value is NaN or infinite, since JSON cannot
    /// carry it as a number.
    pub fn to_value(data: &ObservationData) -> Result<serde_json::Value, FhirError> {
        let wire = domain_to_wire(data)?;
        serde_json::to_value(&wire).map_err(|e| {
            FhirError::Translation(format!("Failed to serialise observation: {e}"))
        })
    }

    /// Render an observation as a single line of FHIR JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if the value is not finite or serialisation fails.
    pub fn render_json(data: &ObservationData) -> Result<String, FhirError> {
        let wire = domain_to_wire(data)?;
        serde_json::to_string(&wire).map_err(|e| {
            FhirError::Translation(format!("Failed to serialise observation: {e}"))
        })
    }

    /// Render an observation as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if the value is not finite or serialisation fails.
    pub fn render_yaml(data: &ObservationData) -> Result<String, FhirError> {
        let wire = domain_to_wire(data)?;
        serde_yaml::to_string(&wire).map_err(|e| {
            FhirError::Translation(format!("Failed to serialise observation: {e}"))
        })
    }

    /// Parse a heart-rate observation from FHIR JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `valueQuantity.value`) to the failing field when the JSON does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the JSON does not match the wire schema or contains unknown keys,
    /// - `resourceType` is not `Observation` or `status` is not `final`,
    /// - the code, category or unit blocks do not carry the heart-rate codings,
    /// - `effectiveDateTime` is not in `YYYY-MM-DDTHH:MM:SS±HHMM` form.
    pub fn parse(json_text: &str) -> Result<ObservationData, FhirError> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let wire = match serde_path_to_error::deserialize::<_, ObservationWire>(&mut deserializer)
        {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FhirError::Translation(format!(
                    "Observation schema mismatch at {path}: {source}"
                )));
            }
        };
        deserializer.end()?;

        wire_to_domain(wire)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of an Observation resource.
///
/// Field order matches the order FHIR consumers expect to see on the wire.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ObservationWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub status: String,

    pub subject: ReferenceWire,

    pub code: CodeableConceptWire,

    pub category: Vec<CodeableConceptWire>,

    #[serde(rename = "effectiveDateTime")]
    pub effective_date_time: String,

    #[serde(rename = "valueQuantity")]
    pub value_quantity: QuantityWire,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ReferenceWire {
    pub reference: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CodeableConceptWire {
    pub coding: Vec<CodingWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CodingWire {
    pub system: String,

    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct QuantityWire {
    pub value: f64,
    pub unit: String,
    pub system: String,
    pub code: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn heart_rate_code() -> CodeableConceptWire {
    CodeableConceptWire {
        coding: vec![CodingWire {
            system: LOINC_SYSTEM.to_string(),
            code: HEART_RATE_LOINC_CODE.to_string(),
            display: Some(HEART_RATE_DISPLAY.to_string()),
        }],
    }
}

fn vital_signs_category() -> CodeableConceptWire {
    CodeableConceptWire {
        coding: vec![CodingWire {
            system: OBSERVATION_CATEGORY_SYSTEM.to_string(),
            code: VITAL_SIGNS_CATEGORY_CODE.to_string(),
            display: None,
        }],
    }
}

fn has_coding(concept: &CodeableConceptWire, system: &str, code: &str) -> bool {
    concept
        .coding
        .iter()
        .any(|c| c.system == system && c.code == code)
}

/// Convert the domain carrier to wire format.
fn domain_to_wire(data: &ObservationData) -> Result<ObservationWire, FhirError> {
    if !data.value.is_finite() {
        return Err(FhirError::InvalidInput(format!(
            "observation value must be finite, got {}",
            data.value
        )));
    }

    Ok(ObservationWire {
        resource_type: OBSERVATION_RESOURCE_TYPE.to_string(),
        status: OBSERVATION_STATUS_FINAL.to_string(),
        subject: ReferenceWire {
            reference: data.subject_reference.clone(),
        },
        code: heart_rate_code(),
        category: vec![vital_signs_category()],
        effective_date_time: format_effective_date_time(&data.effective),
        value_quantity: QuantityWire {
            value: data.value,
            unit: HEART_RATE_UNIT.to_string(),
            system: UCUM_SYSTEM.to_string(),
            code: HEART_RATE_UCUM_CODE.to_string(),
        },
    })
}

/// Convert wire format to the domain carrier, checking the fixed codings.
fn wire_to_domain(wire: ObservationWire) -> Result<ObservationData, FhirError> {
    if wire.resource_type != OBSERVATION_RESOURCE_TYPE {
        return Err(FhirError::InvalidInput(format!(
            "Expected resourceType '{OBSERVATION_RESOURCE_TYPE}', got '{}'",
            wire.resource_type
        )));
    }

    if wire.status != OBSERVATION_STATUS_FINAL {
        return Err(FhirError::InvalidInput(format!(
            "Expected status '{OBSERVATION_STATUS_FINAL}', got '{}'",
            wire.status
        )));
    }

    if !has_coding(&wire.code, LOINC_SYSTEM, HEART_RATE_LOINC_CODE) {
        return Err(FhirError::InvalidInput(format!(
            "Observation code does not include LOINC {HEART_RATE_LOINC_CODE}"
        )));
    }

    if !wire
        .category
        .iter()
        .any(|c| has_coding(c, OBSERVATION_CATEGORY_SYSTEM, VITAL_SIGNS_CATEGORY_CODE))
    {
        return Err(FhirError::InvalidInput(format!(
            "Observation category does not include '{VITAL_SIGNS_CATEGORY_CODE}'"
        )));
    }

    let quantity = &wire.value_quantity;
    if quantity.system != UCUM_SYSTEM || quantity.code != HEART_RATE_UCUM_CODE {
        return Err(FhirError::InvalidInput(format!(
            "Expected UCUM unit '{HEART_RATE_UCUM_CODE}', got '{}' in '{}'",
            quantity.code, quantity.system
        )));
    }

    let effective = parse_effective_date_time(&wire.effective_date_time)?;

    Ok(ObservationData {
        subject_reference: wire.subject.reference,
        effective,
        value: wire.value_quantity.value,
    })
}
