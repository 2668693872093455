//! `effectiveDateTime` formatting.
//!
//! FHIR servers accept several dateTime shapes. vitalsim always writes local time with a numeric
//! UTC offset and no separator in the offset, e.g. `2026-10-19T08:30:00+0100`. Subseconds are
//! dropped.

use crate::FhirError;
use chrono::{DateTime, FixedOffset};

/// chrono format string for `effectiveDateTime`.
pub const EFFECTIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS±HHMM`.
pub fn format_effective_date_time(value: &DateTime<FixedOffset>) -> String {
    value.format(EFFECTIVE_DATE_TIME_FORMAT).to_string()
}

/// Parse a timestamp previously written by [`format_effective_date_time`].
///
/// # Errors
///
/// Returns [`FhirError::InvalidTimestamp`] if `text` is not in `YYYY-MM-DDTHH:MM:SS±HHMM` form.
pub fn parse_effective_date_time(text: &str) -> Result<DateTime<FixedOffset>, FhirError> {
    DateTime::parse_from_str(text, EFFECTIVE_DATE_TIME_FORMAT)
        .map_err(|e| FhirError::InvalidTimestamp(format!("'{text}': {e}")))
}
