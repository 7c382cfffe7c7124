//! Shared form-field parsing for the console.
//!
//! Console forms submit everything as strings; these helpers turn them
//! into domain values and produce the banner messages shown when a field
//! does not parse. Kept free of axum types so they can be tested
//! directly.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format accepted from `<input type="datetime-local">`.
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Whether a checkbox field was submitted.
///
/// Browsers omit unchecked checkboxes entirely, so any present value
/// counts as checked.
#[must_use]
pub const fn checkbox_checked(value: &Option<String>) -> bool {
    value.is_some()
}

/// Empty-or-whitespace strings become `None`.
#[must_use]
pub fn non_empty(input: String) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input)
    }
}

/// Parse an optional integer field (display order).
///
/// # Errors
///
/// Returns a banner message if the field is non-empty but not an
/// integer.
pub fn parse_optional_int(field: &str, input: &str) -> Result<Option<i32>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| format!("{field} must be a whole number"))
}

/// Parse a required integer field (skill percent).
///
/// # Errors
///
/// Returns a banner message if the field is empty or not an integer.
pub fn parse_required_int(field: &str, input: &str) -> Result<i32, String> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("{field} must be a whole number"))
}

/// Parse an optional `datetime-local` field as UTC.
///
/// The console's wall clock is defined to be UTC; the value is stored
/// without timezone conversion.
///
/// # Errors
///
/// Returns a banner message if the field is non-empty but malformed.
pub fn parse_datetime_local(field: &str, input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(trimmed, DATETIME_LOCAL_FORMAT)
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| format!("{field} must look like 2026-08-06T14:30"))
}

/// Format an optional instant back into a `datetime-local` input value.
#[must_use]
pub fn format_datetime_local(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(String::new, |instant| {
        instant.format(DATETIME_LOCAL_FORMAT).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_checkbox_checked() {
        assert!(checkbox_checked(&Some("on".to_string())));
        assert!(checkbox_checked(&Some(String::new())));
        assert!(!checkbox_checked(&None));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }

    #[test]
    fn test_parse_optional_int() {
        assert_eq!(parse_optional_int("Order", ""), Ok(None));
        assert_eq!(parse_optional_int("Order", " 3 "), Ok(Some(3)));
        assert!(parse_optional_int("Order", "three").is_err());
    }

    #[test]
    fn test_parse_required_int() {
        assert_eq!(parse_required_int("Percent", "85"), Ok(85));
        assert!(parse_required_int("Percent", "").is_err());
    }

    #[test]
    fn test_datetime_local_roundtrip() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).single();
        let formatted = format_datetime_local(instant);
        assert_eq!(formatted, "2026-08-06T14:30");
        assert_eq!(
            parse_datetime_local("Start", &formatted),
            Ok(instant)
        );
    }

    #[test]
    fn test_datetime_local_empty_and_malformed() {
        assert_eq!(parse_datetime_local("Start", " "), Ok(None));
        assert!(parse_datetime_local("Start", "06/08/2026").is_err());
    }

    #[test]
    fn test_format_datetime_local_none() {
        assert_eq!(format_datetime_local(None), "");
    }
}
