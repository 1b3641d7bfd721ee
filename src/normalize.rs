//! Date/time normalization for ecforce payloads
//!
//! The API returns timestamps as `YYYY/MM/DD HH:MM:SS` and dates as
//! `YYYY/MM/DD`. Both conversions are total: values that fail to parse are
//! passed through unchanged so downstream consumers still see the raw data,
//! and empty/absent input maps to absent.

use crate::types::{JsonObject, JsonValue};
use chrono::{NaiveDate, NaiveDateTime};

/// Source timestamp pattern
const ECFORCE_DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
/// Source date pattern
const ECFORCE_DATE_FORMAT: &str = "%Y/%m/%d";

/// Convert an ecforce timestamp to ISO 8601 combined form
/// (`2025/07/09 13:03:03` → `2025-07-09T13:03:03`).
///
/// Returns the input unchanged when it does not match the source pattern,
/// and `None` for empty or absent input.
pub fn normalize_datetime(input: Option<&str>) -> Option<String> {
    let raw = input?;
    if raw.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(raw, ECFORCE_DATETIME_FORMAT) {
        Ok(dt) => Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        Err(_) => Some(raw.to_string()),
    }
}

/// Convert an ecforce date to ISO 8601 date form
/// (`1990/01/01` → `1990-01-01`).
///
/// Same pass-through semantics as [`normalize_datetime`].
pub fn normalize_date(input: Option<&str>) -> Option<String> {
    let raw = input?;
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, ECFORCE_DATE_FORMAT) {
        Ok(date) => Some(date.format("%Y-%m-%d").to_string()),
        Err(_) => Some(raw.to_string()),
    }
}

/// Normalize a timestamp attribute in place.
///
/// Only string values are rewritten; nulls and absent keys are left as-is.
pub fn normalize_datetime_field(attributes: &mut JsonObject, key: &str) {
    normalize_field(attributes, key, normalize_datetime);
}

/// Normalize a date attribute in place.
pub fn normalize_date_field(attributes: &mut JsonObject, key: &str) {
    normalize_field(attributes, key, normalize_date);
}

fn normalize_field(
    attributes: &mut JsonObject,
    key: &str,
    convert: fn(Option<&str>) -> Option<String>,
) {
    let Some(JsonValue::String(raw)) = attributes.get(key) else {
        return;
    };
    let replacement = match convert(Some(raw)) {
        Some(normalized) => JsonValue::String(normalized),
        None => JsonValue::Null,
    };
    attributes.insert(key.to_string(), replacement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(Some("2025/07/09 13:03:03"), Some("2025-07-09T13:03:03"); "valid timestamp")]
    #[test_case(Some("2024/12/31 23:59:59"), Some("2024-12-31T23:59:59"); "year boundary")]
    #[test_case(Some("invalid"), Some("invalid"); "malformed passes through")]
    #[test_case(Some("2025-07-09T13:03:03"), Some("2025-07-09T13:03:03"); "already iso unchanged")]
    #[test_case(Some(""), None; "empty maps to absent")]
    #[test_case(None, None; "absent stays absent")]
    fn test_normalize_datetime(input: Option<&str>, expected: Option<&str>) {
        assert_eq!(normalize_datetime(input).as_deref(), expected);
    }

    #[test_case(Some("1990/01/01"), Some("1990-01-01"); "valid date")]
    #[test_case(Some("2025/12/31"), Some("2025-12-31"); "end of year")]
    #[test_case(Some("invalid"), Some("invalid"); "malformed passes through")]
    #[test_case(Some(""), None; "empty maps to absent")]
    #[test_case(None, None; "absent stays absent")]
    fn test_normalize_date(input: Option<&str>, expected: Option<&str>) {
        assert_eq!(normalize_date(input).as_deref(), expected);
    }

    #[test]
    fn test_iso_output_stable_under_reapplication() {
        let once = normalize_datetime(Some("2025/07/09 13:03:03")).unwrap();
        let twice = normalize_datetime(Some(&once)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_datetime_field_in_place() {
        let mut attrs = json!({
            "created_at": "2024/01/01 09:00:00",
            "updated_at": "garbled",
            "deleted_at": null
        })
        .as_object()
        .unwrap()
        .clone();

        normalize_datetime_field(&mut attrs, "created_at");
        normalize_datetime_field(&mut attrs, "updated_at");
        normalize_datetime_field(&mut attrs, "deleted_at");
        normalize_datetime_field(&mut attrs, "missing");

        assert_eq!(attrs["created_at"], json!("2024-01-01T09:00:00"));
        assert_eq!(attrs["updated_at"], json!("garbled"));
        assert_eq!(attrs["deleted_at"], json!(null));
        assert!(!attrs.contains_key("missing"));
    }

    #[test]
    fn test_normalize_date_field_in_place() {
        let mut attrs = json!({ "birth": "1990/01/01" }).as_object().unwrap().clone();
        normalize_date_field(&mut attrs, "birth");
        assert_eq!(attrs["birth"], json!("1990-01-01"));
    }

    #[test]
    fn test_empty_string_field_becomes_null() {
        let mut attrs = json!({ "created_at": "" }).as_object().unwrap().clone();
        normalize_datetime_field(&mut attrs, "created_at");
        assert_eq!(attrs["created_at"], json!(null));
    }
}
