//! Connector configuration
//!
//! The configuration arrives as a JSON value from an external loader
//! (CLI flag, config file, or orchestration harness). Recognized keys:
//!
//! | key | effect |
//! |---|---|
//! | `domain` | hostname used to build `https://{domain}/api/v2/admin` |
//! | `api_token` | credential for the `Authorization: Token token=...` header |
//! | `start_date` | inclusive lower bound (date) of the `updated_at` filter |
//! | `end_date` | inclusive upper bound (date); defaults to today |
//! | `include_notes` | when true, exposes the `customer_notes` stream |

use crate::error::{Error, Result};
use crate::types::JsonValue;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Date format accepted for `start_date` / `end_date`
const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Connector Config
// ============================================================================

/// Validated connector configuration
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// ecforce shop hostname (e.g. `example.ec-force.com`)
    pub domain: String,
    /// Admin API token
    pub api_token: String,
    /// Date window applied to the `updated_at` filter
    pub window: DateWindow,
    /// Whether the `customer_notes` stream is exposed
    pub include_notes: bool,
}

impl ConnectorConfig {
    /// Parse and validate a configuration from an external JSON value.
    ///
    /// `end_date` defaults to the invocation date when absent.
    pub fn from_value(config: &JsonValue) -> Result<Self> {
        let domain = required_string(config, "domain")?;
        let api_token = required_string(config, "api_token")?;

        let start = parse_date("start_date", &required_string(config, "start_date")?)?;
        let end = match config.get("end_date").and_then(JsonValue::as_str) {
            Some(raw) if !raw.is_empty() => parse_date("end_date", raw)?,
            _ => Local::now().date_naive(),
        };

        let window = DateWindow::new(start, end)?;

        let include_notes = config
            .get("include_notes")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);

        Ok(Self {
            domain,
            api_token,
            window,
            include_notes,
        })
    }
}

fn required_string(config: &JsonValue, field: &str) -> Result<String> {
    config
        .get(field)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or_else(|| Error::missing_field(field))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| Error::invalid_value(field, format!("expected YYYY-MM-DD, got {raw:?}: {e}")))
}

// ============================================================================
// Date Window
// ============================================================================

/// Inclusive date range filtering the upstream `updated_at` timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive lower bound
    pub start: NaiveDate,
    /// Inclusive upper bound
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, enforcing `start <= end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_value(
                "start_date",
                format!("start_date {start} is after end_date {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Lower filter bound: `{start} 00:00:00`
    pub fn lower_bound(&self) -> String {
        format!("{} 00:00:00", self.start.format(DATE_FORMAT))
    }

    /// Upper filter bound: `{end} 23:59:59`
    pub fn upper_bound(&self) -> String {
        format!("{} 23:59:59", self.end.format(DATE_FORMAT))
    }
}

// ============================================================================
// Spec Config (for UI)
// ============================================================================

/// Configuration specification served by `spec()`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecConfig {
    /// Configuration properties
    #[serde(default)]
    pub properties: HashMap<String, PropertyConfig>,
}

/// Configuration property definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Property type
    #[serde(rename = "type", default)]
    pub property_type: String,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// Property description
    #[serde(default)]
    pub description: Option<String>,

    /// Whether this is a secret (should be masked)
    #[serde(default)]
    pub secret: bool,

    /// Whether this property is required
    #[serde(default)]
    pub required: bool,

    /// Default value
    #[serde(default)]
    pub default: Option<JsonValue>,

    /// Format hint (e.g., "date")
    #[serde(default)]
    pub format: Option<String>,
}

impl PropertyConfig {
    fn string(title: &str, description: &str) -> Self {
        Self {
            property_type: "string".to_string(),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..Self::default()
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

/// The property table for this connector's configuration
pub fn spec_config() -> SpecConfig {
    let mut properties = HashMap::new();
    properties.insert(
        "domain".to_string(),
        PropertyConfig::string("Domain", "ecforce shop domain, e.g. example.ec-force.com")
            .required(),
    );
    properties.insert(
        "api_token".to_string(),
        PropertyConfig::string("API Token", "ecforce admin API token")
            .required()
            .secret(),
    );
    properties.insert(
        "start_date".to_string(),
        PropertyConfig::string(
            "Start Date",
            "Inclusive lower bound (YYYY-MM-DD) of the updated_at filter",
        )
        .required()
        .format("date"),
    );
    properties.insert(
        "end_date".to_string(),
        PropertyConfig::string(
            "End Date",
            "Inclusive upper bound (YYYY-MM-DD); defaults to today",
        )
        .format("date"),
    );
    properties.insert(
        "include_notes".to_string(),
        PropertyConfig {
            property_type: "boolean".to_string(),
            title: Some("Include Notes".to_string()),
            description: Some("Expose the customer_notes stream".to_string()),
            default: Some(JsonValue::Bool(false)),
            ..PropertyConfig::default()
        },
    );
    SpecConfig { properties }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn valid_config() -> JsonValue {
        json!({
            "domain": "test.ec-force.com",
            "api_token": "test-token-123",
            "start_date": "2025-01-01",
            "end_date": "2025-01-31",
            "include_notes": true
        })
    }

    #[test]
    fn test_parse_full_config() {
        let config = ConnectorConfig::from_value(&valid_config()).unwrap();
        assert_eq!(config.domain, "test.ec-force.com");
        assert_eq!(config.api_token, "test-token-123");
        assert_eq!(config.window.lower_bound(), "2025-01-01 00:00:00");
        assert_eq!(config.window.upper_bound(), "2025-01-31 23:59:59");
        assert!(config.include_notes);
    }

    #[test]
    fn test_include_notes_defaults_false() {
        let mut raw = valid_config();
        raw.as_object_mut().unwrap().remove("include_notes");
        let config = ConnectorConfig::from_value(&raw).unwrap();
        assert!(!config.include_notes);
    }

    #[test]
    fn test_end_date_defaults_to_today() {
        let mut raw = valid_config();
        raw.as_object_mut().unwrap().remove("end_date");
        let config = ConnectorConfig::from_value(&raw).unwrap();
        assert_eq!(config.window.end, Local::now().date_naive());
    }

    #[test]
    fn test_missing_required_field() {
        let mut raw = valid_config();
        raw.as_object_mut().unwrap().remove("api_token");
        let err = ConnectorConfig::from_value(&raw).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { field } if field == "api_token"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut raw = valid_config();
        raw["start_date"] = json!("2025/01/01");
        let err = ConnectorConfig::from_value(&raw).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { field, .. } if field == "start_date"));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut raw = valid_config();
        raw["start_date"] = json!("2025-02-01");
        assert!(ConnectorConfig::from_value(&raw).is_err());
    }

    #[test]
    fn test_spec_config_properties() {
        let spec = spec_config();
        assert!(spec.properties["domain"].required);
        assert!(spec.properties["api_token"].secret);
        assert_eq!(
            spec.properties["start_date"].format.as_deref(),
            Some("date")
        );
        assert!(!spec.properties["include_notes"].required);
    }
}
