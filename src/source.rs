//! Connector facade
//!
//! Assembles the customers and notes extractors into a named set of
//! streams, serves the connector spec and catalog, runs the one-page
//! connectivity probe, and drives full reads.

use crate::api::EcforceClient;
use crate::config::{spec_config, ConnectorConfig, SpecConfig};
use crate::error::{Error, Result};
use crate::streams::{CustomersExtractor, EcforceStream, NotesExtractor};
use crate::types::{JsonValue, LogLevel, SyncMode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Connector Spec
// ============================================================================

/// Connector specification returned by `spec()`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Connector name
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// Configuration specification
    pub spec: SpecConfig,
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Discovered catalog (available streams)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<CatalogStream>,
}

/// Stream in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStream {
    /// Stream name
    pub name: String,

    /// JSON schema for the stream
    #[serde(default)]
    pub json_schema: JsonValue,

    /// Supported sync modes
    #[serde(default)]
    pub supported_sync_modes: Vec<SyncMode>,

    /// Source-defined primary key
    #[serde(default)]
    pub source_defined_primary_key: Option<Vec<Vec<String>>>,
}

// ============================================================================
// Messages
// ============================================================================

/// A message emitted during read
#[derive(Debug, Clone)]
pub enum Message {
    /// A single output record
    Record {
        /// Stream name
        stream: String,
        /// The record data
        record: JsonValue,
    },
    /// Log message
    Log {
        /// Log level
        level: LogLevel,
        /// Log message
        message: String,
    },
}

impl Message {
    /// Create a record message
    pub fn record(stream: impl Into<String>, record: JsonValue) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
        }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// Create an info log
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Core operations a source connector exposes to the harness
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification (for UI/validation)
    fn spec(&self) -> ConnectorSpec;

    /// Tests if credentials and configuration are valid
    async fn check(&self, config: &JsonValue) -> CheckResult;

    /// Lists available streams from the source
    async fn discover(&self, config: &JsonValue) -> Result<Catalog>;

    /// Reads data from the selected streams (all when `None`)
    async fn read(&self, config: &JsonValue, selected: Option<&[String]>)
        -> Result<Vec<Message>>;
}

// ============================================================================
// Source
// ============================================================================

/// The ecforce source connector
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceEcforce;

impl SourceEcforce {
    /// Create the connector
    pub fn new() -> Self {
        Self
    }

    async fn probe(&self, config: &JsonValue) -> Result<()> {
        let config = ConnectorConfig::from_value(config)?;
        let stream = build_stream(&config, Box::new(CustomersExtractor))?;
        // at most one page request
        stream.read_pages(Some(1)).await?;
        Ok(())
    }

    /// Build the active streams for a configuration.
    ///
    /// Customers is always present; notes only when `include_notes` is set.
    pub fn streams(&self, config: &ConnectorConfig) -> Result<Vec<EcforceStream>> {
        let mut streams = vec![build_stream(config, Box::new(CustomersExtractor))?];
        if config.include_notes {
            streams.push(build_stream(config, Box::new(NotesExtractor))?);
        }
        Ok(streams)
    }
}

#[async_trait]
impl Connector for SourceEcforce {
    fn spec(&self) -> ConnectorSpec {
        ConnectorSpec {
            name: "source-ecforce".to_string(),
            title: "ecforce".to_string(),
            description: Some(
                "Extracts customers and customer notes from the ecforce admin API".to_string(),
            ),
            spec: spec_config(),
        }
    }

    /// Test connectivity with a single-page probe via the customers stream.
    ///
    /// Zero records still counts as success; any failure is converted into
    /// a structured negative result and never raised.
    async fn check(&self, config: &JsonValue) -> CheckResult {
        match self.probe(config).await {
            Ok(()) => CheckResult::success(),
            Err(e) => CheckResult::failure(format!("Unable to connect to ecforce API: {e}")),
        }
    }

    /// List available streams with their schemas and primary keys
    async fn discover(&self, config: &JsonValue) -> Result<Catalog> {
        let config = ConnectorConfig::from_value(config)?;
        let streams = self
            .streams(&config)?
            .iter()
            .map(|stream| CatalogStream {
                name: stream.name().to_string(),
                json_schema: stream.json_schema(),
                supported_sync_modes: vec![SyncMode::FullRefresh],
                source_defined_primary_key: Some(vec![vec![stream.primary_key().to_string()]]),
            })
            .collect();
        Ok(Catalog { streams })
    }

    /// Read all records from the selected streams.
    ///
    /// Each stream independently walks every page of the window; an
    /// unrecovered failure aborts the run with the underlying error.
    async fn read(
        &self,
        config: &JsonValue,
        selected: Option<&[String]>,
    ) -> Result<Vec<Message>> {
        let config = ConnectorConfig::from_value(config)?;
        let streams = self.streams(&config)?;

        if let Some(names) = selected {
            for name in names {
                if !streams.iter().any(|s| s.name() == name) {
                    return Err(Error::stream_not_found(name));
                }
            }
        }

        let mut messages = Vec::new();
        for stream in &streams {
            if let Some(names) = selected {
                if !names.iter().any(|n| n == stream.name()) {
                    continue;
                }
            }

            info!(stream = stream.name(), "starting sync");
            messages.push(Message::info(format!(
                "Starting sync for stream: {}",
                stream.name()
            )));

            let records = stream.read_records().await?;
            let count = records.len();
            for record in records {
                messages.push(Message::record(stream.name(), JsonValue::Object(record)));
            }

            info!(stream = stream.name(), records = count, "sync complete");
            messages.push(Message::info(format!(
                "Completed sync for {}: {count} records",
                stream.name()
            )));
        }
        Ok(messages)
    }
}

fn build_stream(
    config: &ConnectorConfig,
    extractor: Box<dyn crate::streams::RecordExtractor>,
) -> Result<EcforceStream> {
    let client = EcforceClient::new(&config.domain, &config.api_token)?;
    Ok(EcforceStream::new(extractor, client, config.window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> JsonValue {
        json!({
            "domain": "test.ec-force.com",
            "api_token": "test-token-123",
            "start_date": "2025-01-01",
            "end_date": "2025-01-31",
            "include_notes": true
        })
    }

    #[test]
    fn test_spec_lists_all_config_keys() {
        let spec = SourceEcforce::new().spec();
        assert_eq!(spec.name, "source-ecforce");
        for key in ["domain", "api_token", "start_date", "end_date", "include_notes"] {
            assert!(spec.spec.properties.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_streams_without_notes() {
        let mut raw = config();
        raw["include_notes"] = json!(false);
        let parsed = ConnectorConfig::from_value(&raw).unwrap();
        let streams = SourceEcforce::new().streams(&parsed).unwrap();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].name(), "customers");
    }

    #[test]
    fn test_streams_with_notes() {
        let parsed = ConnectorConfig::from_value(&config()).unwrap();
        let streams = SourceEcforce::new().streams(&parsed).unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].name(), "customers");
        assert_eq!(streams[1].name(), "customer_notes");
    }

    #[tokio::test]
    async fn test_discover_includes_primary_keys() {
        let catalog = SourceEcforce::new().discover(&config()).await.unwrap();
        assert_eq!(catalog.streams.len(), 2);
        for stream in &catalog.streams {
            assert_eq!(
                stream.source_defined_primary_key,
                Some(vec![vec!["id".to_string()]])
            );
            assert_eq!(stream.supported_sync_modes, vec![SyncMode::FullRefresh]);
            assert_eq!(stream.json_schema["required"], json!(["id"]));
        }
    }

    #[tokio::test]
    async fn test_check_with_bad_config_is_negative_not_error() {
        let result = SourceEcforce::new().check(&json!({})).await;
        assert!(!result.success);
        assert!(result
            .message
            .unwrap()
            .contains("Unable to connect to ecforce API"));
    }

    #[tokio::test]
    async fn test_read_unknown_stream_rejected() {
        let err = SourceEcforce::new()
            .read(&config(), Some(&["orders".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StreamNotFound { stream } if stream == "orders"));
    }

    #[test]
    fn test_check_result_constructors() {
        assert!(CheckResult::success().success);
        let failure = CheckResult::failure("boom");
        assert!(!failure.success);
        assert_eq!(failure.message.as_deref(), Some("boom"));
    }
}
