//! CLI runner - executes commands
//!
//! All output is newline-delimited JSON messages on stdout
//! (`SPEC`, `CONNECTION_STATUS`, `CATALOG`, `RECORD`, `LOG`), so the
//! connector can be driven by an orchestration harness.

use crate::cli::commands::{Cli, Commands};
use crate::error::{Error, Result};
use crate::source::{Connector, Message, SourceEcforce};
use crate::types::JsonValue;
use serde_json::json;
use std::fs;

/// CLI runner
pub struct Runner {
    cli: Cli,
    source: SourceEcforce,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            source: SourceEcforce::new(),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(),
            Commands::Check { config_json } => self.check(config_json.as_deref()).await,
            Commands::Discover { config_json } => self.discover(config_json.as_deref()).await,
            Commands::Read {
                streams,
                config_json,
            } => self.read(streams.as_deref(), config_json.as_deref()).await,
        }
    }

    /// Load configuration (inline JSON takes precedence over the file flag)
    fn load_config(&self, inline: Option<&str>) -> Result<JsonValue> {
        if let Some(json_str) = inline {
            return serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        if let Some(path) = &self.cli.config {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
            return serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        Ok(json!({}))
    }

    fn spec(&self) -> Result<()> {
        let spec = self.source.spec();
        self.output_message(&json!({
            "type": "SPEC",
            "spec": spec
        }));
        Ok(())
    }

    async fn check(&self, config_json: Option<&str>) -> Result<()> {
        let config = self.load_config(config_json)?;
        let result = self.source.check(&config).await;

        let status = if result.success { "SUCCEEDED" } else { "FAILED" };
        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": status,
                "message": result.message.unwrap_or_else(|| "Connection successful".to_string())
            }
        }));
        Ok(())
    }

    async fn discover(&self, config_json: Option<&str>) -> Result<()> {
        let config = self.load_config(config_json)?;
        let catalog = self.source.discover(&config).await?;
        self.output_message(&json!({
            "type": "CATALOG",
            "catalog": catalog
        }));
        Ok(())
    }

    async fn read(&self, streams: Option<&str>, config_json: Option<&str>) -> Result<()> {
        let config = self.load_config(config_json)?;

        let selected: Option<Vec<String>> = streams.map(|s| {
            s.split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        });

        let messages = self.source.read(&config, selected.as_deref()).await?;
        let emitted_at = chrono::Utc::now().timestamp_millis();

        for message in messages {
            match message {
                Message::Record { stream, record } => {
                    self.output_message(&json!({
                        "type": "RECORD",
                        "record": {
                            "stream": stream,
                            "data": record,
                            "emitted_at": emitted_at
                        }
                    }));
                }
                Message::Log { level, message } => {
                    self.output_message(&json!({
                        "type": "LOG",
                        "log": {
                            "level": level.as_str(),
                            "message": message
                        }
                    }));
                }
            }
        }
        Ok(())
    }

    /// Write a message to stdout as one JSON line
    fn output_message(&self, message: &JsonValue) {
        println!("{message}");
    }
}
