// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ecforce source connector
//!
//! A batch extractor for the ecforce e-commerce admin API. Each invocation
//! performs a bounded, date-windowed full extraction of customer records
//! (and optionally customer-note records) and terminates.
//!
//! ## Streams
//!
//! - `customers`: one flat, normalized record per customer
//! - `customer_notes`: notes correlated from the side-loaded `included`
//!   collection of the same endpoint (enabled via `include_notes`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use source_ecforce::{Connector, Result, SourceEcforce};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let source = SourceEcforce::new();
//!     let config = serde_json::json!({
//!         "domain": "example.ec-force.com",
//!         "api_token": "...",
//!         "start_date": "2025-01-01",
//!     });
//!
//!     let status = source.check(&config).await;
//!     let catalog = source.discover(&config).await?;
//!     let messages = source.read(&config, None).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     SourceEcforce                          │
//! │  spec() → ConnectorSpec    check() → CheckResult           │
//! │  discover() → Catalog      read() → Vec<Message>           │
//! └────────────────────────────┬───────────────────────────────┘
//!                              │
//! ┌──────────┬─────────────────┴─────────┬────────────────────┐
//! │   api    │        pagination         │      streams       │
//! ├──────────┼───────────────────────────┼────────────────────┤
//! │ reqwest  │ page-number cursor        │ customers          │
//! │ payload  │ updated_at range filter   │ customer_notes     │
//! │ model    │ total_pages stop          │ 1s inter-page wait │
//! └──────────┴───────────────────────────┴────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connector configuration
pub mod config;

/// Date/time normalization
pub mod normalize;

/// ecforce admin API client and payload model
pub mod api;

/// Page cursor protocol and request builder
pub mod pagination;

/// Record streams (customers, customer notes)
pub mod streams;

/// Connector facade
pub mod source;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use source::{
    Catalog, CatalogStream, CheckResult, Connector, ConnectorSpec, Message, SourceEcforce,
};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
