//! ecforce admin API surface
//!
//! Payload model for the JSON-API page responses and the authenticated
//! HTTP client that fetches them.

mod client;
mod payload;

pub use client::EcforceClient;
pub use payload::{PageMeta, PagePayload, Relationship, Relationships, ResourceEnvelope, ResourceRef};
