//! Raw page payload model
//!
//! The admin API returns JSON-API-style pages: a `data` array of resource
//! envelopes, an `included` array of side-loaded related resources, and a
//! `meta` block carrying 1-based pagination counters. All members default
//! to empty/single-page values so partial responses still deserialize.

use crate::types::JsonObject;
use serde::Deserialize;

/// One page of the customers endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagePayload {
    /// Primary resource envelopes (customers)
    #[serde(default)]
    pub data: Vec<ResourceEnvelope>,

    /// Side-loaded related resources (notes), addressable by `(type, id)`
    #[serde(default)]
    pub included: Vec<ResourceEnvelope>,

    /// Pagination metadata
    #[serde(default)]
    pub meta: PageMeta,
}

/// JSON-API resource envelope: `{id, type, attributes, relationships?}`
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceEnvelope {
    /// Resource id (a string upstream, coerced to integer on output)
    pub id: String,

    /// Resource type tag (e.g. `customer`, `note`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Flat attribute map
    #[serde(default)]
    pub attributes: JsonObject,

    /// Relationship references to side-loaded resources
    #[serde(default)]
    pub relationships: Relationships,
}

/// Relationships block on a customer envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationships {
    /// Note references for this customer
    #[serde(default)]
    pub notes: Relationship,
}

/// A single named relationship
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    /// `{id, type}` references into `included`
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

/// Reference to a resource in `included`
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    /// Referenced resource id
    pub id: String,

    /// Referenced resource type
    #[serde(rename = "type")]
    pub kind: String,
}

/// Pagination counters from the `meta` block.
///
/// Missing counters default to a single page, so a response without
/// metadata terminates pagination instead of failing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageMeta {
    /// Current 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,

    /// Total page count
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }
}

fn default_page() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_page() {
        let payload: PagePayload = serde_json::from_value(json!({
            "data": [
                {
                    "id": "123",
                    "type": "customer",
                    "attributes": { "email": "test@example.com" },
                    "relationships": {
                        "notes": { "data": [{ "id": "456", "type": "note" }] }
                    }
                }
            ],
            "included": [
                { "id": "456", "type": "note", "attributes": { "content": "memo" } }
            ],
            "meta": { "total_count": 100, "page": 1, "per": 100, "count": 1, "total_pages": 3 }
        }))
        .unwrap();

        assert_eq!(payload.data.len(), 1);
        assert_eq!(payload.data[0].kind, "customer");
        assert_eq!(payload.data[0].relationships.notes.data[0].id, "456");
        assert_eq!(payload.included[0].kind, "note");
        assert_eq!(payload.meta.page, 1);
        assert_eq!(payload.meta.total_pages, 3);
    }

    #[test]
    fn test_missing_members_default() {
        let payload: PagePayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.data.is_empty());
        assert!(payload.included.is_empty());
        assert_eq!(payload.meta.page, 1);
        assert_eq!(payload.meta.total_pages, 1);
    }

    #[test]
    fn test_missing_meta_counters_default() {
        let payload: PagePayload = serde_json::from_value(json!({
            "data": [],
            "meta": { "total_count": 0 }
        }))
        .unwrap();
        assert_eq!(payload.meta.page, 1);
        assert_eq!(payload.meta.total_pages, 1);
    }

    #[test]
    fn test_envelope_without_relationships() {
        let envelope: ResourceEnvelope = serde_json::from_value(json!({
            "id": "9",
            "type": "customer",
            "attributes": {}
        }))
        .unwrap();
        assert!(envelope.relationships.notes.data.is_empty());
    }
}
