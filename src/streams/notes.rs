//! Customer notes stream
//!
//! Notes are not a standalone endpoint: they arrive side-loaded in the
//! `included` array of the customers response and are correlated against
//! each customer's `relationships.notes.data` references. Correlation is
//! same-page only: a reference whose note is missing from `included` is
//! skipped silently, with no cross-page lookahead.

use super::{coerce_id, RecordExtractor};
use crate::api::{PagePayload, ResourceEnvelope};
use crate::error::Result;
use crate::normalize::normalize_datetime_field;
use crate::types::{JsonObject, JsonValue};
use serde_json::json;
use std::collections::HashMap;

/// Stream name
pub const STREAM_NAME: &str = "customer_notes";

/// `included` entry type tag for notes
const NOTE_TYPE: &str = "note";

/// Timestamp attributes converted to ISO 8601 combined form
const DATETIME_FIELDS: [&str; 3] = ["created_at", "updated_at", "operated_at"];

/// Extractor for the `customer_notes` stream
#[derive(Debug, Clone, Copy, Default)]
pub struct NotesExtractor;

impl RecordExtractor for NotesExtractor {
    fn name(&self) -> &'static str {
        STREAM_NAME
    }

    fn json_schema(&self) -> JsonValue {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": {"type": "integer", "description": "メモID"},
                "customer_id": {"type": ["integer", "null"], "description": "顧客ID"},
                "content": {"type": ["string", "null"], "description": "メモ"},
                "operated_at": {"type": ["string", "null"], "format": "date-time", "description": "対応日時"},
                "created_at": {"type": ["string", "null"], "format": "date-time", "description": "作成日時"},
                "updated_at": {"type": ["string", "null"], "format": "date-time", "description": "更新日時"}
            }
        })
    }

    fn extract_records_from_page(&self, page: &PagePayload) -> Result<Vec<JsonObject>> {
        let index: HashMap<&str, &ResourceEnvelope> = page
            .included
            .iter()
            .filter(|envelope| envelope.kind == NOTE_TYPE)
            .map(|envelope| (envelope.id.as_str(), envelope))
            .collect();

        let mut records = Vec::new();
        for customer in &page.data {
            for reference in &customer.relationships.notes.data {
                let Some(note) = index.get(reference.id.as_str()) else {
                    // dangling reference: note not side-loaded on this page
                    continue;
                };

                let mut record = note.attributes.clone();
                for field in DATETIME_FIELDS {
                    normalize_datetime_field(&mut record, field);
                }

                let note_id = coerce_id(&note.id, STREAM_NAME)?;
                let customer_id = coerce_id(&customer.id, STREAM_NAME)?;
                record.insert("id".to_string(), JsonValue::from(note_id));
                record.insert("customer_id".to_string(), JsonValue::from(customer_id));
                records.push(record);
            }
        }
        Ok(records)
    }
}
