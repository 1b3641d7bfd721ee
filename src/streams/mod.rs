//! Record streams
//!
//! Each stream pairs the shared page-walking machinery with a
//! [`RecordExtractor`] that turns one raw page into output records. The
//! customers and notes streams walk the same underlying endpoint
//! independently; when both are enabled the resource is fetched twice
//! end-to-end.

mod customers;
mod notes;

pub use customers::CustomersExtractor;
pub use notes::NotesExtractor;

use crate::api::{EcforceClient, PagePayload};
use crate::config::DateWindow;
use crate::error::{Error, Result};
use crate::pagination::{build_request_params, next_cursor, PageCursor};
use crate::types::{JsonObject, JsonValue};
use std::time::Duration;
use tracing::debug;

/// Fixed pause between page requests (not applied after the final page)
pub const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Turns one raw page payload into output records for a stream
pub trait RecordExtractor: Send + Sync {
    /// Stream name exposed to the harness
    fn name(&self) -> &'static str;

    /// Primary key field of the output records
    fn primary_key(&self) -> &'static str {
        "id"
    }

    /// JSON schema describing the output records
    fn json_schema(&self) -> JsonValue;

    /// Extract this stream's records from a page
    fn extract_records_from_page(&self, page: &PagePayload) -> Result<Vec<JsonObject>>;
}

/// One logical output stream: extractor + client + date window
pub struct EcforceStream {
    extractor: Box<dyn RecordExtractor>,
    client: EcforceClient,
    window: DateWindow,
}

impl EcforceStream {
    /// Assemble a stream from its parts
    pub fn new(
        extractor: Box<dyn RecordExtractor>,
        client: EcforceClient,
        window: DateWindow,
    ) -> Self {
        Self {
            extractor,
            client,
            window,
        }
    }

    /// Stream name
    pub fn name(&self) -> &'static str {
        self.extractor.name()
    }

    /// Primary key field
    pub fn primary_key(&self) -> &'static str {
        self.extractor.primary_key()
    }

    /// JSON schema of the output records
    pub fn json_schema(&self) -> JsonValue {
        self.extractor.json_schema()
    }

    /// Walk every page of the window and collect all records
    pub async fn read_records(&self) -> Result<Vec<JsonObject>> {
        self.read_pages(None).await
    }

    /// Walk at most `max_pages` pages (all pages when `None`).
    ///
    /// After each non-final page a fixed 1-second pause is inserted. The
    /// pause is skipped when the page cap cuts the walk short, so a
    /// one-page probe issues exactly one request and never sleeps.
    pub async fn read_pages(&self, max_pages: Option<u32>) -> Result<Vec<JsonObject>> {
        let mut records = Vec::new();
        let mut cursor: Option<PageCursor> = None;
        let mut pages_fetched: u32 = 0;

        loop {
            let params = build_request_params(&self.window, cursor);
            let page = self.client.fetch_page(&params).await?;
            pages_fetched += 1;

            let extracted = self.extractor.extract_records_from_page(&page)?;
            debug!(
                stream = self.name(),
                page = page.meta.page,
                records = extracted.len(),
                "extracted page"
            );
            records.extend(extracted);

            match next_cursor(&page.meta) {
                Some(next) if max_pages.is_none_or(|limit| pages_fetched < limit) => {
                    tokio::time::sleep(PAGE_DELAY).await;
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        Ok(records)
    }
}

impl std::fmt::Debug for EcforceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcforceStream")
            .field("name", &self.name())
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// Coerce a resource envelope id (a string upstream) to an integer
pub(crate) fn coerce_id(raw: &str, stream: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| {
        Error::decode(format!("stream {stream}: non-numeric resource id {raw:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id("123", "customers").unwrap(), 123);
        assert!(coerce_id("abc", "customers").is_err());
        assert!(coerce_id("", "customers").is_err());
    }

    #[test]
    fn test_page_delay_is_one_second() {
        assert_eq!(PAGE_DELAY, Duration::from_secs(1));
    }
}
