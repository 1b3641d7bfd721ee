//! Page cursor protocol and request builder
//!
//! The customers endpoint uses 1-based page-number pagination with a
//! `meta.total_pages` stop condition. The cursor is just the next page
//! number; traversal ends when `page >= total_pages`. There is no
//! maximum-page safety cap: an upstream that never advances
//! `total_pages` iterates forever.

use crate::api::PageMeta;
use crate::config::DateWindow;
use std::collections::HashMap;

/// Fixed page size (the upstream maximum)
pub const PAGE_SIZE: u32 = 100;

/// Sort key: `updated_at` ascending, tie-broken by `id` ascending.
/// Guarantees a stable total order across pages even when many resources
/// share an `updated_at` instant.
const SORT_KEY: &str = "updated_at,id";

/// Pagination continuation token: the next page number to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-based page number of the next request
    pub page: u32,
}

/// Build the query parameters for one page request.
///
/// The `updated_at` range filter is fixed to
/// `[start 00:00:00, end 23:59:59]`, `lighter=0` disables the reduced
/// response mode, and `include=notes` side-loads note resources (sent for
/// both streams). Page number defaults to 1 when no cursor is supplied.
pub fn build_request_params(
    window: &DateWindow,
    cursor: Option<PageCursor>,
) -> HashMap<String, String> {
    let page = cursor.map_or(1, |c| c.page);
    let mut params = HashMap::new();
    params.insert("per".to_string(), PAGE_SIZE.to_string());
    params.insert("page".to_string(), page.to_string());
    params.insert("sort".to_string(), SORT_KEY.to_string());
    params.insert("lighter".to_string(), "0".to_string());
    params.insert("q[updated_at_gteq]".to_string(), window.lower_bound());
    params.insert("q[updated_at_lt]".to_string(), window.upper_bound());
    params.insert("include".to_string(), "notes".to_string());
    params
}

/// Compute the next cursor from a page's metadata.
///
/// Returns `Some(page + 1)` iff `page < total_pages`; this is the sole
/// termination condition.
pub fn next_cursor(meta: &PageMeta) -> Option<PageCursor> {
    if meta.page < meta.total_pages {
        Some(PageCursor {
            page: meta.page + 1,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_first_page_params() {
        let params = build_request_params(&window(), None);
        assert_eq!(params["per"], "100");
        assert_eq!(params["page"], "1");
        assert_eq!(params["sort"], "updated_at,id");
        assert_eq!(params["lighter"], "0");
        assert_eq!(params["q[updated_at_gteq]"], "2025-01-01 00:00:00");
        assert_eq!(params["q[updated_at_lt]"], "2025-01-31 23:59:59");
        assert_eq!(params["include"], "notes");
    }

    #[test]
    fn test_cursor_overrides_page() {
        let params = build_request_params(&window(), Some(PageCursor { page: 3 }));
        assert_eq!(params["page"], "3");
    }

    #[test]
    fn test_next_cursor_advances() {
        let meta = PageMeta {
            page: 1,
            total_pages: 3,
        };
        assert_eq!(next_cursor(&meta), Some(PageCursor { page: 2 }));
    }

    #[test]
    fn test_next_cursor_terminates_on_last_page() {
        let meta = PageMeta {
            page: 3,
            total_pages: 3,
        };
        assert_eq!(next_cursor(&meta), None);
    }

    #[test]
    fn test_next_cursor_terminates_past_total() {
        let meta = PageMeta {
            page: 2,
            total_pages: 0,
        };
        assert_eq!(next_cursor(&meta), None);
    }

    #[test]
    fn test_defaulted_meta_is_single_page() {
        assert_eq!(next_cursor(&PageMeta::default()), None);
    }
}
