//! HTTP client for the ecforce admin API
//!
//! Every request carries the same token-header credentials and JSON content
//! negotiation. There is no retry loop: any transport or HTTP failure
//! propagates immediately and aborts the extraction. Request timeouts are
//! delegated to the outer transport layer and not set here.

use crate::api::payload::PagePayload;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Path of the customers endpoint, relative to the API base
const CUSTOMERS_PATH: &str = "admin/customers.json";

/// Authenticated client bound to one shop's admin API
pub struct EcforceClient {
    client: Client,
    base_url: String,
}

impl EcforceClient {
    /// Create a client for a shop domain
    /// (base URL `https://{domain}/api/v2/admin`).
    pub fn new(domain: &str, api_token: &str) -> Result<Self> {
        Self::with_base_url(format!("https://{domain}/api/v2/admin"), api_token)
    }

    /// Create a client against an explicit base URL (used by tests against
    /// a mock server).
    pub fn with_base_url(base_url: impl Into<String>, api_token: &str) -> Result<Self> {
        let base_url = base_url.into();
        // reject malformed domains up front instead of on the first request
        Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token token={api_token}"))
            .map_err(|e| Error::invalid_value("api_token", e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("source-ecforce/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client is bound to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the customers endpoint.
    ///
    /// Non-2xx responses become `Error::HttpStatus` with the response body
    /// attached; no retry is attempted.
    pub async fn fetch_page(&self, params: &HashMap<String, String>) -> Result<PagePayload> {
        let url = format!("{}/{CUSTOMERS_PATH}", self.base_url);
        debug!(url = %url, "requesting page");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let payload: PagePayload = response.json().await?;
        debug!(
            page = payload.meta.page,
            total_pages = payload.meta.total_pages,
            records = payload.data.len(),
            "page received"
        );
        Ok(payload)
    }
}

impl std::fmt::Debug for EcforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcforceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_domain() {
        let client = EcforceClient::new("shop.ec-force.com", "token").unwrap();
        assert_eq!(client.base_url(), "https://shop.ec-force.com/api/v2/admin");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = EcforceClient::with_base_url("http://localhost:9999/api/v2/admin/", "token")
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/api/v2/admin");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = EcforceClient::new("shop.ec-force.com", "bad\ntoken").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfigValue { field, .. } if field == "api_token"
        ));
    }

    #[test]
    fn test_malformed_base_url_rejected() {
        let err = EcforceClient::with_base_url("not a url", "token").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
