//! HTTP client for the Google Programmable Search (Custom Search JSON) API.
//!
//! Wraps `reqwest` with paging, API key management, and typed response
//! decoding. Errors carry the endpoint without its query string so the API
//! key never reaches logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::capability::SearchCapability;
use crate::error::AcquireError;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: Option<String>,
}

/// Client for the Custom Search JSON API.
///
/// Use [`GoogleSearchClient::new`] for production or
/// [`GoogleSearchClient::with_base_url`] to point at a mock server in tests.
pub struct GoogleSearchClient {
    client: Client,
    api_key: String,
    cx: String,
    base_url: Url,
}

impl GoogleSearchClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        cx: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, AcquireError> {
        Self::with_base_url(api_key, cx, timeout, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`AcquireError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        cx: &str,
        timeout: Duration,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, AcquireError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| AcquireError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            cx: cx.to_owned(),
            base_url,
        })
    }

    /// Builds the request URL for one results page. `start` is the API's
    /// 1-based index of the first result.
    fn build_url(&self, query: &str, start: u32, num: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.cx)
            .append_pair("num", &num.to_string())
            .append_pair("start", &start.to_string());
        url
    }
}

#[async_trait]
impl SearchCapability for GoogleSearchClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<String>, AcquireError> {
        let num = page_size.clamp(1, 10);
        let start = page.saturating_mul(num).saturating_add(1);
        let url = self.build_url(query, start, num);
        let endpoint = self.base_url.to_string();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AcquireError::RateLimited { url: endpoint });
        }
        if !status.is_success() {
            return Err(AcquireError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| AcquireError::Deserialize {
                context: format!("search(query={query}, start={start})"),
                source: e,
            })?;

        let links: Vec<String> = parsed
            .items
            .into_iter()
            .filter_map(|item| item.link)
            .filter(|link| !link.trim().is_empty())
            .collect();

        tracing::debug!(query, start, count = links.len(), "search page received");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GoogleSearchClient {
        GoogleSearchClient::with_base_url(
            "test-key",
            "test-cx",
            Duration::from_secs(5),
            "newsgauge-test",
            base_url,
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://www.googleapis.com/customsearch/v1");
        let url = client.build_url("Tesla current news", 11, 10);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/customsearch/v1?q=Tesla+current+news&key=test-key&cx=test-cx&num=10&start=11"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GoogleSearchClient::with_base_url(
            "k",
            "c",
            Duration::from_secs(5),
            "ua",
            "not a url",
        );
        assert!(matches!(result, Err(AcquireError::InvalidBaseUrl { .. })));
    }
}
