//! Plain-HTTP article extraction.
//!
//! Downloads a page and pulls out its headline and paragraph text. Pages
//! that yield no body text are reported as [`AcquireError::EmptyContent`],
//! which the fetcher treats as a skip rather than a retry.

mod html;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::capability::{ExtractedPage, ExtractionCapability};
use crate::error::AcquireError;

pub struct HttpExtractor {
    client: Client,
}

impl HttpExtractor {
    /// Creates an extractor with the given per-request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, AcquireError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ExtractionCapability for HttpExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedPage, AcquireError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AcquireError::RateLimited {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(AcquireError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let content = html::extract_body(&body);
        if content.is_empty() {
            return Err(AcquireError::EmptyContent {
                url: url.to_owned(),
            });
        }
        let title = html::extract_title(&body);

        tracing::debug!(url, bytes = content.len(), "extracted article text");
        Ok(ExtractedPage { title, content })
    }
}
