//! Collaborator interfaces consumed by acquisition.
//!
//! The pipeline only sees these traits; HTTP implementations live in
//! [`crate::search`] and [`crate::extract`], and tests supply in-memory fakes.

use async_trait::async_trait;

use crate::error::AcquireError;

/// Title and body text extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub content: String,
}

/// Ranked link discovery for a free-text query.
#[async_trait]
pub trait SearchCapability: Send + Sync {
    /// Returns result links for the zero-based `page`, at most `page_size`
    /// (itself at most 10) per page.
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<String>, AcquireError>;
}

/// Page-content extraction for a single URL.
#[async_trait]
pub trait ExtractionCapability: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedPage, AcquireError>;
}
