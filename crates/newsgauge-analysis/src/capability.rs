//! Interface to the text-analysis service.
//!
//! Methods return the service's raw text. Turning that text into typed
//! values is the job of [`crate::decode`], so a fake only has to produce
//! strings.

use async_trait::async_trait;
use newsgauge_core::Subject;

use crate::error::AnalysisError;

#[async_trait]
pub trait TextAnalysis: Send + Sync {
    /// A short prose summary of one article.
    async fn summarize_article(&self, title: &str, content: &str) -> Result<String, AnalysisError>;

    /// A single sentiment word for `text`.
    async fn classify(&self, text: &str) -> Result<String, AnalysisError>;

    /// The topics discussed in `text`, serialized as a list literal.
    async fn extract_topics(&self, text: &str) -> Result<String, AnalysisError>;

    /// A comparative narrative over the ordered article summaries, as JSON
    /// with a `"Coverage Differences"` array.
    async fn narrate(&self, subject: &Subject, summaries: &[String])
        -> Result<String, AnalysisError>;

    /// An overall sentiment statement for the ordered article summaries.
    async fn summarize(&self, summaries: &[String]) -> Result<String, AnalysisError>;
}
