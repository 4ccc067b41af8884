use async_trait::async_trait;
use newsgauge_core::Subject;

use crate::capability::TextAnalysis;
use crate::chat::ChatClient;
use crate::error::AnalysisError;
use crate::prompts;

const DEFAULT_SUMMARY_CHAR_LIMIT: usize = 6000;

/// [`TextAnalysis`] backed by a chat-completions model.
///
/// Built once at startup and shared by reference with the enricher and the
/// aggregation engine.
#[derive(Debug)]
pub struct LlmAnalyzer {
    chat: ChatClient,
    summary_char_limit: usize,
}

impl LlmAnalyzer {
    #[must_use]
    pub fn new(chat: ChatClient) -> Self {
        Self {
            chat,
            summary_char_limit: DEFAULT_SUMMARY_CHAR_LIMIT,
        }
    }

    /// Article content beyond this many characters is dropped before
    /// summarization.
    #[must_use]
    pub fn with_summary_char_limit(mut self, limit: usize) -> Self {
        self.summary_char_limit = limit.max(1);
        self
    }
}

#[async_trait]
impl TextAnalysis for LlmAnalyzer {
    async fn summarize_article(&self, title: &str, content: &str) -> Result<String, AnalysisError> {
        let prompt = prompts::article_summary(title, content, self.summary_char_limit);
        self.chat.complete(&prompt).await
    }

    async fn classify(&self, text: &str) -> Result<String, AnalysisError> {
        self.chat.complete(&prompts::sentiment(text)).await
    }

    async fn extract_topics(&self, text: &str) -> Result<String, AnalysisError> {
        self.chat.complete(&prompts::topics(text)).await
    }

    async fn narrate(
        &self,
        subject: &Subject,
        summaries: &[String],
    ) -> Result<String, AnalysisError> {
        let prompt = prompts::comparative(subject.as_str(), summaries);
        self.chat.complete(&prompt).await
    }

    async fn summarize(&self, summaries: &[String]) -> Result<String, AnalysisError> {
        self.chat.complete(&prompts::final_sentiment(summaries)).await
    }
}
