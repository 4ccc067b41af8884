//! In-memory [`TextAnalysis`] for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use newsgauge_core::Subject;

use crate::capability::TextAnalysis;
use crate::error::AnalysisError;

/// Replies are computed from the input by plain functions; every call is
/// recorded as `(method, input)`.
pub(crate) struct FakeAnalysis {
    pub classify_with: fn(&str) -> String,
    pub topics_with: fn(&str) -> String,
    pub narrative: String,
    pub verdict: String,
    pub(crate) calls: Mutex<Vec<(&'static str, String)>>,
}

impl Default for FakeAnalysis {
    fn default() -> Self {
        Self {
            classify_with: |_| "Neutral".to_owned(),
            topics_with: |_| "[]".to_owned(),
            narrative: r#"{"Coverage Differences": []}"#.to_owned(),
            verdict: "Coverage is mixed.".to_owned(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeAnalysis {
    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| *m == method)
            .count()
    }

    fn record(&self, method: &'static str, input: impl Into<String>) {
        self.calls.lock().unwrap().push((method, input.into()));
    }
}

#[async_trait]
impl TextAnalysis for FakeAnalysis {
    async fn summarize_article(&self, title: &str, _content: &str) -> Result<String, AnalysisError> {
        self.record("summarize_article", title);
        Ok(format!("Summary of {title}"))
    }

    async fn classify(&self, text: &str) -> Result<String, AnalysisError> {
        self.record("classify", text);
        Ok((self.classify_with)(text))
    }

    async fn extract_topics(&self, text: &str) -> Result<String, AnalysisError> {
        self.record("extract_topics", text);
        Ok((self.topics_with)(text))
    }

    async fn narrate(
        &self,
        subject: &Subject,
        summaries: &[String],
    ) -> Result<String, AnalysisError> {
        self.record("narrate", format!("{subject}: {}", summaries.join(" | ")));
        Ok(self.narrative.clone())
    }

    async fn summarize(&self, summaries: &[String]) -> Result<String, AnalysisError> {
        self.record("summarize", summaries.join(" | "));
        Ok(self.verdict.clone())
    }
}
