//! Article records and the labels attached to them during enrichment.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The entity being researched, e.g. a company name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject(String);

impl Subject {
    /// Build a subject from a display name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptySubject`] if the trimmed name is empty.
    pub fn new(name: &str) -> Result<Self, CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptySubject);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sentiment label attached to an article.
///
/// Labels other than the three known categories are preserved verbatim in
/// [`Sentiment::Other`] and tallied as neutral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl Sentiment {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Other(label) => label,
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Positive" => Sentiment::Positive,
            "Negative" => Sentiment::Negative,
            "Neutral" => Sentiment::Neutral,
            _ => Sentiment::Other(label),
        }
    }
}

impl From<&str> for Sentiment {
    fn from(label: &str) -> Self {
        Sentiment::from(label.to_string())
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One news article moving through acquisition, enrichment and reporting.
///
/// `url` and `content` are acquisition-internal; the report strips them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(rename = "Content", default)]
    pub content: String,
    #[serde(rename = "Summary", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "Sentiment", default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(rename = "Topics", default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
}

impl Article {
    /// Create a content-only record as produced by extraction.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            summary: None,
            sentiment: None,
            topics: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    #[must_use]
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = Some(topics.into_iter().map(Into::into).collect());
        self
    }

    /// True when extraction produced a non-blank body.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Text that analysis runs against: the summary when present, otherwise
    /// the raw content.
    #[must_use]
    pub fn analysis_text(&self) -> &str {
        match self.summary.as_deref() {
            Some(summary) if !summary.trim().is_empty() => summary,
            _ => &self.content,
        }
    }

    /// Topics attached during enrichment, empty when not yet enriched.
    #[must_use]
    pub fn topic_list(&self) -> &[String] {
        self.topics.as_deref().unwrap_or(&[])
    }
}
