//! Report structures and their wire format.
//!
//! Field names are fixed by the consumers of the report (REST/UI layers),
//! hence the spaced and capitalised serde renames.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::article::{Article, Sentiment};

/// Counts of articles per sentiment category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Topics shared across articles versus topics seen in a single article.
///
/// `unique_topics[i]` belongs to the i-th article of the set the overlap
/// was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicOverlap {
    pub common_topics: Vec<String>,
    pub unique_topics: Vec<Vec<String>>,
}

impl Serialize for TopicOverlap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.unique_topics.len() + 1))?;
        map.serialize_entry("Common Topics", &self.common_topics)?;
        for (i, topics) in self.unique_topics.iter().enumerate() {
            map.serialize_entry(&format!("Unique Topics in Article {}", i + 1), topics)?;
        }
        map.end()
    }
}

/// One comparison produced by the comparative narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDifference {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

/// An article as it appears in the public report, without URL or content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedArticle {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "Sentiment", skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(rename = "Topics", skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
}

impl From<&Article> for ReportedArticle {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            summary: article.summary.clone(),
            sentiment: article.sentiment.clone(),
            topics: article.topics.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparativeScore {
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(rename = "Coverage Differences")]
    pub coverage_differences: Vec<CoverageDifference>,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlap,
    #[serde(rename = "Final Sentiment")]
    pub final_sentiment: String,
}

/// The aggregated report for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalReport {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<ReportedArticle>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative_sentiment_score: ComparativeScore,
}
