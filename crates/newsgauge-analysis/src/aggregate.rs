//! Cross-article aggregation: sentiment tally, topic overlap, and the
//! comparative and final-sentiment narratives.
//!
//! The tally and overlap are pure functions over the article set. The two
//! narratives are produced by the analysis service; this module builds
//! their ordered inputs and validates what comes back.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use newsgauge_core::{
    Article, ComparativeScore, CoverageDifference, Sentiment, SentimentDistribution, Subject,
    TopicOverlap,
};

use crate::capability::TextAnalysis;
use crate::decode::decode_comparative;
use crate::error::AnalysisError;

/// Count articles per sentiment. Anything that is not exactly positive or
/// negative, including missing or unrecognised labels, counts as neutral.
#[must_use]
pub fn tally_sentiment(articles: &[Article]) -> SentimentDistribution {
    articles
        .iter()
        .fold(SentimentDistribution::default(), |mut acc, article| {
            match article.sentiment {
                Some(Sentiment::Positive) => acc.positive += 1,
                Some(Sentiment::Negative) => acc.negative += 1,
                _ => acc.neutral += 1,
            }
            acc
        })
}

/// Split topics into those shared by two or more articles and those unique
/// to one.
///
/// A topic repeated within one article counts once for that article.
/// Common topics are listed in first-seen order across the set; each
/// article's unique topics keep that article's own order.
#[must_use]
pub fn topic_overlap(articles: &[Article]) -> TopicOverlap {
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for article in articles {
        let mut counted: HashSet<&str> = HashSet::new();
        for topic in article.topic_list() {
            if !counted.insert(topic.as_str()) {
                continue;
            }
            let count = frequency.entry(topic.as_str()).or_insert(0);
            if *count == 0 {
                first_seen.push(topic.as_str());
            }
            *count += 1;
        }
    }

    let common_topics = first_seen
        .iter()
        .filter(|topic| frequency.get(*topic).copied().unwrap_or(0) > 1)
        .map(|topic| (*topic).to_owned())
        .collect();

    let unique_topics = articles
        .iter()
        .map(|article| {
            article
                .topic_list()
                .iter()
                .filter(|topic| frequency.get(topic.as_str()).copied() == Some(1))
                .cloned()
                .collect()
        })
        .collect();

    TopicOverlap {
        common_topics,
        unique_topics,
    }
}

/// The ordered texts handed to the narrative calls: each article's summary,
/// or its content when it has none.
#[must_use]
pub fn summaries(articles: &[Article]) -> Vec<String> {
    articles
        .iter()
        .map(|article| article.analysis_text().to_owned())
        .collect()
}

pub struct AggregationEngine {
    analysis: Arc<dyn TextAnalysis>,
}

impl AggregationEngine {
    #[must_use]
    pub fn new(analysis: Arc<dyn TextAnalysis>) -> Self {
        Self { analysis }
    }

    /// Ask the analysis service to compare coverage across the articles.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Format`] if the reply lacks a valid
    /// `"Coverage Differences"` list, or the service error once its
    /// retries are spent.
    pub async fn comparative_report(
        &self,
        subject: &Subject,
        articles: &[Article],
    ) -> Result<Vec<CoverageDifference>, AnalysisError> {
        let raw = self.analysis.narrate(subject, &summaries(articles)).await?;
        let differences = decode_comparative(&raw)?;
        tracing::debug!(subject = %subject, differences = differences.len(), "comparative report decoded");
        Ok(differences)
    }

    /// The service's overall sentiment statement, returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns the service error once its retries are spent.
    pub async fn final_sentiment(&self, articles: &[Article]) -> Result<String, AnalysisError> {
        self.analysis.summarize(&summaries(articles)).await
    }

    /// Compute every part of the comparative score for an enriched set.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`Self::comparative_report`] and
    /// [`Self::final_sentiment`].
    pub async fn score(
        &self,
        subject: &Subject,
        articles: &[Article],
    ) -> Result<ComparativeScore, AnalysisError> {
        let sentiment_distribution = tally_sentiment(articles);
        let topic_overlap = topic_overlap(articles);
        let coverage_differences = self.comparative_report(subject, articles).await?;
        let final_sentiment = self.final_sentiment(articles).await?;

        tracing::info!(
            subject = %subject,
            articles = articles.len(),
            positive = sentiment_distribution.positive,
            negative = sentiment_distribution.negative,
            neutral = sentiment_distribution.neutral,
            common_topics = topic_overlap.common_topics.len(),
            "aggregation complete"
        );

        Ok(ComparativeScore {
            sentiment_distribution,
            coverage_differences,
            topic_overlap,
            final_sentiment,
        })
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
