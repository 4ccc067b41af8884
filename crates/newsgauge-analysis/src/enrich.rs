//! Per-article summary, sentiment and topic labelling.

use std::sync::Arc;

use newsgauge_core::Article;

use crate::capability::TextAnalysis;
use crate::decode::{decode_sentiment, decode_topics};
use crate::error::AnalysisError;

/// Sole writer of the analysis fields on an [`Article`] during enrichment.
pub struct AnalysisEnricher {
    analysis: Arc<dyn TextAnalysis>,
}

impl AnalysisEnricher {
    #[must_use]
    pub fn new(analysis: Arc<dyn TextAnalysis>) -> Self {
        Self { analysis }
    }

    /// Attach a summary unless the article already has one.
    ///
    /// # Errors
    ///
    /// Propagates the analysis service error once its retries are spent.
    pub async fn summarize(&self, article: &mut Article) -> Result<(), AnalysisError> {
        if article.summary.is_some() {
            return Ok(());
        }
        let summary = self
            .analysis
            .summarize_article(&article.title, &article.content)
            .await?;
        article.summary = Some(summary.trim().to_owned());
        Ok(())
    }

    /// Summarize (if needed), classify and extract topics for one article.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Format`] if the topic reply does not parse
    /// as a list, or the service error once its retries are spent. The
    /// article keeps whatever fields were set before the failure.
    pub async fn enrich(&self, article: &mut Article) -> Result<(), AnalysisError> {
        self.summarize(article).await?;

        let raw_sentiment = self.analysis.classify(article.analysis_text()).await?;
        article.sentiment = Some(decode_sentiment(&raw_sentiment));

        let raw_topics = self.analysis.extract_topics(article.analysis_text()).await?;
        article.topics = Some(decode_topics(&raw_topics)?);

        tracing::debug!(
            title = %article.title,
            sentiment = ?article.sentiment,
            topics = article.topic_list().len(),
            "article enriched"
        );
        Ok(())
    }

    /// Summarize every article that has no summary yet, in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failure.
    pub async fn summarize_all(&self, articles: &mut [Article]) -> Result<(), AnalysisError> {
        for article in articles.iter_mut() {
            self.summarize(article).await?;
        }
        Ok(())
    }

    /// Enrich every article in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failure; later articles are left
    /// untouched.
    pub async fn enrich_all(&self, articles: &mut [Article]) -> Result<(), AnalysisError> {
        let total = articles.len();
        for (i, article) in articles.iter_mut().enumerate() {
            if let Err(e) = self.enrich(article).await {
                tracing::error!(index = i, title = %article.title, error = %e, "enrichment failed");
                return Err(e);
            }
        }
        tracing::info!(articles = total, "enrichment complete");
        Ok(())
    }
}

#[cfg(test)]
#[path = "enrich_test.rs"]
mod tests;
