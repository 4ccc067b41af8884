//! Single-URL content retrieval with a bounded retry budget.

use std::sync::Arc;
use std::time::Duration;

use newsgauge_core::{Article, Pacer, RetryPolicy};

use crate::capability::{ExtractedPage, ExtractionCapability};
use crate::error::AcquireError;

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of fetching one URL.
///
/// `Failed` marks a URL whose content could not be obtained within the
/// retry budget. It is a skip signal for the caller and never becomes part
/// of an article set.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Article(Article),
    Failed { url: String, reason: String },
}

impl Fetched {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Fetched::Failed { .. })
    }

    #[must_use]
    pub fn into_article(self) -> Option<Article> {
        match self {
            Fetched::Article(article) => Some(article),
            Fetched::Failed { .. } => None,
        }
    }
}

/// Wraps an [`ExtractionCapability`] with retries, a per-call timeout and
/// request pacing.
pub struct ContentFetcher {
    extractor: Arc<dyn ExtractionCapability>,
    policy: RetryPolicy,
    pacer: Pacer,
    call_timeout: Duration,
}

impl ContentFetcher {
    /// Three attempts, two seconds apart.
    #[must_use]
    pub fn new(extractor: Arc<dyn ExtractionCapability>) -> Self {
        Self {
            extractor,
            policy: RetryPolicy::fixed(3, Duration::from_secs(2)),
            pacer: Pacer::unlimited(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Fetch `url` into an [`Article`], or a [`Fetched::Failed`] once the
    /// retry budget is spent or the page has no usable text.
    pub async fn fetch(&self, url: &str) -> Fetched {
        let result = self
            .policy
            .run("extract", || async {
                self.pacer.acquire().await;
                match tokio::time::timeout(self.call_timeout, self.extractor.extract(url)).await {
                    Ok(inner) => inner,
                    Err(_) => Err(AcquireError::Timeout(self.call_timeout)),
                }
            })
            .await;

        match result {
            Ok(page) => Self::into_fetched(url, page),
            Err(e) => {
                tracing::warn!(url, error = %e, "content extraction failed");
                Fetched::Failed {
                    url: url.to_owned(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn into_fetched(url: &str, page: ExtractedPage) -> Fetched {
        let title = match page.title.trim() {
            "" => url,
            t => t,
        };
        let article = Article::new(title, url, page.content.trim());
        if !article.has_content() {
            tracing::warn!(url, "extracted page has no content");
            return Fetched::Failed {
                url: url.to_owned(),
                reason: AcquireError::EmptyContent {
                    url: url.to_owned(),
                }
                .to_string(),
            };
        }
        Fetched::Article(article)
    }
}
