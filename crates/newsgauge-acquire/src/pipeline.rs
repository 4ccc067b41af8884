//! Assembles a deduplicated article set of a requested size.
//!
//! One discovery pass asks for `target + slack` candidates and fetches them
//! in discovery order until `target` articles are in hand. If the pass
//! comes up short, a fallback pass asks for `deficit + slack` candidates
//! that were not seen before, continuing at the search page where the
//! primary pass stopped, and repeats the fetch loop. A URL is fetched at
//! most once across both passes.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use newsgauge_core::{Article, Subject};

use crate::discover::LinkDiscoverer;
use crate::error::AcquireError;
use crate::fetch::{ContentFetcher, Fetched};

const DEFAULT_SLACK: usize = 5;

/// Result of one acquisition run.
///
/// `articles` may be shorter than `requested` when the web does not yield
/// enough usable content; callers decide whether that is acceptable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Acquisition {
    pub articles: Vec<Article>,
    pub requested: usize,
}

impl Acquisition {
    #[must_use]
    pub fn obtained(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.obtained() >= self.requested
    }

    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.obtained())
    }

    /// Return the articles only if the full requested count was obtained.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Exhausted`] with both counts otherwise.
    pub fn require_complete(self) -> Result<Vec<Article>, AcquireError> {
        if self.is_complete() {
            Ok(self.articles)
        } else {
            Err(AcquireError::Exhausted {
                requested: self.requested,
                obtained: self.obtained(),
            })
        }
    }

    #[must_use]
    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }
}

pub struct AcquisitionPipeline {
    discoverer: LinkDiscoverer,
    fetcher: ContentFetcher,
    slack: usize,
    concurrency: usize,
}

impl AcquisitionPipeline {
    /// Sequential fetching with five extra candidates per pass.
    #[must_use]
    pub fn new(discoverer: LinkDiscoverer, fetcher: ContentFetcher) -> Self {
        Self {
            discoverer,
            fetcher,
            slack: DEFAULT_SLACK,
            concurrency: 1,
        }
    }

    /// Extra candidates requested on top of the number still needed.
    #[must_use]
    pub fn with_slack(mut self, slack: usize) -> Self {
        self.slack = slack;
        self
    }

    /// Maximum fetches in flight at once. `1` reproduces strictly
    /// sequential fetching.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Acquire up to `target` unique articles about `subject`.
    pub async fn acquire(&self, subject: &Subject, target: usize) -> Acquisition {
        let mut seen: HashSet<String> = HashSet::new();
        let mut articles: Vec<Article> = Vec::with_capacity(target);

        if target == 0 {
            return Acquisition {
                articles,
                requested: target,
            };
        }

        let primary = self
            .discoverer
            .discover(subject, target.saturating_add(self.slack), &seen)
            .await;
        tracing::info!(
            subject = %subject,
            target,
            candidates = primary.links.len(),
            "primary discovery pass"
        );
        self.fetch_until(primary.links, target, &mut seen, &mut articles)
            .await;

        if articles.len() < target {
            let deficit = target - articles.len();
            let fallback = self
                .discoverer
                .discover_from(
                    subject,
                    deficit.saturating_add(self.slack),
                    &seen,
                    primary.next,
                )
                .await;
            tracing::info!(
                subject = %subject,
                deficit,
                start_page = primary.next.page,
                candidates = fallback.links.len(),
                "fallback discovery pass"
            );
            self.fetch_until(fallback.links, target, &mut seen, &mut articles)
                .await;
        }

        let acquisition = Acquisition {
            articles,
            requested: target,
        };
        if acquisition.is_complete() {
            tracing::info!(subject = %subject, obtained = acquisition.obtained(), "acquisition complete");
        } else {
            tracing::warn!(
                subject = %subject,
                requested = target,
                obtained = acquisition.obtained(),
                "acquisition fell short of target"
            );
        }
        acquisition
    }

    /// Fetch unseen `candidates` in order, appending successes, until
    /// `articles` holds `target` entries or the candidates run out.
    ///
    /// Each URL is marked seen as the stream pulls it, before its fetch is
    /// dispatched. Leaving the loop drops the stream, which cancels fetches
    /// still in flight and never starts the remaining ones.
    async fn fetch_until(
        &self,
        candidates: Vec<String>,
        target: usize,
        seen: &mut HashSet<String>,
        articles: &mut Vec<Article>,
    ) {
        if articles.len() >= target {
            return;
        }

        let fetcher = &self.fetcher;
        let results = stream::iter(candidates)
            .filter(|url| futures::future::ready(seen.insert(url.clone())))
            .map(|url| async move { fetcher.fetch(&url).await })
            .buffered(self.concurrency);
        let mut results = std::pin::pin!(results);

        while let Some(fetched) = results.next().await {
            match fetched {
                Fetched::Article(article) => {
                    tracing::debug!(url = %article.url, "article acquired");
                    articles.push(article);
                    if articles.len() >= target {
                        break;
                    }
                }
                Fetched::Failed { url, reason } => {
                    tracing::info!(url = %url, reason = %reason, "skipping unusable URL");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
