//! Paged link discovery for a subject.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use newsgauge_core::{Pacer, RetryPolicy, Subject};

use crate::capability::SearchCapability;
use crate::error::AcquireError;

const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a discovery pass stopped.
///
/// Page numbers are only meaningful together with the page size they were
/// counted in, so both travel together. `exhausted` is set once the search
/// returned an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCursor {
    pub page: u32,
    pub page_size: u32,
    pub exhausted: bool,
}

/// Links found by one discovery pass and the cursor to resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub links: Vec<String>,
    pub next: SearchCursor,
}

/// Queries a [`SearchCapability`] page by page until enough unique links are
/// collected or the attempt budget runs out.
///
/// Every page request, successful or not, spends one attempt from the
/// policy's `max_attempts`. A failed page is logged and followed by the
/// policy's delay; it never aborts discovery.
pub struct LinkDiscoverer {
    search: Arc<dyn SearchCapability>,
    policy: RetryPolicy,
    page_size: u32,
    blocked_domains: Vec<String>,
    pacer: Pacer,
    call_timeout: Duration,
}

impl LinkDiscoverer {
    /// Three pages of ten, one second between failed pages, no blocked domains.
    #[must_use]
    pub fn new(search: Arc<dyn SearchCapability>) -> Self {
        Self {
            search,
            policy: RetryPolicy::fixed(3, Duration::from_secs(1)),
            page_size: DEFAULT_PAGE_SIZE,
            blocked_domains: Vec::new(),
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
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    /// Domains are matched as case-insensitive substrings of the URL.
    #[must_use]
    pub fn with_blocked_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked_domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
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

    /// Search query issued for a subject.
    #[must_use]
    pub fn query_for(subject: &Subject) -> String {
        format!("{subject} current news")
    }

    #[must_use]
    pub fn is_blocked(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        self.blocked_domains
            .iter()
            .any(|domain| lower.contains(domain.as_str()))
    }

    /// First page of a fresh pass for `min_count` links.
    #[must_use]
    pub fn first_page(&self, min_count: usize) -> SearchCursor {
        SearchCursor {
            page: 0,
            page_size: u32::try_from(min_count)
                .unwrap_or(u32::MAX)
                .min(self.page_size)
                .max(1),
            exhausted: false,
        }
    }

    /// Collect up to `min_count` unique, non-blocked links for `subject`, in
    /// discovery order, starting from the first results page.
    ///
    /// Links in `exclude` (already handled by the caller) are skipped and do
    /// not count toward `min_count`. May return fewer than `min_count` links.
    pub async fn discover(
        &self,
        subject: &Subject,
        min_count: usize,
        exclude: &HashSet<String>,
    ) -> Discovery {
        self.discover_from(subject, min_count, exclude, self.first_page(min_count))
            .await
    }

    /// Continue discovery at `cursor`, usually the `next` cursor of an
    /// earlier pass, with a fresh attempt budget. Nothing is requested when
    /// the cursor is exhausted.
    pub async fn discover_from(
        &self,
        subject: &Subject,
        min_count: usize,
        exclude: &HashSet<String>,
        cursor: SearchCursor,
    ) -> Discovery {
        let mut collected: Vec<String> = Vec::new();
        if min_count == 0 || cursor.exhausted {
            return Discovery {
                links: collected,
                next: cursor,
            };
        }

        let query = Self::query_for(subject);
        let SearchCursor {
            mut page,
            page_size,
            ..
        } = cursor;
        let max_attempts = self.policy.max_attempts.max(1);
        let mut seen: HashSet<String> = HashSet::new();
        let mut exhausted = false;

        for attempt in 1..=max_attempts {
            self.pacer.acquire().await;
            let result = match tokio::time::timeout(
                self.call_timeout,
                self.search.search(&query, page, page_size),
            )
            .await
            {
                Ok(inner) => inner,
                Err(_) => Err(AcquireError::Timeout(self.call_timeout)),
            };
            page = page.saturating_add(1);

            match result {
                Ok(links) if links.is_empty() => {
                    tracing::info!(subject = %subject, page, "search returned no more results");
                    exhausted = true;
                    break;
                }
                Ok(links) => {
                    let received = links.len();
                    for link in links {
                        if self.is_blocked(&link) {
                            tracing::debug!(url = %link, "skipping blocked domain");
                            continue;
                        }
                        if exclude.contains(&link) || !seen.insert(link.clone()) {
                            continue;
                        }
                        collected.push(link);
                    }
                    tracing::debug!(
                        subject = %subject,
                        page,
                        received,
                        collected = collected.len(),
                        "search page processed"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        subject = %subject,
                        page,
                        attempt,
                        max_attempts,
                        error = %e,
                        "search page failed"
                    );
                    if attempt < max_attempts {
                        self.policy.pause(attempt).await;
                    }
                }
            }

            if collected.len() >= min_count {
                break;
            }
        }

        collected.truncate(min_count);
        tracing::info!(
            subject = %subject,
            requested = min_count,
            found = collected.len(),
            next_page = page,
            exhausted,
            "link discovery finished"
        );
        Discovery {
            links: collected,
            next: SearchCursor {
                page,
                page_size,
                exhausted,
            },
        }
    }
}
