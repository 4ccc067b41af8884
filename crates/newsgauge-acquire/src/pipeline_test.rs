use super::*;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use newsgauge_core::RetryPolicy;

use crate::capability::{ExtractedPage, ExtractionCapability, SearchCapability};

/// Serves a fixed ranked list of URLs, sliced by page and page size, and
/// records every `(page, page_size)` requested.
struct RankedSearch {
    urls: Vec<String>,
    requested: Mutex<Vec<(u32, u32)>>,
}

impl RankedSearch {
    fn new(urls: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            urls,
            requested: Mutex::new(Vec::new()),
        })
    }

    fn numbered(count: usize) -> Arc<Self> {
        Self::new((0..count).map(url).collect())
    }

    fn from_urls(urls: &[&str]) -> Arc<Self> {
        Self::new(urls.iter().map(|u| (*u).to_owned()).collect())
    }

    fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }
}

#[async_trait]
impl SearchCapability for RankedSearch {
    async fn search(
        &self,
        _query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<String>, AcquireError> {
        self.requested.lock().unwrap().push((page, page_size));
        let size = page_size as usize;
        let start = (page as usize * size).min(self.urls.len());
        let end = (start + size).min(self.urls.len());
        Ok(self.urls[start..end].to_vec())
    }
}

/// Extraction fake: URLs listed in `failing` always return a transient
/// error; everything else succeeds. Records every call per URL.
struct RecordingExtractor {
    failing: HashSet<String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl RecordingExtractor {
    fn failing(urls: impl IntoIterator<Item = String>) -> Arc<Self> {
        Arc::new(Self {
            failing: urls.into_iter().collect(),
            calls: Mutex::new(HashMap::new()),
        })
    }

    fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ExtractionCapability for RecordingExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedPage, AcquireError> {
        *self.calls.lock().unwrap().entry(url.to_owned()).or_default() += 1;
        if self.failing.contains(url) {
            return Err(AcquireError::UnexpectedStatus {
                status: 502,
                url: url.to_owned(),
            });
        }
        Ok(ExtractedPage {
            title: format!("Title for {url}"),
            content: format!("Body for {url}"),
        })
    }
}

fn url(i: usize) -> String {
    format!("https://news.example/{i}")
}

fn subject() -> Subject {
    Subject::new("Tesla").unwrap()
}

fn pipeline(
    search: Arc<dyn SearchCapability>,
    extractor: Arc<dyn ExtractionCapability>,
) -> AcquisitionPipeline {
    let discoverer = LinkDiscoverer::new(search).with_policy(RetryPolicy::fixed(3, Duration::ZERO));
    let fetcher = ContentFetcher::new(extractor).with_policy(RetryPolicy::fixed(3, Duration::ZERO));
    AcquisitionPipeline::new(discoverer, fetcher)
}

fn urls_of(acquisition: &Acquisition) -> Vec<String> {
    acquisition.articles.iter().map(|a| a.url.clone()).collect()
}

#[tokio::test]
async fn returns_exactly_target_when_enough_urls_are_fetchable() {
    let extractor = RecordingExtractor::failing([]);
    let acquisition = pipeline(RankedSearch::numbered(30), extractor.clone())
        .acquire(&subject(), 10)
        .await;

    assert_eq!(acquisition.obtained(), 10);
    assert!(acquisition.is_complete());
    assert_eq!(acquisition.shortfall(), 0);
    assert_eq!(urls_of(&acquisition), (0..10).map(url).collect::<Vec<_>>());
    assert_eq!(extractor.total_calls(), 10, "stops fetching once target is met");
}

#[tokio::test]
async fn never_returns_duplicates_or_more_than_target() {
    let search = RankedSearch::from_urls(&[
        "https://a.example/1",
        "https://a.example/1",
        "https://a.example/2",
        "https://a.example/2",
        "https://a.example/3",
        "https://a.example/4",
    ]);
    let acquisition = pipeline(search, RecordingExtractor::failing([]))
        .acquire(&subject(), 3)
        .await;

    let urls = urls_of(&acquisition);
    let unique: HashSet<&String> = urls.iter().collect();
    assert_eq!(unique.len(), urls.len());
    assert!(urls.len() <= 3);
}

#[tokio::test]
async fn short_result_is_reported_not_padded() {
    let extractor = RecordingExtractor::failing([]);
    let acquisition = pipeline(RankedSearch::numbered(6), extractor.clone())
        .acquire(&subject(), 10)
        .await;

    assert_eq!(acquisition.obtained(), 6);
    assert_eq!(acquisition.requested, 10);
    assert!(!acquisition.is_complete());
    assert_eq!(acquisition.shortfall(), 4);
    for i in 0..6 {
        assert_eq!(extractor.calls_for(&url(i)), 1, "{} fetched once", url(i));
    }

    let err = acquisition.require_complete().unwrap_err();
    assert!(matches!(
        err,
        AcquireError::Exhausted {
            requested: 10,
            obtained: 6
        }
    ));
}

#[tokio::test]
async fn failed_urls_are_excluded_and_tried_at_most_three_times() {
    let extractor = RecordingExtractor::failing([url(1), url(3)]);
    let acquisition = pipeline(RankedSearch::numbered(20), extractor.clone())
        .acquire(&subject(), 4)
        .await;

    assert_eq!(urls_of(&acquisition), vec![url(0), url(2), url(4), url(5)]);
    assert_eq!(extractor.calls_for(&url(1)), 3);
    assert_eq!(extractor.calls_for(&url(3)), 3);
}

#[tokio::test]
async fn fallback_pass_tops_up_with_new_candidates() {
    // First pass sees 0..10; 0..8 fail, leaving a deficit of 3.
    let extractor = RecordingExtractor::failing((0..8).map(url));
    let acquisition = pipeline(RankedSearch::numbered(30), extractor.clone())
        .acquire(&subject(), 5)
        .await;

    assert_eq!(
        urls_of(&acquisition),
        vec![url(8), url(9), url(10), url(11), url(12)]
    );
    for i in 0..10 {
        assert!(
            extractor.calls_for(&url(i)) <= 3,
            "{} retried beyond budget",
            url(i)
        );
    }
    assert_eq!(extractor.calls_for(&url(8)), 1);
    assert_eq!(extractor.calls_for(&url(13)), 0);
}

#[tokio::test]
async fn fallback_pass_resumes_after_the_pages_the_primary_pass_used() {
    // Odd-ranked results are on a blocked domain, so each page of ten
    // yields five candidates and the primary pass needs all three pages
    // for its fifteen. Six of those fail, leaving a deficit of one.
    let ranked: Vec<String> = (0..100)
        .map(|i| {
            if i % 2 == 1 {
                format!("https://blocked.example/{i}")
            } else {
                url(i)
            }
        })
        .collect();
    let search = RankedSearch::new(ranked);
    let failing: Vec<String> = (0..=10).step_by(2).map(url).collect();
    let extractor = RecordingExtractor::failing(failing.clone());

    let discoverer = LinkDiscoverer::new(search.clone())
        .with_policy(RetryPolicy::fixed(3, Duration::ZERO))
        .with_blocked_domains(["blocked.example"]);
    let fetcher =
        ContentFetcher::new(extractor.clone()).with_policy(RetryPolicy::fixed(3, Duration::ZERO));
    let acquisition = AcquisitionPipeline::new(discoverer, fetcher)
        .acquire(&subject(), 10)
        .await;

    assert_eq!(acquisition.obtained(), 10);
    let mut expected: Vec<String> = (12..=28).step_by(2).map(url).collect();
    expected.push(url(30));
    assert_eq!(urls_of(&acquisition), expected);

    // Fallback needs six; pages 3 and 4 each give five new candidates.
    assert_eq!(search.requested_pages(), vec![0, 1, 2, 3, 4]);
    for failed in &failing {
        assert_eq!(extractor.calls_for(failed), 3, "{failed} refetched");
    }
    assert_eq!(extractor.calls_for(&url(32)), 0);
}

#[tokio::test]
async fn fallback_pass_never_refetches_seen_urls() {
    // Every page repeats the same candidates, so the fallback pass finds
    // nothing new.
    struct RepeatingSearch;

    #[async_trait]
    impl SearchCapability for RepeatingSearch {
        async fn search(&self, _: &str, _: u32, _: u32) -> Result<Vec<String>, AcquireError> {
            Ok(vec![url(0), url(1), url(2)])
        }
    }

    let extractor = RecordingExtractor::failing([url(1)]);
    let acquisition = pipeline(Arc::new(RepeatingSearch), extractor.clone())
        .acquire(&subject(), 5)
        .await;

    assert_eq!(urls_of(&acquisition), vec![url(0), url(2)]);
    assert_eq!(extractor.calls_for(&url(0)), 1);
    assert_eq!(extractor.calls_for(&url(1)), 3);
    assert_eq!(extractor.calls_for(&url(2)), 1);
}

#[tokio::test]
async fn zero_target_does_no_work() {
    let extractor = RecordingExtractor::failing([]);
    let acquisition = pipeline(RankedSearch::numbered(10), extractor.clone())
        .acquire(&subject(), 0)
        .await;
    assert!(acquisition.articles.is_empty());
    assert!(acquisition.is_complete());
    assert_eq!(extractor.total_calls(), 0);
}

#[tokio::test]
async fn parallel_fetching_keeps_discovery_order_and_cancels_the_rest() {
    /// The first two URLs resolve immediately; the rest hang until dropped.
    struct SlowTailExtractor {
        started: AtomicUsize,
        finished: AtomicUsize,
    }

    #[async_trait]
    impl ExtractionCapability for SlowTailExtractor {
        async fn extract(&self, u: &str) -> Result<ExtractedPage, AcquireError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            if u != url(0) && u != url(1) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            self.finished.fetch_add(1, Ordering::SeqCst);
            Ok(ExtractedPage {
                title: u.to_owned(),
                content: "body".to_owned(),
            })
        }
    }

    let extractor = Arc::new(SlowTailExtractor {
        started: AtomicUsize::new(0),
        finished: AtomicUsize::new(0),
    });
    let acquisition = pipeline(RankedSearch::numbered(10), extractor.clone())
        .with_concurrency(4)
        .acquire(&subject(), 2)
        .await;

    assert_eq!(urls_of(&acquisition), vec![url(0), url(1)]);
    assert!(extractor.started.load(Ordering::SeqCst) > 2, "fetches ran concurrently");
    assert!(extractor.started.load(Ordering::SeqCst) < 7, "unstarted fetches were dropped");
    assert_eq!(extractor.finished.load(Ordering::SeqCst), 2, "in-flight fetches were cancelled");
}

#[test]
fn acquisition_accessors() {
    let complete = Acquisition {
        articles: vec![Article::new("t", "u", "c")],
        requested: 1,
    };
    assert!(complete.is_complete());
    assert_eq!(complete.clone().require_complete().unwrap().len(), 1);
    assert_eq!(complete.into_articles().len(), 1);

    let empty = Acquisition {
        articles: Vec::new(),
        requested: 3,
    };
    assert_eq!(empty.shortfall(), 3);
}
