//! Integration tests for `HttpExtractor` using wiremock HTTP mocks.

use std::time::Duration;

use newsgauge_acquire::{AcquireError, ExtractionCapability, HttpExtractor};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn extractor() -> HttpExtractor {
    HttpExtractor::new(Duration::from_secs(5), "newsgauge-test")
        .expect("client construction should not fail")
}

const ARTICLE_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>Tesla shares climb | Example News</title>
  <meta property="og:title" content="Tesla shares climb after record deliveries">
</head>
<body>
  <header><p>Subscribe to our newsletter for the latest market updates</p></header>
  <article>
    <h1>Tesla shares climb</h1>
    <p>Tesla reported record quarterly deliveries on Tuesday, beating estimates.</p>
    <p>Analysts said demand in Europe and China drove most of the growth.</p>
  </article>
  <footer><p>Copyright Example News. All rights reserved worldwide.</p></footer>
</body>
</html>"#;

#[tokio::test]
async fn extract_returns_title_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/markets/tesla"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(ARTICLE_PAGE),
        )
        .mount(&server)
        .await;

    let page = extractor()
        .extract(&format!("{}/markets/tesla", server.uri()))
        .await
        .expect("should extract page");

    assert_eq!(page.title, "Tesla shares climb after record deliveries");
    assert_eq!(
        page.content,
        "Tesla reported record quarterly deliveries on Tuesday, beating estimates.\n\n\
         Analysts said demand in Europe and China drove most of the growth."
    );
}

#[tokio::test]
async fn not_found_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = extractor()
        .extract(&format!("{}/gone", server.uri()))
        .await
        .expect_err("should fail");
    assert!(
        matches!(err, AcquireError::UnexpectedStatus { status: 404, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = extractor()
        .extract(&format!("{}/busy", server.uri()))
        .await
        .expect_err("should fail");
    assert!(matches!(err, AcquireError::RateLimited { .. }), "got {err:?}");
}

#[tokio::test]
async fn page_without_article_text_is_empty_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><div>Please enable JavaScript</div></body></html>"),
        )
        .mount(&server)
        .await;

    let err = extractor()
        .extract(&format!("{}/spa", server.uri()))
        .await
        .expect_err("should fail");
    assert!(matches!(err, AcquireError::EmptyContent { .. }), "got {err:?}");
}
