//! Command handlers. Results go to stdout (or `--output`) as JSON; logs go
//! to stderr.

use std::path::Path;

use newsgauge_acquire::{Acquisition, AcquisitionPipeline};
use newsgauge_analysis::assemble_scored;
use newsgauge_core::{Article, FinalReport, Subject};
use serde::Serialize;

use crate::services::Services;

/// Acquire `count` articles and summarize them.
///
/// # Errors
///
/// Returns an error for a blank subject or a failed summary call.
pub(crate) async fn run_articles(
    pipeline: &AcquisitionPipeline,
    services: &Services,
    subject: &str,
    count: usize,
) -> anyhow::Result<()> {
    let subject = Subject::new(subject)?;
    let acquisition = pipeline.acquire(&subject, count).await;
    let mut articles = accept_acquisition(acquisition, false)?;

    services.enricher.summarize_all(&mut articles).await?;
    emit(&articles, None)
}

/// Enrich a previously saved article list and print its report.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if
/// enrichment or aggregation fails.
pub(crate) async fn run_analyze(
    services: &Services,
    subject: &str,
    input: &Path,
) -> anyhow::Result<()> {
    let subject = Subject::new(subject)?;
    let mut articles = read_articles(input)?;
    tracing::info!(subject = %subject, articles = articles.len(), input = %input.display(), "analyzing article list");

    let report = analyze(services, &subject, &mut articles).await?;
    emit(&report, None)
}

/// Full pipeline from search to report.
///
/// # Errors
///
/// Returns an error for a blank subject, a short article set when
/// `require_full` is set, or any enrichment/aggregation failure.
pub(crate) async fn run_report(
    pipeline: &AcquisitionPipeline,
    services: &Services,
    subject: &str,
    count: usize,
    require_full: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let subject = Subject::new(subject)?;
    let acquisition = pipeline.acquire(&subject, count).await;
    let mut articles = accept_acquisition(acquisition, require_full)?;

    let report = analyze(services, &subject, &mut articles).await?;
    emit(&report, output)
}

async fn analyze(
    services: &Services,
    subject: &Subject,
    articles: &mut [Article],
) -> anyhow::Result<FinalReport> {
    services.enricher.enrich_all(articles).await?;
    let score = services.engine.score(subject, articles).await?;
    Ok(assemble_scored(subject, articles, score))
}

fn accept_acquisition(acquisition: Acquisition, require_full: bool) -> anyhow::Result<Vec<Article>> {
    if require_full {
        return Ok(acquisition.require_complete()?);
    }
    if !acquisition.is_complete() {
        tracing::warn!(
            requested = acquisition.requested,
            obtained = acquisition.obtained(),
            "continuing with a short article set"
        );
    }
    Ok(acquisition.into_articles())
}

fn read_articles(path: &Path) -> anyhow::Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_articles(&raw).map_err(|e| anyhow::anyhow!("invalid article list in {}: {e}", path.display()))
}

fn parse_articles(raw: &str) -> Result<Vec<Article>, serde_json::Error> {
    serde_json::from_str(raw)
}

fn emit<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
