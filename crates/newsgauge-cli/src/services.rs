//! Process-wide capability objects, built once from configuration.

use std::sync::Arc;

use newsgauge_acquire::{
    AcquisitionPipeline, ContentFetcher, GoogleSearchClient, HttpExtractor, LinkDiscoverer,
};
use newsgauge_analysis::{AggregationEngine, AnalysisEnricher, ChatClient, LlmAnalyzer, TextAnalysis};
use newsgauge_core::{AppConfig, Pacer, RetryPolicy};

pub(crate) struct Services {
    pub enricher: AnalysisEnricher,
    pub engine: AggregationEngine,
}

impl Services {
    /// Wire the chat client and analyzer described by `config`. The single
    /// analyzer is shared by the enricher and the aggregation engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let chat = ChatClient::new(&config.llm_api_key, &config.llm_model, config.llm_timeout())?
            .with_base_url(&config.llm_base_url)
            .with_temperature(config.llm_temperature);
        let analysis: Arc<dyn TextAnalysis> = Arc::new(
            LlmAnalyzer::new(chat).with_summary_char_limit(config.summary_char_limit),
        );

        Ok(Self {
            enricher: AnalysisEnricher::new(Arc::clone(&analysis)),
            engine: AggregationEngine::new(analysis),
        })
    }
}

/// Wire the search and extraction clients into an acquisition pipeline.
///
/// The search and extraction capabilities each get their own pacer, so the
/// configured delay bounds the request rate to each service.
///
/// # Errors
///
/// Returns an error if the search credentials are not configured or an HTTP
/// client cannot be constructed.
pub(crate) fn build_pipeline(config: &AppConfig) -> anyhow::Result<AcquisitionPipeline> {
    let (api_key, cx) = config.search_credentials()?;
    let search = Arc::new(GoogleSearchClient::new(
        api_key,
        cx,
        config.request_timeout(),
        &config.user_agent,
    )?);
    let discoverer = LinkDiscoverer::new(search)
        .with_policy(RetryPolicy::fixed(
            config.search_max_pages,
            config.inter_request_delay(),
        ))
        .with_page_size(config.search_page_size)
        .with_blocked_domains(&config.blocked_domains)
        .with_pacer(Pacer::new(config.inter_request_delay()))
        .with_call_timeout(config.request_timeout());

    let extractor = Arc::new(HttpExtractor::new(
        config.request_timeout(),
        &config.user_agent,
    )?);
    let fetcher = ContentFetcher::new(extractor)
        .with_policy(RetryPolicy::fixed(
            config.fetch_max_attempts,
            config.fetch_retry_delay(),
        ))
        .with_pacer(Pacer::new(config.inter_request_delay()))
        .with_call_timeout(config.request_timeout());

    Ok(AcquisitionPipeline::new(discoverer, fetcher)
        .with_slack(config.discovery_slack)
        .with_concurrency(config.fetch_concurrency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsgauge_core::{ConfigError, Environment};

    fn config(google_api_key: Option<&str>, google_cx: Option<&str>) -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            google_api_key: google_api_key.map(str::to_owned),
            google_cx: google_cx.map(str::to_owned),
            llm_api_key: "groq-key".to_string(),
            llm_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_model: "test-model".to_string(),
            llm_timeout_secs: 5,
            llm_temperature: 0.2,
            article_count: 3,
            discovery_slack: 5,
            search_max_pages: 3,
            search_page_size: 10,
            blocked_domains: Vec::new(),
            fetch_max_attempts: 3,
            fetch_retry_delay_ms: 0,
            inter_request_delay_ms: 0,
            fetch_concurrency: 1,
            request_timeout_secs: 5,
            user_agent: "newsgauge-test".to_string(),
            summary_char_limit: 100,
        }
    }

    #[test]
    fn analysis_services_need_no_search_credentials() {
        assert!(Services::from_config(&config(None, None)).is_ok());
    }

    #[test]
    fn pipeline_requires_search_credentials() {
        let err = build_pipeline(&config(Some("google-key"), None))
            .err()
            .expect("missing GOOGLE_CX should fail");
        assert!(
            matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingEnvVar(var)) if var == "GOOGLE_CX"
            ),
            "got {err}"
        );
        assert!(build_pipeline(&config(Some("google-key"), Some("engine-id"))).is_ok());
    }
}
