use std::time::Duration;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Only needed by commands that search; see [`AppConfig::search_credentials`].
    pub google_api_key: Option<String>,
    pub google_cx: Option<String>,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub llm_temperature: f32,
    pub article_count: usize,
    pub discovery_slack: usize,
    pub search_max_pages: u32,
    pub search_page_size: u32,
    pub blocked_domains: Vec<String>,
    pub fetch_max_attempts: u32,
    pub fetch_retry_delay_ms: u64,
    pub inter_request_delay_ms: u64,
    pub fetch_concurrency: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub summary_char_limit: usize,
}

impl AppConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// The search API key and engine id, in that order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming the first of
    /// `GOOGLE_API_KEY` / `GOOGLE_CX` that is unset.
    pub fn search_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let key = self
            .google_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;
        let cx = self
            .google_cx
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_CX".to_string()))?;
        Ok((key, cx))
    }

    #[must_use]
    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }

    #[must_use]
    pub fn fetch_retry_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_retry_delay_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "[redacted]"))
            .field("google_cx", &self.google_cx)
            .field("llm_api_key", &"[redacted]")
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("llm_temperature", &self.llm_temperature)
            .field("article_count", &self.article_count)
            .field("discovery_slack", &self.discovery_slack)
            .field("search_max_pages", &self.search_max_pages)
            .field("search_page_size", &self.search_page_size)
            .field("blocked_domains", &self.blocked_domains)
            .field("fetch_max_attempts", &self.fetch_max_attempts)
            .field("fetch_retry_delay_ms", &self.fetch_retry_delay_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("summary_char_limit", &self.summary_char_limit)
            .finish()
    }
}
