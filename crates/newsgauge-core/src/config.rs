use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Search providers cap a single results page at ten links.
pub const MAX_SEARCH_PAGE_SIZE: u32 = 10;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let non_zero = |var: &str, value: u64| -> Result<(), ConfigError> {
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    };

    let google_api_key = optional("GOOGLE_API_KEY");
    let google_cx = optional("GOOGLE_CX");
    let llm_api_key = require("GROQ_API_KEY")?;

    let env = parse_environment(&or_default("NEWSGAUGE_ENV", "development"))?;
    let log_level = or_default("NEWSGAUGE_LOG_LEVEL", "info");

    let llm_base_url = or_default("NEWSGAUGE_LLM_BASE_URL", "https://api.groq.com/openai/v1");
    let llm_model = or_default("NEWSGAUGE_LLM_MODEL", "llama-3.3-70b-versatile");
    let llm_timeout_secs = parse_u64("NEWSGAUGE_LLM_TIMEOUT_SECS", "60")?;
    non_zero("NEWSGAUGE_LLM_TIMEOUT_SECS", llm_timeout_secs)?;
    let llm_temperature = parse_temperature(&or_default("NEWSGAUGE_LLM_TEMPERATURE", "0.2"))?;

    let article_count = parse_usize("NEWSGAUGE_ARTICLE_COUNT", "10")?;
    if article_count == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSGAUGE_ARTICLE_COUNT".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let discovery_slack = parse_usize("NEWSGAUGE_DISCOVERY_SLACK", "5")?;

    let search_max_pages = parse_u32("NEWSGAUGE_SEARCH_MAX_PAGES", "3")?;
    non_zero("NEWSGAUGE_SEARCH_MAX_PAGES", u64::from(search_max_pages))?;
    let search_page_size = parse_u32("NEWSGAUGE_SEARCH_PAGE_SIZE", "10")?
        .clamp(1, MAX_SEARCH_PAGE_SIZE);
    let blocked_domains = parse_domain_list(&or_default("NEWSGAUGE_BLOCKED_DOMAINS", ""));

    let fetch_max_attempts = parse_u32("NEWSGAUGE_FETCH_MAX_ATTEMPTS", "3")?;
    non_zero("NEWSGAUGE_FETCH_MAX_ATTEMPTS", u64::from(fetch_max_attempts))?;
    let fetch_retry_delay_ms = parse_u64("NEWSGAUGE_FETCH_RETRY_DELAY_MS", "2000")?;
    let inter_request_delay_ms = parse_u64("NEWSGAUGE_INTER_REQUEST_DELAY_MS", "1000")?;
    let fetch_concurrency = parse_usize("NEWSGAUGE_FETCH_CONCURRENCY", "1")?.max(1);

    let request_timeout_secs = parse_u64("NEWSGAUGE_REQUEST_TIMEOUT_SECS", "30")?;
    non_zero("NEWSGAUGE_REQUEST_TIMEOUT_SECS", request_timeout_secs)?;
    let user_agent = or_default("NEWSGAUGE_USER_AGENT", "newsgauge/0.1 (news-sentiment)");
    let summary_char_limit = parse_usize("NEWSGAUGE_SUMMARY_CHAR_LIMIT", "6000")?;

    Ok(AppConfig {
        env,
        log_level,
        google_api_key,
        google_cx,
        llm_api_key,
        llm_base_url,
        llm_model,
        llm_timeout_secs,
        llm_temperature,
        article_count,
        discovery_slack,
        search_max_pages,
        search_page_size,
        blocked_domains,
        fetch_max_attempts,
        fetch_retry_delay_ms,
        inter_request_delay_ms,
        fetch_concurrency,
        request_timeout_secs,
        user_agent,
        summary_char_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSGAUGE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parse a sampling temperature in the `0.0..=2.0` range accepted by
/// OpenAI-compatible chat endpoints.
fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "NEWSGAUGE_LLM_TEMPERATURE".to_string(),
        reason,
    };
    let value = raw.trim().parse::<f32>().map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid(format!("{value} is outside 0.0..=2.0")));
    }
    Ok(value)
}

/// Split a comma-separated domain list, lowercasing and dropping blanks.
fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
