//! Client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Groq, OpenAI and most self-hosted gateways speak this protocol. Each
//! call sends one user message and returns the first choice's content.

use std::time::Duration;

use newsgauge_core::RetryPolicy;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct ChatClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    policy: RetryPolicy,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Creates a client for the Groq endpoint with three attempts and
    /// exponential backoff.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: model.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            policy: RetryPolicy::exponential(3, Duration::from_secs(1)).with_timeout(timeout),
        })
    }

    /// Points the client at another OpenAI-compatible endpoint (or a mock
    /// server in tests). A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Sampling temperature sent with every request.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sends `prompt` as a single user message and returns the reply text,
    /// retrying transient failures under the client's policy.
    ///
    /// # Errors
    ///
    /// Returns the last [`AnalysisError`] once retries are exhausted, or
    /// immediately for non-retriable failures such as a 401.
    pub async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        self.policy
            .run("chat", || self.send(prompt))
            .await
    }

    async fn send(&self, prompt: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or(AnalysisError::EmptyResponse)
    }
}
