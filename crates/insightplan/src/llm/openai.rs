//! OpenAI-compatible chat completions provider (Groq by default).

use std::time::Duration;

use indexmap::IndexMap;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::analysis::ColumnSummary;
use crate::error::{InsightError, Result};

use super::prompts;
use super::provider::{LlmConfig, SuggestionGateway};

/// Groq chat completions endpoint.
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// OpenAI chat completions endpoint.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat completions client for any OpenAI-compatible endpoint.
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_url: String,
    api_key: String,
    name: String,
    config: LlmConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for an arbitrary endpoint.
    pub fn with_config(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        config: LlmConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InsightError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            name: "openai-compatible".to_string(),
            config,
        })
    }

    /// Create a Groq provider with the given API key.
    pub fn groq(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_config(GROQ_API_URL, api_key, LlmConfig::default())?.named("groq"))
    }

    /// Create an OpenAI provider with the given API key.
    pub fn openai(api_key: impl Into<String>) -> Result<Self> {
        let config = LlmConfig {
            model: "gpt-4o-mini".to_string(),
            ..LlmConfig::default()
        };
        Ok(Self::with_config(OPENAI_API_URL, api_key, config)?.named("openai"))
    }

    /// Create a Groq provider from `GROQ_API_KEY`.
    pub fn groq_from_env() -> Result<Self> {
        Self::groq(env_key("GROQ_API_KEY")?)
    }

    /// Create an OpenAI provider from `OPENAI_API_KEY`.
    pub fn openai_from_env() -> Result<Self> {
        Self::openai(env_key("OPENAI_API_KEY")?)
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| InsightError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// Send one chat completion request.
    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        debug!(url = %self.api_url, model = %self.config.model, "Sending chat completion request");

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| InsightError::Gateway(format!("API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(InsightError::Gateway(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .map_err(|e| InsightError::Gateway(format!("Failed to parse API response: {}", e)))?;

        api_response.into_text()
    }
}

impl SuggestionGateway for OpenAiCompatibleProvider {
    fn suggest(&self, summary: &IndexMap<String, ColumnSummary>) -> Result<String> {
        self.send_message(&prompts::tips_prompt(summary))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn env_key(var: &str) -> Result<String> {
    std::env::var(var)
        .map_err(|_| InsightError::Config(format!("{} environment variable not set", var)))
}

/// Chat completions response structure.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice.
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| InsightError::Gateway("No choices in API response".to_string()))
    }
}
