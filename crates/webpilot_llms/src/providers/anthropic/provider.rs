//! Anthropic provider implementation

use async_trait::async_trait;
use reqwest::Client;
use reqwest_eventsource::EventSource;
use tracing::debug;

use super::convert::{from_anthropic_response, to_anthropic_request};
use super::stream::create_stream;
use super::types::{AnthropicConfig, AnthropicResponse};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, GenerateStream, Headers};

pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    pub const API_KEY_ENV: &'static str = "ANTHROPIC_API_KEY";
    pub const BASE_URL_ENV: &'static str = "ANTHROPIC_BASE_URL";

    pub fn new(config: AnthropicConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("anthropic".to_string()));
        }

        let client = Client::new();
        Ok(Self { config, client })
    }

    /// Reads the key from `ANTHROPIC_API_KEY` and an optional `ANTHROPIC_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("anthropic".to_string()))?;

        let mut config = AnthropicConfig::new(api_key);
        if let Ok(base_url) = std::env::var(Self::BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Self::new(config)
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("x-api-key", self.config.api_key.clone());
        headers.insert("anthropic-version", self.config.api_version.clone());
        headers.insert("content-type", "application/json");

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec![
            "claude-3-7-sonnet-20250219".to_string(),
            "claude-3-5-sonnet-20241022".to_string(),
            "claude-3-5-haiku-20241022".to_string(),
        ])
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = self.config.messages_url();
        let body = to_anthropic_request(&request, false)?;
        let headers = self.build_headers(request.options.headers.as_ref());

        debug!(model = %body.model, messages = body.messages.len(), "Anthropic generate");

        let response = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::provider_error(format!(
                "Anthropic API error {}: {}",
                status, error_text
            )));
        }

        let resp: AnthropicResponse = response.json().await?;
        from_anthropic_response(resp)
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        let url = self.config.messages_url();
        let body = to_anthropic_request(&request, true)?;
        let headers = self.build_headers(request.options.headers.as_ref());

        debug!(model = %body.model, messages = body.messages.len(), "Anthropic stream");

        let req_builder = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body);

        let event_source = EventSource::new(req_builder)
            .map_err(|e| Error::stream_error(format!("Failed to create event source: {}", e)))?;

        create_stream(event_source).await
    }
}
