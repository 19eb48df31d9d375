use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use super::types::*;
use crate::traits::Sampling;
use crate::util::log_preview;

pub(crate) const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Raw HTTP transport for the Messages endpoint. Built once per [`super::Claude`]
/// and reused, so the connection pool lives as long as the agent.
#[derive(Clone)]
pub(crate) struct ClaudeClient {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
}

impl ClaudeClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.base_url)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key).context("API key is not a valid header value")?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// One user turn with the caller's sampling settings.
    pub fn single_turn(model: &str, prompt: &str, sampling: Sampling) -> ChatRequest {
        ChatRequest::new(model)
            .message(WireMessage::user(prompt))
            .max_tokens(sampling.max_tokens)
            .temperature(sampling.temperature)
            .top_p(sampling.top_p)
    }

    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint();

        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            temperature = ?request.temperature,
            top_p = ?request.top_p,
            "Claude messages request"
        );

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Claude API error ({status}): {}", log_preview(&body, 200));
        }

        response
            .json::<ChatResponse>()
            .await
            .context("Claude API returned an unreadable body")
    }
}
