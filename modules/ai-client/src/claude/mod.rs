mod client;
pub(crate) mod types;

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::{Sampling, TextGenerator};
use crate::util::log_preview;
use client::ClaudeClient;

// =============================================================================
// Claude Agent
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: String,
    pub(crate) model: String,
    client: ClaudeClient,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let client = ClaudeClient::new(&api_key);
        Self {
            api_key,
            model: model.into(),
            client,
        }
    }

    /// Point the agent at a different endpoint (regional gateway, proxy, test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(&url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    // =========================================================================
    // Convenience methods
    // =========================================================================

    /// Send one user turn and return the concatenated text of the reply.
    pub async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<Option<String>> {
        let request = ClaudeClient::single_turn(&self.model, prompt, sampling);
        let response = self.client.send(&request).await?;
        let text = response.text();

        tracing::debug!(
            model = %self.model,
            reply = %text.as_deref().map(|t| log_preview(t, 80)).unwrap_or_default(),
            "Claude reply received"
        );

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for Claude {
    async fn generate(&self, prompt: &str, sampling: Sampling) -> Result<Option<String>> {
        self.complete(prompt, sampling).await
    }
}
