use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Sampling
// =============================================================================

/// Fixed sampling configuration sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Sampling {
    pub fn new(max_tokens: u32, temperature: f32, top_p: f32) -> Self {
        Self {
            max_tokens,
            temperature,
            top_p,
        }
    }
}

// =============================================================================
// TextGenerator Trait
// =============================================================================

/// Single-prompt, single-reply text generation.
///
/// `Ok(None)` means the call succeeded but the reply carried no text content.
/// Transport and API failures are `Err`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, sampling: Sampling) -> Result<Option<String>>;
}
