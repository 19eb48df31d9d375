//! Funniness scoring: a static table or one call to a hosted model.
//!
//! Remote failures never escape this module. Every path yields a score in
//! 1..=5 and a label saying where it came from.

use std::sync::Arc;

use ai_client::util::log_preview;
use ai_client::{Sampling, TextGenerator};
use punchline_common::{Joke, JokeId};
use serde::Serialize;
use tracing::warn;

pub const DEFAULT_SCORE: u8 = 1;

pub const LABEL_MOCKED: &str = "(Mocked)";
pub const LABEL_DIRECT: &str = "(Direct LLM)";
pub const LABEL_FORMAT_ERROR: &str = "(LLM Format Error)";
pub const LABEL_RESPONSE_ERROR: &str = "(LLM Response Error)";
pub const LABEL_INVOKE_ERROR: &str = "(LLM Invoke Error)";
pub const LABEL_CLIENT_ERROR: &str = "(LLM Client Error)";
pub const LABEL_EVAL_SIMULATION: &str = "(Bedrock Eval Sim.)";
pub const LABEL_UNKNOWN_METHOD: &str = "(Unknown Method)";

/// Low temperature, high nucleus threshold, room for a single digit.
pub const JUDGE_SAMPLING: Sampling = Sampling {
    max_tokens: 10,
    temperature: 0.3,
    top_p: 0.9,
};

/// Fixed scores for the four demo jokes.
const MOCKED_SCORES: &[(JokeId, u8)] = &[(1, 4), (2, 1), (3, 4), (4, 2)];

pub fn mocked_score(id: JokeId) -> u8 {
    MOCKED_SCORES
        .iter()
        .find(|(k, _)| *k == id)
        .map(|(_, s)| *s)
        .unwrap_or(DEFAULT_SCORE)
}

pub fn judge_prompt(joke_text: &str) -> String {
    format!(
        "Rate the funniness of this joke on a scale of 1 to 5 (1=not funny, 5=very funny).\n\
         Only output the numeric score. Do not add any other text, just the number.\n\
         Joke: '{joke_text}'.\n\
         Score:"
    )
}

/// Accept only a bare integer in 1..=5 after trimming.
pub fn parse_score(reply: &str) -> Option<u8> {
    let trimmed = reply.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: u32 = trimmed.parse().ok()?;
    (1..=5).contains(&value).then_some(value as u8)
}

// =============================================================================
// Method
// =============================================================================

/// How the caller wants funniness decided. Unrecognised names are kept so
/// they can be echoed back rather than silently mapped to another method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunninessMethod {
    Mocked,
    DirectLlm,
    BedrockEvalSimulation,
    Unknown(String),
}

impl FunninessMethod {
    /// A missing parameter means `direct_llm`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::DirectLlm,
            Some("mocked") => Self::Mocked,
            Some("direct_llm") => Self::DirectLlm,
            Some("bedrock_eval_simulation") => Self::BedrockEvalSimulation,
            Some(other) => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Mocked => "mocked",
            Self::DirectLlm => "direct_llm",
            Self::BedrockEvalSimulation => "bedrock_eval_simulation",
            Self::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for FunninessMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunninessVerdict {
    pub score: u8,
    pub source: String,
    pub method_used: String,
}

// =============================================================================
// Scorer
// =============================================================================

/// Holds the remote generator, if one was configured at startup. Cheap to clone.
#[derive(Clone, Default)]
pub struct FunninessScorer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl FunninessScorer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A scorer with no remote model. Remote methods degrade to the default score.
    pub fn offline() -> Self {
        Self { generator: None }
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn score(&self, joke: &Joke, method: &FunninessMethod) -> FunninessVerdict {
        let (score, source) = match method {
            FunninessMethod::Mocked => (mocked_score(joke.id), LABEL_MOCKED),
            FunninessMethod::DirectLlm => self.score_remote(&joke.text).await,
            FunninessMethod::BedrockEvalSimulation => {
                // Same remote call as direct_llm; only the label differs.
                let (score, _) = self.score_remote(&joke.text).await;
                (score, LABEL_EVAL_SIMULATION)
            }
            FunninessMethod::Unknown(raw) => {
                warn!(method = %raw, "Unknown funniness method requested");
                (DEFAULT_SCORE, LABEL_UNKNOWN_METHOD)
            }
        };

        FunninessVerdict {
            score,
            source: source.to_string(),
            method_used: method.as_str().to_string(),
        }
    }

    /// One attempt, no retries. Every failure maps to the default score.
    async fn score_remote(&self, joke_text: &str) -> (u8, &'static str) {
        let Some(generator) = &self.generator else {
            warn!("No remote model configured, returning default score");
            return (DEFAULT_SCORE, LABEL_CLIENT_ERROR);
        };

        match generator.generate(&judge_prompt(joke_text), JUDGE_SAMPLING).await {
            Ok(Some(reply)) => match parse_score(&reply) {
                Some(score) => (score, LABEL_DIRECT),
                None => {
                    warn!(
                        reply = %log_preview(reply.trim(), 40),
                        joke = %log_preview(joke_text, 60),
                        "Model returned non-numeric or out-of-range score, defaulting"
                    );
                    (DEFAULT_SCORE, LABEL_FORMAT_ERROR)
                }
            },
            Ok(None) => {
                warn!(joke = %log_preview(joke_text, 60), "Model reply had no text content");
                (DEFAULT_SCORE, LABEL_RESPONSE_ERROR)
            }
            Err(e) => {
                warn!(error = %e, "Model invocation failed");
                (DEFAULT_SCORE, LABEL_INVOKE_ERROR)
            }
        }
    }
}
