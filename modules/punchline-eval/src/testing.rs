// Test doubles for the remote model boundary.
//
// ScriptedGenerator (TextGenerator) answers every prompt the same way and
// records what it was asked, so tests can assert on call counts and sampling.

use std::sync::{Arc, Mutex};

use ai_client::{Sampling, TextGenerator};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Silent,
    Fail(String),
}

#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Script,
    prompts: Mutex<Vec<(String, Sampling)>>,
}

impl ScriptedGenerator {
    fn with_script(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Reply with `text` to every prompt.
    pub fn replying(text: &str) -> Arc<Self> {
        Self::with_script(Script::Reply(text.to_string()))
    }

    /// Succeed with a reply that has no text content.
    pub fn silent() -> Arc<Self> {
        Self::with_script(Script::Silent)
    }

    /// Fail every call as a transport error would.
    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_script(Script::Fail(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    pub fn last_sampling(&self) -> Option<Sampling> {
        self.prompts.lock().unwrap().last().map(|(_, s)| *s)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, sampling: Sampling) -> Result<Option<String>> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), sampling));
        match &self.script {
            Script::Reply(text) => Ok(Some(text.clone())),
            Script::Silent => Ok(None),
            Script::Fail(message) => Err(anyhow!("{message}")),
        }
    }
}
