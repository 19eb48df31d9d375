use std::collections::HashSet;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoveltyVerdict {
    pub is_novel: bool,
    pub status: &'static str,
}

/// Exact joke texts already shown in one session. No case or whitespace
/// folding: "Fsh!" and "fsh!" are different jokes.
#[derive(Debug, Clone, Default)]
pub struct ToldJokes {
    texts: HashSet<String>,
}

impl ToldJokes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` and report whether it had been told before.
    pub fn check(&mut self, text: &str) -> NoveltyVerdict {
        if self.texts.contains(text) {
            return NoveltyVerdict {
                is_novel: false,
                status: "Repeat",
            };
        }
        self.texts.insert(text.to_string());
        NoveltyVerdict {
            is_novel: true,
            status: "Novel",
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn clear(&mut self) {
        self.texts.clear();
    }
}
