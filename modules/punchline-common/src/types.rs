use serde::{Deserialize, Serialize};

pub type JokeId = i64;

/// A single joke record as stored in a source file: `{"id": 1, "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: JokeId,
    pub text: String,
}

impl Joke {
    pub fn new(id: JokeId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
