//! Per-session walk over the active joke list.
//!
//! States: a source key, its joke list, the told-set and a cursor. Page load
//! resets told-set and cursor; a source switch replaces the list and resets
//! both; `next_turn` reads at the cursor and advances by one. Past the end it
//! keeps returning `None` without moving.

use punchline_common::{Joke, JokeList};
use serde::Serialize;

use crate::funniness::{FunninessMethod, FunninessScorer, FunninessVerdict};
use crate::novelty::{NoveltyVerdict, ToldJokes};
use crate::safety::{check_safety, SafetyVerdict, UNSAFE_KEYWORDS};

/// The cheap, synchronous part of one evaluation: the joke plus the
/// novelty and safety verdicts. Funniness is scored afterwards so callers can
/// release any lock around the session before the remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub joke: Joke,
    pub novelty: NoveltyVerdict,
    pub safety: SafetyVerdict,
}

impl Turn {
    pub async fn score(self, scorer: &FunninessScorer, method: &FunninessMethod) -> Evaluation {
        let funniness = scorer.score(&self.joke, method).await;
        Evaluation {
            joke: self.joke.text,
            novelty: self.novelty,
            safety: self.safety,
            funniness,
            status: "ok",
        }
    }
}

/// The combined payload returned for one joke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub joke: String,
    pub novelty: NoveltyVerdict,
    pub safety: SafetyVerdict,
    pub funniness: FunninessVerdict,
    pub status: &'static str,
}

#[derive(Debug, Clone)]
pub struct JokeSession {
    source: String,
    jokes: JokeList,
    told: ToldJokes,
    cursor: usize,
}

impl JokeSession {
    pub fn new(source: impl Into<String>, jokes: JokeList) -> Self {
        Self {
            source: source.into(),
            jokes,
            told: ToldJokes::new(),
            cursor: 0,
        }
    }

    pub fn active_source(&self) -> &str {
        &self.source
    }

    pub fn joke_count(&self) -> usize {
        self.jokes.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn told_count(&self) -> usize {
        self.told.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.jokes.len()
    }

    /// Start the current list over. The source and list are kept.
    pub fn reset(&mut self) {
        self.told.clear();
        self.cursor = 0;
    }

    /// Install an already loaded list and start over. Returns the new joke count.
    pub fn replace_source(&mut self, key: impl Into<String>, jokes: JokeList) -> usize {
        self.source = key.into();
        self.jokes = jokes;
        self.reset();
        self.jokes.len()
    }

    /// Take the joke at the cursor, check novelty and safety, advance.
    pub fn next_turn(&mut self) -> Option<Turn> {
        let joke = self.jokes.get(self.cursor)?.clone();
        let novelty = self.told.check(&joke.text);
        let safety = check_safety(&joke.text, UNSAFE_KEYWORDS);
        self.cursor += 1;
        Some(Turn {
            joke,
            novelty,
            safety,
        })
    }
}
