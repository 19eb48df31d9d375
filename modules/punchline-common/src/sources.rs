//! Named joke sources and the file loader behind them.
//!
//! Loading is strict: the loader either returns every record in the file or a
//! [`LoadError`]. Substituting the built-in list is the catalog's job, see
//! [`JokeCatalog::load_or_fallback`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{LoadError, PunchlineError, UnknownSource};
use crate::types::Joke;

/// An immutable, cheaply shared joke list. Replaced wholesale, never edited.
pub type JokeList = Arc<[Joke]>;

/// Read and parse a JSON array of `{id, text}` records.
pub fn load_jokes(path: &Path) -> Result<JokeList, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let jokes: Vec<Joke> = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(jokes.into())
}

/// The list served when a source cannot be loaded, so the demo always has
/// something to show. Entry 3 repeats entry 1 and entry 2 trips the deny-list.
pub fn fallback_jokes() -> JokeList {
    vec![
        Joke::new(
            1,
            "Why don't scientists trust atoms? Because they make up everything!",
        ),
        Joke::new(
            2,
            "My dog used to chase people on a bike a lot. It got so bad, I had to take his darn bike away.",
        ),
        Joke::new(
            3,
            "Why don't scientists trust atoms? Because they make up everything!",
        ),
        Joke::new(4, "What do you call a fish with no eyes? Fsh!"),
    ]
    .into()
}

/// Ordered mapping of source keys to file locations, plus the key new
/// sessions start on.
#[derive(Debug, Clone)]
pub struct JokeCatalog {
    entries: Vec<(String, PathBuf)>,
    default_key: String,
}

impl JokeCatalog {
    pub fn new(
        entries: Vec<(String, PathBuf)>,
        default_key: impl Into<String>,
    ) -> Result<Self, PunchlineError> {
        let default_key = default_key.into();
        if entries.is_empty() {
            return Err(PunchlineError::Config(
                "at least one joke source is required".to_string(),
            ));
        }
        for (i, (key, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(k, _)| k == key) {
                return Err(PunchlineError::Config(format!(
                    "duplicate joke source key: {key}"
                )));
            }
        }
        if !entries.iter().any(|(k, _)| *k == default_key) {
            return Err(PunchlineError::Config(format!(
                "default joke source '{default_key}' is not in the catalog"
            )));
        }
        Ok(Self {
            entries,
            default_key,
        })
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Source keys in configuration order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn path(&self, key: &str) -> Result<&Path, UnknownSource> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p.as_path())
            .ok_or_else(|| self.unknown_source(key))
    }

    /// The error reported for a key outside the catalog.
    pub fn unknown_source(&self, key: &str) -> UnknownSource {
        UnknownSource {
            key: key.to_string(),
            available: self.keys(),
        }
    }

    /// Load a known source, substituting [`fallback_jokes`] if the file is
    /// missing or malformed. Only an unknown key is an error.
    pub fn load_or_fallback(&self, key: &str) -> Result<JokeList, UnknownSource> {
        let path = self.path(key)?;
        match load_jokes(path) {
            Ok(jokes) => {
                info!(
                    source = key,
                    path = %path.display(),
                    count = jokes.len(),
                    "Loaded joke source"
                );
                Ok(jokes)
            }
            Err(e) => {
                warn!(
                    source = key,
                    error = %e,
                    "Joke source unavailable, using built-in jokes"
                );
                Ok(fallback_jokes())
            }
        }
    }
}
