use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PunchlineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    UnknownSource(#[from] UnknownSource),
}

/// Why a joke source file could not be turned into a joke list.
///
/// A single malformed record rejects the whole file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A source key that is not in the catalog. Carries the known keys so the
/// caller can tell the user what is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown joke file: {key}. Available options: {available:?}")]
pub struct UnknownSource {
    pub key: String,
    pub available: Vec<String>,
}
