use punchline_common::{JokeCatalog, UnknownSource};
use punchline_eval::FunninessScorer;

use crate::session::SessionRegistry;

/// Shared state available to all request handlers.
pub struct AppState {
    pub catalog: JokeCatalog,
    pub sessions: SessionRegistry,
    pub scorer: FunninessScorer,
}

impl AppState {
    /// Load the default source once; every new session starts from that list.
    pub fn new(catalog: JokeCatalog, scorer: FunninessScorer) -> Result<Self, UnknownSource> {
        let default_key = catalog.default_key().to_string();
        let default_jokes = catalog.load_or_fallback(&default_key)?;

        tracing::info!(
            source = %default_key,
            jokes = default_jokes.len(),
            remote_scoring = scorer.is_remote_enabled(),
            "application state initialized"
        );

        Ok(Self {
            sessions: SessionRegistry::new(default_key, default_jokes),
            catalog,
            scorer,
        })
    }
}
