pub mod config;
pub mod error;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{LoadError, PunchlineError, UnknownSource};
pub use sources::{fallback_jokes, load_jokes, JokeCatalog, JokeList};
pub use types::*;
