use std::env;
use std::path::PathBuf;

use crate::error::PunchlineError;
use crate::sources::JokeCatalog;

pub const DEFAULT_JUDGE_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_JOKE_SOURCES: &str = "classic=data/jokes_classic.json,tech=data/jokes_tech.json,animal=data/jokes_animal.json,spanish=data/jokes_spanish.json";
pub const DEFAULT_JOKE_SOURCE: &str = "classic";

/// Application configuration loaded from environment variables.
/// Nothing is required; an unset `ANTHROPIC_API_KEY` only disables remote scoring.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Funniness judge
    pub anthropic_api_key: Option<String>,
    pub judge_base_url: Option<String>,
    pub judge_model: String,

    // Joke sources
    pub joke_sources: JokeCatalog,
}

impl Config {
    pub fn from_env() -> Result<Self, PunchlineError> {
        dotenvy::dotenv().ok();
        let config = Self::from_vars(|key| env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build a config from any variable lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_vars<F>(var: F) -> Result<Self, PunchlineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let web_port = match var("WEB_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                PunchlineError::Config(format!("WEB_PORT must be a number, got '{raw}'"))
            })?,
            None => 5001,
        };

        let sources = parse_sources(
            &var("JOKE_SOURCES").unwrap_or_else(|| DEFAULT_JOKE_SOURCES.to_string()),
        )?;
        let default_source =
            var("JOKE_SOURCE_DEFAULT").unwrap_or_else(|| DEFAULT_JOKE_SOURCE.to_string());

        Ok(Self {
            web_host: var("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
            anthropic_api_key: var("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            judge_base_url: var("JUDGE_BASE_URL").filter(|u| !u.trim().is_empty()),
            judge_model: var("JUDGE_MODEL").unwrap_or_else(|| DEFAULT_JUDGE_MODEL.to_string()),
            joke_sources: JokeCatalog::new(sources, default_source)?,
        })
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  WEB: {}:{}", self.web_host, self.web_port);
        tracing::info!("  ANTHROPIC_API_KEY: {}", preview_opt(&self.anthropic_api_key));
        tracing::info!(
            "  JUDGE_BASE_URL: {}",
            self.judge_base_url.as_deref().unwrap_or("<default>")
        );
        tracing::info!("  JUDGE_MODEL: {}", self.judge_model);
        tracing::info!(
            "  JOKE_SOURCES: {:?} (default {})",
            self.joke_sources.keys(),
            self.joke_sources.default_key()
        );
    }
}

/// Parse `key=path,key=path` preserving order.
/// First five characters of a secret plus its length in characters.
fn preview_opt(val: &Option<String>) -> String {
    match val {
        Some(v) if !v.is_empty() => {
            let n = v.char_indices().nth(5).map(|(i, _)| i).unwrap_or(v.len());
            format!("{}...({} chars)", &v[..n], v.chars().count())
        }
        _ => "<not set>".to_string(),
    }
}

fn parse_sources(raw: &str) -> Result<Vec<(String, PathBuf)>, PunchlineError> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, path)) if !key.trim().is_empty() && !path.trim().is_empty() => {
                Ok((key.trim().to_string(), PathBuf::from(path.trim())))
            }
            _ => Err(PunchlineError::Config(format!(
                "JOKE_SOURCES entry '{pair}' must look like key=path"
            ))),
        })
        .collect()
}
