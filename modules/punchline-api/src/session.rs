//! Cookie-keyed evaluation sessions.
//!
//! Each browser gets its own [`JokeSession`] so two tabs never share a cursor
//! or told-set. The registry lock is held only for the synchronous part of a
//! request; callers must not await remote work inside [`SessionRegistry::with_session`].

use std::collections::HashMap;
use std::time::Instant;

use axum::http::{header, HeaderMap, HeaderValue};
use tokio::sync::Mutex;
use uuid::Uuid;

use punchline_common::JokeList;
use punchline_eval::JokeSession;

pub const COOKIE_NAME: &str = "punchline_session";

/// Oldest idle session is dropped past this many.
const MAX_SESSIONS: usize = 10_000;

/// Session id for one request. `fresh` ids were minted here and must be sent
/// back with `Set-Cookie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId {
    pub id: String,
    pub fresh: bool,
}

impl SessionId {
    /// Reuse the id from the cookie header if it is a well-formed UUID,
    /// otherwise mint a new one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookie_header = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        match parse_cookie(cookie_header, COOKIE_NAME).and_then(|v| Uuid::parse_str(v).ok()) {
            Some(uuid) => Self {
                id: uuid.to_string(),
                fresh: false,
            },
            None => Self {
                id: Uuid::new_v4().to_string(),
                fresh: true,
            },
        }
    }

    /// `Set-Cookie` value for fresh ids, `None` otherwise.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.fresh {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
            self.id
        ))
        .ok()
    }
}

struct Entry {
    session: JokeSession,
    last_seen: Instant,
}

pub struct SessionRegistry {
    default_source: String,
    default_jokes: JokeList,
    sessions: Mutex<HashMap<String, Entry>>,
}

impl SessionRegistry {
    pub fn new(default_source: impl Into<String>, default_jokes: JokeList) -> Self {
        Self {
            default_source: default_source.into(),
            default_jokes,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` against the session for `id`, creating it on the default
    /// source if it does not exist yet.
    pub async fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut JokeSession) -> R) -> R {
        let mut sessions = self.sessions.lock().await;

        if !sessions.contains_key(id) && sessions.len() >= MAX_SESSIONS {
            evict_oldest(&mut sessions);
        }

        let entry = sessions.entry(id.to_string()).or_insert_with(|| {
            tracing::info!(session = %id, source = %self.default_source, "Session started");
            Entry {
                session: JokeSession::new(&self.default_source, self.default_jokes.clone()),
                last_seen: Instant::now(),
            }
        });
        entry.last_seen = Instant::now();
        f(&mut entry.session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

fn evict_oldest(sessions: &mut HashMap<String, Entry>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, e)| e.last_seen)
        .map(|(id, _)| id.clone());
    if let Some(id) = oldest {
        tracing::debug!(session = %id, "Evicting idle session");
        sessions.remove(&id);
    }
}

/// Parse a specific cookie from the Cookie header string.
fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}
