//! JSON handlers and the page route.
//!
//! Every handler answers 200 with a descriptive payload. Unknown sources,
//! exhausted lists and degraded scores are reported in the body, never as
//! HTTP error statuses.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, HeaderMap, Uri},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use punchline_common::{fallback_jokes, UnknownSource};
use punchline_eval::FunninessMethod;

use crate::session::SessionId;
use crate::templates::render_index;
use crate::AppState;

// --- Query params ---

/// First `funniness_method` in the query string. Later repeats are ignored.
fn funniness_method_param(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(name, _)| name == "funniness_method")
        .map(|(_, value)| value.as_str())
}

// --- Response structs ---

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    active_file: String,
    available_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

// --- Helpers ---

/// Attach `Set-Cookie` when the session id was minted for this request.
fn with_session_cookie(sid: &SessionId, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if let Some(cookie) = sid.set_cookie() {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

// --- Handlers ---

/// Serve the demo page and start the caller's session over.
pub async fn index_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let sid = SessionId::from_headers(&headers);
    let active = state
        .sessions
        .with_session(&sid.id, |s| {
            s.reset();
            s.active_source().to_string()
        })
        .await;

    with_session_cookie(&sid, Html(render_index(&state.catalog.keys(), &active)))
}

fn unknown_source_response(sid: &SessionId, err: UnknownSource) -> Response {
    warn!(session = %sid.id, source = %err.key, "Unknown joke source requested");
    with_session_cookie(
        sid,
        Json(json!({ "status": "error", "message": err.to_string() })),
    )
}

pub async fn switch_joke_file(
    State(state): State<Arc<AppState>>,
    key: Result<Path<String>, PathRejection>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let sid = SessionId::from_headers(&headers);

    // A key that does not decode is reported by its raw path segment.
    let key = match key {
        Ok(Path(key)) => key,
        Err(_) => {
            let raw = uri.path().rsplit('/').next().unwrap_or_default();
            return unknown_source_response(&sid, state.catalog.unknown_source(raw));
        }
    };

    // Load off the runtime threads and outside the session lock; an unknown
    // key never touches the session.
    let loaded = {
        let state = Arc::clone(&state);
        let key = key.clone();
        tokio::task::spawn_blocking(move || state.catalog.load_or_fallback(&key)).await
    };
    let jokes = match loaded {
        Ok(Ok(jokes)) => jokes,
        Ok(Err(e)) => return unknown_source_response(&sid, e),
        Err(e) => {
            warn!(
                source = %key,
                error = %e,
                "Joke source load task failed, using built-in jokes"
            );
            fallback_jokes()
        }
    };

    let joke_count = state
        .sessions
        .with_session(&sid.id, |s| s.replace_source(key.as_str(), jokes))
        .await;
    info!(session = %sid.id, source = %key, joke_count, "Switched joke source");

    with_session_cookie(
        &sid,
        Json(json!({
            "status": "success",
            "message": format!("Switched to {key} jokes"),
            "joke_count": joke_count,
        })),
    )
}

pub async fn available_joke_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let sid = SessionId::from_headers(&headers);
    let active_file = state
        .sessions
        .with_session(&sid.id, |s| s.active_source().to_string())
        .await;

    with_session_cookie(
        &sid,
        Json(SourcesResponse {
            active_file,
            available_files: state.catalog.keys(),
        }),
    )
}

pub async fn evaluate_next_joke(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let sid = SessionId::from_headers(&headers);
    let method = FunninessMethod::parse(funniness_method_param(&params));

    let Some(turn) = state
        .sessions
        .with_session(&sid.id, |s| s.next_turn())
        .await
    else {
        return with_session_cookie(
            &sid,
            Json(json!({ "status": "end_of_jokes", "message": "No more jokes!" })),
        );
    };

    // Lock released; the remote call only blocks this request.
    let evaluation = turn.score(&state.scorer, &method).await;
    info!(
        session = %sid.id,
        novel = evaluation.novelty.is_novel,
        safe = evaluation.safety.is_safe,
        score = evaluation.funniness.score,
        method = %method,
        "Evaluated joke"
    );

    with_session_cookie(&sid, Json(evaluation))
}

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "punchline",
        version: env!("CARGO_PKG_VERSION"),
    })
}
