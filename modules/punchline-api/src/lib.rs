//! HTTP surface for the joke evaluation demo.
//!
//! ## Routes
//!
//! - `GET /` - Demo page; restarts the caller's session
//! - `GET /health` - Health check (JSON)
//! - `GET /switch_joke_file/{key}` - Switch the session's joke source
//! - `GET /available_joke_files` - Active and known source keys
//! - `GET /evaluate_next_joke?funniness_method=...` - Evaluate the next joke

pub mod rest;
pub mod session;
pub mod state;
pub mod templates;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub use state::AppState;

/// Build the complete router with middleware.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(rest::index_page))
        .route("/health", get(rest::health_check))
        .route("/switch_joke_file/{key}", get(rest::switch_joke_file))
        .route("/available_joke_files", get(rest::available_joke_files))
        .route("/evaluate_next_joke", get(rest::evaluate_next_joke))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Session state changes on every call; nothing is cacheable
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
