//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  services::{ServeDir, ServeFile},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - the catalog API under `/api/v1/...`
/// - the static page from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: AppState) -> Router {
  let static_service = ServeDir::new("./static")
    .append_index_html_on_directories(true)
    .not_found_service(ServeFile::new("./static/index.html"));

  Router::new()
    .route("/api/v1/health", get(http::http_health))
    .route("/api/v1/view", get(http::http_get_view))
    .route("/api/v1/refresh", post(http::http_post_refresh))
    .route("/api/v1/toggle", post(http::http_post_toggle))
    .with_state(state)
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .fallback_service(static_service)
}
