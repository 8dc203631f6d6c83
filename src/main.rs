//! MathHub · Practice Problem Catalog Backend
//!
//! - Axum HTTP API over a remote problem sheet (opaque JSON endpoint)
//! - Filtering and card rendering served as HTML fragments
//! - Durable per-problem completion set in a local JSON file
//! - Static page (./static/index.html) consuming the fragment API
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   SHEET_ENDPOINT      : URL of the published sheet web app
//!   PROGRESS_PATH       : where the completed-id set is persisted
//!   MATHHUB_CONFIG_PATH : path to TOML config (overridden by the above)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use mathhub_backend::config;
use mathhub_backend::routes::build_router;
use mathhub_backend::state::AppState;
use mathhub_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = config::load_config_from_env();
  let state = AppState::new(&cfg)?;

  // Initial load. A failure is not fatal: the view serves an error card and
  // the refresh action remains the recovery path.
  if let Err(e) = state.refresh().await {
    error!(target: "catalog", error = %e, "Initial sheet fetch failed; serving error state");
  }

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "mathhub_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
