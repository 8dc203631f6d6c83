//! HTTP endpoint handlers. Thin wrappers that forward to the state layer.
//!
//! Filter changes only ever hit `view` (re-filter, never re-fetch); the
//! refresh action is the single path that talks to the sheet endpoint again;
//! toggles go through the local-only update path and never redraw the list.

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{error, info, instrument};

use crate::filter::Criteria;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

/// Full render for the current control values. Criteria are rebuilt from the
/// query string on every call; they are never stored server-side.
#[instrument(level = "info", skip(state), fields(search = %q.search, topic = %q.topic, difficulty = %q.difficulty))]
pub async fn http_get_view(
  State(state): State<AppState>,
  Query(q): Query<ViewQuery>,
) -> impl IntoResponse {
  let criteria = Criteria { search: q.search, topic: q.topic, difficulty: q.difficulty };
  let out = state.view(&criteria).await;
  info!(target: "catalog", loaded = out.loaded, count_label = %out.count_label, "View served");
  Json(out)
}

/// Manual refresh: re-fetch the sheet, then render through the caller's
/// current control values, so an active search or topic selection survives
/// the new snapshot. A failed fetch answers 502 and leaves the previously
/// installed snapshot (and the progress set) exactly as they were.
#[instrument(level = "info", skip(state), fields(search = %q.search, topic = %q.topic, difficulty = %q.difficulty))]
pub async fn http_post_refresh(
  State(state): State<AppState>,
  Query(q): Query<ViewQuery>,
) -> Result<Json<ViewOut>, (StatusCode, Json<ErrorOut>)> {
  if let Err(e) = state.refresh().await {
    error!(target: "catalog", error = %e, "Refresh failed");
    return Err((StatusCode::BAD_GATEWAY, Json(ErrorOut { error: e.to_string() })));
  }
  let criteria = Criteria { search: q.search, topic: q.topic, difficulty: q.difficulty };
  Ok(Json(state.view(&criteria).await))
}

/// Completion toggle for one problem. Responds only after the progress file
/// write, and only with the affected control's data.
#[instrument(level = "info", skip(state, body), fields(id = %body.id, done = body.done))]
pub async fn http_post_toggle(
  State(state): State<AppState>,
  Json(body): Json<ToggleIn>,
) -> impl IntoResponse {
  let out = state.toggle(&body.id, body.done).await;
  info!(target: "progress", id = %out.id, done = out.done, pct = out.progress_pct, "Toggle persisted");
  Json(out)
}
