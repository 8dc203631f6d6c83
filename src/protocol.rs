//! Wire types for the HTTP API.
//!
//! `ViewOut` carries the fragments for a full redraw; `ToggleOut` carries
//! only what the single-card update needs (new label + progress summary), so
//! the page never has a reason to redraw the list after a toggle.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

/// Current control values, read on demand per request.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
  #[serde(default)]
  pub search: String,
  #[serde(default)]
  pub topic: String,
  #[serde(default)]
  pub difficulty: String,
}

/// Full-render payload: one fragment per container the page owns.
#[derive(Serialize, Deserialize)]
pub struct ViewOut {
  /// False only when no snapshot was ever installed (initial load failed);
  /// `cards` then holds the error card instead of the list.
  pub loaded: bool,
  pub topic_options: String,
  pub cards: String,
  pub count_label: String,
  pub progress_pct: u32,
  pub progress_label: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ToggleIn {
  pub id: String,
  pub done: bool,
}

/// Incremental-update payload for exactly one card.
#[derive(Serialize, Deserialize)]
pub struct ToggleOut {
  pub id: String,
  pub done: bool,
  pub label: String,
  pub progress_pct: u32,
  pub progress_label: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorOut {
  pub error: String,
}
