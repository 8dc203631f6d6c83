//! Client for the remote problem sheet endpoint.
//!
//! The endpoint is an opaque HTTP JSON source (a published spreadsheet web
//! app) returning `{"data": [row, ...]}`. Row order is the catalog order.
//! Each request carries a cache-defeating `cb` query parameter so manual
//! refreshes bypass any intermediary caching.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::{normalize_rows, Problem, SheetRow};

/// Why a fetch failed. Missing optional row fields are never an error; only
/// transport problems and undecodable bodies are.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("sheet endpoint returned HTTP {status}")]
  Http { status: StatusCode },
  #[error("could not reach sheet endpoint: {0}")]
  Network(#[source] reqwest::Error),
  #[error("sheet response was not the expected JSON shape: {0}")]
  Parse(#[source] reqwest::Error),
}

/// Top-level payload shape. A missing `data` field reads as an empty list.
#[derive(serde::Deserialize)]
struct SheetResponse {
  #[serde(default)]
  data: Vec<SheetRow>,
}

pub struct Repository {
  client: reqwest::Client,
  endpoint: String,
  cb_seq: AtomicU64,
}

impl Repository {
  pub fn new(endpoint: String) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()?;
    Ok(Self { client, endpoint, cb_seq: AtomicU64::new(0) })
  }

  /// Cache-busting token: millisecond timestamp plus a process-monotonic
  /// counter, so two refreshes in the same millisecond still differ.
  fn cache_buster(&self) -> String {
    let millis = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_millis())
      .unwrap_or(0);
    let seq = self.cb_seq.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{seq}")
  }

  /// Fetch the full problem list. On success the caller receives a complete
  /// replacement snapshot; this never merges with previous results.
  #[instrument(level = "info", skip(self), fields(endpoint = %self.endpoint))]
  pub async fn fetch_problems(&self) -> Result<Vec<Problem>, FetchError> {
    let url = format!("{}?cb={}", self.endpoint, self.cache_buster());

    let res = self
      .client
      .get(&url)
      .header(USER_AGENT, "mathhub-backend/0.1")
      .send()
      .await
      .map_err(FetchError::Network)?;

    let status = res.status();
    if !status.is_success() {
      return Err(FetchError::Http { status });
    }

    let body: SheetResponse = res.json().await.map_err(FetchError::Parse)?;
    let problems = normalize_rows(body.data);
    info!(target: "catalog", count = problems.len(), "Fetched problem sheet");
    Ok(problems)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cache_buster_tokens_never_repeat() {
    let repo = Repository::new("http://localhost/sheet".into()).unwrap();
    let a = repo.cache_buster();
    let b = repo.cache_buster();
    assert_ne!(a, b);
  }

  #[test]
  fn fetch_error_messages_carry_the_status() {
    let e = FetchError::Http { status: StatusCode::INTERNAL_SERVER_ERROR };
    assert!(e.to_string().contains("500"));
  }
}
