//! Service configuration: sheet endpoint and progress file location.
//!
//! A TOML file pointed at by MATHHUB_CONFIG_PATH provides the base values;
//! SHEET_ENDPOINT and PROGRESS_PATH env variables override individual fields.
//! Any read/parse failure is logged and falls back to defaults, never fatal.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::progress::default_file_name;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
  /// The published spreadsheet web-app URL returning `{"data": [...]}`.
  #[serde(default)]
  pub sheet_endpoint: String,
  /// Where the completed-id set is persisted.
  #[serde(default = "default_progress_path")]
  pub progress_path: PathBuf,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      sheet_endpoint: String::new(),
      progress_path: default_progress_path(),
    }
  }
}

fn default_progress_path() -> PathBuf {
  PathBuf::from("data").join(default_file_name())
}

/// Load config from MATHHUB_CONFIG_PATH (if set), then apply env overrides.
pub fn load_config_from_env() -> AppConfig {
  let mut cfg = match std::env::var("MATHHUB_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match toml::from_str::<AppConfig>(&s) {
        Ok(cfg) => {
          info!(target: "mathhub_backend", %path, "Loaded config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "mathhub_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
          AppConfig::default()
        }
      },
      Err(e) => {
        error!(target: "mathhub_backend", %path, error = %e, "Failed to read config file; using defaults");
        AppConfig::default()
      }
    },
    Err(_) => AppConfig::default(),
  };

  if let Ok(endpoint) = std::env::var("SHEET_ENDPOINT") {
    cfg.sheet_endpoint = endpoint;
  }
  if let Ok(path) = std::env::var("PROGRESS_PATH") {
    cfg.progress_path = PathBuf::from(path);
  }

  if cfg.sheet_endpoint.is_empty() {
    warn!(target: "mathhub_backend", "No sheet endpoint configured (SHEET_ENDPOINT or TOML); initial load will fail until one is set");
  }

  cfg
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toml_overrides_defaults() {
    let cfg: AppConfig = toml::from_str(
      r#"
        sheet_endpoint = "https://example.test/exec"
        progress_path = "/tmp/p.json"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.sheet_endpoint, "https://example.test/exec");
    assert_eq!(cfg.progress_path, PathBuf::from("/tmp/p.json"));
  }

  #[test]
  fn missing_fields_fall_back() {
    let cfg: AppConfig = toml::from_str("").unwrap();
    assert!(cfg.sheet_endpoint.is_empty());
    assert!(cfg.progress_path.ends_with("mathhub_progress_v1.json"));
  }
}
