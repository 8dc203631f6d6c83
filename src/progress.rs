//! Persistent completion set, backed by a single JSON file.
//!
//! The file holds a JSON array of problem ids, the durable analog of a
//! browser's origin-scoped key-value store. Absent or unparsable content is
//! treated as an empty set and never surfaced as an error. Every mutation is
//! written back before the caller regains control, so a toggle is durable
//! before any response reflecting it goes out.
//!
//! Ids may outlive the problems they refer to: after a refresh drops a
//! problem, its id stays in the set and becomes meaningful again if the same
//! id reappears in a later snapshot.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{info, warn};

/// Storage namespace, kept from the original deployment so existing progress
/// files keep working.
pub const STORAGE_KEY: &str = "mathhub_progress_v1";

/// Default filename derived from the storage key.
pub fn default_file_name() -> String {
  format!("{STORAGE_KEY}.json")
}

pub struct ProgressStore {
  done: HashSet<String>,
  path: PathBuf,
}

impl ProgressStore {
  /// Load the set from `path`. Missing file, unreadable file, or content
  /// that is not a JSON string array all yield an empty set.
  pub fn load(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let done = match std::fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
          warn!(target: "progress", path = %path.display(), error = %e, "Progress file unparsable; starting empty");
          HashSet::new()
        }
      },
      Err(_) => HashSet::new(),
    };
    info!(target: "progress", path = %path.display(), count = done.len(), "Loaded progress set");
    Self { done, path }
  }

  pub fn is_done(&self, id: &str) -> bool {
    self.done.contains(id)
  }

  /// Number of ids marked done, stale ones included.
  pub fn len(&self) -> usize {
    self.done.len()
  }

  pub fn is_empty(&self) -> bool {
    self.done.is_empty()
  }

  pub fn mark_done(&mut self, id: &str) {
    if self.done.insert(id.to_string()) {
      self.save();
    }
  }

  pub fn mark_undone(&mut self, id: &str) {
    if self.done.remove(id) {
      self.save();
    }
  }

  /// Write the full set back as a JSON array. Order is not significant.
  /// The write goes to a sibling temp file first and renames over the
  /// target, so a crash mid-write cannot leave a truncated file behind.
  /// A failed write is logged and otherwise ignored; the in-memory set is
  /// still authoritative for this process.
  fn save(&self) {
    let ids: Vec<&String> = self.done.iter().collect();
    let raw = match serde_json::to_string(&ids) {
      Ok(raw) => raw,
      Err(e) => {
        warn!(target: "progress", error = %e, "Could not serialize progress set");
        return;
      }
    };
    if let Some(dir) = self.path.parent() {
      if !dir.as_os_str().is_empty() {
        if let Err(e) = std::fs::create_dir_all(dir) {
          warn!(target: "progress", dir = %dir.display(), error = %e, "Could not create progress directory");
          return;
        }
      }
    }
    let tmp = self.path.with_extension("json.tmp");
    if let Err(e) = std::fs::write(&tmp, raw) {
      warn!(target: "progress", path = %tmp.display(), error = %e, "Could not write progress file");
      return;
    }
    if let Err(e) = std::fs::rename(&tmp, &self.path) {
      warn!(target: "progress", path = %self.path.display(), error = %e, "Could not install progress file");
    }
  }

  #[cfg(test)]
  pub fn path(&self) -> &std::path::Path {
    &self.path
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::Path;

  fn store_in(dir: &Path) -> ProgressStore {
    ProgressStore::load(dir.join(default_file_name()))
  }

  #[test]
  fn absent_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    assert!(store.is_empty());
    assert!(!store.is_done("1"));
  }

  #[test]
  fn garbage_content_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(default_file_name());
    std::fs::write(&path, "not json at all {{{").unwrap();
    let store = ProgressStore::load(&path);
    assert!(store.is_empty());
  }

  #[test]
  fn wrong_json_shape_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(default_file_name());
    std::fs::write(&path, r#"{"done": ["1"]}"#).unwrap();
    let store = ProgressStore::load(&path);
    assert!(store.is_empty());
  }

  #[test]
  fn mark_done_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    {
      let mut store = store_in(dir.path());
      store.mark_done("x7");
      assert!(store.is_done("x7"));
    }
    let reloaded = store_in(dir.path());
    assert!(reloaded.is_done("x7"));
    assert_eq!(reloaded.len(), 1);
  }

  #[test]
  fn mark_undone_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    {
      let mut store = store_in(dir.path());
      store.mark_done("x7");
      store.mark_undone("x7");
    }
    let reloaded = store_in(dir.path());
    assert!(!reloaded.is_done("x7"));
    assert!(reloaded.is_empty());
  }

  #[test]
  fn every_mutation_is_immediately_durable() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(dir.path());
    store.mark_done("a");
    let on_disk: Vec<String> =
      serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(on_disk, vec!["a".to_string()]);
  }

  #[test]
  fn save_replaces_the_file_without_leaving_a_temp_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(dir.path());
    store.mark_done("a");
    store.mark_done("b");
    assert!(!store.path().with_extension("json.tmp").exists());
    let mut on_disk: Vec<String> =
      serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    on_disk.sort();
    assert_eq!(on_disk, vec!["a".to_string(), "b".to_string()]);
  }

  #[test]
  fn redundant_mutations_are_no_ops() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(dir.path());
    store.mark_undone("never-there");
    // No file should have been created for a no-op.
    assert!(!store.path().exists());
    store.mark_done("a");
    store.mark_done("a");
    assert_eq!(store.len(), 1);
  }
}
