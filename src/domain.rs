//! Domain model: one practice problem as shown in the catalog, plus the
//! normalization that turns raw sheet rows into problems.

use serde::{Deserialize, Serialize};

/// One catalog entry. Optional fields use the empty string as "absent";
/// the renderer omits badges/links/notes for empty values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
  pub id: String,
  pub title: String,
  #[serde(default)] pub pdf_url: String,
  #[serde(default)] pub forum_url: String,
  #[serde(default)] pub topic: String,
  #[serde(default)] pub difficulty: String,
  #[serde(default)] pub source: String,
  #[serde(default)] pub notes: String,
}

/// Raw row as the sheet endpoint delivers it. Every field may be missing.
/// `id` is accepted as either a string or a number (spreadsheet exports
/// produce both), everything else as a plain string.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
  #[serde(default)] pub id: Option<serde_json::Value>,
  #[serde(default)] pub title: String,
  #[serde(default)] pub pdf_url: String,
  #[serde(default)] pub forum_url: String,
  #[serde(default)] pub topic: String,
  #[serde(default)] pub difficulty: String,
  #[serde(default)] pub source: String,
  #[serde(default)] pub notes: String,
}

/// Stringify a sheet id cell. Non-string, non-number values count as absent,
/// and so does a numeric 0 (the original page treated falsy ids as missing).
fn id_to_string(v: &serde_json::Value) -> String {
  match v {
    serde_json::Value::String(s) => s.clone(),
    serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
    _ => String::new(),
  }
}

/// Turn one raw row into a `Problem`, supplying per-field defaults.
/// The id falls back to the 1-based position when absent or empty, the
/// title to "Untitled". Normalization never fails.
pub fn normalize_row(row: SheetRow, index: usize) -> Problem {
  let id = row
    .id
    .as_ref()
    .map(id_to_string)
    .filter(|s| !s.is_empty())
    .unwrap_or_else(|| (index + 1).to_string());
  let title = if row.title.is_empty() { "Untitled".to_string() } else { row.title };
  Problem {
    id,
    title,
    pdf_url: row.pdf_url,
    forum_url: row.forum_url,
    topic: row.topic,
    difficulty: row.difficulty,
    source: row.source,
    notes: row.notes,
  }
}

/// Normalize a whole sheet payload, preserving row order.
pub fn normalize_rows(rows: Vec<SheetRow>) -> Vec<Problem> {
  rows
    .into_iter()
    .enumerate()
    .map(|(i, row)| normalize_row(row, i))
    .collect()
}
