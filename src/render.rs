//! HTML fragment rendering for the catalog page.
//!
//! Everything here is a pure function from (problems, criteria, progress) to
//! markup strings; the page swaps the fragments into its containers. The data
//! source is a semi-trusted spreadsheet, so every user-supplied field goes
//! through `escape_html` before it can reach markup. That includes URLs,
//! which are interpolated into attribute positions.
//!
//! The incremental toggle path and the full render share `toggle_label`, so
//! the two code paths cannot drift apart.

use crate::domain::Problem;
use crate::filter::{visible, Criteria};
use crate::progress::ProgressStore;

/// Escape `& < > " '` for safe interpolation into element and attribute
/// content. Mandatory for all user-supplied text.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

/// The completion control's label, used by both the full render and the
/// single-card update.
pub fn toggle_label(done: bool) -> &'static str {
  if done {
    "Marked done"
  } else {
    "Mark as done"
  }
}

/// Visible-count label, pluralized ("0 problems", "1 problem", "2 problems").
pub fn count_label(n: usize) -> String {
  format!("{} problem{}", n, if n == 1 { "" } else { "s" })
}

/// Completion percentage. The denominator is clamped to 1 so an empty
/// snapshot renders 0% instead of dividing by zero.
pub fn progress_pct(done: usize, total: usize) -> u32 {
  let total = total.max(1);
  ((done as f64 / total as f64) * 100.0).round() as u32
}

pub fn progress_label(pct: u32) -> String {
  format!("{pct}% done")
}

/// One card: escaped title, optional classification badges, optional notes,
/// action links only for non-empty URLs, and the completion toggle.
pub fn render_card(p: &Problem, done: bool) -> String {
  let mut badges = String::new();
  if !p.topic.is_empty() {
    badges.push_str(&format!(r#"<span class="badge">#{}</span>"#, escape_html(&p.topic)));
  }
  if !p.difficulty.is_empty() {
    badges.push_str(&format!(r#"<span class="badge">{}</span>"#, escape_html(&p.difficulty)));
  }
  if !p.source.is_empty() {
    badges.push_str(&format!(r#"<span class="badge">{}</span>"#, escape_html(&p.source)));
  }

  let notes = if p.notes.is_empty() {
    String::new()
  } else {
    format!(r#"<p class="notes">{}</p>"#, escape_html(&p.notes))
  };

  let mut links = String::new();
  if !p.pdf_url.is_empty() {
    links.push_str(&format!(
      r#"<a class="btn" href="{}" target="_blank" rel="noopener">PDF</a>"#,
      escape_html(&p.pdf_url)
    ));
  }
  if !p.forum_url.is_empty() {
    links.push_str(&format!(
      r#"<a class="btn" href="{}" target="_blank" rel="noopener">Forum</a>"#,
      escape_html(&p.forum_url)
    ));
  }

  let id = escape_html(&p.id);
  let checked = if done { " checked" } else { "" };

  format!(
    concat!(
      r#"<article class="card" data-id="{id}">"#,
      "<h3>{title}</h3>",
      r#"<div class="badges">{badges}</div>"#,
      "{notes}",
      r#"<div class="links">{links}</div>"#,
      r#"<div class="actions">"#,
      r#"<input class="toggle" id="done-{id}" type="checkbox"{checked} />"#,
      r#"<label for="done-{id}" class="done-label">{label}</label>"#,
      "</div>",
      "</article>"
    ),
    id = id,
    title = escape_html(&p.title),
    badges = badges,
    notes = notes,
    links = links,
    checked = checked,
    label = toggle_label(done),
  )
}

/// The full filtered card list, in snapshot order.
pub fn render_cards(problems: &[Problem], criteria: &Criteria, progress: &ProgressStore) -> String {
  visible(problems, criteria)
    .into_iter()
    .map(|p| render_card(p, progress.is_done(&p.id)))
    .collect()
}

/// Topic selector options: distinct non-empty topics across the ENTIRE
/// snapshot (never the filtered subset), sorted ascending. The previously
/// selected topic stays selected if it still exists; otherwise the leading
/// wildcard option wins by default.
pub fn render_topic_options(problems: &[Problem], selected: &str) -> String {
  let mut topics: Vec<&str> = problems
    .iter()
    .map(|p| p.topic.as_str())
    .filter(|t| !t.is_empty())
    .collect();
  topics.sort_unstable();
  topics.dedup();

  let mut out = String::from(r#"<option value="">All Topics</option>"#);
  for t in topics {
    let sel = if t == selected { " selected" } else { "" };
    let esc = escape_html(t);
    out.push_str(&format!(r#"<option{sel} value="{esc}">{esc}</option>"#));
  }
  out
}

/// Shown in place of the card list when no snapshot was ever loaded.
pub fn render_error_card(message: &str) -> String {
  format!(
    r#"<div class="card"><h3>Could not load data</h3><p>{}</p></div>"#,
    escape_html(message)
  )
}
