//! Visibility predicate over the problem list.
//!
//! Criteria are built fresh from the request's query parameters every time
//! filtering runs; nothing here holds state, so the predicate can be applied
//! on every keystroke from the page without side effects.

use crate::domain::Problem;

/// Current filter selections. Empty strings are the "match everything"
/// wildcard for each field.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
  pub search: String,
  pub topic: String,
  pub difficulty: String,
}

/// Lowercase + trim, the only normalization the search match uses.
fn normalize(s: &str) -> String {
  s.to_lowercase().trim().to_string()
}

/// Pure visibility test: the normalized search text must appear in the
/// normalized title, topic, or notes; topic and difficulty require exact
/// equality unless left empty. Missing fields are empty strings and never
/// fail the match machinery.
pub fn is_visible(p: &Problem, c: &Criteria) -> bool {
  let q = normalize(&c.search);

  let hit = normalize(&p.title).contains(&q)
    || normalize(&p.topic).contains(&q)
    || normalize(&p.notes).contains(&q);

  let topic_ok = c.topic.is_empty() || p.topic == c.topic;
  let diff_ok = c.difficulty.is_empty() || p.difficulty == c.difficulty;

  hit && topic_ok && diff_ok
}

/// Filter a snapshot, preserving its order.
pub fn visible<'a>(problems: &'a [Problem], c: &Criteria) -> Vec<&'a Problem> {
  problems.iter().filter(|p| is_visible(p, c)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn problem(id: &str, title: &str, topic: &str) -> Problem {
    Problem {
      id: id.into(),
      title: title.into(),
      pdf_url: String::new(),
      forum_url: String::new(),
      topic: topic.into(),
      difficulty: String::new(),
      source: String::new(),
      notes: String::new(),
    }
  }

  #[test]
  fn identity_criteria_admit_everything() {
    let c = Criteria::default();
    let ps = vec![problem("1", "Algebra Basics", "algebra"), problem("2", "", "")];
    assert_eq!(visible(&ps, &c).len(), 2);
  }

  #[test]
  fn search_matches_title_topic_or_notes() {
    let mut p = problem("1", "Geometry Proofs", "geometry");
    p.notes = "uses similar triangles".into();

    let by_title = Criteria { search: "proofs".into(), ..Default::default() };
    let by_topic = Criteria { search: "geom".into(), ..Default::default() };
    let by_notes = Criteria { search: "triangle".into(), ..Default::default() };
    let miss = Criteria { search: "algebra".into(), ..Default::default() };

    assert!(is_visible(&p, &by_title));
    assert!(is_visible(&p, &by_topic));
    assert!(is_visible(&p, &by_notes));
    assert!(!is_visible(&p, &miss));
  }

  #[test]
  fn search_is_case_and_whitespace_insensitive() {
    let p = problem("1", "Algebra Basics", "algebra");
    let c = Criteria { search: "  ALG  ".into(), ..Default::default() };
    assert!(is_visible(&p, &c));
  }

  #[test]
  fn topic_filter_is_exact_match_or_wildcard() {
    let p = problem("1", "Algebra Basics", "algebra");
    let exact = Criteria { topic: "algebra".into(), ..Default::default() };
    let other = Criteria { topic: "geometry".into(), ..Default::default() };
    // Exact means exact: a topic prefix is not enough.
    let prefix = Criteria { topic: "alg".into(), ..Default::default() };

    assert!(is_visible(&p, &exact));
    assert!(!is_visible(&p, &other));
    assert!(!is_visible(&p, &prefix));
  }

  #[test]
  fn difficulty_filter_conjoins_with_search() {
    let mut p = problem("1", "Algebra Basics", "algebra");
    p.difficulty = "easy".into();

    let both = Criteria { search: "alg".into(), difficulty: "easy".into(), ..Default::default() };
    let wrong_diff = Criteria { search: "alg".into(), difficulty: "hard".into(), ..Default::default() };

    assert!(is_visible(&p, &both));
    assert!(!is_visible(&p, &wrong_diff));
  }

  #[test]
  fn missing_optional_fields_never_panic() {
    let p = problem("1", "Untitled", "");
    let c = Criteria { search: "anything".into(), ..Default::default() };
    assert!(!is_visible(&p, &c));
  }

  #[test]
  fn partial_search_matches_only_algebra() {
    let ps = vec![
      problem("1", "Algebra Basics", "algebra"),
      problem("2", "Geometry Proofs", "geometry"),
    ];
    let c = Criteria { search: "alg".into(), ..Default::default() };
    let vis = visible(&ps, &c);
    assert_eq!(vis.len(), 1);
    assert_eq!(vis[0].id, "1");
  }

  #[test]
  fn repeated_calls_are_idempotent() {
    let p = problem("1", "Algebra Basics", "algebra");
    let c = Criteria { search: "alg".into(), topic: "algebra".into(), ..Default::default() };
    let first = is_visible(&p, &c);
    for _ in 0..10 {
      assert_eq!(is_visible(&p, &c), first);
    }
  }
}
