//! Application state: the problem snapshot, the persistent progress set,
//! and the repository handle.
//!
//! This module owns:
//!   - the current snapshot (full replacement on every successful fetch)
//!   - the fetch generation counter that orders competing refreshes
//!   - the progress store (durable completed-id set)
//!
//! The rendered view is always computed from (snapshot, criteria, progress)
//! at the moment of the request; nothing rendered is cached across requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::domain::Problem;
use crate::filter::{visible, Criteria};
use crate::progress::ProgressStore;
use crate::protocol::{ToggleOut, ViewOut};
use crate::render;
use crate::repository::{FetchError, Repository};

/// The problem list as of the most recent successful fetch, tagged with the
/// generation of the fetch that produced it.
#[derive(Default)]
pub struct Snapshot {
    pub problems: Vec<Problem>,
    pub generation: u64,
    pub loaded: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<RwLock<Snapshot>>,
    pub progress: Arc<RwLock<ProgressStore>>,
    pub last_error: Arc<RwLock<Option<String>>>,
    repo: Arc<Repository>,
    fetch_seq: Arc<AtomicU64>,
}

impl AppState {
    /// Build state from config: load the persisted progress set and set up
    /// the sheet client. The first fetch happens separately (see `refresh`).
    #[instrument(level = "info", skip_all)]
    pub fn new(cfg: &AppConfig) -> Result<Self, reqwest::Error> {
        let progress = ProgressStore::load(&cfg.progress_path);
        let repo = Repository::new(cfg.sheet_endpoint.clone())?;
        info!(
            target: "mathhub_backend",
            endpoint = %cfg.sheet_endpoint,
            progress_path = %cfg.progress_path.display(),
            done = progress.len(),
            "State initialized"
        );
        Ok(Self {
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
            progress: Arc::new(RwLock::new(progress)),
            last_error: Arc::new(RwLock::new(None)),
            repo: Arc::new(repo),
            fetch_seq: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Fetch a fresh snapshot and install it wholesale.
    ///
    /// A generation token is taken before the request goes out; a completed
    /// fetch only installs its result if no newer fetch has installed one in
    /// the meantime. A slow, superseded response is discarded rather than
    /// clobbering a fresher snapshot. On failure the previous snapshot and
    /// the progress set are untouched and the error goes back to the caller.
    #[instrument(level = "info", skip(self))]
    pub async fn refresh(&self) -> Result<(), FetchError> {
        let generation = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let problems = match self.repo.fetch_problems().await {
            Ok(problems) => problems,
            Err(e) => {
                *self.last_error.write().await = Some(e.to_string());
                return Err(e);
            }
        };

        let mut snap = self.snapshot.write().await;
        if snap.generation > generation {
            warn!(
                target: "catalog",
                generation,
                installed = snap.generation,
                "Discarding out-of-order fetch result"
            );
            return Ok(());
        }
        *snap = Snapshot { problems, generation, loaded: true };
        *self.last_error.write().await = None;
        info!(target: "catalog", count = snap.problems.len(), generation, "Installed snapshot");
        Ok(())
    }

    /// Full render: topic options from the entire snapshot, filtered cards,
    /// count label, and progress summary.
    pub async fn view(&self, criteria: &Criteria) -> ViewOut {
        let snap = self.snapshot.read().await;
        let progress = self.progress.read().await;

        let pct = render::progress_pct(progress.len(), snap.problems.len());
        if !snap.loaded {
            let message = self
                .last_error
                .read()
                .await
                .clone()
                .unwrap_or_else(|| "No data loaded yet".to_string());
            return ViewOut {
                loaded: false,
                topic_options: render::render_topic_options(&snap.problems, &criteria.topic),
                cards: render::render_error_card(&message),
                count_label: render::count_label(0),
                progress_pct: pct,
                progress_label: render::progress_label(pct),
            };
        }

        let shown = visible(&snap.problems, criteria).len();
        ViewOut {
            loaded: true,
            topic_options: render::render_topic_options(&snap.problems, &criteria.topic),
            cards: render::render_cards(&snap.problems, criteria, &progress),
            count_label: render::count_label(shown),
            progress_pct: pct,
            progress_label: render::progress_label(pct),
        }
    }

    /// Local-only completion toggle: mutate + persist the progress set and
    /// hand back what the single affected control needs. Never touches the
    /// snapshot and never triggers a fetch or a full render.
    #[instrument(level = "info", skip(self), fields(%id, done))]
    pub async fn toggle(&self, id: &str, done: bool) -> ToggleOut {
        // Snapshot length first; lock order is snapshot then progress
        // everywhere, and this guard drops before the write lock is taken.
        let total = self.snapshot.read().await.problems.len();
        let mut progress = self.progress.write().await;
        if done {
            progress.mark_done(id);
        } else {
            progress.mark_undone(id);
        }
        // Persisted by the time we get here; only now compute the reply.
        let pct = render::progress_pct(progress.len(), total);
        ToggleOut {
            id: id.to_string(),
            done,
            label: render::toggle_label(done).to_string(),
            progress_pct: pct,
            progress_label: render::progress_label(pct),
        }
    }
}
