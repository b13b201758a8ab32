//! Read-only list of previously generated drafts.

use std::sync::Arc;
use tokio::sync::Mutex;

use creator_core::backend::CreatorBackend;
use creator_core::clock::Clock;
use creator_core::content::{ContentDraft, relative_label, sort_newest_first};
use creator_core::session::Session;

use crate::gate::RequestGate;
use crate::notice::{Notice, Outcome};

const LOAD_FAILED: &str = "Failed to load your content history. Please try again.";

#[derive(Debug, Default)]
struct HistoryState {
    user_id: Option<String>,
    entries: Vec<ContentDraft>,
    loaded: bool,
    expanded: Option<String>,
    notice: Option<Notice>,
}

pub struct HistoryAggregator {
    backend: Arc<dyn CreatorBackend>,
    clock: Arc<dyn Clock>,
    gate: RequestGate,
    state: Mutex<HistoryState>,
}

impl HistoryAggregator {
    pub fn new(backend: Arc<dyn CreatorBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            gate: RequestGate::new(),
            state: Mutex::new(HistoryState::default()),
        }
    }

    /// Entries, most recent first.
    pub async fn entries(&self) -> Vec<ContentDraft> {
        self.state.lock().await.entries.clone()
    }

    /// Entries paired with their relative date labels.
    pub async fn labelled_entries(&self) -> Vec<(String, ContentDraft)> {
        let now = self.clock.now();
        self.state
            .lock()
            .await
            .entries
            .iter()
            .map(|entry| (relative_label(entry.created_at, now), entry.clone()))
            .collect()
    }

    /// True once a load succeeded and came back empty.
    pub async fn is_empty(&self) -> bool {
        let state = self.state.lock().await;
        state.loaded && state.entries.is_empty()
    }

    /// True exactly while a fetch holds the gate.
    pub async fn is_loading(&self) -> bool {
        self.gate.is_busy()
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.state.lock().await.notice.clone()
    }

    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    pub async fn load(&self, session: &Session) -> Outcome {
        self.fetch(session).await
    }

    pub async fn refresh(&self, session: &Session) -> Outcome {
        self.fetch(session).await
    }

    pub async fn expanded_id(&self) -> Option<String> {
        self.state.lock().await.expanded.clone()
    }

    /// Expands `id`, collapsing whatever was expanded. Toggling the expanded
    /// entry collapses it. Returns the id now expanded.
    pub async fn toggle_expanded(&self, id: &str) -> Option<String> {
        let mut state = self.state.lock().await;
        if state.expanded.as_deref() == Some(id) {
            state.expanded = None;
        } else {
            state.expanded = Some(id.to_string());
        }
        state.expanded.clone()
    }

    pub async fn reset(&self) {
        self.gate.invalidate();
        *self.state.lock().await = HistoryState::default();
    }

    async fn fetch(&self, session: &Session) -> Outcome {
        self.scope_to(session).await;
        let Some(token) = self.gate.try_begin() else {
            return Outcome::Busy;
        };
        self.state.lock().await.notice = None;

        let result = self.backend.fetch_history(&session.user_id).await;
        if !token.is_current() {
            return Outcome::Stale;
        }

        let mut state = self.state.lock().await;
        match result {
            Ok(mut entries) => {
                sort_newest_first(&mut entries);
                tracing::debug!("[History] Loaded {} entries", entries.len());
                let still_listed = state
                    .expanded
                    .as_ref()
                    .map_or(true, |id| entries.iter().any(|e| &e.id == id));
                if !still_listed {
                    state.expanded = None;
                }
                state.entries = entries;
                state.loaded = true;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[History] Loading history failed: {}", e);
                let outcome = Outcome::from_error(&e, LOAD_FAILED);
                if let Some(notice) = outcome.notice() {
                    state.notice = Some(notice.clone());
                }
                outcome
            }
        }
    }

    async fn scope_to(&self, session: &Session) {
        let mut state = self.state.lock().await;
        if state.user_id.as_deref() != Some(session.user_id.as_str()) {
            if state.user_id.is_some() {
                self.gate.invalidate();
            }
            *state = HistoryState {
                user_id: Some(session.user_id.clone()),
                ..HistoryState::default()
            };
        }
    }
}
