//! Today's plan for the signed-in creator.

use std::sync::Arc;
use tokio::sync::Mutex;

use creator_core::backend::CreatorBackend;
use creator_core::clock::Clock;
use creator_core::plan::DailyPlan;
use creator_core::session::Session;

use crate::gate::RequestGate;
use crate::notice::{Notice, Outcome};

const LOAD_FAILED: &str = "Failed to load today's plan. Please try again.";
const GENERATE_FAILED: &str = "Failed to generate plan. Please try again.";

/// What the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanView {
    NoPlan,
    Loading,
    HasPlan(DailyPlan),
}

#[derive(Debug, Default)]
struct PlanState {
    user_id: Option<String>,
    plan: Option<DailyPlan>,
    notice: Option<Notice>,
}

pub struct PlanCoordinator {
    backend: Arc<dyn CreatorBackend>,
    clock: Arc<dyn Clock>,
    gate: RequestGate,
    state: Mutex<PlanState>,
}

impl PlanCoordinator {
    pub fn new(backend: Arc<dyn CreatorBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            gate: RequestGate::new(),
            state: Mutex::new(PlanState::default()),
        }
    }

    /// `Loading` exactly while a request holds the gate.
    pub async fn view(&self) -> PlanView {
        let state = self.state.lock().await;
        if self.gate.is_busy() {
            return PlanView::Loading;
        }
        match &state.plan {
            // A plan from an earlier day is not today's plan.
            Some(plan) if plan.date >= self.clock.today() && !plan.is_empty() => {
                PlanView::HasPlan(plan.clone())
            }
            _ => PlanView::NoPlan,
        }
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.state.lock().await.notice.clone()
    }

    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Fetches today's plan. Called on entry to the dashboard.
    pub async fn load(&self, session: &Session) -> Outcome {
        self.fetch(session).await
    }

    /// Re-fetches today's plan. Never generates.
    pub async fn refresh(&self, session: &Session) -> Outcome {
        self.fetch(session).await
    }

    /// Asks the backend for a fresh plan, replacing today's.
    pub async fn generate(&self, session: &Session) -> Outcome {
        self.scope_to(session).await;
        let Some(token) = self.gate.try_begin() else {
            tracing::debug!("[PlanCoordinator] generate ignored, request outstanding");
            return Outcome::Busy;
        };
        self.clear_notice().await;

        let result = self.backend.generate_plan(&session.user_id).await;
        if !token.is_current() {
            return Outcome::Stale;
        }

        let mut state = self.state.lock().await;
        match result {
            Ok(plan) => {
                tracing::info!(
                    "[PlanCoordinator] Generated plan with {} items for {}",
                    plan.items.len(),
                    plan.date
                );
                state.plan = Some(plan);
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[PlanCoordinator] Plan generation failed: {}", e);
                Self::fail(&mut state, Outcome::from_error(&e, GENERATE_FAILED))
            }
        }
    }

    /// Forgets everything, discarding any response still in flight.
    pub async fn reset(&self) {
        self.gate.invalidate();
        *self.state.lock().await = PlanState::default();
    }

    async fn fetch(&self, session: &Session) -> Outcome {
        self.scope_to(session).await;
        let Some(token) = self.gate.try_begin() else {
            tracing::debug!("[PlanCoordinator] load ignored, request outstanding");
            return Outcome::Busy;
        };
        self.clear_notice().await;

        let result = self.backend.fetch_today_plan(&session.user_id).await;
        if !token.is_current() {
            return Outcome::Stale;
        }

        let mut state = self.state.lock().await;
        match result {
            Ok(Some(plan)) if !plan.is_empty() => {
                state.plan = Some(plan);
                Outcome::Applied
            }
            Ok(_) => {
                tracing::debug!("[PlanCoordinator] No plan yet for {}", session.user_id);
                state.plan = None;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[PlanCoordinator] Loading today's plan failed: {}", e);
                Self::fail(&mut state, Outcome::from_error(&e, LOAD_FAILED))
            }
        }
    }

    async fn clear_notice(&self) {
        self.state.lock().await.notice = None;
    }

    fn fail(state: &mut PlanState, outcome: Outcome) -> Outcome {
        if let Outcome::Failed(notice) = &outcome {
            state.notice = Some(notice.clone());
        }
        outcome
    }

    async fn scope_to(&self, session: &Session) {
        let mut state = self.state.lock().await;
        if state.user_id.as_deref() != Some(session.user_id.as_str()) {
            if state.user_id.is_some() {
                tracing::info!("[PlanCoordinator] Session changed, dropping cached plan");
                self.gate.invalidate();
            }
            *state = PlanState {
                user_id: Some(session.user_id.clone()),
                ..PlanState::default()
            };
        }
    }
}
