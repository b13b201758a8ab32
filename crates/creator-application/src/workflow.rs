//! Top-level navigation between the onboarding, dashboard, generator,
//! history and profile screens.
//!
//! The workflow owns the coordinators and reacts to their outcomes: a
//! `NotFound` from any of them means the stored identity is orphaned, so the
//! session is cleared and the user is sent back to onboarding.

use std::sync::Arc;
use strum::Display;
use tokio::sync::Mutex;

use creator_core::backend::CreatorBackend;
use creator_core::clock::Clock;
use creator_core::error::Result;
use creator_core::plan::PlanItem;
use creator_core::profile::{OnboardingForm, Profile};
use creator_core::session::{Session, SessionStore};

use crate::draft_coordinator::{Clipboard, DraftCoordinator};
use crate::gate::RequestGate;
use crate::history::HistoryAggregator;
use crate::notice::{Notice, Outcome};
use crate::plan_coordinator::PlanCoordinator;
use crate::profile_service::ProfileService;

const ONBOARDING_FAILED: &str = "Failed to create your profile. Please try again.";
const PROFILE_FAILED: &str = "Failed to load your profile. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Route {
    Onboarding,
    Dashboard,
    Generate,
    History,
    Profile,
}

impl Route {
    pub fn requires_session(self) -> bool {
        !matches!(self, Route::Onboarding)
    }
}

#[derive(Debug)]
struct RouterState {
    route: Route,
    notice: Option<Notice>,
    profile: Option<Profile>,
}

pub struct Workflow {
    sessions: Arc<dyn SessionStore>,
    profiles: ProfileService,
    plan: PlanCoordinator,
    drafts: DraftCoordinator,
    history: HistoryAggregator,
    onboarding_gate: RequestGate,
    profile_gate: RequestGate,
    state: Mutex<RouterState>,
}

impl Workflow {
    pub fn new(
        backend: Arc<dyn CreatorBackend>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            profiles: ProfileService::new(backend.clone(), sessions.clone()),
            plan: PlanCoordinator::new(backend.clone(), clock.clone()),
            drafts: DraftCoordinator::new(backend.clone(), clipboard),
            history: HistoryAggregator::new(backend, clock),
            sessions,
            onboarding_gate: RequestGate::new(),
            profile_gate: RequestGate::new(),
            state: Mutex::new(RouterState {
                route: Route::Onboarding,
                notice: None,
                profile: None,
            }),
        }
    }

    pub fn plan(&self) -> &PlanCoordinator {
        &self.plan
    }

    pub fn drafts(&self) -> &DraftCoordinator {
        &self.drafts
    }

    pub fn history(&self) -> &HistoryAggregator {
        &self.history
    }

    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    pub async fn route(&self) -> Route {
        self.state.lock().await.route
    }

    pub async fn session(&self) -> Option<Session> {
        self.sessions.get_session().await
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.state.lock().await.notice.clone()
    }

    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.state.lock().await.profile.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.onboarding_gate.is_busy()
    }

    /// Picks the first screen: the dashboard when a session exists.
    pub async fn start(&self) -> Route {
        let route = match self.sessions.get_session().await {
            Some(session) => {
                tracing::info!("[Workflow] Resuming session for {}", session.greeting_name());
                Route::Dashboard
            }
            None => Route::Onboarding,
        };
        self.set_route(route).await;
        route
    }

    /// Moves to `route`, or to onboarding when `route` needs a missing session.
    pub async fn navigate(&self, route: Route) -> Route {
        let target = if route.requires_session() && self.sessions.get_session().await.is_none() {
            Route::Onboarding
        } else {
            route
        };
        self.set_route(target).await;
        target
    }

    pub async fn submit_onboarding(&self, form: &OnboardingForm) -> Outcome {
        let Some(token) = self.onboarding_gate.try_begin() else {
            return Outcome::Busy;
        };

        let result = self.profiles.complete_onboarding(form).await;
        if !token.finish() {
            return Outcome::Stale;
        }

        match result {
            Ok(session) => {
                self.reset_coordinators().await;
                tracing::info!("[Workflow] Onboarded {}", session.user_id);
                self.set_route(Route::Dashboard).await;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[Workflow] Onboarding failed: {}", e);
                self.settle(Outcome::from_error(&e, ONBOARDING_FAILED)).await
            }
        }
    }

    /// Shows the dashboard and loads today's plan.
    ///
    /// The profile is fetched first when not yet known, which is where an
    /// orphaned session is detected.
    pub async fn open_dashboard(&self) -> Outcome {
        let Some(session) = self.enter(Route::Dashboard).await else {
            return Outcome::NoSession;
        };
        if self.state.lock().await.profile.is_none() {
            let outcome = self.load_profile(&session).await;
            if outcome == Outcome::SessionExpired {
                return outcome;
            }
        }
        let outcome = self.plan.load(&session).await;
        self.settle(outcome).await
    }

    pub async fn refresh_plan(&self) -> Outcome {
        let Some(session) = self.require_session().await else {
            return Outcome::NoSession;
        };
        let outcome = self.plan.refresh(&session).await;
        self.settle(outcome).await
    }

    pub async fn generate_plan(&self) -> Outcome {
        let Some(session) = self.require_session().await else {
            return Outcome::NoSession;
        };
        let outcome = self.plan.generate(&session).await;
        self.settle(outcome).await
    }

    /// Opens the generator, optionally pre-filled from a plan item.
    pub async fn open_generate(&self, item: Option<&PlanItem>) -> Outcome {
        if self.enter(Route::Generate).await.is_none() {
            return Outcome::NoSession;
        }
        match item {
            Some(item) => {
                let outcome = self.drafts.prefill_from_plan_item(item).await;
                self.settle(outcome).await
            }
            None => {
                self.drafts.start_over().await;
                Outcome::Applied
            }
        }
    }

    pub async fn generate_draft(&self) -> Outcome {
        let Some(session) = self.require_session().await else {
            return Outcome::NoSession;
        };
        let outcome = self.drafts.generate(&session).await;
        self.settle(outcome).await
    }

    pub async fn open_history(&self) -> Outcome {
        let Some(session) = self.enter(Route::History).await else {
            return Outcome::NoSession;
        };
        let outcome = self.history.load(&session).await;
        self.settle(outcome).await
    }

    pub async fn refresh_history(&self) -> Outcome {
        let Some(session) = self.require_session().await else {
            return Outcome::NoSession;
        };
        let outcome = self.history.refresh(&session).await;
        self.settle(outcome).await
    }

    /// Shows the profile screen, fetching the profile from the backend.
    pub async fn open_profile(&self) -> Outcome {
        let Some(session) = self.enter(Route::Profile).await else {
            return Outcome::NoSession;
        };
        self.load_profile(&session).await
    }

    /// Clears the session and every coordinator, then shows onboarding.
    pub async fn logout(&self) -> Result<()> {
        self.profiles.logout().await?;
        self.reset_coordinators().await;
        self.set_route(Route::Onboarding).await;
        Ok(())
    }

    async fn load_profile(&self, session: &Session) -> Outcome {
        let Some(token) = self.profile_gate.try_begin() else {
            return Outcome::Busy;
        };

        let result = self.profiles.fetch_profile(session).await;
        if !token.finish() {
            return Outcome::Stale;
        }

        match result {
            Ok(profile) => {
                self.state.lock().await.profile = Some(profile);
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[Workflow] Fetching profile failed: {}", e);
                self.settle(Outcome::from_error(&e, PROFILE_FAILED)).await
            }
        }
    }

    async fn set_route(&self, route: Route) {
        let mut state = self.state.lock().await;
        if state.route != route {
            tracing::debug!("[Workflow] {} -> {}", state.route, route);
            state.route = route;
        }
    }

    /// Navigates to a session-gated route and returns the session.
    async fn enter(&self, route: Route) -> Option<Session> {
        let session = self.require_session().await?;
        self.set_route(route).await;
        Some(session)
    }

    async fn require_session(&self) -> Option<Session> {
        let session = self.sessions.get_session().await;
        if session.is_none() {
            self.set_route(Route::Onboarding).await;
        }
        session
    }

    async fn reset_coordinators(&self) {
        self.onboarding_gate.invalidate();
        self.profile_gate.invalidate();
        self.plan.reset().await;
        self.drafts.reset().await;
        self.history.reset().await;
        let mut state = self.state.lock().await;
        state.profile = None;
        state.notice = None;
    }

    /// Applies workflow-level reactions to a coordinator outcome.
    async fn settle(&self, outcome: Outcome) -> Outcome {
        match &outcome {
            Outcome::SessionExpired => {
                tracing::warn!(
                    "[Workflow] Stored user is unknown to the backend, clearing session"
                );
                if let Err(e) = self.sessions.clear_session().await {
                    tracing::warn!("[Workflow] Failed to clear orphaned session: {}", e);
                }
                self.reset_coordinators().await;
                let mut state = self.state.lock().await;
                state.route = Route::Onboarding;
                state.notice = Some(Notice::session_expired());
            }
            Outcome::NoSession => self.set_route(Route::Onboarding).await,
            Outcome::Failed(notice) => {
                self.state.lock().await.notice = Some(notice.clone());
            }
            Outcome::Applied | Outcome::Busy | Outcome::Stale => {}
        }
        outcome
    }
}
