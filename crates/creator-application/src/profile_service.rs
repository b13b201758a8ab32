//! Profile creation, lookup and the session it roots.

use std::sync::Arc;

use creator_core::backend::CreatorBackend;
use creator_core::error::Result;
use creator_core::profile::{OnboardingForm, Profile, ProfileDraft};
use creator_core::session::{Session, SessionStore};

/// Creates and fetches profiles and keeps the local session in step.
pub struct ProfileService {
    backend: Arc<dyn CreatorBackend>,
    sessions: Arc<dyn SessionStore>,
}

impl ProfileService {
    pub fn new(backend: Arc<dyn CreatorBackend>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { backend, sessions }
    }

    /// Creates a profile on the backend.
    ///
    /// The draft is validated first; an invalid draft never reaches the
    /// network.
    pub async fn create_profile(&self, draft: &ProfileDraft) -> Result<Profile> {
        draft.validate()?;
        let profile = self.backend.create_profile(draft).await?;
        tracing::info!("[ProfileService] Created profile {} ({})", profile.id, profile.name);
        Ok(profile)
    }

    pub async fn fetch_profile(&self, session: &Session) -> Result<Profile> {
        self.backend.fetch_profile(&session.user_id).await
    }

    /// Submits the onboarding form and persists the resulting session.
    pub async fn complete_onboarding(&self, form: &OnboardingForm) -> Result<Session> {
        let draft = form.to_draft()?;
        let profile = self.create_profile(&draft).await?;

        let session = Session::from_profile(&profile);
        self.sessions.create_session(session.clone()).await?;
        Ok(session)
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.sessions.get_session().await
    }

    pub async fn logout(&self) -> Result<()> {
        self.sessions.clear_session().await?;
        tracing::info!("[ProfileService] Logged out");
        Ok(())
    }
}
