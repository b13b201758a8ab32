//! Remote generation service trait.

use async_trait::async_trait;

use crate::content::{ContentDraft, DraftRequest, GeneratedContent};
use crate::error::Result;
use crate::plan::DailyPlan;
use crate::profile::{Profile, ProfileDraft};

/// The backend the coordinators talk to.
///
/// Implementations enforce the request timeout themselves and report it as
/// [`CreatorError::Timeout`](crate::error::CreatorError::Timeout), distinct
/// from other transport failures. An unknown user id is reported as
/// [`CreatorError::NotFound`](crate::error::CreatorError::NotFound).
#[async_trait]
pub trait CreatorBackend: Send + Sync {
    /// Liveness probe; returns the service banner.
    async fn health(&self) -> Result<String>;

    /// Creates (or updates, keyed by name) a profile.
    ///
    /// Implementations validate the draft before dispatch.
    async fn create_profile(&self, draft: &ProfileDraft) -> Result<Profile>;

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile>;

    /// Today's plan, or `None` if none has been generated yet.
    async fn fetch_today_plan(&self, user_id: &str) -> Result<Option<DailyPlan>>;

    /// Generates and stores today's plan, replacing any existing one.
    async fn generate_plan(&self, user_id: &str) -> Result<DailyPlan>;

    async fn generate_content(&self, request: &DraftRequest) -> Result<GeneratedContent>;

    /// All stored drafts for the user, most recent first.
    async fn fetch_history(&self, user_id: &str) -> Result<Vec<ContentDraft>>;
}
