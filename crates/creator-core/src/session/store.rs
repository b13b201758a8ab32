//! Session store trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::Session;

/// Durable key/value store holding the identity of the current user.
///
/// Only one session can be active at a time. Implementations must survive
/// process restarts unless they are explicitly ephemeral.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the persisted identity.
    ///
    /// Storage faults are reported as `None`: an unreadable session is
    /// treated the same as no session, which routes the user to onboarding.
    async fn get_session(&self) -> Option<Session>;

    /// Persists the identity, overwriting any previous one.
    async fn create_session(&self, session: Session) -> Result<()>;

    /// Destroys the identity.
    async fn clear_session(&self) -> Result<()>;
}
