//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Name shown when the stored display name is missing or blank.
pub const DEFAULT_DISPLAY_NAME: &str = "Creator";

/// The locally persisted identity of the single active user.
///
/// A session is created once, when onboarding completes, from the profile
/// the backend returned. Every coordinator call receives the session value
/// explicitly; there is no ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend-assigned profile id. Immutable for the life of the session.
    pub user_id: String,
    /// Name to greet the user with.
    pub display_name: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Builds the session that roots identity after profile creation.
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(profile.id.clone(), profile.name.clone())
    }

    /// Display name with the fallback applied.
    pub fn greeting_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            DEFAULT_DISPLAY_NAME
        } else {
            &self.display_name
        }
    }
}
