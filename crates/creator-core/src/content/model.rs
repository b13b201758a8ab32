//! Content draft domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{ContentType, Platform, ensure_pairing};
use crate::error::{CreatorError, Result};

/// A validated request to generate one piece of content.
///
/// Fields are private: the only way to obtain a request is through
/// [`DraftRequest::new`], which rejects pairings outside the platform's
/// content-type set. Every backend call therefore sees a valid pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    user_id: String,
    platform: Platform,
    content_type: ContentType,
    context: Option<String>,
}

impl DraftRequest {
    pub fn new(
        user_id: impl Into<String>,
        platform: Platform,
        content_type: ContentType,
        context: Option<String>,
    ) -> Result<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(CreatorError::validation("A user id is required to generate content"));
        }
        ensure_pairing(platform, content_type)?;

        Ok(Self {
            user_id,
            platform,
            content_type,
            context: context
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Optional free text, `None` when blank.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// The payload of a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Hook options, never empty.
    pub hooks: Vec<String>,
    /// Empty for formats without a script.
    pub script: String,
    pub caption: String,
}

impl GeneratedContent {
    /// Builds the payload, rejecting a response without hooks as incomplete.
    pub fn new(
        hooks: Vec<String>,
        script: impl Into<String>,
        caption: impl Into<String>,
    ) -> Result<Self> {
        if hooks.is_empty() {
            return Err(CreatorError::invalid_response("generated content has no hooks"));
        }
        Ok(Self {
            hooks,
            script: script.into(),
            caption: caption.into(),
        })
    }

    pub fn has_script(&self) -> bool {
        !self.script.trim().is_empty()
    }
}

/// A stored draft, as listed in the history.
///
/// Platform and content type are kept as the backend's labels; history is
/// read-only display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDraft {
    pub id: String,
    pub user_id: String,
    pub platform: String,
    pub content_type: String,
    pub hooks: Vec<String>,
    pub script: String,
    pub caption: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub posted: bool,
}
