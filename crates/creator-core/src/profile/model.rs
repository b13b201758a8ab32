//! Profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{Platform, Tone};
use crate::error::{CreatorError, Result};

/// A creator profile as stored by the backend.
///
/// `id` is assigned by the backend and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub niche: String,
    pub tone: Tone,
    pub target_audience: String,
    pub platforms: BTreeSet<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A profile that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub niche: String,
    pub tone: Tone,
    pub target_audience: String,
    pub platforms: BTreeSet<Platform>,
}

impl ProfileDraft {
    pub fn new(
        name: impl Into<String>,
        niche: impl Into<String>,
        tone: Tone,
        target_audience: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
    ) -> Self {
        Self {
            name: name.into(),
            niche: niche.into(),
            tone,
            target_audience: target_audience.into(),
            platforms: platforms.into_iter().collect(),
        }
    }

    /// Checks the required fields. Whitespace-only text counts as empty.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("niche", &self.niche),
            ("target audience", &self.target_audience),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(CreatorError::validation(format!(
                "Please fill in: {}",
                missing.join(", ")
            )));
        }

        if self.platforms.is_empty() {
            return Err(CreatorError::validation("Select at least one platform"));
        }

        Ok(())
    }
}
