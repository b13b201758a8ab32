use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use creator_core::catalog::{Platform, Tone};
use creator_core::error::{CreatorError, Result};
use creator_core::profile::{Profile, ProfileDraft};

use super::parse_optional_timestamp;

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProfileRequest {
    pub name: String,
    pub niche: String,
    pub tone: String,
    pub target_audience: String,
    pub platforms: Vec<String>,
}

impl From<&ProfileDraft> for CreateProfileRequest {
    fn from(draft: &ProfileDraft) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            niche: draft.niche.trim().to_string(),
            tone: draft.tone.to_string(),
            target_audience: draft.target_audience.trim().to_string(),
            platforms: draft.platforms.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Profile as returned by `/api/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ProfileDto {
    /// Converts to the domain model.
    ///
    /// An unknown tone becomes the default tone and unknown platforms are
    /// skipped. A profile left without any known platform is rejected.
    pub fn into_domain(self) -> Result<Profile> {
        let tone = Tone::parse_label(&self.tone).unwrap_or_else(|_| {
            tracing::warn!(
                "[ProfileDto] Unknown tone '{}' for user {}, using {}",
                self.tone,
                self.id,
                Tone::default()
            );
            Tone::default()
        });

        let platforms: BTreeSet<Platform> = self
            .platforms
            .iter()
            .filter_map(|label| match Platform::parse_label(label) {
                Ok(platform) => Some(platform),
                Err(_) => {
                    tracing::warn!("[ProfileDto] Skipping unknown platform '{}'", label);
                    None
                }
            })
            .collect();
        if platforms.is_empty() {
            tracing::warn!(
                "[ProfileDto] Profile {} has no known platform in {:?}",
                self.id,
                self.platforms
            );
            return Err(CreatorError::invalid_response(format!(
                "profile {} has no supported platform",
                self.id
            )));
        }

        Ok(Profile {
            created_at: parse_optional_timestamp(self.created_at.as_deref())?,
            id: self.id,
            name: self.name,
            niche: self.niche,
            tone,
            target_audience: self.target_audience,
            platforms,
        })
    }
}
