//! Closed vocabularies shared by the profile, plan and draft flows.
//!
//! Tone, platform and content type travel over the wire as display labels
//! ("TikTok", "Long-form"). Inside the client they are closed enums so that
//! the platform/content-type pairing can be checked exhaustively.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{CreatorError, Result};

/// Voice the generated content should take.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Tone {
    Professional,
    #[default]
    Casual,
    Humorous,
    Inspirational,
    Educational,
}

/// Publishing platform.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
}

/// Format of a single piece of content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ContentType {
    Reel,
    Post,
    Story,
    Carousel,
    Video,
    Series,
    Short,
    #[serde(rename = "Long-form")]
    #[strum(serialize = "Long-form")]
    LongForm,
}

impl Platform {
    /// Content types valid for this platform, in picker order.
    pub fn content_types(self) -> &'static [ContentType] {
        match self {
            Platform::Instagram => &[
                ContentType::Reel,
                ContentType::Post,
                ContentType::Story,
                ContentType::Carousel,
            ],
            Platform::TikTok => &[ContentType::Video, ContentType::Series],
            Platform::YouTube => &[ContentType::Short, ContentType::Video, ContentType::LongForm],
        }
    }

    /// The content type a picker falls back to when this platform is chosen.
    pub fn default_content_type(self) -> ContentType {
        self.content_types()[0]
    }

    pub fn supports(self, content_type: ContentType) -> bool {
        self.content_types().contains(&content_type)
    }

    /// Parses a wire label, reporting unknown labels as validation errors.
    pub fn parse_label(label: &str) -> Result<Self> {
        Self::from_str(label.trim()).map_err(|_| {
            CreatorError::validation(format!(
                "Unknown platform '{}'. Supported: {}",
                label,
                Self::iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
            ))
        })
    }
}

impl ContentType {
    pub fn parse_label(label: &str) -> Result<Self> {
        Self::from_str(label.trim())
            .map_err(|_| CreatorError::validation(format!("Unknown content type '{}'", label)))
    }

    pub fn is_valid_for(self, platform: Platform) -> bool {
        platform.supports(self)
    }
}

impl Tone {
    pub fn parse_label(label: &str) -> Result<Self> {
        Self::from_str(label.trim())
            .map_err(|_| CreatorError::validation(format!("Unknown tone '{}'", label)))
    }
}

/// Rejects a platform/content-type pairing outside the platform's set.
pub fn ensure_pairing(platform: Platform, content_type: ContentType) -> Result<()> {
    if platform.supports(content_type) {
        Ok(())
    } else {
        Err(CreatorError::validation(format!(
            "{} is not available on {}",
            content_type, platform
        )))
    }
}
