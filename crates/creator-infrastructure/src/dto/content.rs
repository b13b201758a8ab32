use serde::{Deserialize, Serialize};

use creator_core::content::{ContentDraft, DraftRequest, GeneratedContent};
use creator_core::error::{CreatorError, Result};

use super::parse_optional_timestamp;

/// Body of `POST /api/content/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub user_id: String,
    pub platform: String,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

impl From<&DraftRequest> for GenerateContentRequest {
    fn from(request: &DraftRequest) -> Self {
        Self {
            user_id: request.user_id().to_string(),
            platform: request.platform().to_string(),
            content_type: request.content_type().to_string(),
            additional_context: request.context().map(str::to_string),
        }
    }
}

/// A stored content item, as returned by generation and history endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItemDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub hooks: Vec<String>,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub posted: bool,
}

impl ContentItemDto {
    /// The generated parts only. Fails when no hooks came back.
    pub fn into_generated(self) -> Result<GeneratedContent> {
        GeneratedContent::new(self.hooks, self.script, self.caption)
    }

    /// A history entry. Entries must carry an id and a creation time.
    pub fn into_draft(self, user_id: &str) -> Result<ContentDraft> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CreatorError::invalid_response("History entry without an id"))?;
        let created_at = match parse_optional_timestamp(self.created_at.as_deref())? {
            Some(ts) => ts,
            None => {
                return Err(CreatorError::invalid_response(format!(
                    "History entry '{}' has no created_at",
                    id
                )));
            }
        };

        Ok(ContentDraft {
            id,
            user_id: self.user_id.unwrap_or_else(|| user_id.to_string()),
            platform: self.platform,
            content_type: self.content_type,
            hooks: self.hooks,
            script: self.script,
            caption: self.caption,
            created_at,
            posted: self.posted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::parse_timestamp;
    use creator_core::catalog::{ContentType, Platform};

    #[test]
    fn test_request_omits_blank_context() {
        let request =
            DraftRequest::new("u-1", Platform::YouTube, ContentType::LongForm, Some("  ".into()))
                .unwrap();
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(body["content_type"], "Long-form");
        assert!(body.get("additional_context").is_none());
    }

    #[test]
    fn test_empty_hooks_rejected() {
        let dto: ContentItemDto = serde_json::from_value(serde_json::json!({
            "hooks": [],
            "script": "s",
            "caption": "c"
        }))
        .unwrap();
        assert!(matches!(
            dto.into_generated(),
            Err(CreatorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_history_entry_requires_timestamp() {
        let dto: ContentItemDto = serde_json::from_value(serde_json::json!({
            "id": "c-1",
            "platform": "Instagram",
            "content_type": "Reel",
            "hooks": ["h"],
            "script": "s",
            "caption": "c"
        }))
        .unwrap();
        assert!(dto.clone().into_draft("u-1").is_err());

        let mut dto = dto;
        dto.created_at = Some("2025-03-01T08:30:00".to_string());
        let draft = dto.into_draft("u-1").unwrap();
        assert_eq!(draft.user_id, "u-1");
        assert_eq!(draft.created_at, parse_timestamp("2025-03-01T08:30:00Z").unwrap());
    }
}
