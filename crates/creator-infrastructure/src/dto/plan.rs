use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use creator_core::error::{CreatorError, Result};
use creator_core::plan::{DailyPlan, PlanItem};

use super::parse_optional_timestamp;

/// Body of `POST /api/daily-plan/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePlanRequest {
    pub user_id: String,
}

/// One entry of `plan_items`. The backend stores these as free-form dicts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanItemDto {
    pub platform: String,
    pub content_type: String,
    pub topic: String,
    pub reasoning: String,
}

impl From<PlanItemDto> for PlanItem {
    fn from(dto: PlanItemDto) -> Self {
        PlanItem {
            platform: dto.platform,
            content_type: dto.content_type,
            topic: dto.topic,
            reasoning: dto.reasoning,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyPlanDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub plan_items: Vec<PlanItemDto>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

impl DailyPlanDto {
    /// Converts to the domain model. `user_id` and `today` fill in fields
    /// the backend omitted.
    pub fn into_domain(self, user_id: &str, today: NaiveDate) -> Result<DailyPlan> {
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                CreatorError::invalid_response(format!("Bad plan date '{}': {}", raw, e))
            })?,
            None => today,
        };

        Ok(DailyPlan {
            generated_at: parse_optional_timestamp(self.generated_at.as_deref())?,
            id: self.id,
            user_id: self.user_id.unwrap_or_else(|| user_id.to_string()),
            date,
            items: self.plan_items.into_iter().map(PlanItem::from).collect(),
        })
    }
}
