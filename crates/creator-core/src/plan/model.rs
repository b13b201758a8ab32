//! Daily plan domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{ContentType, Platform};

/// One AI-suggested content idea.
///
/// Plan items are display data produced by the remote generator, so the
/// platform and content type are kept as the labels the backend sent. They
/// are parsed and checked only when an item is turned into a draft request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    pub platform: String,
    pub content_type: String,
    pub topic: String,
    #[serde(default)]
    pub reasoning: String,
}

impl PlanItem {
    /// Stable presentation key. Plan items have no id of their own.
    pub fn key(&self, index: usize) -> String {
        format!("{}-{}", self.platform, index)
    }

    pub fn platform(&self) -> Option<Platform> {
        Platform::parse_label(&self.platform).ok()
    }

    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::parse_label(&self.content_type).ok()
    }
}

/// The plan for one user on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub date: NaiveDate,
    /// Server-assigned order is preserved.
    pub items: Vec<PlanItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl DailyPlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items paired with their presentation keys, in server order.
    pub fn keyed_items(&self) -> impl Iterator<Item = (String, &PlanItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.key(index), item))
    }
}
