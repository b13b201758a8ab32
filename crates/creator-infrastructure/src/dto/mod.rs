//! Wire DTOs for the Creator OS backend.
//!
//! The backend speaks loosely typed JSON: enum values are display labels,
//! optional fields are sometimes omitted and timestamps are naive ISO
//! strings. These types absorb that looseness and convert into the domain
//! models, turning anything unusable into `CreatorError::InvalidResponse`.

mod content;
mod plan;
mod profile;

pub use content::{ContentItemDto, GenerateContentRequest};
pub use plan::{DailyPlanDto, GeneratePlanRequest, PlanItemDto};
pub use profile::{CreateProfileRequest, ProfileDto};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use creator_core::error::{CreatorError, Result};

/// Body of `GET /api/`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Parses a backend timestamp. Accepts RFC 3339 and naive ISO-8601; naive
/// values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| CreatorError::invalid_response(format!("Bad timestamp '{}': {}", raw, e)))
}

fn parse_optional_timestamp(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.filter(|s| !s.trim().is_empty())
        .map(parse_timestamp)
        .transpose()
}
