//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: Stored profile and unsubmitted draft (`Profile`, `ProfileDraft`)
//! - `onboarding`: Three-step form that produces a draft (`OnboardingForm`)

mod model;
mod onboarding;

pub use model::{Profile, ProfileDraft};
pub use onboarding::{OnboardingForm, OnboardingStep};
