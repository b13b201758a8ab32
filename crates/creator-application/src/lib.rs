//! Application layer for the Creator OS client.
//!
//! Coordinators drive the onboarding, daily plan, content draft and history
//! flows on top of the domain traits. Every remote failure is turned into an
//! [`Outcome`] carrying a dismissible [`Notice`]; nothing escapes as an error
//! except local storage faults on logout.

pub mod draft_coordinator;
pub mod gate;
pub mod history;
pub mod notice;
pub mod plan_coordinator;
pub mod profile_service;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use draft_coordinator::{Clipboard, DraftCoordinator, DraftForm, DraftStage, MemoryClipboard};
pub use gate::{RequestGate, RequestToken};
pub use history::HistoryAggregator;
pub use notice::{Notice, NoticeKind, Outcome};
pub use plan_coordinator::{PlanCoordinator, PlanView};
pub use profile_service::ProfileService;
pub use workflow::{Route, Workflow};
