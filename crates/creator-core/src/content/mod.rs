//! Content draft domain module.
//!
//! # Module Structure
//!
//! - `model`: Generation request/payload and stored drafts
//! - `history`: Ordering and relative date labels for the history list

mod history;
mod model;

pub use history::{relative_label, sort_newest_first};
pub use model::{ContentDraft, DraftRequest, GeneratedContent};
