//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The persisted identity (`Session`)
//! - `store`: Storage trait for the single active session (`SessionStore`)

mod model;
mod store;

pub use model::{DEFAULT_DISPLAY_NAME, Session};
pub use store::SessionStore;
