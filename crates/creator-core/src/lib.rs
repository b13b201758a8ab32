//! Domain layer for the Creator OS client.
//!
//! Holds the data contracts shared by every other crate: the persisted
//! session, the profile, daily plans, content drafts, the closed
//! tone/platform/content-type vocabularies, and the traits the application
//! layer depends on (`SessionStore`, `CreatorBackend`, `Clock`). Nothing in
//! this crate performs I/O.

pub mod backend;
pub mod catalog;
pub mod clock;
pub mod content;
pub mod error;
pub mod plan;
pub mod profile;
pub mod session;

pub use backend::CreatorBackend;
pub use catalog::{ContentType, Platform, Tone};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CreatorError, Result};
pub use session::{Session, SessionStore};
