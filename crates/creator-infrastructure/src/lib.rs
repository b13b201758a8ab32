//! Infrastructure layer for the Creator OS client: local files and the HTTP
//! backend.

pub mod config;
pub mod dto;
pub mod http_backend;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config::{ClientConfig, ConfigService};
pub use crate::http_backend::HttpCreatorBackend;
pub use crate::paths::CreatorPaths;
pub use crate::session_store::{MemorySessionStore, TomlSessionStore};
