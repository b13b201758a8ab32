//! Session store implementations.
//!
//! The persisted form is a two-key TOML document:
//!
//! ```toml
//! user_id = "0b7c..."
//! user_name = "Ava"
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use creator_core::error::{CreatorError, Result};
use creator_core::session::{Session, SessionStore};

use crate::paths::CreatorPaths;
use crate::storage::AtomicTomlFile;

/// On-disk record. Both keys are optional so a partially written or hand
/// edited file still parses; a record without a usable id is no session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
}

impl SessionRecord {
    fn into_session(self) -> Option<Session> {
        let user_id = self.user_id.filter(|id| !id.trim().is_empty())?;
        Some(Session::new(user_id, self.user_name.unwrap_or_default()))
    }
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            user_id: Some(session.user_id.clone()),
            user_name: Some(session.display_name.clone()),
        }
    }
}

/// Session store backed by `session.toml`.
#[derive(Clone)]
pub struct TomlSessionStore {
    file: Arc<AtomicTomlFile<SessionRecord>>,
}

impl TomlSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    /// Store at the default location resolved by `paths`.
    pub fn from_paths(paths: &CreatorPaths) -> Result<Self> {
        Ok(Self::new(paths.session_file()?))
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn get_session(&self) -> Option<Session> {
        let file = self.file.clone();
        let loaded = tokio::task::spawn_blocking(move || file.load()).await;

        match loaded {
            Ok(Ok(record)) => record.and_then(SessionRecord::into_session),
            Ok(Err(e)) => {
                tracing::warn!("[SessionStore] Unreadable session file, treating as absent: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Session read task failed: {}", e);
                None
            }
        }
    }

    async fn create_session(&self, session: Session) -> Result<()> {
        let file = self.file.clone();
        let record = SessionRecord::from(&session);
        tokio::task::spawn_blocking(move || file.save(&record))
            .await
            .map_err(|e| CreatorError::internal(format!("Failed to join task: {}", e)))??;

        tracing::info!("[SessionStore] Session created for user {}", session.user_id);
        Ok(())
    }

    async fn clear_session(&self) -> Result<()> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| CreatorError::internal(format!("Failed to join task: {}", e)))??;

        tracing::info!("[SessionStore] Session cleared");
        Ok(())
    }
}

/// Process-local session store. Nothing survives a restart.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_session(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }

    async fn create_session(&self, session: Session) -> Result<()> {
        *self.session.lock().await = Some(session);
        Ok(())
    }

    async fn clear_session(&self) -> Result<()> {
        *self.session.lock().await = None;
        Ok(())
    }
}
