//! Error types for the Creator OS client.

use std::time::Duration;
use thiserror::Error;

/// A shared error type for the entire client.
///
/// Every failure a coordinator can observe maps onto one of these variants.
/// The variants mirror the recovery path available to the user: edit the
/// input (`Validation`), re-onboard (`NotFound`), or retry the same action
/// (`Timeout`, `Network`, `Backend`, `InvalidResponse`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreatorError {
    /// Client-side, pre-flight validation failure.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend does not know the requested entity.
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The request did not resolve within the configured bound.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure (connect, reset, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response carrying a body.
    #[error("Backend error {status}: {body}")]
    Backend { status: u16, body: String },

    /// A 2xx response whose payload cannot be used as a complete result.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CreatorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Whether repeating the same action unchanged may succeed.
    ///
    /// Validation needs a user edit and NotFound needs re-onboarding, so
    /// neither is retryable. Local storage and configuration faults are not
    /// fixed by retrying either.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Network(_) | Self::InvalidResponse(_) => true,
            Self::Backend { .. } => true,
            Self::Validation(_)
            | Self::NotFound { .. }
            | Self::Serialization { .. }
            | Self::Io { .. }
            | Self::Config(_)
            | Self::Internal(_) => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CreatorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CreatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CreatorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CreatorError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CreatorError>`.
pub type Result<T> = std::result::Result<T, CreatorError>;
