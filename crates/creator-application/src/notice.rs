//! User-facing notices and coordinator outcomes.

use strum::Display;

use creator_core::CreatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NoticeKind {
    /// The input needs an edit before retrying.
    Validation,
    /// Retrying the same action may succeed.
    Retry,
    /// The backend did not answer in time.
    Timeout,
    /// The stored identity is unknown to the backend; onboarding restarts.
    SessionExpired,
}

/// A dismissible message shown to the user after a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Validation, message)
    }

    pub fn retry(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Retry, message)
    }

    pub fn timeout() -> Self {
        Self::new(
            NoticeKind::Timeout,
            "The request took too long. Please try again.",
        )
    }

    pub fn session_expired() -> Self {
        Self::new(
            NoticeKind::SessionExpired,
            "Your profile could not be found. Please set it up again.",
        )
    }

    /// Converts an error into a notice. `retry_message` is shown for
    /// failures the user can only retry.
    pub fn from_error(err: &CreatorError, retry_message: &str) -> Self {
        match err {
            CreatorError::Validation(message) => Self::validation(message.clone()),
            CreatorError::NotFound { .. } => Self::session_expired(),
            CreatorError::Timeout(_) => Self::timeout(),
            _ => Self::retry(retry_message),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, NoticeKind::Retry | NoticeKind::Timeout)
    }
}

/// Result of a coordinator action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response was applied to the coordinator's state.
    Applied,
    /// Another request of the same coordinator is outstanding; nothing was sent.
    Busy,
    /// The response arrived after the coordinator was reset and was dropped.
    Stale,
    /// The action failed; prior state is untouched.
    Failed(Notice),
    /// The backend no longer knows the session's user.
    SessionExpired,
    /// The action needs a session and there is none.
    NoSession,
}

impl Outcome {
    pub fn from_error(err: &CreatorError, retry_message: &str) -> Self {
        if err.is_not_found() {
            Outcome::SessionExpired
        } else {
            Outcome::Failed(Notice::from_error(err, retry_message))
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Failed(notice) => Some(notice),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_classification() {
        let retry = "Failed to generate plan. Please try again.";

        let notice = Notice::from_error(&CreatorError::validation("Niche is required"), retry);
        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.message, "Niche is required");
        assert!(!notice.is_retryable());

        let notice = Notice::from_error(&CreatorError::Timeout(Duration::from_secs(10)), retry);
        assert_eq!(notice.kind, NoticeKind::Timeout);
        assert!(notice.is_retryable());

        let notice = Notice::from_error(
            &CreatorError::Backend {
                status: 500,
                body: "boom".into(),
            },
            retry,
        );
        assert_eq!(notice, Notice::retry(retry));
    }

    #[test]
    fn test_not_found_expires_session() {
        let outcome = Outcome::from_error(&CreatorError::not_found("user", "u-1"), "x");
        assert_eq!(outcome, Outcome::SessionExpired);
        assert!(outcome.notice().is_none());
    }
}
