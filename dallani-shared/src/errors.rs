//! # Error Types
//!
//! Failures of the admin API client, the token storage and the CSV export.

use crate::messages;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a backend call can fail.
///
/// All variants except [`ApiError::SessionExpired`] are recovered at the call
/// site by showing [`ApiError::user_message`]. A session expiry has already
/// cleared the token and navigated to the login entry by the time it is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Backend answered 429
    #[error("{0}")]
    RateLimited(String),

    /// Backend answered with a non-success status or `success != true`
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response
    #[error("{}: {}", messages::CONNECTION_FAILED, .0)]
    Transport(String),

    /// Backend answered 401 on an authorized request
    #[error("{}", messages::SESSION_EXPIRED)]
    SessionExpired,

    /// The response body did not have the expected shape
    #[error("{0}")]
    Decode(String),

    /// The token could not be persisted
    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Text to show to the operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the session was invalidated by this failure.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// HTTP status carried by the failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::RateLimited(_) => Some(429),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }
}

/// Token storage failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The storage backend is not reachable (no `window`, no home directory)
    #[error("التخزين غير متاح: {0}")]
    Unavailable(String),

    /// Writing or removing the value failed
    #[error("تعذر حفظ الجلسة: {0}")]
    Write(String),
}

/// CSV export failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// No rows to export
    #[error("{}", messages::NOTHING_TO_EXPORT)]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_embeds_cause() {
        let err = ApiError::Transport("connection refused".into());
        let text = err.user_message();
        assert_eq!(text, format!("{}: connection refused", messages::CONNECTION_FAILED));
    }

    #[test]
    fn test_rejected_shows_server_message() {
        let err = ApiError::Rejected {
            status: 400,
            message: "بيانات غير صالحة".into(),
        };
        assert_eq!(err.user_message(), "بيانات غير صالحة");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_session_expired());
    }

    #[test]
    fn test_session_expired_flag() {
        assert!(ApiError::SessionExpired.is_session_expired());
        assert_eq!(ApiError::SessionExpired.status(), Some(401));
        assert_eq!(ApiError::SessionExpired.user_message(), messages::SESSION_EXPIRED);
    }

    #[test]
    fn test_storage_error_converts() {
        let err: ApiError = StorageError::Write("quota".into()).into();
        assert!(matches!(err, ApiError::Storage(_)));
        assert!(err.user_message().contains("quota"));
    }

    #[test]
    fn test_export_empty_message() {
        assert_eq!(ExportError::Empty.to_string(), messages::NOTHING_TO_EXPORT);
    }
}
