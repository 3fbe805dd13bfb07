//! API error taxonomy
//!
//! Every failure of a backend call is reported as exactly one [`ApiError`].
//! The `Display` output is the human-readable notice shown to users.

use thiserror::Error;

use crate::session::SessionError;

/// Notice shown when the backend rejects the credential
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Wait time used when a rate-limited response carries no usable `Retry-After`
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Outcome of a single backend call: a payload or an error, never both
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while calling the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, timeout)
    #[error("{0}")]
    Transport(String),

    /// The backend rejected the credential; the session has been invalidated
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    Unauthorized,

    /// The backend is throttling this client
    #[error("Too many requests. Please try again in {retry_after_secs} seconds.")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// The backend answered with a non-success status
    #[error("{message}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Server-supplied message, or a generic one embedding the status
        message: String,
    },

    /// A success response carried a body that could not be decoded
    #[error("Malformed response body (HTTP {status}): {reason}")]
    MalformedBody {
        /// HTTP status code
        status: u16,
        /// Decoder failure description
        reason: String,
    },

    /// A request payload could not be encoded; nothing was sent
    #[error("Failed to encode request body: {0}")]
    Encode(String),

    /// The client could not be set up from its configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading or writing the persisted session failed
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Build a request failure, falling back to the generic status message
    #[must_use]
    pub fn request_failed(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Self::RequestFailed { status, message }
    }

    /// HTTP status associated with this error, if a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::RequestFailed { status, .. } | Self::MalformedBody { status, .. } => {
                Some(*status)
            },
            Self::Transport(_) | Self::Encode(_) | Self::Configuration(_) | Self::Session(_) => {
                None
            },
        }
    }

    /// Returns true if the session was invalidated by this call
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Seconds to wait before retrying, for rate-limited calls
    #[must_use]
    pub const fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Returns true if repeating the same call later may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::RateLimited { .. } => true,
            Self::RequestFailed { status, .. } => *status >= 500,
            Self::Unauthorized
            | Self::MalformedBody { .. }
            | Self::Encode(_)
            | Self::Configuration(_)
            | Self::Session(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        assert_eq!(ApiError::Unauthorized.to_string(), SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn test_rate_limited_display_embeds_delay() {
        let err = ApiError::RateLimited {
            retry_after_secs: 45,
        };
        assert!(err.to_string().contains("45"));
        assert_eq!(err.retry_after(), Some(45));
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn test_transport_display_is_verbatim() {
        let err = ApiError::Transport("error sending request".to_string());
        assert_eq!(err.to_string(), "error sending request");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_request_failed_uses_server_message() {
        let err = ApiError::request_failed(500, Some("Internal failure".to_string()));
        assert_eq!(err.to_string(), "Internal failure");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_request_failed_generic_message() {
        let err = ApiError::request_failed(400, None);
        assert_eq!(err.to_string(), "Request failed with status 400");

        let err = ApiError::request_failed(404, Some("   ".to_string()));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_session_expired_flag() {
        assert!(ApiError::Unauthorized.is_session_expired());
        assert!(!ApiError::request_failed(403, None).is_session_expired());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ApiError::Transport("refused".to_string()).is_retryable());
        assert!(ApiError::RateLimited { retry_after_secs: 1 }.is_retryable());
        assert!(ApiError::request_failed(503, None).is_retryable());

        assert!(!ApiError::request_failed(422, None).is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
    }

    #[test]
    fn test_session_error_is_transparent() {
        let err: ApiError = SessionError::Unavailable("disk full".to_string()).into();
        assert!(err.to_string().contains("disk full"));
        assert_eq!(err.status(), None);
    }
}
