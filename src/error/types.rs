/**
 * Service Error Types
 *
 * This module defines the error taxonomy shared by the HTTP handlers and
 * the realtime signaling dispatch. Every failure a caller can observe maps
 * to one of these variants; the variant decides the HTTP status code, and
 * the message is what a socket `error` event carries.
 *
 * # Error Categories
 *
 * - `NotFound` - A session (or sub-resource) does not exist
 * - `Unauthorized` - Missing or invalid auth token
 * - `Forbidden` - Caller is authenticated but not allowed (wrong role,
 *   not the owning teacher, identity mismatch)
 * - `InvalidState` - The session lifecycle state does not permit the
 *   operation (starting an active session, slide changes while inactive)
 * - `Validation` - Malformed or incomplete request input
 * - `Unavailable` - A requested peer is not currently connected
 * - `Database` / `Internal` - Server-side failures; details are logged,
 *   callers only see a generic message
 */

use thiserror::Error;
use axum::http::StatusCode;

/// All errors surfaced by the live-session service
///
/// Each variant carries a human-readable message. Use the constructor
/// helpers rather than building variants directly.
///
/// # Usage
///
/// ```rust
/// use classlive::error::ApiError;
///
/// let err = ApiError::not_found("Session not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested session or sub-resource does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Caller presented no token or an invalid one
    #[error("{message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Caller is not permitted to perform this operation
    ///
    /// Raised for non-owner mutations, wrong-role access, and socket
    /// identity assertions that contradict the verified token.
    #[error("{message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Session lifecycle state does not permit the operation
    #[error("{message}")]
    InvalidState {
        /// Human-readable error message
        message: String,
    },

    /// Request input is missing or malformed
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// A requested peer connection is not available
    ///
    /// Raised when a signaling unicast targets an unknown connection or
    /// when no teacher for the session is connected.
    #[error("{message}")]
    Unavailable {
        /// Human-readable error message
        message: String,
    },

    /// Database error
    ///
    /// Wraps sqlx failures. Callers see a generic message; the underlying
    /// error is logged server-side.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// Create a not-found error
    ///
    /// # Arguments
    ///
    /// * `message` - Error message
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create an invalid-state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404 Not Found
    /// - `Forbidden` - 403 Forbidden
    /// - `InvalidState` - 400 Bad Request
    /// - `Validation` - 400 Bad Request
    /// - `Unavailable` - 503 Service Unavailable
    /// - `Database` - 500 Internal Server Error
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::InvalidState { .. } => StatusCode::BAD_REQUEST,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message callers are allowed to see
    ///
    /// Server-side failures collapse to a generic message so database
    /// details never leak across the API boundary.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::InvalidState { message }
            | Self::Validation { message }
            | Self::Unavailable { message } => message.clone(),
            Self::Database(_) | Self::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// Whether this error is a server-side failure whose details should
    /// only appear in the logs
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal { .. })
    }
}
