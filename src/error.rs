//! Relay error types with HTTP status code mapping.
//!
//! [`ValidationError`] covers bad producer input and is returned straight
//! to the HTTP caller. [`SessionError`] covers subscriber transport
//! failures; it ends the one session it belongs to and is only logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::MAX_PLUG_INDEX;

/// Producer input rejected by [`crate::domain::validate`].
///
/// # Status Mapping
///
/// | Variant        | HTTP Status               |
/// |----------------|---------------------------|
/// | `MissingParam` | 500 Internal Server Error |
/// | `BadFormat`    | 500 Internal Server Error |
/// | `OutOfRange`   | 400 Bad Request           |
/// | `InvalidState` | 400 Bad Request           |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required parameter was absent or empty.
    #[error("parameter '{0}' is missing")]
    MissingParam(&'static str),

    /// A parameter was present but not an integer.
    #[error("parameter '{0}' is not an integer")]
    BadFormat(&'static str),

    /// The plug index is outside the addressable range.
    #[error("plug number must be 0-{max} (inclusive), given {0}", max = MAX_PLUG_INDEX)]
    OutOfRange(i64),

    /// The state was an integer other than `0` or `1`.
    #[error("plug state must be 0 or 1, given {0}")]
    InvalidState(i64),
}

/// Fieldless discriminant of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// See [`ValidationError::MissingParam`].
    MissingParam,
    /// See [`ValidationError::BadFormat`].
    BadFormat,
    /// See [`ValidationError::OutOfRange`].
    OutOfRange,
    /// See [`ValidationError::InvalidState`].
    InvalidState,
}

impl ValidationError {
    /// Returns the kind of this error without its payload.
    #[must_use]
    pub const fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MissingParam(_) => ValidationErrorKind::MissingParam,
            Self::BadFormat(_) => ValidationErrorKind::BadFormat,
            Self::OutOfRange(_) => ValidationErrorKind::OutOfRange,
            Self::InvalidState(_) => ValidationErrorKind::InvalidState,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParam(_) | Self::BadFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::OutOfRange(_) | Self::InvalidState(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Failure that ends a single subscriber session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading from or writing to the WebSocket failed.
    #[error("websocket transport failed: {0}")]
    Transport(#[source] axum::Error),

    /// The WebSocket handshake could not be completed.
    #[error("websocket upgrade failed: {0}")]
    Upgrade(#[source] axum::Error),

    /// The event could not be encoded as JSON.
    #[error("failed to encode plug event: {0}")]
    Encode(#[from] serde_json::Error),

    /// The bus dropped the subscriber because its queue overflowed.
    #[error("subscriber fell behind and was evicted from the bus")]
    Evicted,
}
