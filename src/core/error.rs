//! # Error Handling Module
//!
//! This module provides error handling for the authentication gateway using the
//! `thiserror` crate. The taxonomy deliberately separates *expected* authentication
//! failures from everything else, because the two classes get opposite treatment:
//!
//! - Expected failures ([`AuthError::Unauthorized`], [`AuthError::LoginFailed`]) are part
//!   of the normal challenge/response negotiation. They are absorbed at the session
//!   wrapper boundary, converted into a 401 challenge response, and never logged.
//! - Unexpected failures ([`AuthError::Unexpected`]) indicate a bug or outage in a
//!   credential factory or the login backend. They are logged once with call-site
//!   context and surfaced as a generic 500, never as a challenge, so a server-side
//!   fault is never presented to the client as "retry with credentials".
//!
//! No error value from this module escapes to resource-dispatch callers; clients only
//! ever observe a 401 with challenges or a generic 500.

use anyhow::anyhow;
use http::StatusCode;
use thiserror::Error;

/// Main result type used throughout the gateway.
pub type AuthResult<T> = Result<T, AuthError>;

/// Error taxonomy for authentication negotiation.
///
/// The `#[error("...")]` attribute from `thiserror` implements `Display` with the
/// given message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused to authorize the presented credentials.
    #[error("Authorization denied: {reason}")]
    Unauthorized { reason: String },

    /// Credentials could not be established: malformed or rejected authorization
    /// payload, or a failed login attempt.
    #[error("Login failed: {reason}")]
    LoginFailed { reason: String },

    /// Any other failure from a credential factory or the login backend.
    #[error("Unexpected failure: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl AuthError {
    /// Create an authorization-denied error with a custom reason.
    pub fn unauthorized<S: Into<String>>(reason: S) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Create a login-failed error with a custom reason.
    pub fn login_failed<S: Into<String>>(reason: S) -> Self {
        Self::LoginFailed {
            reason: reason.into(),
        }
    }

    /// Create an unexpected error from a plain message.
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected(anyhow!(message.into()))
    }

    /// Whether this is an expected authentication failure.
    ///
    /// Expected failures produce a challenge response; everything else produces a
    /// generic server error and a log record.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::LoginFailed { .. })
    }

    /// The HTTP status code clients observe for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } | Self::LoginFailed { .. } => StatusCode::UNAUTHORIZED,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
