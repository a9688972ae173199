use thiserror::Error;

use crate::error::AppError;
use crate::services::auth::AccessJwtError;

/// Why the access gate refused a request.
///
/// Every variant becomes a 401. `InvalidCredential` and `Configuration` share the
/// same outward message so callers cannot tell a bad token from a broken verifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,

    #[error("malformed credential")]
    MalformedCredential,

    /// `cause` is for logs only.
    #[error("invalid credential")]
    InvalidCredential { cause: String },

    #[error("invalid credential")]
    Configuration,
}

impl AuthError {
    pub fn invalid(cause: impl Into<String>) -> Self {
        Self::InvalidCredential {
            cause: cause.into(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing credential",
            Self::MalformedCredential => "malformed credential",
            Self::InvalidCredential { .. } | Self::Configuration => "invalid credential",
        }
    }
}

impl From<AccessJwtError> for AuthError {
    fn from(e: AccessJwtError) -> Self {
        if e.is_configuration() {
            Self::Configuration
        } else {
            Self::invalid(e.to_string())
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Unauthorized(e.reason())
    }
}
