//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{PasswordError, SessionTokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, expired, or revoked token.
    #[error("session not found")]
    NotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] SessionTokenError),

    #[error("password processing error")]
    Password(#[source] PasswordError),

    #[error("session expiry is out of range")]
    Expiry(#[source] jiff::Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}

impl From<PasswordError> for AuthServiceError {
    fn from(error: PasswordError) -> Self {
        Self::Password(error)
    }
}
