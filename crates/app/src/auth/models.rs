//! Auth data models.

use jiff::Timestamp;

use crate::{auth::SessionTokenVersion, domain::users::records::UserUuid, uuids::TypedUuid};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionTokenMetadata>;

/// Caller identity attached to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub session_uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub is_admin: bool,
}

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub user_uuid: UserUuid,
    pub is_admin: bool,
    pub version: SessionTokenVersion,
}

/// Stored credentials for a login attempt.
#[derive(Debug, Clone)]
pub(crate) struct LoginCredentials {
    pub user_uuid: UserUuid,
    pub email: String,
    pub is_admin: bool,
    pub password_hash: String,
}

/// Session token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionTokenMetadata {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

impl SessionTokenMetadata {
    /// Whether the token would still authenticate at `now`.
    #[must_use]
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// New session token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSessionToken {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Login result carrying the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub email: String,
    pub is_admin: bool,
    pub metadata: SessionTokenMetadata,
}
