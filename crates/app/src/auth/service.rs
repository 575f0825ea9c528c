//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::warn;

use crate::{
    auth::{
        AuthServiceError, Identity, IssuedSession, NewSessionToken, SessionTokenMetadata,
        SessionTokenVersion, SessionUuid, format_session_token, generate_session_token_secret,
        hash_session_token, missing_account_hash, parse_session_token,
        repository::PgAuthRepository, verify_password,
    },
    database::Db,
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: &Db, session_ttl: SignedDuration) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
            session_ttl,
        }
    }

    /// List all session tokens issued to the given user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_session_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<SessionTokenMetadata>, AuthServiceError> {
        self.repository
            .list_session_tokens(user)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a session by UUID. Returns `true` if the session was still active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_session_token(
        &self,
        session: SessionUuid,
    ) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_session_token(session)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let credentials = self.repository.find_login_credentials(email).await?;

        let password_hash = match &credentials {
            Some(found) => found.password_hash.as_str(),
            None => missing_account_hash(),
        };

        let verified = verify_password(password, password_hash);

        let Some(credentials) = credentials.filter(|_| verified) else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_token_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::Expiry)?;

        let metadata = self
            .repository
            .create_session_token(NewSessionToken {
                uuid: session_uuid,
                user_uuid: credentials.user_uuid,
                version,
                token_hash: hash_session_token(&token),
                expires_at,
            })
            .await?;

        Ok(IssuedSession {
            token,
            email: credentials.email,
            is_admin: credentials.is_admin,
            metadata,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let session = self
            .repository
            .find_active_session(parsed.session_uuid, &hash_session_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if session.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort; authentication does not depend on this write.
        if let Err(error) = self
            .repository
            .touch_session_token(parsed.session_uuid)
            .await
        {
            warn!("failed to touch session token: {error}");
        }

        Ok(Identity {
            session_uuid: parsed.session_uuid,
            user_uuid: session.user_uuid,
            is_admin: session.is_admin,
        })
    }

    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError> {
        self.repository
            .revoke_session_token(session)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange email and password for a new bearer session.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the identity it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;

    /// Revoke the given session.
    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError>;
}
