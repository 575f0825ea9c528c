//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    auth::{
        SessionTokenVersion,
        models::{ActiveSession, LoginCredentials, NewSessionToken, SessionTokenMetadata, SessionUuid},
    },
    domain::users::records::UserUuid,
};

const FIND_LOGIN_CREDENTIALS_SQL: &str = include_str!("sql/find_login_credentials.sql");
const CREATE_SESSION_TOKEN_SQL: &str = include_str!("sql/create_session_token.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const TOUCH_SESSION_TOKEN_SQL: &str = include_str!("sql/touch_session_token.sql");
const REVOKE_SESSION_TOKEN_SQL: &str = include_str!("sql/revoke_session_token.sql");
const LIST_SESSION_TOKENS_SQL: &str = include_str!("sql/list_session_tokens.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_login_credentials(
        &self,
        email: &str,
    ) -> Result<Option<LoginCredentials>, sqlx::Error> {
        query_as::<Postgres, LoginCredentials>(FIND_LOGIN_CREDENTIALS_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_session_token(
        &self,
        token: NewSessionToken,
    ) -> Result<SessionTokenMetadata, sqlx::Error> {
        query_as::<Postgres, SessionTokenMetadata>(CREATE_SESSION_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(token.user_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(token.token_hash)
            .bind(SqlxTimestamp::from(token.expires_at))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_active_session(
        &self,
        session: SessionUuid,
        token_hash: &str,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_ACTIVE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_session_token(&self, session: SessionUuid) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_TOKEN_SQL)
            .bind(session.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn revoke_session_token(
        &self,
        session: SessionUuid,
    ) -> Result<Option<SessionTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, SessionTokenMetadata>(REVOKE_SESSION_TOKEN_SQL)
            .bind(session.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_session_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<SessionTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, SessionTokenMetadata>(LIST_SESSION_TOKENS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await
    }
}

fn try_get_version(row: &PgRow) -> Result<SessionTokenVersion, sqlx::Error> {
    let version: i16 = row.try_get("version")?;

    SessionTokenVersion::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
        index: "version".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for LoginCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            is_admin: row.try_get("is_admin")?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            is_admin: row.try_get("is_admin")?,
            version: try_get_version(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SessionTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: try_get_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
