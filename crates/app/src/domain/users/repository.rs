//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::users::{
    data::NewUser,
    records::{UserRecord, UserUuid},
};

const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_USERS_SQL).fetch_one(&mut **tx).await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "user_count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
        password_hash: String,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.email)
            .bind(password_hash)
            .bind(user.phone)
            .bind(user.is_admin)
            .bind(user.street)
            .bind(user.apartment)
            .bind(user.zip)
            .bind(user.city)
            .bind(user.country)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            is_admin: row.try_get("is_admin")?,
            street: row.try_get("street")?,
            apartment: row.try_get("apartment")?,
            zip: row.try_get("zip")?,
            city: row.try_get("city")?,
            country: row.try_get("country")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
