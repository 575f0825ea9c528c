//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::hash_password,
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.find_user_by_email(&mut tx, email).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn count_users(&self) -> Result<u64, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_users(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let password_hash = hash_password(&user.password)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, user, password_hash)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieves all users, oldest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a user by email, ignoring case.
    async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, UsersServiceError>;

    /// Counts all users.
    async fn count_users(&self) -> Result<u64, UsersServiceError>;

    /// Creates a new user, hashing the supplied password.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Deletes a user along with their sessions and orders.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::PasswordError,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_user_stores_profile_without_password() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = UserUuid::new();

        let user = ctx
            .users
            .create_user(NewUser {
                uuid,
                ..helpers::new_user("ada@example.com", "hunter22", true)
            })
            .await?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_admin);

        let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE uuid = $1")
            .bind(uuid.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        assert_ne!(stored, "hunter22");
        assert!(stored.starts_with("$argon2"));

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        helpers::create_user(&ctx, "ada@example.com", "hunter22", false).await?;

        let result = ctx
            .users
            .create_user(helpers::new_user("ADA@example.com", "other", false))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_empty_password_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .create_user(helpers::new_user("ada@example.com", "", false))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Password(PasswordError::Empty))),
            "expected Password(Empty), got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_count_and_find_users() -> TestResult {
        let ctx = TestContext::new().await;
        let ada = helpers::create_user(&ctx, "ada@example.com", "hunter22", false).await?;
        helpers::create_user(&ctx, "grace@example.com", "hunter22", true).await?;

        let users = ctx.users.list_users().await?;
        let found = ctx.users.find_user_by_email("Ada@Example.com").await?;

        assert_eq!(users.len(), 2);
        assert_eq!(ctx.users.count_users().await?, 2);
        assert_eq!(found.uuid, ada.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_removes_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "ada@example.com", "hunter22", false).await?;

        ctx.users.delete_user(user.uuid).await?;

        let result = ctx.users.get_user(user.uuid).await;

        assert!(matches!(result, Err(UsersServiceError::NotFound)));

        let again = ctx.users.delete_user(user.uuid).await;

        assert!(matches!(again, Err(UsersServiceError::NotFound)));

        Ok(())
    }
}
