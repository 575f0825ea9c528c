//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
    health::{HealthService, PgHealthService},
    payments::{HttpPaymentsService, PaymentsConfig, PaymentsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Settings needed to assemble the services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub session_ttl: SignedDuration,
    pub payments: PaymentsConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub users: Arc<dyn UsersService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub payments: Arc<dyn PaymentsService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Connect to the database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url, config.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if config.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(&db, config.session_ttl)),
            payments: Arc::new(HttpPaymentsService::new(config.payments)),
            health: Arc::new(PgHealthService::new(db)),
        })
    }
}
