//! Server configuration module

use clap::Parser;

use eshop_app::context::AppConfig;

use crate::config::{
    auth::AuthConfig,
    cors::CorsConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    payments::PaymentsArgs,
    server::ServerRuntimeConfig,
    uploads::UploadsConfig,
};

pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;
pub(crate) mod uploads;

/// Shop JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "eshop-json", about = "Shop JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Payment provider credentials.
    #[command(flatten)]
    pub payments: PaymentsArgs,

    /// Image upload storage.
    #[command(flatten)]
    pub uploads: UploadsConfig,

    /// Cross-origin settings.
    #[command(flatten)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings the application services are assembled from.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.database_max_connections,
            run_migrations: self.database.database_run_migrations,
            session_ttl: self.auth.session_ttl(),
            payments: self.payments.clone().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_with_only_database_url() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "eshop-json",
            "--database-url",
            "postgres://localhost/eshop",
        ])?;

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);
        assert_eq!(config.database.database_max_connections, 10);
        assert!(config.database.database_run_migrations);
        assert_eq!(config.auth.session_ttl_hours, 168);
        assert_eq!(config.uploads.uploads_dir.to_string_lossy(), "public/uploads");

        Ok(())
    }

    #[test]
    fn app_config_carries_database_and_session_settings() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "eshop-json",
            "--database-url",
            "postgres://localhost/eshop",
            "--database-max-connections",
            "4",
            "--database-run-migrations",
            "false",
            "--session-ttl-hours",
            "2",
        ])?;

        let app_config = config.app_config();

        assert_eq!(app_config.database_url, "postgres://localhost/eshop");
        assert_eq!(app_config.max_connections, 4);
        assert!(!app_config.run_migrations);
        assert_eq!(app_config.session_ttl.as_secs(), 2 * 60 * 60);
        assert!(app_config.payments.stripe_secret_key.is_none());

        Ok(())
    }
}
