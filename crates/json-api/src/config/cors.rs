//! CORS Config

use clap::Args;
use salvo::{
    cors::{AllowHeaders, AllowOrigin, Cors, CorsHandler},
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use tracing::warn;

/// Cross-origin settings.
#[derive(Debug, Args)]
pub struct CorsConfig {
    /// Origins allowed to call the API; any origin when empty
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_allowed_origins: Vec<String>,
}

impl CorsConfig {
    fn allow_origin(&self) -> AllowOrigin {
        if self.cors_allowed_origins.is_empty() {
            return AllowOrigin::any();
        }

        AllowOrigin::list(self.cors_allowed_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin.trim())
                .inspect_err(|error| warn!("ignoring CORS origin {origin:?}: {error}"))
                .ok()
        }))
    }

    /// Build the CORS middleware for the whole service.
    #[must_use]
    pub fn handler(&self) -> CorsHandler {
        Cors::new()
            .allow_origin(self.allow_origin())
            .allow_methods(vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(AllowHeaders::list([AUTHORIZATION, CONTENT_TYPE]))
            .into_handler()
    }
}
