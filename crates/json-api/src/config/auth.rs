//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Lifetime of an issued session token, in hours
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 168)]
    pub session_ttl_hours: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_hours))
    }
}
