//! Payments Config

use clap::Args;
use eshop_app::payments::{PAYPAL_SANDBOX_API_BASE, PaymentsConfig, STRIPE_API_BASE};

/// Payment provider settings. A provider without credentials is disabled.
#[derive(Debug, Clone, Args)]
pub struct PaymentsArgs {
    /// Stripe secret API key
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<String>,

    /// Stripe webhook signing secret
    #[arg(long, env = "STRIPE_WEBHOOK_SECRET", hide_env_values = true)]
    pub stripe_webhook_secret: Option<String>,

    /// Stripe API base URL
    #[arg(long, env = "STRIPE_API_BASE", default_value = STRIPE_API_BASE)]
    pub stripe_api_base: String,

    /// PayPal REST client id
    #[arg(long, env = "PAYPAL_CLIENT_ID")]
    pub paypal_client_id: Option<String>,

    /// PayPal REST client secret
    #[arg(long, env = "PAYPAL_CLIENT_SECRET", hide_env_values = true)]
    pub paypal_client_secret: Option<String>,

    /// PayPal API base URL
    #[arg(long, env = "PAYPAL_API_BASE", default_value = PAYPAL_SANDBOX_API_BASE)]
    pub paypal_api_base: String,
}

impl From<PaymentsArgs> for PaymentsConfig {
    fn from(args: PaymentsArgs) -> Self {
        Self {
            stripe_secret_key: args.stripe_secret_key,
            stripe_webhook_secret: args.stripe_webhook_secret,
            stripe_api_base: args.stripe_api_base,
            paypal_client_id: args.paypal_client_id,
            paypal_client_secret: args.paypal_client_secret,
            paypal_api_base: args.paypal_api_base,
        }
    }
}
