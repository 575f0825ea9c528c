//! Stripe payment intents over the REST API.

use reqwest::Client;
use serde::Deserialize;

use crate::payments::PaymentsError;

/// Production Stripe API.
pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

const DEFAULT_CURRENCY: &str = "usd";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    http: Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    #[must_use]
    pub fn new(http: Client, api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Create a card payment intent for `amount` minor units.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or when Stripe rejects the request.
    pub async fn create_payment_intent(
        &self,
        amount: u64,
        currency: Option<&str>,
    ) -> Result<StripePaymentIntent, PaymentsError> {
        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&intent_form(amount, currency))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(PaymentsError::Provider {
                provider: "stripe",
                status,
                message,
            });
        }

        Ok(response.json().await?)
    }
}

fn intent_form(amount: u64, currency: Option<&str>) -> Vec<(&'static str, String)> {
    vec![
        ("amount", amount.to_string()),
        (
            "currency",
            currency.unwrap_or(DEFAULT_CURRENCY).to_ascii_lowercase(),
        ),
        ("payment_method_types[]", "card".to_string()),
    ]
}
