//! PayPal checkout orders over the REST API.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::payments::PaymentsError;

/// PayPal sandbox API.
pub const PAYPAL_SANDBOX_API_BASE: &str = "https://api-m.sandbox.paypal.com";

const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayPalOrder {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
}

#[derive(Debug, Clone)]
pub struct PayPalClient {
    http: Client,
    api_base: String,
    client_id: String,
    client_secret: String,
}

impl PayPalClient {
    #[must_use]
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Create a capture-intent order for `amount` minor units.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or when PayPal rejects the request.
    pub async fn create_order(
        &self,
        amount: u64,
        currency: Option<&str>,
    ) -> Result<PayPalOrder, PaymentsError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(format!("{}/v2/checkout/orders", self.api_base))
            .bearer_auth(token)
            .json(&order_body(amount, currency))
            .send()
            .await?;

        parse_response(response).await
    }

    /// Capture a previously approved order.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or when PayPal rejects the request.
    pub async fn capture_order(&self, order_id: &str) -> Result<PayPalOrder, PaymentsError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{order_id}/capture",
                self.api_base
            ))
            .bearer_auth(token)
            .json(&json!({}))
            .send()
            .await?;

        parse_response(response).await
    }

    async fn access_token(&self) -> Result<String, PaymentsError> {
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.api_base))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: AccessToken = parse_response(response).await?;

        Ok(token.access_token)
    }
}

async fn parse_response<T>(response: reqwest::Response) -> Result<T, PaymentsError>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();

        return Err(PaymentsError::Provider {
            provider: "paypal",
            status,
            message,
        });
    }

    Ok(response.json().await?)
}

fn order_body(amount: u64, currency: Option<&str>) -> Value {
    json!({
        "intent": "CAPTURE",
        "purchase_units": [{
            "amount": {
                "currency_code": currency.unwrap_or(DEFAULT_CURRENCY).to_ascii_uppercase(),
                "value": format_minor_units(amount),
            }
        }]
    })
}

/// Render minor units as a two-decimal amount, e.g. `1999` as `"19.99"`.
#[must_use]
pub fn format_minor_units(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}
