//! Payments service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::Client;

use crate::payments::{
    PAYPAL_SANDBOX_API_BASE, PayPalClient, PayPalOrder, PaymentsError, STRIPE_API_BASE,
    StripeClient, StripeEvent, StripePaymentIntent, verify_stripe_signature,
};

/// Provider credentials; a provider without credentials is disabled.
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    pub stripe_secret_key: Option<String>,
    pub stripe_webhook_secret: Option<String>,
    pub stripe_api_base: String,
    pub paypal_client_id: Option<String>,
    pub paypal_client_secret: Option<String>,
    pub paypal_api_base: String,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_webhook_secret: None,
            stripe_api_base: STRIPE_API_BASE.to_string(),
            paypal_client_id: None,
            paypal_client_secret: None,
            paypal_api_base: PAYPAL_SANDBOX_API_BASE.to_string(),
        }
    }
}

/// An amount to charge, in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: u64,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    stripe: Option<StripeClient>,
    stripe_webhook_secret: Option<String>,
    paypal: Option<PayPalClient>,
}

impl HttpPaymentsService {
    #[must_use]
    pub fn new(config: PaymentsConfig) -> Self {
        let http = Client::new();

        let stripe = config
            .stripe_secret_key
            .filter(|key| !key.is_empty())
            .map(|key| StripeClient::new(http.clone(), config.stripe_api_base, key));

        let paypal = config
            .paypal_client_id
            .filter(|id| !id.is_empty())
            .zip(config.paypal_client_secret.filter(|secret| !secret.is_empty()))
            .map(|(id, secret)| PayPalClient::new(http, config.paypal_api_base, id, secret));

        Self {
            stripe,
            stripe_webhook_secret: config.stripe_webhook_secret.filter(|s| !s.is_empty()),
            paypal,
        }
    }

    fn stripe(&self) -> Result<&StripeClient, PaymentsError> {
        self.stripe
            .as_ref()
            .ok_or(PaymentsError::NotConfigured("stripe"))
    }

    fn paypal(&self) -> Result<&PayPalClient, PaymentsError> {
        self.paypal
            .as_ref()
            .ok_or(PaymentsError::NotConfigured("paypal"))
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    async fn create_stripe_intent(
        &self,
        payment: PaymentRequest,
    ) -> Result<StripePaymentIntent, PaymentsError> {
        let stripe = self.stripe()?;

        if payment.amount == 0 {
            return Err(PaymentsError::InvalidAmount);
        }

        stripe
            .create_payment_intent(payment.amount, payment.currency.as_deref())
            .await
    }

    async fn create_paypal_order(
        &self,
        payment: PaymentRequest,
    ) -> Result<PayPalOrder, PaymentsError> {
        let paypal = self.paypal()?;

        if payment.amount == 0 {
            return Err(PaymentsError::InvalidAmount);
        }

        paypal
            .create_order(payment.amount, payment.currency.as_deref())
            .await
    }

    async fn capture_paypal_order(&self, order_id: &str) -> Result<PayPalOrder, PaymentsError> {
        self.paypal()?.capture_order(order_id).await
    }

    fn verify_stripe_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<StripeEvent, PaymentsError> {
        let secret = self
            .stripe_webhook_secret
            .as_deref()
            .ok_or(PaymentsError::NotConfigured("stripe webhook"))?;

        Ok(verify_stripe_signature(
            payload,
            signature,
            secret,
            Timestamp::now(),
        )?)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Create a Stripe card payment intent.
    async fn create_stripe_intent(
        &self,
        payment: PaymentRequest,
    ) -> Result<StripePaymentIntent, PaymentsError>;

    /// Create a PayPal order awaiting buyer approval.
    async fn create_paypal_order(&self, payment: PaymentRequest)
    -> Result<PayPalOrder, PaymentsError>;

    /// Capture an approved PayPal order.
    async fn capture_paypal_order(&self, order_id: &str) -> Result<PayPalOrder, PaymentsError>;

    /// Authenticate and decode a Stripe webhook delivery.
    fn verify_stripe_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<StripeEvent, PaymentsError>;
}
