//! Payment gateway configuration (Piastrix)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::checkout::GatewayMethod;

/// Gateway credentials, endpoints and request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Shop secret key used to compute `sign`
    pub secret_key: SecretString,

    /// Payer wallet billed by the Bill method
    #[serde(default = "default_payer_account")]
    pub payer_account: String,

    /// Payway sent with Invoice requests
    #[serde(default = "default_invoice_payway")]
    pub invoice_payway: String,

    /// Bill endpoint
    #[serde(default = "default_bill_url")]
    pub bill_url: String,

    /// Invoice endpoint
    #[serde(default = "default_invoice_url")]
    pub invoice_url: String,

    /// Pay form action (posted by the payer's browser)
    #[serde(default = "default_pay_url")]
    pub pay_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_gateway_timeout")]
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    /// Create a configuration with default endpoints for the given secret.
    pub fn with_secret(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            payer_account: default_payer_account(),
            invoice_payway: default_invoice_payway(),
            bill_url: default_bill_url(),
            invoice_url: default_invoice_url(),
            pay_url: default_pay_url(),
            request_timeout_secs: default_gateway_timeout(),
        }
    }

    /// Endpoint URL for a gateway method
    pub fn endpoint(&self, method: GatewayMethod) -> &str {
        match method {
            GatewayMethod::Bill => &self.bill_url,
            GatewayMethod::Invoice => &self.invoice_url,
            GatewayMethod::Pay => &self.pay_url,
        }
    }

    /// Get outbound request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate gateway configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.secret_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_SECRET_KEY"));
        }
        if !self.payer_account.contains('@') {
            return Err(ValidationError::InvalidPayerAccount);
        }
        if self.invoice_payway.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_INVOICE_PAYWAY"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        for method in [GatewayMethod::Bill, GatewayMethod::Invoice, GatewayMethod::Pay] {
            let url = self.endpoint(method);
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ValidationError::InvalidGatewayUrl(method.as_str()));
            }
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::GatewayUrlMustBeHttps);
            }
        }

        Ok(())
    }
}

fn default_payer_account() -> String {
    "support@piastrix.com".to_string()
}

fn default_invoice_payway() -> String {
    "advcash_rub".to_string()
}

fn default_bill_url() -> String {
    "https://core.piastrix.com/bill/create".to_string()
}

fn default_invoice_url() -> String {
    "https://core.piastrix.com/invoice/create".to_string()
}

fn default_pay_url() -> String {
    "https://pay.piastrix.com/ru/pay".to_string()
}

fn default_gateway_timeout() -> u64 {
    30
}
