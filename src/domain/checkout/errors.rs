//! Checkout error taxonomy.
//!
//! Every failure is terminal for the request that produced it. Each variant
//! maps to one user-facing HTML fragment and one HTTP status.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidSubmission | 400 |
//! | PersistenceFailure | 500 |
//! | AmountTooSmall | 422 |
//! | AmountTooLarge | 422 |
//! | GatewayRejected | 402 |
//! | GatewayUnavailable | 502 |
//! | GatewayMalformed | 502 |

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors that end a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Form input could not be turned into a payment log entry.
    #[error("Invalid submission: {0}")]
    InvalidSubmission(ValidationError),

    /// The payment log entry could not be written.
    #[error("Payment log could not be stored: {0}")]
    PersistenceFailure(String),

    /// Amount below the Pay form minimum.
    #[error("Payer amount {amount} is too small")]
    AmountTooSmall { amount: String },

    /// Amount above the Pay form maximum.
    #[error("Payer amount {amount} is too large")]
    AmountTooLarge { amount: String },

    /// The gateway answered with an error.
    #[error("Gateway rejected the request with code {error_code}: {message}")]
    GatewayRejected { error_code: i64, message: String },

    /// The gateway could not be reached or did not answer in time.
    #[error("Gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// The gateway answered with something this service cannot act on.
    #[error("Gateway returned an unexpected response: {0}")]
    GatewayMalformed(String),
}

impl CheckoutError {
    pub fn invalid_submission(err: ValidationError) -> Self {
        CheckoutError::InvalidSubmission(err)
    }

    pub fn persistence(reason: impl Into<String>) -> Self {
        CheckoutError::PersistenceFailure(reason.into())
    }

    pub fn gateway_rejected(error_code: i64, message: impl Into<String>) -> Self {
        CheckoutError::GatewayRejected {
            error_code,
            message: message.into(),
        }
    }

    pub fn gateway_unavailable(reason: impl Into<String>) -> Self {
        CheckoutError::GatewayUnavailable(reason.into())
    }

    pub fn gateway_malformed(reason: impl Into<String>) -> Self {
        CheckoutError::GatewayMalformed(reason.into())
    }

    /// Bracketed heading shown to the payer, e.g. `ERROR 4`.
    pub fn title(&self) -> String {
        match self {
            CheckoutError::InvalidSubmission(_) | CheckoutError::PersistenceFailure(_) => {
                "UNKNOWN ERROR".to_string()
            }
            CheckoutError::AmountTooSmall { .. } => "ERROR 4".to_string(),
            CheckoutError::AmountTooLarge { .. } => "ERROR 5".to_string(),
            CheckoutError::GatewayRejected { error_code, .. } => format!("ERROR {}", error_code),
            CheckoutError::GatewayUnavailable(_) | CheckoutError::GatewayMalformed(_) => {
                "GATEWAY ERROR".to_string()
            }
        }
    }

    /// Message shown to the payer. Internal causes are not exposed.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::InvalidSubmission(_) | CheckoutError::PersistenceFailure(_) => {
                "Something is wrong.".to_string()
            }
            CheckoutError::AmountTooSmall { .. } => {
                "Payer amount is too small, min: 0.01".to_string()
            }
            CheckoutError::AmountTooLarge { .. } => {
                "Payer amount is too large, max: 9 999 999 999 999 998".to_string()
            }
            CheckoutError::GatewayRejected { message, .. } => message.clone(),
            CheckoutError::GatewayUnavailable(_) => {
                "Payment service is unavailable.".to_string()
            }
            CheckoutError::GatewayMalformed(_) => {
                "Payment service returned an unexpected response.".to_string()
            }
        }
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::InvalidSubmission(err)
    }
}
