//! Payment gateway port.
//!
//! Sends a signed request to the gateway endpoint for a method and
//! classifies the JSON reply. The gateway is opaque: this port only knows
//! the reply envelope (`data`, or `error_code` + `message`).
//!
//! # Reply classification
//!
//! - a truthy `data` field means success; its value is passed on untouched
//! - anything else is a failure carrying `error_code` and `message`
//!   (defaulting to `0` and an empty string when absent)
//! - bodies that are not a JSON object are `InvalidResponse` errors

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::checkout::{GatewayMethod, SignedRequest};

/// Port for outbound gateway calls.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submit a signed request for a server-to-server method.
    ///
    /// # Errors
    ///
    /// - `UnsupportedMethod` for methods the payer's browser submits
    /// - `Network` / `Timeout` when the gateway cannot be reached
    /// - `InvalidResponse` when the body is not a JSON object
    async fn submit(
        &self,
        method: GatewayMethod,
        request: &SignedRequest,
    ) -> Result<GatewayReply, GatewayError>;
}

/// Parsed gateway reply.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply {
    /// The gateway accepted the request.
    Success { data: Value },

    /// The gateway refused the request.
    Failure { error_code: i64, message: String },
}

impl GatewayReply {
    /// Classify a parsed response body.
    pub fn from_body(body: Value) -> Result<Self, GatewayError> {
        let Value::Object(mut object) = body else {
            return Err(GatewayError::InvalidResponse(
                "response body is not a JSON object".to_string(),
            ));
        };

        match object.remove("data") {
            Some(data) if is_truthy(&data) => Ok(GatewayReply::Success { data }),
            _ => Ok(GatewayReply::Failure {
                error_code: object.get("error_code").and_then(as_error_code).unwrap_or(0),
                message: object
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GatewayReply::Success { .. })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn as_error_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Errors raised before a usable reply was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Gateway request timed out: {0}")]
    Timeout(String),

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("Method '{0}' is submitted by the payer's browser, not by this service")]
    UnsupportedMethod(GatewayMethod),
}

impl GatewayError {
    /// Whether the gateway could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Network(_) | GatewayError::Timeout(_))
    }
}
