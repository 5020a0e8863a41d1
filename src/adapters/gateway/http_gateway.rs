//! Piastrix HTTP gateway adapter.
//!
//! Posts the signed request as a JSON object to the endpoint for its method
//! and hands the parsed body to `GatewayReply::from_body`. The HTTP status
//! is logged but does not decide the outcome; the reply envelope does.
//!
//! One attempt per call. Timeouts are enforced by the reqwest client.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::config::GatewayConfig;
use crate::domain::checkout::{GatewayMethod, SignedRequest};
use crate::ports::{GatewayError, GatewayReply, PaymentGateway};

/// HTTP implementation of the `PaymentGateway` port.
pub struct HttpPaymentGateway {
    /// Only methods this service sends itself have an entry.
    endpoints: HashMap<GatewayMethod, String>,
    http_client: reqwest::Client,
}

impl HttpPaymentGateway {
    /// Create an adapter using the configured endpoints and timeout.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build HTTP client: {}", e)))?;

        let endpoints = [GatewayMethod::Bill, GatewayMethod::Invoice, GatewayMethod::Pay]
            .into_iter()
            .filter(GatewayMethod::is_server_to_server)
            .map(|method| (method, config.endpoint(method).to_string()))
            .collect();

        Ok(Self {
            endpoints,
            http_client,
        })
    }

    fn endpoint(&self, method: GatewayMethod) -> Result<&str, GatewayError> {
        self.endpoints
            .get(&method)
            .map(String::as_str)
            .ok_or(GatewayError::UnsupportedMethod(method))
    }
}

fn classify_send_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout(err.to_string())
    } else {
        GatewayError::Network(err.to_string())
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn submit(
        &self,
        method: GatewayMethod,
        request: &SignedRequest,
    ) -> Result<GatewayReply, GatewayError> {
        let url = self.endpoint(method)?;

        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%method, error = %e, "Gateway request failed");
                classify_send_error(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(classify_send_error)?;

        if !status.is_success() {
            tracing::warn!(%method, status = %status, "Gateway answered with non-success status");
        }

        let body: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%method, status = %status, error = %e, "Gateway body is not JSON");
            GatewayError::InvalidResponse(format!("Body is not JSON: {}", e))
        })?;

        let reply = GatewayReply::from_body(body)?;
        tracing::debug!(%method, success = reply.is_success(), "Gateway replied");
        Ok(reply)
    }
}
