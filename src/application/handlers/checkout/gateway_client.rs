//! GatewayClient - signs typed requests and submits them through the port.

use std::sync::Arc;

use crate::domain::checkout::{GatewayRequest, SignedRequest, Signer};
use crate::ports::{GatewayError, GatewayReply, PaymentGateway};

/// Signs gateway requests and sends the server-to-server ones.
#[derive(Clone)]
pub struct GatewayClient {
    signer: Signer,
    gateway: Arc<dyn PaymentGateway>,
}

impl GatewayClient {
    pub fn new(signer: Signer, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { signer, gateway }
    }

    /// Signs a request without sending it.
    pub fn sign<R: GatewayRequest>(&self, request: &R) -> SignedRequest {
        self.signer.sign_request(request)
    }

    /// Signs a request and makes one outbound call. No retries.
    pub async fn submit<R: GatewayRequest>(&self, request: &R) -> Result<GatewayReply, GatewayError> {
        let signed = self.sign(request);

        tracing::debug!(
            method = %R::METHOD,
            field_count = signed.fields().len(),
            "Submitting gateway request"
        );

        self.gateway.submit(R::METHOD, &signed).await
    }
}
