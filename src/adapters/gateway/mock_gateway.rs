//! Mock payment gateway for testing.
//!
//! Replies are queued in order and consumed one per call. When the queue is
//! empty the mock answers with a `Network` error, so an unexpected call
//! shows up as a failed checkout rather than a hang.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::checkout::{GatewayMethod, SignedRequest};
use crate::ports::{GatewayError, GatewayReply, PaymentGateway};

/// Recorded gateway call for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCall {
    pub method: GatewayMethod,
    pub request: SignedRequest,
}

/// Mock gateway with scripted replies.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
/// mock.push_body(json!({"data": {"url": "https://x"}}));
///
/// let reply = mock.submit(GatewayMethod::Bill, &signed).await?;
/// assert_eq!(mock.calls().len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Result<GatewayReply, GatewayError>>,
    call_log: Vec<GatewayCall>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a raw response body, classified the way the HTTP adapter would.
    pub fn push_body(&self, body: Value) {
        self.state().replies.push_back(GatewayReply::from_body(body));
    }

    /// Queue a transport or protocol error.
    pub fn push_error(&self, error: GatewayError) {
        self.state().replies.push_back(Err(error));
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().call_log.len()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn submit(
        &self,
        method: GatewayMethod,
        request: &SignedRequest,
    ) -> Result<GatewayReply, GatewayError> {
        let mut state = self.state();
        state.call_log.push(GatewayCall {
            method,
            request: request.clone(),
        });
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Network("no scripted reply".to_string())))
    }
}
