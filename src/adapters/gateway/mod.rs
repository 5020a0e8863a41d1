//! Payment gateway adapters.
//!
//! Implements the `PaymentGateway` port:
//! - `HttpPaymentGateway` - JSON POST to the Piastrix endpoints over reqwest
//! - `MockPaymentGateway` - scripted replies and call tracking for tests
//!
//! # Configuration
//!
//! Endpoints and the outbound timeout come from `GatewayConfig`:
//! - `PAYFORM__GATEWAY__BILL_URL`
//! - `PAYFORM__GATEWAY__INVOICE_URL`
//! - `PAYFORM__GATEWAY__REQUEST_TIMEOUT_SECS`

mod http_gateway;
mod mock_gateway;

pub use http_gateway::HttpPaymentGateway;
pub use mock_gateway::{GatewayCall, MockPaymentGateway};
