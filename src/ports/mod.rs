//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the checkout flow and the outside world. Adapters implement these ports.
//!
//! - `PaymentLogRepository` - append-only store for payment log entries
//! - `PaymentGateway` - outbound calls to the payment gateway

mod payment_gateway;
mod payment_log_repository;

pub use payment_gateway::{GatewayError, GatewayReply, PaymentGateway};
pub use payment_log_repository::{PaymentLogRepository, StorageError};
