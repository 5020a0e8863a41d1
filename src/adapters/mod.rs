//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the checkout flow to external systems:
//! - `gateway` - Piastrix over HTTP, plus a scripted mock
//! - `postgres` - payment log persistence
//! - `storage` - in-memory payment log
//! - `http` - axum routes for the checkout page

pub mod gateway;
pub mod http;
pub mod postgres;
pub mod storage;

pub use gateway::{HttpPaymentGateway, MockPaymentGateway};
pub use postgres::PostgresPaymentLogRepository;
pub use storage::InMemoryPaymentLog;
