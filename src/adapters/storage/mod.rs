//! Storage Adapters
//!
//! In-process implementations of the `PaymentLogRepository` port.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryPaymentLog;
//!
//! let log = InMemoryPaymentLog::new();
//! let failing = InMemoryPaymentLog::failing();
//! ```

mod in_memory_payment_log;

pub use in_memory_payment_log::InMemoryPaymentLog;
