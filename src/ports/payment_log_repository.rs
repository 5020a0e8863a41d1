//! Payment log repository port.
//!
//! The log is an audit trail of checkout attempts. It is append-only: the
//! port offers no way to update or delete an entry.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::checkout::PaymentLogEntry;
use crate::domain::foundation::PaymentLogId;

/// Errors raised while writing to the payment log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store could not be reached or failed the write.
    #[error("Database error: {0}")]
    Database(String),

    /// The store refused the entry (constraint violation, bad value).
    #[error("Entry rejected by storage: {0}")]
    Rejected(String),
}

/// Repository port for payment log entries.
///
/// Each request owns its entry exclusively, so implementations only need a
/// single insert per call; no locking or read-modify-write is involved.
#[async_trait]
pub trait PaymentLogRepository: Send + Sync {
    /// Append an entry and return its id.
    ///
    /// # Errors
    ///
    /// - `Database` when the store is unavailable
    /// - `Rejected` when the store refuses the entry
    async fn append(&self, entry: &PaymentLogEntry) -> Result<PaymentLogId, StorageError>;
}
