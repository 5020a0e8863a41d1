//! In-Memory Payment Log Adapter
//!
//! Keeps payment log entries in memory.
//! Useful for testing and local development without a database.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::checkout::PaymentLogEntry;
use crate::domain::foundation::PaymentLogId;
use crate::ports::{PaymentLogRepository, StorageError};

/// In-memory append-only payment log
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentLog {
    entries: Arc<RwLock<Vec<PaymentLogEntry>>>,
    fail_appends: bool,
}

impl InMemoryPaymentLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log whose every append fails with a database error
    pub fn failing() -> Self {
        Self {
            fail_appends: true,
            ..Self::default()
        }
    }

    /// Snapshot of all stored entries, oldest first
    pub async fn entries(&self) -> Vec<PaymentLogEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentLogRepository for InMemoryPaymentLog {
    async fn append(&self, entry: &PaymentLogEntry) -> Result<PaymentLogId, StorageError> {
        if self.fail_appends {
            return Err(StorageError::Database(
                "in-memory log configured to fail".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.id() == entry.id()) {
            return Err(StorageError::Rejected(format!(
                "duplicate payment log id {}",
                entry.id()
            )));
        }
        entries.push(entry.clone());
        Ok(entry.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::Currency;

    fn entry(amount: &str) -> PaymentLogEntry {
        PaymentLogEntry::record(5, "101", amount.parse().unwrap(), Currency::Eur, None)
    }

    #[tokio::test]
    async fn append_keeps_insertion_order() {
        let log = InMemoryPaymentLog::new();
        let first = entry("1");
        let second = entry("2");

        assert_eq!(log.append(&first).await.unwrap(), first.id());
        assert_eq!(log.append(&second).await.unwrap(), second.id());

        assert_eq!(log.entries().await, vec![first, second]);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let log = InMemoryPaymentLog::new();
        let e = entry("1");
        log.append(&e).await.unwrap();

        let result = log.append(&e).await;

        assert!(matches!(result, Err(StorageError::Rejected(_))));
        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn failing_log_stores_nothing() {
        let log = InMemoryPaymentLog::failing();
        let result = log.append(&entry("1")).await;
        assert!(matches!(result, Err(StorageError::Database(_))));
        assert!(log.is_empty().await);
    }
}
