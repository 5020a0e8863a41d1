//! Payment log entry - the audit record written for every checkout attempt.

use serde::{Deserialize, Serialize};

use super::{Currency, PayerAmount};
use crate::domain::foundation::{PaymentLogId, Timestamp};

/// One persisted checkout attempt.
///
/// Entries are append-only: nothing in this crate updates or deletes them,
/// and `created_at` is fixed when the entry is recorded. The entry records
/// the attempt, not its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLogEntry {
    id: PaymentLogId,
    shop_id: i64,
    shop_order_id: String,
    amount: PayerAmount,
    currency: Currency,
    description: Option<String>,
    created_at: Timestamp,
}

impl PaymentLogEntry {
    /// Records a new attempt with a fresh id and the current time.
    ///
    /// An empty or whitespace-only description is stored as `None`.
    pub fn record(
        shop_id: i64,
        shop_order_id: impl Into<String>,
        amount: PayerAmount,
        currency: Currency,
        description: Option<String>,
    ) -> Self {
        Self {
            id: PaymentLogId::new(),
            shop_id,
            shop_order_id: shop_order_id.into(),
            amount,
            currency,
            description: description.filter(|d| !d.trim().is_empty()),
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> PaymentLogId {
        self.id
    }

    pub fn shop_id(&self) -> i64 {
        self.shop_id
    }

    pub fn shop_order_id(&self) -> &str {
        &self.shop_order_id
    }

    pub fn amount(&self) -> &PayerAmount {
        &self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
