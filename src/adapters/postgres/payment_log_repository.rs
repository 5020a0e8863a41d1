//! PostgreSQL implementation of PaymentLogRepository.
//!
//! Entries go into the `payment_logs` table with a single INSERT. Rows are
//! never updated or deleted from here.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::checkout::PaymentLogEntry;
use crate::domain::foundation::PaymentLogId;
use crate::ports::{PaymentLogRepository, StorageError};

/// Primary key constraint on `payment_logs`.
const PRIMARY_KEY_CONSTRAINT: &str = "payment_logs_pkey";

/// PostgreSQL implementation of the PaymentLogRepository port.
#[derive(Clone)]
pub struct PostgresPaymentLogRepository {
    pool: PgPool,
}

impl PostgresPaymentLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentLogRepository for PostgresPaymentLogRepository {
    async fn append(&self, entry: &PaymentLogEntry) -> Result<PaymentLogId, StorageError> {
        let id = entry.id();
        let created_at = entry.created_at();

        sqlx::query(
            r#"
            INSERT INTO payment_logs (
                id, shop_id, shop_order_id, amount, currency, description, created_at
            ) VALUES ($1, $2, $3, $4::numeric, $5, $6, $7)
            "#,
        )
        .bind(id.as_uuid())
        .bind(entry.shop_id())
        .bind(entry.shop_order_id())
        .bind(entry.amount().to_string())
        .bind(entry.currency().as_str())
        .bind(entry.description())
        .bind(created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint().is_some() {
                    tracing::warn!(
                        log_id = %id,
                        constraint = ?db_err.constraint(),
                        "Payment log entry violates a constraint"
                    );
                    if db_err.constraint() == Some(PRIMARY_KEY_CONSTRAINT) {
                        return StorageError::Rejected(format!(
                            "Payment log id {} already exists",
                            id
                        ));
                    }
                    return StorageError::Rejected(db_err.message().to_string());
                }
            }
            StorageError::Database(format!("Failed to append payment log entry: {}", e))
        })?;

        Ok(id)
    }
}
