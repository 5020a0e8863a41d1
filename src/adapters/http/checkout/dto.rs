//! HTTP DTOs for the checkout endpoints.
//!
//! The checkout form posts `application/x-www-form-urlencoded` fields.
//! Missing fields deserialize to empty values so that validation happens in
//! one place, the checkout handler.

use serde::{Deserialize, Serialize};

use crate::application::SubmitCheckoutCommand;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Checkout form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    /// Payer amount as typed, e.g. `10.50`.
    #[serde(default)]
    pub amount: String,
    /// ISO currency code, e.g. `EUR`.
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CheckoutForm> for SubmitCheckoutCommand {
    fn from(form: CheckoutForm) -> Self {
        SubmitCheckoutCommand {
            amount: form.amount,
            currency: form.currency,
            description: form.description,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
