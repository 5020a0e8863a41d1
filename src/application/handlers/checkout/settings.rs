//! Immutable settings the checkout flow is constructed with.

use crate::config::AppConfig;

/// Per-deployment values used to build gateway requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub shop_id: i64,
    pub shop_order_id: String,
    pub payer_account: String,
    pub invoice_payway: String,
    /// Form action for the browser-submitted Pay method.
    pub pay_url: String,
}

impl CheckoutSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            shop_id: config.shop.shop_id,
            shop_order_id: config.shop.shop_order_id.clone(),
            payer_account: config.gateway.payer_account.clone(),
            invoice_payway: config.gateway.invoice_payway.clone(),
            pay_url: config.gateway.pay_url.clone(),
        }
    }
}
