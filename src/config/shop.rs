//! Shop identity configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Identity of the shop as registered with the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    /// Shop id issued by the gateway
    #[serde(default = "default_shop_id")]
    pub shop_id: i64,

    /// Order number sent with every request
    #[serde(default = "default_shop_order_id")]
    pub shop_order_id: String,
}

impl ShopConfig {
    /// Validate shop configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.shop_id <= 0 {
            return Err(ValidationError::InvalidShopId);
        }
        if self.shop_order_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SHOP_ORDER_ID"));
        }
        Ok(())
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            shop_id: default_shop_id(),
            shop_order_id: default_shop_order_id(),
        }
    }
}

fn default_shop_id() -> i64 {
    5
}

fn default_shop_order_id() -> String {
    "101".to_string()
}
