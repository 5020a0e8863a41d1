//! Typed gateway request records.
//!
//! One record per gateway method. Each knows its method and produces the
//! ordered field list the gateway expects; signing is generic over the list.

use super::{CheckoutError, Currency, GatewayMethod, PaymentLogEntry};

/// A request record bound to one gateway method.
pub trait GatewayRequest {
    /// Method this request is sent with.
    const METHOD: GatewayMethod;

    /// Fields in wire order, without `sign`.
    fn fields(&self) -> Vec<(String, String)>;
}

fn field(name: &str, value: impl Into<String>) -> (String, String) {
    (name.to_string(), value.into())
}

/// Bill request: payer settles from a gateway wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillRequest {
    /// Two-decimal wire amount.
    pub shop_amount: String,
    pub shop_currency: Currency,
    pub shop_id: i64,
    pub shop_order_id: String,
    pub description: String,
    pub payer_currency: Currency,
    pub payer_account: String,
}

impl BillRequest {
    /// Bills the payer in the same currency the shop charges.
    pub fn for_entry(
        entry: &PaymentLogEntry,
        payer_account: impl Into<String>,
    ) -> Result<Self, CheckoutError> {
        Ok(Self {
            shop_amount: entry.amount().to_wire()?,
            shop_currency: entry.currency(),
            shop_id: entry.shop_id(),
            shop_order_id: entry.shop_order_id().to_string(),
            description: entry.description().unwrap_or_default().to_string(),
            payer_currency: entry.currency(),
            payer_account: payer_account.into(),
        })
    }
}

impl GatewayRequest for BillRequest {
    const METHOD: GatewayMethod = GatewayMethod::Bill;

    fn fields(&self) -> Vec<(String, String)> {
        vec![
            field("shop_amount", self.shop_amount.as_str()),
            field("shop_currency", self.shop_currency.numeric_code()),
            field("shop_id", self.shop_id.to_string()),
            field("shop_order_id", self.shop_order_id.as_str()),
            field("description", self.description.as_str()),
            field("payer_currency", self.payer_currency.numeric_code()),
            field("payer_account", self.payer_account.as_str()),
        ]
    }
}

/// Invoice request: payer settles through an external payway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRequest {
    pub amount: String,
    pub currency: Currency,
    pub shop_id: i64,
    pub shop_order_id: String,
    pub description: String,
    pub payway: String,
}

impl InvoiceRequest {
    pub fn for_entry(
        entry: &PaymentLogEntry,
        payway: impl Into<String>,
    ) -> Result<Self, CheckoutError> {
        Ok(Self {
            amount: entry.amount().to_wire()?,
            currency: entry.currency(),
            shop_id: entry.shop_id(),
            shop_order_id: entry.shop_order_id().to_string(),
            description: entry.description().unwrap_or_default().to_string(),
            payway: payway.into(),
        })
    }
}

impl GatewayRequest for InvoiceRequest {
    const METHOD: GatewayMethod = GatewayMethod::Invoice;

    fn fields(&self) -> Vec<(String, String)> {
        vec![
            field("amount", self.amount.as_str()),
            field("currency", self.currency.numeric_code()),
            field("shop_id", self.shop_id.to_string()),
            field("shop_order_id", self.shop_order_id.as_str()),
            field("description", self.description.as_str()),
            field("payway", self.payway.as_str()),
        ]
    }
}

/// Pay request: a signed form the payer's browser posts to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayRequest {
    pub amount: String,
    pub currency: Currency,
    pub shop_id: i64,
    pub shop_order_id: String,
    pub description: String,
}

impl PayRequest {
    pub fn for_entry(entry: &PaymentLogEntry) -> Result<Self, CheckoutError> {
        Ok(Self {
            amount: entry.amount().to_wire()?,
            currency: entry.currency(),
            shop_id: entry.shop_id(),
            shop_order_id: entry.shop_order_id().to_string(),
            description: entry.description().unwrap_or_default().to_string(),
        })
    }
}

impl GatewayRequest for PayRequest {
    const METHOD: GatewayMethod = GatewayMethod::Pay;

    fn fields(&self) -> Vec<(String, String)> {
        vec![
            field("amount", self.amount.as_str()),
            field("currency", self.currency.numeric_code()),
            field("shop_id", self.shop_id.to_string()),
            field("shop_order_id", self.shop_order_id.as_str()),
            field("description", self.description.as_str()),
        ]
    }
}
