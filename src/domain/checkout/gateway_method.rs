//! Gateway methods and their signing rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request shapes exposed by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayMethod {
    /// Bill the payer in the gateway's own wallet currency (server-to-server).
    Bill,
    /// Create an invoice for an external payway (server-to-server).
    Invoice,
    /// Hand a signed form to the payer's browser, which posts it directly.
    Pay,
}

impl GatewayMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayMethod::Bill => "bill",
            GatewayMethod::Invoice => "invoice",
            GatewayMethod::Pay => "pay",
        }
    }

    /// Fields the gateway leaves out when it checks `sign`.
    pub fn excluded_from_sign(&self) -> &'static [&'static str] {
        match self {
            GatewayMethod::Bill => &["description", "payer_account"],
            GatewayMethod::Invoice | GatewayMethod::Pay => &["description"],
        }
    }

    /// Whether this service calls the gateway itself for this method.
    pub fn is_server_to_server(&self) -> bool {
        !matches!(self, GatewayMethod::Pay)
    }
}

impl fmt::Display for GatewayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
