//! Payer currency accepted by the checkout form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::GatewayMethod;
use crate::domain::foundation::ValidationError;

/// Currencies the shop accepts.
///
/// The gateway identifies currencies by their ISO 4217 numeric code, which is
/// what goes on the wire; the alphabetic code is what the form submits and
/// what the log stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Rub,
    Uah,
}

impl Currency {
    /// All supported currencies, in form display order.
    pub const ALL: [Currency; 4] = [Currency::Eur, Currency::Usd, Currency::Rub, Currency::Uah];

    /// Alphabetic ISO 4217 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Rub => "RUB",
            Currency::Uah => "UAH",
        }
    }

    /// Numeric ISO 4217 code as sent to the gateway.
    pub fn numeric_code(&self) -> &'static str {
        match self {
            Currency::Eur => "978",
            Currency::Usd => "840",
            Currency::Rub => "643",
            Currency::Uah => "980",
        }
    }

    /// Gateway method used to bill a payer in this currency.
    pub fn gateway_method(&self) -> GatewayMethod {
        match self {
            Currency::Usd => GatewayMethod::Bill,
            Currency::Rub => GatewayMethod::Invoice,
            Currency::Eur | Currency::Uah => GatewayMethod::Pay,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::unsupported_value("currency", code))
    }
}
