//! Checkout module - payer input, the audit log record, and gateway requests.
//!
//! # Components
//!
//! - `Currency` / `PayerAmount` - validated form input
//! - `PaymentLogEntry` - append-only record of each attempt
//! - `GatewayMethod` - Bill, Invoice or Pay, chosen by currency
//! - `BillRequest`, `InvoiceRequest`, `PayRequest` - typed request records
//! - `Signer` / `SignedRequest` - `sign` parameter computation
//! - `CheckoutError` - terminal failures of a checkout attempt

mod amount;
mod currency;
mod errors;
mod gateway_method;
mod payment_log;
mod requests;
mod signer;

pub use amount::{max_pay_amount, min_pay_amount, PayerAmount};
pub use currency::Currency;
pub use errors::CheckoutError;
pub use gateway_method::GatewayMethod;
pub use payment_log::PaymentLogEntry;
pub use requests::{BillRequest, GatewayRequest, InvoiceRequest, PayRequest};
pub use signer::{hex_encode, SignedRequest, Signer, SIGN_FIELD};
