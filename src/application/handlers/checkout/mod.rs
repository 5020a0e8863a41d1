//! Checkout handlers.

mod gateway_client;
mod settings;
mod submit_checkout;

pub use gateway_client::GatewayClient;
pub use settings::CheckoutSettings;
pub use submit_checkout::{
    CheckoutOutcome, PaymentInstruction, PaywayData, SubmitCheckoutCommand,
    SubmitCheckoutHandler, SubmitCheckoutResult,
};
