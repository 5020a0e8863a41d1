//! HTTP adapter for the checkout page.
//!
//! - `GET /` - Checkout form
//! - `POST /` - Submit checkout form (redirect, payment form or error)
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod views;

pub use handlers::{CheckoutApiError, CheckoutAppState};
pub use routes::checkout_router;
