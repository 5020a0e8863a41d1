//! HTTP adapters - axum routers and the middleware stack around them.

pub mod checkout;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use checkout::{checkout_router, CheckoutAppState};

/// Build the full application: checkout routes plus request tracing and a
/// per-request timeout.
pub fn build_app(state: CheckoutAppState, request_timeout: Duration) -> Router {
    checkout_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
