//! Payform - single-page checkout for the Piastrix payment gateway
//!
//! A payer submits amount, currency and description. Every submission is
//! written to the payment log, then dispatched by currency: USD becomes a
//! Bill (redirect), RUB an Invoice (gateway-provided form) and every other
//! currency a locally signed Pay form.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
