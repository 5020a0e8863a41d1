//! Domain layer - checkout vocabulary and rules, free of I/O.

pub mod checkout;
pub mod foundation;
