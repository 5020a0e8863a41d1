//! Payer amount value object.
//!
//! Form input is any positive decimal literal, plain or scientific. Values
//! that `Decimal` cannot hold with two decimals are kept as text so the
//! attempt can still be logged and refused with the right error.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CheckoutError;
use crate::domain::foundation::ValidationError;

/// Largest decimal exponent of the leading digit that still fits the
/// two-decimal wire format (amounts below 10^26).
const MAX_LEADING_EXPONENT: i64 = 25;

/// Smallest decimal exponent of the leading digit `Decimal` can represent.
const MIN_LEADING_EXPONENT: i64 = -28;

/// Smallest amount the Pay form accepts (0.01).
pub fn min_pay_amount() -> Decimal {
    Decimal::new(1, 2)
}

/// Largest amount the Pay form accepts.
pub fn max_pay_amount() -> Decimal {
    Decimal::from(9_999_999_999_999_998_i64)
}

/// Amount the payer is asked for, in major currency units.
///
/// Always strictly positive. Precision is kept as submitted; rounding to
/// cents only happens when the amount is put on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayerAmount {
    /// Representable amount below 10^26.
    Exact(Decimal),

    /// Amount of 10^26 or more, as submitted.
    Overflow(String),

    /// Positive amount below 10^-28, as submitted.
    Underflow(String),
}

impl PayerAmount {
    /// Creates an amount, rejecting zero and negative values.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(not_positive());
        }
        if value >= Decimal::from_i128_with_scale(10_i128.pow(26), 0) {
            return Ok(PayerAmount::Overflow(value.to_string()));
        }
        Ok(PayerAmount::Exact(value))
    }

    /// The decimal value, when representable.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            PayerAmount::Exact(value) => Some(*value),
            PayerAmount::Overflow(_) | PayerAmount::Underflow(_) => None,
        }
    }

    /// Two-decimal string sent to the gateway, e.g. `"10.00"`.
    ///
    /// Fails with `AmountTooLarge` when the amount cannot be written with
    /// exactly two decimals.
    pub fn to_wire(&self) -> Result<String, CheckoutError> {
        match self {
            PayerAmount::Exact(value) => {
                let mut rounded =
                    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
                rounded.rescale(2);
                if rounded.scale() != 2 {
                    return Err(self.too_large());
                }
                Ok(rounded.to_string())
            }
            PayerAmount::Overflow(_) => Err(self.too_large()),
            PayerAmount::Underflow(_) => Ok("0.00".to_string()),
        }
    }

    /// Checks the limits the gateway enforces on the Pay form.
    pub fn ensure_within_pay_limits(&self) -> Result<(), CheckoutError> {
        match self {
            PayerAmount::Exact(value) if *value < min_pay_amount() => Err(self.too_small()),
            PayerAmount::Exact(value) if *value > max_pay_amount() => Err(self.too_large()),
            PayerAmount::Exact(_) => Ok(()),
            PayerAmount::Overflow(_) => Err(self.too_large()),
            PayerAmount::Underflow(_) => Err(self.too_small()),
        }
    }

    fn too_small(&self) -> CheckoutError {
        CheckoutError::AmountTooSmall {
            amount: self.to_string(),
        }
    }

    fn too_large(&self) -> CheckoutError {
        CheckoutError::AmountTooLarge {
            amount: self.to_string(),
        }
    }
}

impl fmt::Display for PayerAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayerAmount::Exact(value) => write!(f, "{}", value),
            PayerAmount::Overflow(raw) | PayerAmount::Underflow(raw) => f.write_str(raw),
        }
    }
}

impl FromStr for PayerAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("amount"));
        }

        let literal = Literal::scan(raw)?;
        let leading = match literal.leading_exponent {
            Some(leading) if !literal.negative => leading,
            _ => return Err(not_positive()),
        };

        let canonical = raw.strip_prefix('+').unwrap_or(raw).to_string();
        if leading > MAX_LEADING_EXPONENT {
            return Ok(PayerAmount::Overflow(canonical));
        }
        if leading < MIN_LEADING_EXPONENT {
            return Ok(PayerAmount::Underflow(canonical));
        }

        let value = Decimal::from_str(&literal.to_plain())
            .map_err(|e| ValidationError::invalid_format("amount", e.to_string()))?;
        if value <= Decimal::ZERO {
            return Ok(PayerAmount::Underflow(canonical));
        }
        Self::new(value)
    }
}

fn not_positive() -> ValidationError {
    ValidationError::invalid_format("amount", "must be greater than zero")
}

/// Decimal literal split into its significant digits and decimal point
/// position, before any conversion that could lose range.
struct Literal {
    negative: bool,
    /// Digits with leading zeros removed; empty when the literal is zero.
    digits: String,
    /// Number of `digits` before the decimal point (may be negative or
    /// exceed `digits.len()`).
    point: i64,
    /// Decimal exponent of the leading digit, `None` for zero.
    leading_exponent: Option<i64>,
}

impl Literal {
    fn scan(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::invalid_format("amount", "not a decimal number");

        let (negative, unsigned) = split_sign(raw);
        let (mantissa, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(at) => (&unsigned[..at], parse_exponent(&unsigned[at + 1..]).ok_or_else(invalid)?),
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part)
        {
            return Err(invalid());
        }

        let all_digits = format!("{}{}", int_part, frac_part);
        let zeros = all_digits.bytes().take_while(|b| *b == b'0').count();
        let digits = all_digits[zeros..].to_string();
        let point = (int_part.len() as i64 - zeros as i64).saturating_add(exponent);
        let leading_exponent = (!digits.is_empty()).then(|| point.saturating_sub(1));

        Ok(Self {
            negative,
            digits,
            point,
            leading_exponent,
        })
    }

    /// Plain positional notation, e.g. `1.5e-3` becomes `0.0015`.
    ///
    /// Only called for leading exponents within the representable range,
    /// so the zero padding stays short.
    fn to_plain(&self) -> String {
        let len = self.digits.len() as i64;
        if self.point <= 0 {
            format!("0.{}{}", "0".repeat((-self.point) as usize), self.digits)
        } else if self.point >= len {
            format!("{}{}", self.digits, "0".repeat((self.point - len) as usize))
        } else {
            let (int_digits, frac_digits) = self.digits.split_at(self.point as usize);
            format!("{}.{}", int_digits, frac_digits)
        }
    }
}

fn split_sign(raw: &str) -> (bool, &str) {
    if let Some(rest) = raw.strip_prefix('-') {
        (true, rest)
    } else {
        (false, raw.strip_prefix('+').unwrap_or(raw))
    }
}

/// Exponent after `e`; absurdly long exponents saturate.
fn parse_exponent(raw: &str) -> Option<i64> {
    let (negative, digits) = split_sign(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
