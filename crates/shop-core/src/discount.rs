//! # Discount Strategies
//!
//! Pricing rules applied to an order total after aggregation.
//!
//! The set of strategies is closed, so they are modelled as an enum and
//! matched exhaustively instead of behind a trait object.
//!
//! ```text
//!   Order::total() ──► DiscountStrategy::apply_discount() ──► payment amount
//!                         ├── Seasonal { percentage }   amount - amount * pct / 100
//!                         └── Loyalty  { flat_amount }  amount - flat
//! ```
//!
//! Neither strategy clamps: a percentage above 100 or a flat amount larger
//! than the total yields a negative result, which payment will decline.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pricing rule that turns a total into a discounted total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountStrategy {
    /// Percentage off the whole amount
    Seasonal { percentage: f64 },
    /// Flat amount off the whole amount
    Loyalty { flat_amount: f64 },
}

impl DiscountStrategy {
    pub fn seasonal(percentage: f64) -> Self {
        DiscountStrategy::Seasonal { percentage }
    }

    pub fn loyalty(flat_amount: f64) -> Self {
        DiscountStrategy::Loyalty { flat_amount }
    }

    /// Build a strategy from its kind name and parameter.
    ///
    /// Kind matching is case-insensitive.
    pub fn from_kind(kind: &str, param: f64) -> CheckoutResult<Self> {
        if !param.is_finite() {
            return Err(CheckoutError::InvalidArgument(format!(
                "discount parameter must be finite, got {}",
                param
            )));
        }

        match kind.trim().to_ascii_lowercase().as_str() {
            "seasonal" => Ok(Self::seasonal(param)),
            "loyalty" => Ok(Self::loyalty(param)),
            _ => Err(CheckoutError::UnknownDiscount {
                kind: kind.to_string(),
            }),
        }
    }

    /// Apply the discount to an amount. Pure; the input is not modified.
    pub fn apply_discount(&self, amount: f64) -> f64 {
        match *self {
            DiscountStrategy::Seasonal { percentage } => amount - (amount * percentage / 100.0),
            DiscountStrategy::Loyalty { flat_amount } => amount - flat_amount,
        }
    }

    /// Kind name, as accepted by [`DiscountStrategy::from_kind`]
    pub fn kind(&self) -> &'static str {
        match self {
            DiscountStrategy::Seasonal { .. } => "seasonal",
            DiscountStrategy::Loyalty { .. } => "loyalty",
        }
    }
}

impl fmt::Display for DiscountStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountStrategy::Seasonal { percentage } => write!(f, "seasonal {}%", percentage),
            DiscountStrategy::Loyalty { flat_amount } => write!(f, "loyalty -{}", flat_amount),
        }
    }
}

/// Parses `"<kind>:<param>"`, e.g. `"seasonal:10"` or `"loyalty:15"`
impl FromStr for DiscountStrategy {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, param) = s.split_once(':').ok_or_else(|| {
            CheckoutError::InvalidArgument(format!(
                "expected <kind>:<amount> discount, got {:?}",
                s
            ))
        })?;

        let param: f64 = param.trim().parse().map_err(|_| {
            CheckoutError::InvalidArgument(format!("invalid discount amount: {:?}", param))
        })?;

        Self::from_kind(kind, param)
    }
}
