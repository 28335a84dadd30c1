//! # Payment Methods
//!
//! Payment capabilities that finalize an order for a given amount.
//!
//! Processing does not talk to a real provider: it validates the amount,
//! emits a report and hands back a [`Receipt`]. Card numbers never appear
//! in reports or receipts in full; only the last four digits survive.

use crate::error::{CheckoutError, CheckoutResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Known payment method kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Card,
    PayPal,
}

impl PaymentKind {
    /// All kinds, in selector order
    pub const ALL: [PaymentKind; 2] = [PaymentKind::Card, PaymentKind::PayPal];

    /// Selector key (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Card => "card",
            PaymentKind::PayPal => "paypal",
        }
    }

    /// Name used in payment reports
    pub fn label(&self) -> &'static str {
        match self {
            PaymentKind::Card => "Card",
            PaymentKind::PayPal => "PayPal",
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive lookup against the known keys
impl FromStr for PaymentKind {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CheckoutError::UnknownPaymentMethod { key: s.to_string() })
    }
}

/// A payment method holding its identifying credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    Card { card_number: String },
    PayPal { email: String },
}

impl PaymentMethod {
    pub fn card(card_number: impl Into<String>) -> Self {
        PaymentMethod::Card {
            card_number: card_number.into(),
        }
    }

    pub fn paypal(email: impl Into<String>) -> Self {
        PaymentMethod::PayPal {
            email: email.into(),
        }
    }

    /// Build a method of the given kind around a raw credential
    pub fn from_credential(kind: PaymentKind, credential: impl Into<String>) -> Self {
        match kind {
            PaymentKind::Card => Self::card(credential),
            PaymentKind::PayPal => Self::paypal(credential),
        }
    }

    pub fn kind(&self) -> PaymentKind {
        match self {
            PaymentMethod::Card { .. } => PaymentKind::Card,
            PaymentMethod::PayPal { .. } => PaymentKind::PayPal,
        }
    }

    fn raw_credential(&self) -> &str {
        match self {
            PaymentMethod::Card { card_number } => card_number,
            PaymentMethod::PayPal { email } => email,
        }
    }

    /// Credential as it may appear in reports
    pub fn display_credential(&self) -> String {
        match self {
            PaymentMethod::Card { card_number } => mask_card_number(card_number),
            PaymentMethod::PayPal { email } => email.clone(),
        }
    }

    /// Process a payment for `amount`.
    ///
    /// Fails with `PaymentDeclined` when the amount is negative or not finite.
    pub fn process_payment(&self, amount: f64) -> CheckoutResult<Receipt> {
        self.settle(None, amount)
    }

    /// Same as [`PaymentMethod::process_payment`], recording the order ID on the receipt
    pub fn process_order_payment(&self, order_id: &str, amount: f64) -> CheckoutResult<Receipt> {
        self.settle(Some(order_id), amount)
    }

    #[instrument(skip(self), fields(method = %self.kind()))]
    fn settle(&self, order_id: Option<&str>, amount: f64) -> CheckoutResult<Receipt> {
        if !amount.is_finite() {
            warn!("Declining non-finite payment amount");
            return Err(CheckoutError::PaymentDeclined {
                reason: format!("amount is not a finite number: {}", amount),
            });
        }
        if amount < 0.0 {
            warn!("Declining negative payment amount");
            return Err(CheckoutError::PaymentDeclined {
                reason: format!("amount is negative: {:?}", amount),
            });
        }

        let receipt = Receipt {
            id: Uuid::new_v4(),
            order_id: order_id.map(String::from),
            amount,
            method: self.kind(),
            credential: self.display_credential(),
            credential_digest: credential_digest(self.raw_credential()),
            paid_at: Utc::now(),
        };

        info!(receipt_id = %receipt.id, "{}", receipt);

        Ok(receipt)
    }
}

/// Record of one processed payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Receipt ID (generated)
    pub id: Uuid,

    /// Order the payment settled, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Amount paid
    pub amount: f64,

    /// Payment method kind
    pub method: PaymentKind,

    /// Credential in display form (masked card number or email)
    pub credential: String,

    /// Hex SHA-256 of the raw credential
    pub credential_digest: String,

    pub paid_at: DateTime<Utc>,
}

/// Renders the payment report line, e.g. `Paid 60.0 using PayPal (user@example.com)`
impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Paid {:?} using {} ({})",
            self.amount,
            self.method.label(),
            self.credential
        )
    }
}

/// Replace every digit except the last four with `*`, keeping separators.
pub fn mask_card_number(card_number: &str) -> String {
    let digits = card_number.chars().filter(char::is_ascii_digit).count();
    let mut seen = 0;

    card_number
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen + 4 <= digits {
                    return '*';
                }
            }
            c
        })
        .collect()
}

fn credential_digest(credential: &str) -> String {
    hex::encode(Sha256::digest(credential.as_bytes()))
}
