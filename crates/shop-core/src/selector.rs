//! # Payment Selector
//!
//! Factory mapping a string key to a concrete [`PaymentMethod`].
//!
//! ```text
//!   "card" / "CARD"      ──►  PaymentMethod::Card   { card_number }
//!   "paypal" / "PayPal"  ──►  PaymentMethod::PayPal { email }
//!   anything else        ──►  CheckoutError::UnknownPaymentMethod
//! ```
//!
//! Credentials are registered explicitly; the selector carries no built-in
//! account details.

use crate::error::{CheckoutError, CheckoutResult};
use crate::payment::{PaymentKind, PaymentMethod};
use std::collections::BTreeMap;
use tracing::debug;

/// Selector for payment methods by key
#[derive(Debug, Clone, Default)]
pub struct PaymentSelector {
    credentials: BTreeMap<PaymentKind, String>,
}

impl PaymentSelector {
    /// Create a selector with no credentials registered
    pub fn new() -> Self {
        Self {
            credentials: BTreeMap::new(),
        }
    }

    /// Register (or replace) the credential for a payment kind
    pub fn register(&mut self, kind: PaymentKind, credential: impl Into<String>) {
        self.credentials.insert(kind, credential.into());
    }

    /// Register a card number with builder pattern
    pub fn with_card(mut self, card_number: impl Into<String>) -> Self {
        self.register(PaymentKind::Card, card_number);
        self
    }

    /// Register a PayPal email with builder pattern
    pub fn with_paypal(mut self, email: impl Into<String>) -> Self {
        self.register(PaymentKind::PayPal, email);
        self
    }

    /// Select a payment method by key (case-insensitive).
    ///
    /// Unknown keys fail with `UnknownPaymentMethod`; known keys without a
    /// registered credential fail with `MissingCredential`.
    pub fn select(&self, key: &str) -> CheckoutResult<PaymentMethod> {
        let kind: PaymentKind = key.parse()?;

        let credential =
            self.credentials
                .get(&kind)
                .ok_or_else(|| CheckoutError::MissingCredential {
                    method: kind.as_str().to_string(),
                })?;

        debug!("Selected payment method {} for key {:?}", kind, key);

        Ok(PaymentMethod::from_credential(kind, credential.clone()))
    }

    /// List registered payment kinds, in stable order
    pub fn methods(&self) -> Vec<PaymentKind> {
        self.credentials.keys().copied().collect()
    }

    /// Check if a payment kind has a credential
    pub fn has_method(&self, kind: PaymentKind) -> bool {
        self.credentials.contains_key(&kind)
    }
}
