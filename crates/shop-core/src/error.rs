//! # Checkout Error Types
//!
//! Typed error handling for the shop checkout pipeline.
//! All fallible operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckoutError {
    /// Negative or non-finite quantity, price or amount
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Selector key not in the known set of payment methods
    #[error("Unknown payment method: {key}")]
    UnknownPaymentMethod { key: String },

    /// Payment processing rejected the amount
    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    /// Known payment method with no credential registered
    #[error("No credential registered for payment method: {method}")]
    MissingCredential { method: String },

    /// Discount kind not in the known set of strategies
    #[error("Unknown discount strategy: {kind}")]
    UnknownDiscount { kind: String },

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Not enough stock to reserve the requested quantity
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: i64,
    },

    /// Configuration errors (bad catalog, missing settings)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CheckoutError {
    /// Returns true if the caller supplied bad input (as opposed to a
    /// misconfigured selector or catalog). Unknown product IDs count as
    /// caller input.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::InvalidArgument(_)
                | CheckoutError::UnknownPaymentMethod { .. }
                | CheckoutError::PaymentDeclined { .. }
                | CheckoutError::UnknownDiscount { .. }
                | CheckoutError::ProductNotFound { .. }
                | CheckoutError::InsufficientStock { .. }
        )
    }

    /// Short machine-friendly name, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::InvalidArgument(_) => "invalid_argument",
            CheckoutError::UnknownPaymentMethod { .. } => "unknown_payment_method",
            CheckoutError::PaymentDeclined { .. } => "payment_declined",
            CheckoutError::MissingCredential { .. } => "missing_credential",
            CheckoutError::UnknownDiscount { .. } => "unknown_discount",
            CheckoutError::ProductNotFound { .. } => "product_not_found",
            CheckoutError::InsufficientStock { .. } => "insufficient_stock",
            CheckoutError::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
