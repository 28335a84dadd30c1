//! # shop-core
//!
//! Core types for the shop checkout pipeline.
//!
//! This crate provides:
//! - `LineItem` and `Order` for order totaling
//! - `DiscountStrategy` for pluggable pricing rules
//! - `PaymentMethod`, `PaymentSelector` and `Receipt` for payment dispatch
//! - `Product` and `ProductCatalog` for the product catalog
//! - `Inventory` for stock levels
//! - `Checkout` to run the whole flow in one call
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use shop_core::{DiscountStrategy, LineItem, Order, PaymentSelector};
//!
//! let mut order = Order::new("O1003");
//! order.add_item(LineItem::new(1, 80.0)?);
//!
//! let total = DiscountStrategy::loyalty(20.0).apply_discount(order.total());
//!
//! let selector = PaymentSelector::new().with_paypal("user@example.com");
//! let receipt = selector.select("paypal")?.process_payment(total)?;
//!
//! assert_eq!(receipt.to_string(), "Paid 60.0 using PayPal (user@example.com)");
//! # Ok::<(), shop_core::CheckoutError>(())
//! ```

pub mod checkout;
pub mod discount;
pub mod error;
pub mod inventory;
pub mod order;
pub mod payment;
pub mod product;
pub mod selector;

// Re-exports for convenience
pub use checkout::{Checkout, CheckoutSummary};
pub use discount::DiscountStrategy;
pub use error::{CheckoutError, CheckoutResult};
pub use inventory::Inventory;
pub use order::{LineItem, Order};
pub use payment::{mask_card_number, PaymentKind, PaymentMethod, Receipt};
pub use product::{Product, ProductCatalog, ProductKind};
pub use selector::PaymentSelector;
