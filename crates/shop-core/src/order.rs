//! # Order Types
//!
//! Line items and orders for the checkout flow.
//! Orders are append-only; discounts and payments work on the derived total
//! and never touch the order itself.

use crate::error::{CheckoutError, CheckoutResult};
use crate::product::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line item in an order.
///
/// Deserializing goes through [`LineItem::new`], so serialized input gets the
/// same price checks as constructed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLineItem")]
pub struct LineItem {
    /// Catalog product ID, when the item came from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product_id: Option<String>,

    /// Product name (denormalized for display)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    quantity: u32,

    unit_price: f64,
}

impl LineItem {
    /// Create a line item from a quantity and a unit price.
    ///
    /// Fails with `InvalidArgument` when the price is negative or not finite.
    pub fn new(quantity: u32, unit_price: f64) -> CheckoutResult<Self> {
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(CheckoutError::InvalidArgument(format!(
                "unit price must be a non-negative number, got {}",
                unit_price
            )));
        }

        Ok(Self {
            product_id: None,
            name: None,
            quantity,
            unit_price,
        })
    }

    /// Create a line item from a catalog product
    pub fn from_product(product: &Product, quantity: u32) -> CheckoutResult<Self> {
        let mut item = Self::new(quantity, product.price)?;
        item.product_id = Some(product.id.clone());
        item.name = Some(product.name.clone());
        Ok(item)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Calculate the total price for this line item
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Unchecked wire form of [`LineItem`]
#[derive(Deserialize)]
struct RawLineItem {
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    quantity: u32,
    unit_price: f64,
}

impl TryFrom<RawLineItem> for LineItem {
    type Error = CheckoutError;

    fn try_from(raw: RawLineItem) -> CheckoutResult<Self> {
        let mut item = LineItem::new(raw.quantity, raw.unit_price)?;
        item.product_id = raw.product_id;
        item.name = raw.name;
        Ok(item)
    }
}

/// An order to be checked out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID
    pub id: String,

    /// Line items, in insertion order
    items: Vec<LineItem>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create an empty order with the given ID
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create an empty order with a generated ID
    pub fn generated() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Append a line item (no deduplication)
    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Add a catalog product with quantity
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> CheckoutResult<()> {
        self.add_item(LineItem::from_product(product, quantity)?);
        Ok(())
    }

    /// Calculate order total.
    ///
    /// Folds subtotals left to right in insertion order so the result is
    /// reproducible for a fixed item sequence. An empty order totals `0.0`.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .fold(0.0, |acc, item| acc + item.subtotal())
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if order is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
