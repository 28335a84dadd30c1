//! # Inventory
//!
//! In-memory stock counter keyed by product ID.
//!
//! There is no global instance: create one with [`Inventory::new`], share it
//! as an `Arc<Inventory>` handle with whatever needs it, and drop or
//! [`Inventory::clear`] it when done. Every read-modify-write happens under
//! a single mutex.

use crate::error::{CheckoutError, CheckoutResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Stock levels by product ID
#[derive(Debug, Default)]
pub struct Inventory {
    stock: Mutex<HashMap<String, i64>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    // Every operation leaves the map consistent, so a poisoned lock is safe
    // to reuse.
    fn levels(&self) -> MutexGuard<'_, HashMap<String, i64>> {
        self.stock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Overwrite the stock level (last write wins)
    pub fn set_stock(&self, product_id: impl Into<String>, quantity: i64) {
        let product_id = product_id.into();
        debug!("Setting stock for {} to {}", product_id, quantity);
        self.levels().insert(product_id, quantity);
    }

    /// Add `delta` (negative for a sale) to the stock level and return the
    /// new level. Unknown products start at zero. The level saturates at
    /// the `i64` bounds.
    pub fn adjust_stock(&self, product_id: &str, delta: i64) -> i64 {
        let mut levels = self.levels();
        let level = levels.entry(product_id.to_string()).or_insert(0);
        *level = level.saturating_add(delta);
        debug!("Adjusted stock for {} by {} to {}", product_id, delta, level);
        *level
    }

    /// Current stock level, 0 for unknown products
    pub fn stock(&self, product_id: &str) -> i64 {
        self.levels().get(product_id).copied().unwrap_or(0)
    }

    /// Take `quantity` units out of stock if enough are available.
    ///
    /// Returns the remaining level, or `InsufficientStock` without changing
    /// anything.
    pub fn reserve(&self, product_id: &str, quantity: u32) -> CheckoutResult<i64> {
        let mut levels = self.levels();
        let available = levels.get(product_id).copied().unwrap_or(0);

        if available < i64::from(quantity) {
            return Err(CheckoutError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available,
            });
        }

        let remaining = available - i64::from(quantity);
        levels.insert(product_id.to_string(), remaining);
        Ok(remaining)
    }

    /// Drop all stock records
    pub fn clear(&self) {
        self.levels().clear();
    }

    /// Number of tracked products
    pub fn len(&self) -> usize {
        self.levels().len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels().is_empty()
    }
}
