//! # Checkout Runner
//!
//! Builds an order from the configured items and runs it through the
//! checkout pipeline.

use crate::config::{CatalogFile, ShopConfig};
use anyhow::Context;
use shop_core::{Checkout, CheckoutSummary, Inventory, Order, PaymentSelector};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Everything a checkout run needs
pub struct ShopState {
    pub config: ShopConfig,
    pub catalog: CatalogFile,
    pub selector: PaymentSelector,
    pub inventory: Arc<Inventory>,
}

impl ShopState {
    /// Load config from the environment and the catalog from disk
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ShopConfig::from_env()?;
        let catalog = crate::config::load_catalog(config.catalog_path.as_deref())?;
        Ok(Self::new(config, catalog))
    }

    pub fn new(config: ShopConfig, catalog: CatalogFile) -> Self {
        let selector = config.payment_selector();
        let inventory = catalog.inventory();

        Self {
            config,
            catalog,
            selector,
            inventory,
        }
    }

    /// Build an order from the configured `product_id:quantity` pairs
    pub fn build_order(&self) -> anyhow::Result<Order> {
        let mut order = Order::generated();

        for (product_id, quantity) in &self.config.order_items {
            let product = self.catalog.catalog.require(product_id)?;
            order
                .add_product(product, *quantity)
                .with_context(|| format!("cannot add {} to order", product_id))?;
        }

        Ok(order)
    }

    /// Run the configured checkout end to end
    #[instrument(skip(self), fields(method = %self.config.payment_method))]
    pub fn run(&self) -> anyhow::Result<CheckoutSummary> {
        let order = self.build_order()?;

        info!(
            "Checking out order {}: {} line items, {} units",
            order.id,
            order.len(),
            order.item_count()
        );

        let summary = Checkout::new(&self.selector)
            .with_inventory(Arc::clone(&self.inventory))
            .run(
                &order,
                self.config.discount.as_ref(),
                &self.config.payment_method,
            )
            .map_err(|e| {
                error!(kind = e.kind(), "Checkout failed: {}", e);
                e
            })?;

        Ok(summary)
    }
}

/// Human-readable report lines for a summary
pub fn render_report(summary: &CheckoutSummary) -> Vec<String> {
    let mut lines = vec![format!("Order Total: {:?}", summary.subtotal)];

    if let Some(discount) = &summary.discount {
        lines.push(format!(
            "After {} discount: {:?}",
            discount, summary.discounted_total
        ));
    }

    lines.push(summary.receipt.to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;
    use shop_core::{CheckoutError, DiscountStrategy};

    fn state(items: &str, discount: &str, method: &str) -> ShopState {
        let config = ShopConfig::from_vars(|key| match key {
            "SHOP_ORDER_ITEMS" => Some(items.to_string()),
            "SHOP_DISCOUNT" => Some(discount.to_string()),
            "SHOP_PAYMENT_METHOD" => Some(method.to_string()),
            _ => None,
        })
        .unwrap();

        ShopState::new(config, CatalogFile::builtin())
    }

    #[test]
    fn test_default_scenario() {
        let state = state("C101:2", "seasonal:10", "card");
        let summary = state.run().unwrap();

        assert_eq!(summary.subtotal, 60.0);
        assert_eq!(summary.discounted_total, 54.0);
        assert_eq!(state.inventory.stock("C101"), 98);

        let report = render_report(&summary);
        assert_eq!(
            report,
            vec![
                "Order Total: 60.0".to_string(),
                "After seasonal 10% discount: 54.0".to_string(),
                "Paid 54.0 using Card (****-****-****-4444)".to_string(),
            ]
        );
    }

    #[test]
    fn test_loyalty_paypal_scenario() {
        let state = state("C102:1", "loyalty:20", "PayPal");
        let summary = state.run().unwrap();

        assert_eq!(summary.discount, Some(DiscountStrategy::loyalty(20.0)));
        assert_eq!(
            summary.receipt.to_string(),
            "Paid 60.0 using PayPal (user@example.com)"
        );
    }

    #[test]
    fn test_unknown_product() {
        let state = state("Z999:1", "none", "card");
        let err = state.run().unwrap_err();

        let err = err.downcast_ref::<CheckoutError>().unwrap();
        assert!(matches!(err, CheckoutError::ProductNotFound { .. }));
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_unknown_payment_method() {
        let state = state("C101:1", "none", "bitcoin");
        let err = state.run().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CheckoutError>(),
            Some(CheckoutError::UnknownPaymentMethod { .. })
        ));
        assert_eq!(state.inventory.stock("C101"), 100);
    }
}
