//! # Checkout
//!
//! Runs the whole pipeline for one order: total, discount, payment method
//! selection, optional stock reservation and payment.

use crate::discount::DiscountStrategy;
use crate::error::CheckoutResult;
use crate::inventory::Inventory;
use crate::order::Order;
use crate::payment::Receipt;
use crate::selector::PaymentSelector;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Outcome of a successful checkout
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
    pub order_id: String,
    /// Order total before discount
    pub subtotal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountStrategy>,
    /// Amount actually charged
    pub discounted_total: f64,
    pub receipt: Receipt,
}

/// Checkout pipeline bound to a payment selector
pub struct Checkout<'a> {
    selector: &'a PaymentSelector,
    inventory: Option<Arc<Inventory>>,
}

impl<'a> Checkout<'a> {
    pub fn new(selector: &'a PaymentSelector) -> Self {
        Self {
            selector,
            inventory: None,
        }
    }

    /// Reserve stock from `inventory` for catalog line items before paying
    pub fn with_inventory(mut self, inventory: Arc<Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Check out `order`, paying with the method registered under `payment_key`.
    ///
    /// The order is only read. If payment fails after stock was reserved,
    /// the reservation is returned to the inventory.
    #[instrument(skip(self, order, discount), fields(order_id = %order.id, items = order.len()))]
    pub fn run(
        &self,
        order: &Order,
        discount: Option<&DiscountStrategy>,
        payment_key: &str,
    ) -> CheckoutResult<CheckoutSummary> {
        let subtotal = order.total();
        let discounted_total = discount.map_or(subtotal, |d| d.apply_discount(subtotal));

        info!(
            "Order {} total {:?}, after discount {:?}",
            order.id, subtotal, discounted_total
        );

        let method = self.selector.select(payment_key)?;

        let reserved = self.reserve_stock(order)?;

        let receipt = match method.process_order_payment(&order.id, discounted_total) {
            Ok(receipt) => receipt,
            Err(e) => {
                self.release_stock(&reserved);
                return Err(e);
            }
        };

        Ok(CheckoutSummary {
            order_id: order.id.clone(),
            subtotal,
            discount: discount.copied(),
            discounted_total,
            receipt,
        })
    }

    fn reserve_stock(&self, order: &Order) -> CheckoutResult<Vec<(String, u32)>> {
        let Some(inventory) = &self.inventory else {
            return Ok(Vec::new());
        };

        let mut reserved = Vec::new();
        for item in order.items() {
            let Some(product_id) = item.product_id() else {
                continue;
            };

            if let Err(e) = inventory.reserve(product_id, item.quantity()) {
                self.release_stock(&reserved);
                return Err(e);
            }
            reserved.push((product_id.to_string(), item.quantity()));
        }

        Ok(reserved)
    }

    fn release_stock(&self, reserved: &[(String, u32)]) {
        let Some(inventory) = &self.inventory else {
            return;
        };

        for (product_id, quantity) in reserved {
            warn!("Returning {} units of {} to stock", quantity, product_id);
            inventory.adjust_stock(product_id, i64::from(*quantity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use crate::order::LineItem;
    use crate::payment::PaymentKind;
    use crate::product::Product;

    fn selector() -> PaymentSelector {
        PaymentSelector::new()
            .with_card("1111-2222-3333-4444")
            .with_paypal("user@example.com")
    }

    #[test]
    fn test_seasonal_card_checkout() {
        let shirt = Product::clothing("C101", "T-Shirt", 30.0, "L", "Blue");
        let mut order = Order::new("O1001");
        order.add_product(&shirt, 2).unwrap();

        let selector = selector();
        let summary = Checkout::new(&selector)
            .run(&order, Some(&DiscountStrategy::seasonal(10.0)), "card")
            .unwrap();

        assert_eq!(summary.subtotal, 60.0);
        assert_eq!(summary.discounted_total, 54.0);
        assert_eq!(summary.receipt.method, PaymentKind::Card);
        assert_eq!(
            summary.receipt.to_string(),
            "Paid 54.0 using Card (****-****-****-4444)"
        );
    }

    #[test]
    fn test_loyalty_paypal_checkout() {
        let mut order = Order::new("O1003");
        order.add_item(LineItem::new(1, 80.0).unwrap());

        let selector = selector();
        let summary = Checkout::new(&selector)
            .run(&order, Some(&DiscountStrategy::loyalty(20.0)), "paypal")
            .unwrap();

        assert_eq!(summary.subtotal, 80.0);
        assert_eq!(summary.discounted_total, 60.0);

        let report = summary.receipt.to_string();
        assert!(report.contains("60.0"));
        assert!(report.contains("user@example.com"));
        assert_eq!(summary.receipt.order_id.as_deref(), Some("O1003"));
        assert_eq!(order.total(), 80.0);
    }

    #[test]
    fn test_checkout_without_discount() {
        let mut order = Order::new("O1002");
        order.add_item(LineItem::new(3, 25.0).unwrap());

        let selector = selector();
        let summary = Checkout::new(&selector).run(&order, None, "CARD").unwrap();

        assert_eq!(summary.discounted_total, 75.0);
        assert!(summary.discount.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["order_id"], "O1002");
        assert_eq!(json["receipt"]["method"], "card");
        assert!(json.get("discount").is_none());
    }

    #[test]
    fn test_unknown_payment_key() {
        let order = Order::new("O1");
        let selector = selector();

        let result = Checkout::new(&selector).run(&order, None, "bogus");
        assert!(matches!(result, Err(CheckoutError::UnknownPaymentMethod { .. })));
    }

    #[test]
    fn test_reserves_stock() {
        let jeans = Product::clothing("C102", "Jeans", 80.0, "M", "Black");
        let inventory = Arc::new(Inventory::new());
        inventory.set_stock("C102", 5);

        let mut order = Order::new("O2");
        order.add_product(&jeans, 2).unwrap();
        order.add_item(LineItem::new(1, 3.0).unwrap());

        let selector = selector();
        let checkout = Checkout::new(&selector).with_inventory(Arc::clone(&inventory));

        checkout.run(&order, None, "card").unwrap();
        assert_eq!(inventory.stock("C102"), 3);

        let mut big = Order::new("O3");
        big.add_product(&jeans, 4).unwrap();
        assert!(matches!(
            checkout.run(&big, None, "card"),
            Err(CheckoutError::InsufficientStock { .. })
        ));
        assert_eq!(inventory.stock("C102"), 3);
    }

    #[test]
    fn test_declined_payment_releases_stock() {
        let belt = Product::accessory("A201", "Leather Belt", 45.0, "Leather");
        let inventory = Arc::new(Inventory::new());
        inventory.set_stock("A201", 2);

        let mut order = Order::new("O4");
        order.add_product(&belt, 1).unwrap();

        let selector = selector();
        let result = Checkout::new(&selector)
            .with_inventory(Arc::clone(&inventory))
            .run(&order, Some(&DiscountStrategy::loyalty(100.0)), "card");

        assert!(matches!(result, Err(CheckoutError::PaymentDeclined { .. })));
        assert_eq!(inventory.stock("A201"), 2);
    }

    #[test]
    fn test_partial_reservation_is_rolled_back() {
        let shirt = Product::clothing("C101", "T-Shirt", 30.0, "L", "Blue");
        let belt = Product::accessory("A201", "Leather Belt", 45.0, "Leather");
        let inventory = Arc::new(Inventory::new());
        inventory.set_stock("C101", 10);
        inventory.set_stock("A201", 0);

        let mut order = Order::new("O5");
        order.add_product(&shirt, 2).unwrap();
        order.add_product(&belt, 1).unwrap();

        let selector = selector();
        let result = Checkout::new(&selector)
            .with_inventory(Arc::clone(&inventory))
            .run(&order, None, "paypal");

        assert!(matches!(result, Err(CheckoutError::InsufficientStock { .. })));
        assert_eq!(inventory.stock("C101"), 10);
    }
}
