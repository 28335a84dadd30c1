//! # Product Types
//!
//! Product catalog types for the checkout flow.
//! Products are loaded from `config/products.toml`.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

/// Category-specific product attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ProductKind {
    /// Apparel with a size and a color
    Clothing { size: String, color: String },
    /// Belts, bags and the like
    Accessory { material: String },
    /// Anything without extra attributes
    General,
}

impl Default for ProductKind {
    fn default() -> Self {
        ProductKind::General
    }
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., "C101")
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Category attributes
    #[serde(default)]
    pub kind: ProductKind,

    /// Whether this product is active and available for purchase
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a product with no category attributes
    pub fn general(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            kind: ProductKind::General,
            active: true,
        }
    }

    /// Create a clothing product
    pub fn clothing(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            kind: ProductKind::Clothing {
                size: size.into(),
                color: color.into(),
            },
            ..Self::general(id, name, price)
        }
    }

    /// Create an accessory product
    pub fn accessory(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        material: impl Into<String>,
    ) -> Self {
        Self {
            kind: ProductKind::Accessory {
                material: material.into(),
            },
            ..Self::general(id, name, price)
        }
    }

    /// Builder: mark the product unavailable
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn size(&self) -> Option<&str> {
        match &self.kind {
            ProductKind::Clothing { size, .. } => Some(size),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<&str> {
        match &self.kind {
            ProductKind::Clothing { color, .. } => Some(color),
            _ => None,
        }
    }

    pub fn material(&self) -> Option<&str> {
        match &self.kind {
            ProductKind::Accessory { material } => Some(material),
            _ => None,
        }
    }
}

/// Product catalog (loaded from config)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Builder variant of [`ProductCatalog::add`]
    pub fn with_product(mut self, product: Product) -> Self {
        self.add(product);
        self
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Find an active product by ID or fail with `ProductNotFound`
    pub fn require(&self, id: &str) -> CheckoutResult<&Product> {
        self.get(id)
            .filter(|p| p.active)
            .ok_or_else(|| CheckoutError::ProductNotFound {
                product_id: id.to_string(),
            })
    }

    /// Get all active products
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> CheckoutResult<Self> {
        toml::from_str(toml_str)
            .map_err(|e| CheckoutError::Configuration(format!("invalid catalog: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clothing_attributes() {
        let shirt = Product::clothing("C101", "T-Shirt", 30.0, "L", "Blue");

        assert_eq!(shirt.size(), Some("L"));
        assert_eq!(shirt.color(), Some("Blue"));
        assert_eq!(shirt.material(), None);
        assert!(shirt.active);
    }

    #[test]
    fn test_accessory_attributes() {
        let belt = Product::accessory("A201", "Leather Belt", 45.0, "Leather");

        assert_eq!(belt.material(), Some("Leather"));
        assert_eq!(belt.size(), None);
    }

    #[test]
    fn test_catalog_from_toml() {
        let toml_str = r#"
            [[products]]
            id = "C101"
            name = "T-Shirt"
            price = 30.0
            kind = { category = "clothing", size = "L", color = "Blue" }

            [[products]]
            id = "A201"
            name = "Leather Belt"
            price = 45.0
            kind = { category = "accessory", material = "Leather" }

            [[products]]
            id = "G001"
            name = "Gift Card"
            price = 25.0
            active = false
        "#;

        let catalog = ProductCatalog::from_toml(toml_str).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("C101").unwrap().color(), Some("Blue"));
        assert_eq!(catalog.get("A201").unwrap().material(), Some("Leather"));
        assert_eq!(catalog.get("G001").unwrap().kind, ProductKind::General);
        assert_eq!(catalog.active_products().count(), 2);
    }

    #[test]
    fn test_catalog_toml_round_trip() {
        let catalog = ProductCatalog::new()
            .with_product(Product::clothing("C101", "T-Shirt", 30.0, "L", "Blue"))
            .with_product(Product::clothing("C102", "Jeans", 80.0, "M", "Black"))
            .with_product(Product::accessory("A201", "Leather Belt", 45.0, "Leather"));

        let toml_str = toml::to_string(&catalog).unwrap();
        let parsed = ProductCatalog::from_toml(&toml_str).unwrap();

        assert_eq!(parsed, catalog);
        assert_eq!(parsed.get("C102").unwrap().size(), Some("M"));
        assert_eq!(parsed.get("C102").unwrap().color(), Some("Black"));
        assert_eq!(parsed.active_products().count(), 3);
    }

    #[test]
    fn test_require_skips_inactive() {
        let catalog = ProductCatalog::new()
            .with_product(Product::general("G001", "Gift Card", 25.0).inactive())
            .with_product(Product::general("G002", "Sticker", 2.5));

        assert!(catalog.require("G002").is_ok());
        assert!(matches!(
            catalog.require("G001"),
            Err(CheckoutError::ProductNotFound { .. })
        ));
        assert!(matches!(
            catalog.require("missing"),
            Err(CheckoutError::ProductNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_catalog() {
        let result = ProductCatalog::from_toml("[[products]]\nid = 3");
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }
}
