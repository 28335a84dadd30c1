//! # Configuration
//!
//! Runner settings from the environment (and `.env`), plus the TOML product
//! catalog and starting stock.

use anyhow::Context;
use serde::Deserialize;
use shop_core::{DiscountStrategy, Inventory, PaymentSelector, Product, ProductCatalog};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CARD_NUMBER: &str = "1111-2222-3333-4444";
const DEFAULT_PAYPAL_EMAIL: &str = "user@example.com";

/// Runner configuration
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Explicit catalog file; otherwise `config/products.toml` is searched
    pub catalog_path: Option<PathBuf>,
    /// Card number registered with the payment selector
    pub card_number: String,
    /// PayPal email registered with the payment selector
    pub paypal_email: String,
    /// Selector key used to pay
    pub payment_method: String,
    /// Discount applied to the order total
    pub discount: Option<DiscountStrategy>,
    /// `product_id:quantity` pairs making up the order
    pub order_items: Vec<(String, u32)>,
    /// Print the checkout summary as JSON instead of report lines
    pub json_output: bool,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl ShopConfig {
    /// Load from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SHOP_CATALOG_PATH` | search `config/products.toml` |
    /// | `SHOP_CARD_NUMBER` | `1111-2222-3333-4444` |
    /// | `SHOP_PAYPAL_EMAIL` | `user@example.com` |
    /// | `SHOP_PAYMENT_METHOD` | `card` |
    /// | `SHOP_DISCOUNT` | `seasonal:10` (`none` disables) |
    /// | `SHOP_ORDER_ITEMS` | `C101:2` |
    /// | `SHOP_OUTPUT` | `text` (`json`) |
    /// | `SHOP_ENVIRONMENT` | `development` |
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let discount = match var("SHOP_DISCOUNT").as_deref().map(str::trim) {
            None => Some(DiscountStrategy::seasonal(10.0)),
            Some("") | Some("none") => None,
            Some(spec) => Some(
                spec.parse::<DiscountStrategy>()
                    .with_context(|| format!("invalid SHOP_DISCOUNT {:?}", spec))?,
            ),
        };

        let order_items = parse_order_items(
            &var("SHOP_ORDER_ITEMS").unwrap_or_else(|| "C101:2".to_string()),
        )?;

        Ok(Self {
            catalog_path: var("SHOP_CATALOG_PATH").map(PathBuf::from),
            card_number: var("SHOP_CARD_NUMBER").unwrap_or_else(|| DEFAULT_CARD_NUMBER.to_string()),
            paypal_email: var("SHOP_PAYPAL_EMAIL")
                .unwrap_or_else(|| DEFAULT_PAYPAL_EMAIL.to_string()),
            payment_method: var("SHOP_PAYMENT_METHOD").unwrap_or_else(|| "card".to_string()),
            discount,
            order_items,
            json_output: var("SHOP_OUTPUT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            environment: var("SHOP_ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Payment selector with the configured credentials
    pub fn payment_selector(&self) -> PaymentSelector {
        PaymentSelector::new()
            .with_card(&self.card_number)
            .with_paypal(&self.paypal_email)
    }
}

/// Parse `"C101:2,A201"` into `[("C101", 2), ("A201", 1)]`
pub fn parse_order_items(spec: &str) -> anyhow::Result<Vec<(String, u32)>> {
    spec.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| -> anyhow::Result<(String, u32)> {
            match part.split_once(':') {
                Some((id, qty)) => {
                    let qty = qty
                        .trim()
                        .parse::<u32>()
                        .with_context(|| format!("invalid quantity in order item {:?}", part))?;
                    Ok((id.trim().to_string(), qty))
                }
                None => Ok((part.to_string(), 1)),
            }
        })
        .collect()
}

/// Catalog file layout: the product list plus optional starting stock
#[derive(Debug, Default)]
pub struct CatalogFile {
    pub catalog: ProductCatalog,
    pub stock: HashMap<String, i64>,
}

#[derive(Deserialize)]
struct StockSection {
    #[serde(default)]
    stock: HashMap<String, i64>,
}

impl CatalogFile {
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        let catalog = ProductCatalog::from_toml(toml_str)?;
        let StockSection { stock } =
            toml::from_str(toml_str).context("invalid [stock] section")?;
        Ok(Self { catalog, stock })
    }

    /// Built-in catalog used when no file is found
    pub fn builtin() -> Self {
        let catalog = ProductCatalog::new()
            .with_product(Product::clothing("C101", "T-Shirt", 30.0, "L", "Blue"))
            .with_product(Product::clothing("C102", "Jeans", 80.0, "M", "Black"))
            .with_product(Product::accessory("A201", "Leather Belt", 45.0, "Leather"));

        let stock = catalog
            .products
            .iter()
            .map(|p| (p.id.clone(), 100))
            .collect();

        Self { catalog, stock }
    }

    /// Fresh inventory seeded with the starting stock
    pub fn inventory(&self) -> Arc<Inventory> {
        let inventory = Inventory::new();
        for (product_id, quantity) in &self.stock {
            inventory.set_stock(product_id.as_str(), *quantity);
        }
        Arc::new(inventory)
    }
}

/// Load catalog from the configured path, or search `config/products.toml`
pub fn load_catalog(explicit: Option<&Path>) -> anyhow::Result<CatalogFile> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        return CatalogFile::from_toml(&content)
            .with_context(|| format!("failed to parse {}", path.display()));
    }

    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let file = CatalogFile::from_toml(&content)
                .with_context(|| format!("failed to parse {}", path))?;
            tracing::info!("Loaded {} products from {}", file.catalog.len(), path);
            return Ok(file);
        }
    }

    tracing::warn!("No product catalog found, using built-in catalog");
    Ok(CatalogFile::builtin())
}
