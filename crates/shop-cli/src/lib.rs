//! # shop-cli
//!
//! Command-line runner for shop-checkout-rs.
//!
//! This crate provides:
//! - Environment and `.env` configuration
//! - TOML product catalog and starting stock loading
//! - A checkout runner that prints payment reports
//!
//! ## Environment
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SHOP_CATALOG_PATH` | Catalog TOML file |
//! | `SHOP_CARD_NUMBER` | Card number for `card` payments |
//! | `SHOP_PAYPAL_EMAIL` | Email for `paypal` payments |
//! | `SHOP_PAYMENT_METHOD` | Payment selector key |
//! | `SHOP_DISCOUNT` | `seasonal:<pct>`, `loyalty:<amount>` or `none` |
//! | `SHOP_ORDER_ITEMS` | `product_id:quantity,...` |
//! | `SHOP_OUTPUT` | `text` or `json` |

pub mod config;
pub mod runner;

pub use config::{CatalogFile, ShopConfig};
pub use runner::{render_report, ShopState};
