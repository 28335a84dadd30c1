//! # shop-checkout
//!
//! Runs one checkout against the product catalog and prints the payment
//! report.
//!
//! ## Usage
//!
//! ```bash
//! export SHOP_ORDER_ITEMS=C102:1
//! export SHOP_DISCOUNT=loyalty:20
//! export SHOP_PAYMENT_METHOD=paypal
//!
//! shop-checkout
//! ```

use shop_cli::{render_report, ShopState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = ShopState::from_env()?;

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.catalog.len());
    info!("Payment methods: {:?}", state.selector.methods());

    let summary = state.run()?;

    if state.config.json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in render_report(&summary) {
            println!("{}", line);
        }
    }

    Ok(())
}
