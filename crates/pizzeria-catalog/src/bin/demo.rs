//! # Pricing Demo
//!
//! Prices a sample order at one or every store and prints the receipt.
//!
//! ## Usage
//! ```bash
//! # Every store in the catalog
//! cargo run -p pizzeria-catalog --bin demo
//!
//! # One store with a configured coupon code
//! cargo run -p pizzeria-catalog --bin demo -- --store 001 --coupon SPEND30
//!
//! # Totals as JSON, from an explicit catalog file
//! cargo run -p pizzeria-catalog --bin demo -- -c ./catalog.toml --json
//! ```
//!
//! Without `--coupon` the built-in "cheapest topping free" coupon is used.

use std::env;
use std::path::PathBuf;

use pizzeria_catalog::{CatalogConfig, StoreCatalog};
use pizzeria_core::pricing::{CHEESE, PEPPERONI};
use pizzeria_core::{
    BasePizza, Beverage, Coupon, Order, SideDish, Size, Store, Toppable,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Wings in the sample order.
const SAMPLE_WINGS: u32 = 6;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut store_id: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut coupon_code: Option<String> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--store" | "-s" => {
                if i + 1 < args.len() {
                    store_id = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--coupon" => {
                if i + 1 < args.len() {
                    coupon_code = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Pizzeria Pricing Demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --store <ID>      Price at one store (default: every store)");
                println!("  -c, --config <PATH>   Catalog file (default: $PIZZERIA_CONFIG or user config dir)");
                println!("      --coupon <CODE>   Coupon code from the catalog file");
                println!("      --json            Print totals as JSON");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let config = CatalogConfig::load(config_path)?;
    let catalog = config.build_catalog()?;
    info!(stores = catalog.len(), default_store = %config.catalog.default_store, "Catalog ready");

    let coupon = match &coupon_code {
        Some(code) => config.coupon(code)?.clone(),
        None => Coupon::cheapest_topping_free(),
    };

    let stores = selected_stores(&catalog, store_id.as_deref())?;
    for store in stores {
        let order = sample_order(store, coupon.clone())?;
        if json {
            println!("{}", serde_json::to_string_pretty(&order.totals())?);
        } else {
            println!("{}", order.summary());
            println!();
        }
    }

    Ok(())
}

fn selected_stores<'a>(
    catalog: &'a StoreCatalog,
    store_id: Option<&str>,
) -> Result<Vec<&'a Store>, Box<dyn std::error::Error>> {
    match store_id {
        Some(id) => Ok(vec![catalog.require(id)?]),
        None => Ok(catalog.iter().collect()),
    }
}

/// Medium pizza with cheese and pepperoni, a regular coke, and six wings.
fn sample_order(store: &Store, coupon: Coupon) -> Result<Order, Box<dyn std::error::Error>> {
    let mut order = Order::for_store(store.clone());
    order.add_item(
        BasePizza::new("margherita", Size::Medium, store.prices())
            .top(CHEESE)
            .top(PEPPERONI),
    );
    order.add_item(Beverage::coke("regular", store.prices()));
    order.add_item(SideDish::wings(SAMPLE_WINGS, store.prices())?);
    order.apply_coupon(coupon);

    Ok(order)
}
