//! # pizzeria-core: Pricing Engine for a Pizza Store Chain
//!
//! Pure pricing logic with zero I/O: composable menu items, pluggable
//! coupons and per-store price tables.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pizzeria-catalog (config files, env, demo binary)                      │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pizzeria-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   items   │  │  coupon   │  │   order   │  │   │
//! │  │   │PriceSource│─►│ BasePizza │─►│  Coupon   │─►│   Order   │  │   │
//! │  │   │  Store    │  │  Topping  │  │ Strategy  │  │  summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer cents
//! - [`types`] - Size, ItemKind, ToppingLine, DiscountRate
//! - [`pricing`] - PriceSource trait and PriceTable
//! - [`store`] - StoreConfig and the shared Store handle
//! - [`items`] - PricedItem trait, pizzas, toppings, drinks, sides
//! - [`coupon`] - DiscountStrategy trait and built-in coupons
//! - [`order`] - Order aggregate and summary text
//! - [`error`], [`validation`] - setup-time checks
//!
//! ## Example Usage
//!
//! ```rust
//! use pizzeria_core::{BasePizza, Coupon, Order, PricedItem, Size, Toppable};
//!
//! let pizza = BasePizza::standard("margherita", Size::Small)
//!     .top("cheese")
//!     .top("pepperoni");
//! assert_eq!(pizza.cost().cents(), 1500);
//!
//! let mut order = Order::new();
//! order.add_item(pizza);
//! order.apply_coupon(Coupon::cheapest_topping_free());
//! assert_eq!(order.total().cents(), 1300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod error;
pub mod items;
pub mod money;
pub mod order;
pub mod pricing;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::{Coupon, DiscountStrategy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use items::{BasePizza, Beverage, BoxedItem, PricedItem, SideDish, Topping, Toppable};
pub use money::Money;
pub use order::{Order, OrderTotals};
pub use pricing::{PriceCategory, PriceSource, PriceTable, SharedPrices};
pub use store::{Store, StoreConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest piece count accepted for a side dish line.
pub const MAX_SIDE_QUANTITY: i64 = 100;

/// Largest single price table entry, in cents ($1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
