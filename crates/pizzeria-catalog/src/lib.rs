//! # pizzeria-catalog: Stores, Coupon Codes, and Configuration
//!
//! Wires the pure pricing engine in `pizzeria-core` to the outside world:
//! the chain's seeded stores, a TOML catalog file, and environment overrides.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  demo binary (src/bin/demo.rs)                                          │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pizzeria-catalog (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   config.rs ──► CatalogConfig ──► build_catalog() ──► catalog   │   │
//! │  │   (toml, env)                                       StoreCatalog│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                ▼                                        │
//! │                         pizzeria-core                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{default_stores, StoreCatalog};
pub use config::{CatalogConfig, CatalogSettings, CouponEntry};
pub use error::{CatalogError, CatalogResult};
