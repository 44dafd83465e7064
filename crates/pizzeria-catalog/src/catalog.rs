//! # Store Catalog
//!
//! Named stores keyed by store id, each a live `Store` handle that items
//! price against.
//!
//! ## Default Stores
//! ```text
//! ┌──────┬────────────────────────┬───────────────┬─────────────────────────┐
//! │ id   │ name                   │ pizza S/M/L   │ cheese/pepperoni/mush.  │
//! ├──────┼────────────────────────┼───────────────┼─────────────────────────┤
//! │ 001  │ Downtown Store         │ 12 / 18 / 24  │ 2.50 / 3.50 / 2.00      │
//! │ 002  │ Suburban Store         │ 10 / 15 / 20  │ 2.00 / 3.00 / 1.50      │
//! │ 003  │ Student District Store │  8 / 12 / 16  │ 1.50 / 2.50 / 1.00      │
//! └──────┴────────────────────────┴───────────────┴─────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};

use pizzeria_core::pricing::{CHEESE, MUSHROOM, PEPPERONI};
use pizzeria_core::{Money, PriceTable, Size, Store, StoreConfig};
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};

/// Stores by id, iterated in id order.
#[derive(Debug, Clone, Default)]
pub struct StoreCatalog {
    stores: BTreeMap<String, Store>,
}

impl StoreCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the three default stores.
    ///
    /// ```rust
    /// use pizzeria_catalog::StoreCatalog;
    ///
    /// let catalog = StoreCatalog::with_default_stores();
    /// assert_eq!(catalog.ids(), vec!["001", "002", "003"]);
    /// assert_eq!(catalog.get("001").unwrap().name(), "Downtown Store");
    /// ```
    pub fn with_default_stores() -> Self {
        let mut catalog = Self::new();
        for config in default_stores() {
            catalog.add(config);
        }
        info!(stores = catalog.len(), "Seeded default stores");
        catalog
    }

    /// Adds a store, replacing any store with the same id.
    ///
    /// Returns the replaced store, if there was one.
    pub fn add(&mut self, config: StoreConfig) -> Option<Store> {
        self.add_store(Store::new(config))
    }

    pub fn add_store(&mut self, store: Store) -> Option<Store> {
        let id = store.id();
        debug!(store_id = %id, name = %store.name(), "Registering store");
        self.stores.insert(id, store)
    }

    pub fn get(&self, store_id: &str) -> Option<&Store> {
        self.stores.get(store_id)
    }

    /// Like [`get`](Self::get) but reports unknown ids as an error.
    pub fn require(&self, store_id: &str) -> CatalogResult<&Store> {
        self.get(store_id)
            .ok_or_else(|| CatalogError::UnknownStore(store_id.to_string()))
    }

    pub fn remove(&mut self, store_id: &str) -> Option<Store> {
        self.stores.remove(store_id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.stores.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Store> {
        self.stores.values()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

// =============================================================================
// Seed Data
// =============================================================================

/// Price points for one seeded store, in cents.
struct SeedPrices {
    pizza: [i64; 3],
    toppings: [i64; 3],
    coke: [i64; 3],
    wings_per_piece: i64,
}

const SEED_STORES: &[(&str, &str, SeedPrices)] = &[
    (
        "001",
        "Downtown Store",
        SeedPrices {
            pizza: [1200, 1800, 2400],
            toppings: [250, 350, 200],
            coke: [250, 350, 450],
            wings_per_piece: 180,
        },
    ),
    (
        "002",
        "Suburban Store",
        SeedPrices {
            pizza: [1000, 1500, 2000],
            toppings: [200, 300, 150],
            coke: [200, 300, 400],
            wings_per_piece: 150,
        },
    ),
    (
        "003",
        "Student District Store",
        SeedPrices {
            pizza: [800, 1200, 1600],
            toppings: [150, 250, 100],
            coke: [150, 250, 350],
            wings_per_piece: 120,
        },
    ),
];

/// Configurations for the chain's three default stores.
pub fn default_stores() -> Vec<StoreConfig> {
    SEED_STORES
        .iter()
        .map(|(id, name, seed)| StoreConfig {
            store_id: id.to_string(),
            store_name: name.to_string(),
            prices: seed_table(seed),
        })
        .collect()
}

fn seed_table(seed: &SeedPrices) -> PriceTable {
    let pizza_base: HashMap<Size, Money> = Size::ALL
        .iter()
        .zip(seed.pizza)
        .map(|(size, cents)| (*size, Money::from_cents(cents)))
        .collect();

    let toppings = [CHEESE, PEPPERONI, MUSHROOM]
        .iter()
        .zip(seed.toppings)
        .map(|(name, cents)| (name.to_string(), Money::from_cents(cents)))
        .collect();

    let mut items: BTreeMap<String, Money> = ["small", "regular", "large"]
        .iter()
        .zip(seed.coke)
        .map(|(size, cents)| (format!("coke_{}", size), Money::from_cents(cents)))
        .collect();
    items.insert(
        "wings_per_piece".to_string(),
        Money::from_cents(seed.wings_per_piece),
    );

    PriceTable {
        pizza_base,
        toppings,
        items,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::{BasePizza, Beverage, PricedItem, SideDish, Toppable};

    #[test]
    fn test_default_stores_are_valid() {
        for config in default_stores() {
            assert!(config.validate().is_ok(), "{}", config.store_id);
        }
    }

    #[test]
    fn test_suburban_matches_reference_menu() {
        let catalog = StoreCatalog::with_default_stores();
        let suburban = catalog.require("002").unwrap().snapshot();
        assert_eq!(suburban.prices, PriceTable::standard());
    }

    #[test]
    fn test_store_pricing_differs_by_store() {
        let catalog = StoreCatalog::with_default_stores();
        let cost_at = |id: &str| {
            let store = catalog.require(id).unwrap();
            BasePizza::new("margherita", Size::Small, store.prices())
                .top(CHEESE)
                .cost()
                .cents()
        };
        assert_eq!(cost_at("001"), 1450);
        assert_eq!(cost_at("002"), 1200);
        assert_eq!(cost_at("003"), 950);
    }

    #[test]
    fn test_drinks_and_wings_by_store() {
        let catalog = StoreCatalog::with_default_stores();
        let downtown = catalog.require("001").unwrap();
        assert_eq!(Beverage::coke("large", downtown.prices()).cost().cents(), 450);
        assert_eq!(SideDish::wings(10, downtown.prices()).unwrap().cost().cents(), 1800);
    }

    #[test]
    fn test_add_replaces_same_id() {
        let mut catalog = StoreCatalog::with_default_stores();
        let replacement = StoreConfig::new("002", "Suburban Express").unwrap();

        let previous = catalog.add(replacement);

        assert_eq!(previous.map(|s| s.name()).as_deref(), Some("Suburban Store"));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.require("002").unwrap().name(), "Suburban Express");
    }

    #[test]
    fn test_unknown_store() {
        let catalog = StoreCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.get("001").is_none());
        assert!(matches!(
            catalog.require("001"),
            Err(CatalogError::UnknownStore(id)) if id == "001"
        ));
    }
}
