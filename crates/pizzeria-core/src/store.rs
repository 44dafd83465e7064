//! # Store Configuration
//!
//! Per-store price configuration and the shared handle items price against.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   StoreCatalog ──owns──► Store (Arc<RwLock<StoreConfig>>)               │
//! │                              ▲          ▲           ▲                   │
//! │                              │          │           │  read-only        │
//! │                          BasePizza   Topping    Beverage ...            │
//! │                                                                         │
//! │   Items resolve prices at cost() time, never caching them. Updating    │
//! │   a store's table reprices every item already built against it.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sharp Edge
//! A host that updates prices while an order is being totalled gets
//! per-lookup consistency only: each `price_for` call takes its own read
//! lock, so one total may mix old and new prices.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::money::Money;
use crate::pricing::{PriceCategory, PriceSource, PriceTable, SharedPrices};
use crate::types::Size;
use crate::validation::{validate_store_id, validate_store_name, ValidationResult};

// =============================================================================
// Store Configuration
// =============================================================================

/// One store's identity and price tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub store_id: String,
    pub store_name: String,
    #[serde(default, flatten)]
    pub prices: PriceTable,
}

impl StoreConfig {
    /// Creates a store with empty price tables.
    ///
    /// ```rust
    /// use pizzeria_core::store::StoreConfig;
    ///
    /// let store = StoreConfig::new("004", "Harbor Store").unwrap();
    /// assert_eq!(store.store_name, "Harbor Store");
    /// assert!(StoreConfig::new("", "Nameless").is_err());
    /// ```
    pub fn new(store_id: &str, store_name: &str) -> ValidationResult<Self> {
        validate_store_id(store_id)?;
        validate_store_name(store_name)?;
        Ok(StoreConfig {
            store_id: store_id.trim().to_string(),
            store_name: store_name.trim().to_string(),
            prices: PriceTable::new(),
        })
    }

    /// Replaces the price tables wholesale.
    pub fn with_prices(mut self, prices: PriceTable) -> ValidationResult<Self> {
        prices.validate()?;
        self.prices = prices;
        Ok(self)
    }

    pub fn pizza_base_price(&self, size: Size) -> Money {
        self.prices.pizza_base_price(size)
    }

    pub fn topping_price(&self, name: &str) -> Money {
        self.prices.topping_price(name)
    }

    pub fn item_price(&self, item_type: &str, qualifier: Option<&str>) -> Money {
        self.prices.item_price(item_type, qualifier)
    }

    pub fn set_pizza_base_prices(
        &mut self,
        prices: impl IntoIterator<Item = (Size, Money)>,
    ) -> ValidationResult<()> {
        self.prices.set_pizza_base_prices(prices)
    }

    pub fn set_topping_price(&mut self, name: &str, price: Money) -> ValidationResult<()> {
        self.prices.set_topping_price(name, price)
    }

    pub fn set_item_price(&mut self, key: &str, price: Money) -> ValidationResult<()> {
        self.prices.set_item_price(key, price)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_store_id(&self.store_id)?;
        validate_store_name(&self.store_name)?;
        self.prices.validate()
    }
}

impl PriceSource for StoreConfig {
    fn price_for(&self, category: PriceCategory, key: &str) -> Money {
        self.prices.price_for(category, key)
    }
}

// =============================================================================
// Store Handle
// =============================================================================

/// Cloneable handle to a store's live configuration.
///
/// Clones share the same configuration; this is what lets a price update
/// reach items that were built earlier.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<RwLock<StoreConfig>>,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Store {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Runs `f` with read access to the configuration.
    pub fn with_config<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StoreConfig) -> R,
    {
        // Readers never observe a half-applied update, so a poisoned lock
        // still holds a consistent table.
        let config = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&config)
    }

    /// Runs `f` with write access to the configuration.
    ///
    /// ```rust
    /// use pizzeria_core::money::Money;
    /// use pizzeria_core::store::{Store, StoreConfig};
    ///
    /// let store = Store::new(StoreConfig::new("002", "Suburban Store").unwrap());
    /// store
    ///     .update(|cfg| cfg.set_topping_price("cheese", Money::from_cents(225)))
    ///     .unwrap();
    /// assert_eq!(store.with_config(|cfg| cfg.topping_price("cheese")).cents(), 225);
    /// ```
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut StoreConfig) -> R,
    {
        let mut config = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut config)
    }

    pub fn id(&self) -> String {
        self.with_config(|cfg| cfg.store_id.clone())
    }

    pub fn name(&self) -> String {
        self.with_config(|cfg| cfg.store_name.clone())
    }

    /// Copy of the current configuration.
    pub fn snapshot(&self) -> StoreConfig {
        self.with_config(StoreConfig::clone)
    }

    /// This store as a price source for item constructors.
    pub fn prices(&self) -> SharedPrices {
        Arc::new(self.clone())
    }
}

impl From<StoreConfig> for Store {
    fn from(config: StoreConfig) -> Self {
        Store::new(config)
    }
}

impl PriceSource for Store {
    fn price_for(&self, category: PriceCategory, key: &str) -> Money {
        self.with_config(|cfg| cfg.price_for(category, key))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::CHEESE;

    fn suburban() -> Store {
        let config = StoreConfig::new("002", "Suburban Store")
            .unwrap()
            .with_prices(PriceTable::standard())
            .unwrap();
        Store::new(config)
    }

    #[test]
    fn test_store_config_rejects_bad_identity() {
        assert!(StoreConfig::new("", "Downtown Store").is_err());
        assert!(StoreConfig::new("001", "  ").is_err());
        assert!(StoreConfig::new("0 01", "Downtown Store").is_err());
    }

    #[test]
    fn test_item_price_key_convention() {
        let store = suburban();
        let coke = store.with_config(|cfg| cfg.item_price("coke", Some("small")));
        assert_eq!(coke.cents(), 200);
        let wings = store.with_config(|cfg| cfg.item_price("wings_per_piece", None));
        assert_eq!(wings.cents(), 150);
    }

    #[test]
    fn test_clones_share_configuration() {
        let store = suburban();
        let other = store.clone();

        other
            .update(|cfg| cfg.set_topping_price(CHEESE, Money::from_cents(275)))
            .unwrap();

        assert_eq!(
            store.price_for(PriceCategory::Topping, CHEESE).cents(),
            275
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = suburban();
        let before = store.snapshot();

        store
            .update(|cfg| cfg.set_topping_price(CHEESE, Money::from_cents(999)))
            .unwrap();

        assert_eq!(before.topping_price(CHEESE).cents(), 200);
        assert_eq!(store.snapshot().topping_price(CHEESE).cents(), 999);
    }

    #[test]
    fn test_with_prices_validates() {
        let mut prices = PriceTable::new();
        prices.toppings.insert(CHEESE.to_string(), Money::from_cents(-5));
        let result = StoreConfig::new("009", "Test Store")
            .unwrap()
            .with_prices(prices);
        assert!(result.is_err());
    }
}
