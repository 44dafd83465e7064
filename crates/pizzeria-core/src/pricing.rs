//! # Price Lookup
//!
//! The key-based price interface every cost-computing item consumes, plus
//! `PriceTable`, the plain map-backed implementation stores are built on.
//!
//! ## Lookup Keys
//! ```text
//! ┌──────────────┬──────────────────────────┬────────────────────────────┐
//! │ Category     │ Key                      │ Example                    │
//! ├──────────────┼──────────────────────────┼────────────────────────────┤
//! │ PizzaBase    │ size name                │ "small"                    │
//! │ Topping      │ topping name             │ "pepperoni"                │
//! │ Item         │ "{item}_{qualifier}"     │ "coke_small"               │
//! │              │ "{item}_per_piece"       │ "wings_per_piece"          │
//! └──────────────┴──────────────────────────┴────────────────────────────┘
//! ```
//!
//! Unknown keys resolve to `Money::zero()`. Nothing in the pricing path
//! fails; a missing entry silently under-prices the item instead.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::money::Money;
use crate::types::Size;
use crate::validation::{validate_price, validate_price_key, ValidationResult};

/// Standard topping names on the chain's menu.
pub const CHEESE: &str = "cheese";
pub const PEPPERONI: &str = "pepperoni";
pub const MUSHROOM: &str = "mushroom";

// =============================================================================
// Price Source
// =============================================================================

/// Which price table a lookup goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceCategory {
    PizzaBase,
    Topping,
    Item,
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriceCategory::PizzaBase => "pizza_base",
            PriceCategory::Topping => "topping",
            PriceCategory::Item => "item",
        };
        f.write_str(label)
    }
}

/// A read-only `(category, key) -> price` lookup.
///
/// Implementations must never fail: unknown keys return zero.
pub trait PriceSource: fmt::Debug + Send + Sync {
    fn price_for(&self, category: PriceCategory, key: &str) -> Money;
}

/// Shared, read-only handle items keep to their price source.
pub type SharedPrices = Arc<dyn PriceSource>;

// =============================================================================
// Price Table
// =============================================================================

/// Map-backed price tables for one store.
///
/// `BTreeMap` keeps serialized config output in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Base pizza price per size.
    #[serde(default)]
    pub pizza_base: HashMap<Size, Money>,

    /// Topping price per topping name.
    #[serde(default)]
    pub toppings: BTreeMap<String, Money>,

    /// Other menu items keyed `"{item}_{qualifier}"`.
    #[serde(default)]
    pub items: BTreeMap<String, Money>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain's reference menu prices.
    ///
    /// ```rust
    /// use pizzeria_core::money::Money;
    /// use pizzeria_core::pricing::PriceTable;
    /// use pizzeria_core::types::Size;
    ///
    /// let table = PriceTable::standard();
    /// assert_eq!(table.pizza_base_price(Size::Small), Money::from_cents(1000));
    /// assert_eq!(table.topping_price("cheese"), Money::from_cents(200));
    /// ```
    pub fn standard() -> Self {
        PriceTable {
            pizza_base: HashMap::from([
                (Size::Small, Money::from_cents(1000)),
                (Size::Medium, Money::from_cents(1500)),
                (Size::Large, Money::from_cents(2000)),
            ]),
            toppings: BTreeMap::from([
                (CHEESE.to_string(), Money::from_cents(200)),
                (PEPPERONI.to_string(), Money::from_cents(300)),
                (MUSHROOM.to_string(), Money::from_cents(150)),
            ]),
            items: BTreeMap::from([
                ("coke_small".to_string(), Money::from_cents(200)),
                ("coke_regular".to_string(), Money::from_cents(300)),
                ("coke_large".to_string(), Money::from_cents(400)),
                ("wings_per_piece".to_string(), Money::from_cents(150)),
            ]),
        }
    }

    pub fn pizza_base_price(&self, size: Size) -> Money {
        self.pizza_base.get(&size).copied().unwrap_or_default()
    }

    pub fn topping_price(&self, name: &str) -> Money {
        self.toppings.get(name).copied().unwrap_or_default()
    }

    /// Looks up `"{item_type}_{qualifier}"`, or `item_type` alone when no
    /// qualifier is given.
    ///
    /// ```rust
    /// use pizzeria_core::pricing::PriceTable;
    ///
    /// let table = PriceTable::standard();
    /// assert_eq!(table.item_price("coke", Some("large")).cents(), 400);
    /// assert_eq!(table.item_price("wings_per_piece", None).cents(), 150);
    /// assert!(table.item_price("garlic_bread", None).is_zero());
    /// ```
    pub fn item_price(&self, item_type: &str, qualifier: Option<&str>) -> Money {
        match qualifier {
            Some(q) if !q.is_empty() => self.lookup_item(&item_key(item_type, q)),
            _ => self.lookup_item(item_type),
        }
    }

    fn lookup_item(&self, key: &str) -> Money {
        self.items.get(key).copied().unwrap_or_default()
    }

    /// Replaces the whole base price table.
    pub fn set_pizza_base_prices(
        &mut self,
        prices: impl IntoIterator<Item = (Size, Money)>,
    ) -> ValidationResult<()> {
        let prices: HashMap<Size, Money> = prices.into_iter().collect();
        for (size, price) in &prices {
            validate_price(size.as_str(), *price)?;
        }
        self.pizza_base = prices;
        Ok(())
    }

    pub fn set_pizza_base_price(&mut self, size: Size, price: Money) -> ValidationResult<()> {
        validate_price(size.as_str(), price)?;
        self.pizza_base.insert(size, price);
        Ok(())
    }

    pub fn set_topping_price(&mut self, name: &str, price: Money) -> ValidationResult<()> {
        validate_price_key(name)?;
        validate_price(name, price)?;
        self.toppings.insert(name.to_string(), price);
        Ok(())
    }

    pub fn set_item_price(&mut self, key: &str, price: Money) -> ValidationResult<()> {
        validate_price_key(key)?;
        validate_price(key, price)?;
        self.items.insert(key.to_string(), price);
        Ok(())
    }

    /// Re-checks every entry, for tables that arrived through serde.
    pub fn validate(&self) -> ValidationResult<()> {
        for (size, price) in &self.pizza_base {
            validate_price(size.as_str(), *price)?;
        }
        for (name, price) in self.toppings.iter().chain(self.items.iter()) {
            validate_price_key(name)?;
            validate_price(name, *price)?;
        }
        Ok(())
    }
}

impl PriceSource for PriceTable {
    fn price_for(&self, category: PriceCategory, key: &str) -> Money {
        match category {
            PriceCategory::PizzaBase => key
                .parse::<Size>()
                .map(|size| self.pizza_base_price(size))
                .unwrap_or_default(),
            PriceCategory::Topping => self.topping_price(key),
            PriceCategory::Item => self.lookup_item(key),
        }
    }
}

/// Builds the `"{item}_{qualifier}"` key used by the item table.
pub fn item_key(item_type: &str, qualifier: &str) -> String {
    format!("{}_{}", item_type, qualifier)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_are_free() {
        let table = PriceTable::standard();
        assert!(table.price_for(PriceCategory::Topping, "pineapple").is_zero());
        assert!(table.price_for(PriceCategory::Item, "fries_large").is_zero());
        assert!(table.price_for(PriceCategory::PizzaBase, "family").is_zero());

        let empty = PriceTable::new();
        assert!(empty.pizza_base_price(Size::Large).is_zero());
    }

    #[test]
    fn test_price_for_categories() {
        let table = PriceTable::standard();
        assert_eq!(table.price_for(PriceCategory::PizzaBase, "medium").cents(), 1500);
        assert_eq!(table.price_for(PriceCategory::Topping, PEPPERONI).cents(), 300);
        assert_eq!(table.price_for(PriceCategory::Item, "coke_regular").cents(), 300);
    }

    #[test]
    fn test_setters_reject_negative_prices() {
        let mut table = PriceTable::new();
        assert!(table.set_topping_price(CHEESE, Money::from_cents(-1)).is_err());
        assert!(table.set_item_price("coke_small", Money::from_cents(-1)).is_err());
        assert!(table
            .set_pizza_base_prices([(Size::Small, Money::from_cents(-800))])
            .is_err());
        assert_eq!(table, PriceTable::new());
    }

    #[test]
    fn test_set_pizza_base_prices_replaces_table() {
        let mut table = PriceTable::standard();
        table
            .set_pizza_base_prices([(Size::Small, Money::from_cents(800))])
            .unwrap();
        assert_eq!(table.pizza_base_price(Size::Small).cents(), 800);
        assert!(table.pizza_base_price(Size::Large).is_zero());
    }

    #[test]
    fn test_validate_catches_deserialized_negatives() {
        let table: PriceTable =
            serde_json::from_str(r#"{"toppings": {"cheese": -200}}"#).unwrap();
        assert!(table.validate().is_err());
        assert!(PriceTable::standard().validate().is_ok());
    }
}
