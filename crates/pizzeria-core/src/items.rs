//! # Priced Items
//!
//! Everything that can sit in an order: base pizzas, toppings layered on
//! top of them, beverages and side dishes.
//!
//! ## Topping Chains
//! ```text
//! Topping("pepperoni")
//!   └── inner: Topping("cheese")
//!         └── inner: BasePizza(small margherita)
//!
//! description = "small margherita pizza" + ", cheese" + ", pepperoni"
//! cost        = base(small) + price(cheese) + price(pepperoni)
//! toppings    = [cheese, pepperoni]   (innermost first)
//! ```
//!
//! Each topping owns exactly one inner item and can only be built from an
//! item that already exists, so a chain is always linear and finite.
//!
//! Prices are looked up on every call. Nothing is cached, so a store price
//! change is visible the next time `cost()` runs. A negative lookup counts
//! as zero, whatever the price source.

use std::fmt;
use std::sync::Arc;

use crate::money::Money;
use crate::pricing::{item_key, PriceCategory, PriceTable, SharedPrices};
use crate::types::{ItemKind, Size, ToppingLine};
use crate::validation::{validate_piece_count, ValidationResult};

// =============================================================================
// PricedItem Trait
// =============================================================================

/// Anything in an order that reports a description and a cost.
pub trait PricedItem: fmt::Debug + Send + Sync {
    /// Human-readable line text, e.g. `"small margherita pizza, cheese"`.
    fn description(&self) -> String;

    /// Current cost, never negative.
    fn cost(&self) -> Money;

    /// Product line tag used by coupons that target one kind of item.
    fn kind(&self) -> ItemKind;

    /// Toppings on this item in the order they were added.
    ///
    /// Items that cannot carry toppings keep the empty default.
    fn toppings(&self) -> Vec<ToppingLine> {
        Vec::new()
    }
}

/// Owned, type-erased item as stored in an order.
pub type BoxedItem = Box<dyn PricedItem>;

/// Items that can be topped with a fluent `.top("cheese")` call, using
/// their own price source for the topping.
pub trait Toppable: PricedItem + Sized + 'static {
    fn price_source(&self) -> SharedPrices;

    fn top(self, name: impl Into<String>) -> Topping {
        let prices = self.price_source();
        Topping::wrap(Box::new(self), name, prices)
    }
}

fn standard_prices() -> SharedPrices {
    Arc::new(PriceTable::standard())
}

/// Price lookup floored at zero.
fn lookup(prices: &SharedPrices, category: PriceCategory, key: &str) -> Money {
    prices.price_for(category, key).max(Money::zero())
}

// =============================================================================
// Base Pizza
// =============================================================================

/// An untopped pizza, priced by size.
#[derive(Debug, Clone)]
pub struct BasePizza {
    base_type: String,
    size: Size,
    prices: SharedPrices,
}

impl BasePizza {
    pub fn new(base_type: impl Into<String>, size: Size, prices: SharedPrices) -> Self {
        BasePizza {
            base_type: base_type.into(),
            size,
            prices,
        }
    }

    /// A pizza priced from the chain's reference menu.
    ///
    /// ```rust
    /// use pizzeria_core::items::{BasePizza, PricedItem, Toppable};
    /// use pizzeria_core::types::Size;
    ///
    /// let pizza = BasePizza::standard("margherita", Size::Small)
    ///     .top("cheese")
    ///     .top("pepperoni");
    /// assert_eq!(pizza.cost().cents(), 1500);
    /// assert_eq!(pizza.description(), "small margherita pizza, cheese, pepperoni");
    /// ```
    pub fn standard(base_type: impl Into<String>, size: Size) -> Self {
        Self::new(base_type, size, standard_prices())
    }

    pub fn base_type(&self) -> &str {
        &self.base_type
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl PricedItem for BasePizza {
    fn description(&self) -> String {
        format!("{} {} pizza", self.size, self.base_type)
    }

    fn cost(&self) -> Money {
        lookup(&self.prices, PriceCategory::PizzaBase, self.size.as_str())
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Pizza
    }
}

impl Toppable for BasePizza {
    fn price_source(&self) -> SharedPrices {
        Arc::clone(&self.prices)
    }
}

// =============================================================================
// Topping
// =============================================================================

/// One topping layered over an inner item.
///
/// The topping stores its name, not a price: the price is resolved from
/// `prices` each time it is needed.
#[derive(Debug)]
pub struct Topping {
    inner: BoxedItem,
    name: String,
    prices: SharedPrices,
}

impl Topping {
    /// Wraps any item, including ones that carry no toppings of their own.
    pub fn wrap(inner: BoxedItem, name: impl Into<String>, prices: SharedPrices) -> Self {
        Topping {
            inner,
            name: name.into(),
            prices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The item this topping sits on.
    pub fn inner(&self) -> &dyn PricedItem {
        self.inner.as_ref()
    }

    /// This layer's own price.
    pub fn price(&self) -> Money {
        lookup(&self.prices, PriceCategory::Topping, &self.name)
    }
}

impl PricedItem for Topping {
    fn description(&self) -> String {
        format!("{}, {}", self.inner.description(), self.name)
    }

    fn cost(&self) -> Money {
        self.inner.cost() + self.price()
    }

    fn kind(&self) -> ItemKind {
        self.inner.kind()
    }

    fn toppings(&self) -> Vec<ToppingLine> {
        let mut lines = self.inner.toppings();
        lines.push(ToppingLine::new(self.name.clone(), self.price()));
        lines
    }
}

impl Toppable for Topping {
    fn price_source(&self) -> SharedPrices {
        Arc::clone(&self.prices)
    }
}

// =============================================================================
// Beverage
// =============================================================================

/// A drink priced by the `"{drink}_{size}"` item key.
#[derive(Debug, Clone)]
pub struct Beverage {
    drink: String,
    size: String,
    prices: SharedPrices,
}

impl Beverage {
    pub fn new(drink: impl Into<String>, size: impl Into<String>, prices: SharedPrices) -> Self {
        Beverage {
            drink: drink.into(),
            size: size.into(),
            prices,
        }
    }

    /// ```rust
    /// use std::sync::Arc;
    /// use pizzeria_core::items::{Beverage, PricedItem};
    /// use pizzeria_core::pricing::PriceTable;
    ///
    /// let coke = Beverage::coke("large", Arc::new(PriceTable::standard()));
    /// assert_eq!(coke.description(), "large coke");
    /// assert_eq!(coke.cost().cents(), 400);
    /// ```
    pub fn coke(size: impl Into<String>, prices: SharedPrices) -> Self {
        Self::new("coke", size, prices)
    }
}

impl PricedItem for Beverage {
    fn description(&self) -> String {
        format!("{} {}", self.size, self.drink)
    }

    fn cost(&self) -> Money {
        lookup(
            &self.prices,
            PriceCategory::Item,
            &item_key(&self.drink, &self.size),
        )
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Beverage
    }
}

// =============================================================================
// Side Dish
// =============================================================================

/// A side sold by the piece, priced by the `"{sku}_per_piece"` item key.
#[derive(Debug, Clone)]
pub struct SideDish {
    sku: String,
    label: String,
    quantity: u32,
    prices: SharedPrices,
}

impl SideDish {
    /// Rejects piece counts outside `1..=MAX_SIDE_QUANTITY`.
    pub fn new(
        sku: impl Into<String>,
        label: impl Into<String>,
        quantity: u32,
        prices: SharedPrices,
    ) -> ValidationResult<Self> {
        validate_piece_count(i64::from(quantity))?;
        Ok(SideDish {
            sku: sku.into(),
            label: label.into(),
            quantity,
            prices,
        })
    }

    pub fn wings(quantity: u32, prices: SharedPrices) -> ValidationResult<Self> {
        Self::new("wings", "chicken wings", quantity, prices)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        lookup(
            &self.prices,
            PriceCategory::Item,
            &item_key(&self.sku, "per_piece"),
        )
    }
}

impl PricedItem for SideDish {
    fn description(&self) -> String {
        format!("{} {}", self.quantity, self.label)
    }

    fn cost(&self) -> Money {
        self.unit_price().multiply_quantity(i64::from(self.quantity))
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Side
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{CHEESE, MUSHROOM, PEPPERONI};
    use crate::store::{Store, StoreConfig};

    fn suburban() -> Store {
        let config = StoreConfig::new("002", "Suburban Store")
            .unwrap()
            .with_prices(PriceTable::standard())
            .unwrap();
        Store::new(config)
    }

    fn cheese_pepperoni() -> Topping {
        BasePizza::standard("margherita", Size::Small)
            .top(CHEESE)
            .top(PEPPERONI)
    }

    #[test]
    fn test_base_pizza_priced_by_size() {
        assert_eq!(BasePizza::standard("veggie", Size::Small).cost().cents(), 1000);
        assert_eq!(BasePizza::standard("veggie", Size::Medium).cost().cents(), 1500);
        assert_eq!(BasePizza::standard("veggie", Size::Large).cost().cents(), 2000);
        assert_eq!(
            BasePizza::standard("veggie", Size::Large).description(),
            "large veggie pizza"
        );
    }

    #[test]
    fn test_topping_chain_cost_and_description() {
        let pizza = cheese_pepperoni();
        assert_eq!(pizza.cost(), Money::from_cents(1500));
        assert!(pizza.description().ends_with(", cheese, pepperoni"));
        assert_eq!(pizza.kind(), ItemKind::Pizza);
    }

    #[test]
    fn test_toppings_listed_innermost_first() {
        let pizza = cheese_pepperoni();
        assert_eq!(
            pizza.toppings(),
            vec![
                ToppingLine::new(CHEESE, Money::from_cents(200)),
                ToppingLine::new(PEPPERONI, Money::from_cents(300)),
            ]
        );
        assert!(BasePizza::standard("plain", Size::Small).toppings().is_empty());
    }

    #[test]
    fn test_same_topping_twice() {
        let pizza = BasePizza::standard("margherita", Size::Small)
            .top(MUSHROOM)
            .top(MUSHROOM);
        assert_eq!(pizza.cost().cents(), 1300);
        assert_eq!(pizza.toppings().len(), 2);
        assert_eq!(pizza.description(), "small margherita pizza, mushroom, mushroom");
    }

    #[test]
    fn test_topping_over_item_without_toppings() {
        let prices: SharedPrices = Arc::new(PriceTable::standard());
        let odd = Topping::wrap(
            Box::new(Beverage::coke("small", Arc::clone(&prices))),
            CHEESE,
            prices,
        );
        assert_eq!(odd.toppings(), vec![ToppingLine::new(CHEESE, Money::from_cents(200))]);
        assert_eq!(odd.kind(), ItemKind::Beverage);
        assert_eq!(odd.cost().cents(), 400);
    }

    #[test]
    fn test_unknown_topping_is_free() {
        let pizza = BasePizza::standard("hawaiian", Size::Medium).top("pineapple");
        assert_eq!(pizza.cost().cents(), 1500);
        assert_eq!(pizza.toppings()[0].price, Money::zero());
    }

    #[test]
    fn test_beverage_and_wings() {
        let store = suburban();
        let coke = Beverage::coke("regular", store.prices());
        assert_eq!(coke.cost().cents(), 300);
        assert_eq!(coke.description(), "regular coke");
        assert!(Beverage::coke("bucket", store.prices()).cost().is_zero());

        let wings = SideDish::wings(6, store.prices()).unwrap();
        assert_eq!(wings.cost().cents(), 900);
        assert_eq!(wings.description(), "6 chicken wings");
        assert_eq!(wings.kind(), ItemKind::Side);
        assert!(wings.toppings().is_empty());
    }

    #[test]
    fn test_side_dish_rejects_bad_piece_counts() {
        let prices: SharedPrices = Arc::new(PriceTable::standard());
        assert!(SideDish::wings(0, Arc::clone(&prices)).is_err());
        assert!(SideDish::wings(101, Arc::clone(&prices)).is_err());
        assert_eq!(SideDish::wings(100, prices).unwrap().quantity(), 100);
    }

    #[test]
    fn test_negative_table_prices_count_as_zero() {
        // skips PriceTable::validate on purpose
        let table: PriceTable = serde_json::from_str(
            r#"{"pizza_base": {"small": 1000}, "toppings": {"cheese": -2000},
                "items": {"coke_small": -50, "wings_per_piece": -10}}"#,
        )
        .unwrap();
        let prices: SharedPrices = Arc::new(table);

        let pizza = BasePizza::new("margherita", Size::Small, Arc::clone(&prices)).top(CHEESE);
        assert_eq!(pizza.price(), Money::zero());
        assert_eq!(pizza.cost().cents(), 1000);
        assert_eq!(pizza.toppings()[0].price, Money::zero());

        assert!(Beverage::coke("small", Arc::clone(&prices)).cost().is_zero());
        assert!(SideDish::wings(6, prices).unwrap().cost().is_zero());
    }

    #[test]
    fn test_huge_prices_do_not_overflow() {
        let mut table = PriceTable::new();
        table.items.insert("wings_per_piece".into(), Money::from_cents(i64::MAX));
        table.toppings.insert(CHEESE.into(), Money::from_cents(i64::MAX));
        table.pizza_base.insert(Size::Small, Money::from_cents(i64::MAX));
        let prices: SharedPrices = Arc::new(table);

        let wings = SideDish::wings(6, Arc::clone(&prices)).unwrap();
        assert_eq!(wings.cost().cents(), i64::MAX);

        let pizza = BasePizza::new("margherita", Size::Small, prices).top(CHEESE);
        assert_eq!(pizza.cost().cents(), i64::MAX);
    }

    #[test]
    fn test_store_price_change_reprices_existing_items() {
        let store = suburban();
        let pizza = BasePizza::new("margherita", Size::Small, store.prices()).top(CHEESE);
        assert_eq!(pizza.cost().cents(), 1200);

        store
            .update(|cfg| cfg.set_topping_price(CHEESE, Money::from_cents(250)))
            .unwrap();

        assert_eq!(pizza.cost().cents(), 1250);
        assert_eq!(pizza.price().cents(), 250);
    }

    #[test]
    fn test_cost_and_description_are_idempotent() {
        let pizza = cheese_pepperoni();
        assert_eq!(pizza.cost(), pizza.cost());
        assert_eq!(pizza.description(), pizza.description());
        assert_eq!(pizza.toppings(), pizza.toppings());
    }
}
