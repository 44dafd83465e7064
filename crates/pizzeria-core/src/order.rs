//! # Order
//!
//! The cart aggregate: priced items in entry order plus at most one coupon.
//!
//! ## Lifecycle
//! ```text
//! Order::new() / Order::for_store(store)
//!      │
//!      ▼
//! add_item(...) ×N          items keep insertion order
//!      │
//!      ▼
//! apply_coupon(...)         replaces any previous coupon
//!      │
//!      ▼
//! subtotal() / total() / summary()   recomputed on every call
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coupon::DiscountStrategy;
use crate::items::{BoxedItem, PricedItem};
use crate::money::Money;
use crate::store::Store;

// =============================================================================
// Order
// =============================================================================

/// A customer's order.
///
/// ## Invariants
/// - Items are never reordered or merged
/// - At most one coupon is active
/// - Totals are never cached
#[derive(Debug, Default)]
pub struct Order {
    items: Vec<BoxedItem>,
    coupon: Option<Box<dyn DiscountStrategy>>,
    store: Option<Store>,
}

impl Order {
    /// Creates an empty order with no store attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty order whose summary is headed with the store name.
    pub fn for_store(store: Store) -> Self {
        Order {
            store: Some(store),
            ..Self::default()
        }
    }

    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    /// Appends an item to the end of the order.
    pub fn add_item<I: PricedItem + 'static>(&mut self, item: I) {
        self.add_boxed(Box::new(item));
    }

    pub fn add_boxed(&mut self, item: BoxedItem) {
        debug!(
            description = %item.description(),
            position = self.items.len() + 1,
            "Adding item to order"
        );
        self.items.push(item);
    }

    /// Attaches a coupon, replacing the current one if any.
    ///
    /// ```rust
    /// use pizzeria_core::coupon::{Coupon, DiscountStrategy};
    /// use pizzeria_core::money::Money;
    /// use pizzeria_core::order::Order;
    ///
    /// let mut order = Order::new();
    /// order.apply_coupon(Coupon::percent_off(10.0));
    /// order.apply_coupon(Coupon::fixed_amount_off(Money::from_cents(500)));
    /// assert_eq!(order.coupon().unwrap().describe(), "Fixed Discount: $5.00");
    /// ```
    pub fn apply_coupon<C: DiscountStrategy + 'static>(&mut self, coupon: C) {
        self.apply_boxed_coupon(Box::new(coupon));
    }

    pub fn apply_boxed_coupon(&mut self, coupon: Box<dyn DiscountStrategy>) {
        debug!(
            coupon = %coupon.describe(),
            replaced = self.coupon.is_some(),
            "Applying coupon"
        );
        self.coupon = Some(coupon);
    }

    /// Detaches and returns the active coupon.
    pub fn clear_coupon(&mut self) -> Option<Box<dyn DiscountStrategy>> {
        self.coupon.take()
    }

    pub fn coupon(&self) -> Option<&dyn DiscountStrategy> {
        self.coupon.as_deref()
    }

    pub fn items(&self) -> &[BoxedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item costs, added in insertion order.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|item| item.cost()).sum()
    }

    /// Subtotal after the coupon, or the subtotal when none is attached.
    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        match &self.coupon {
            Some(coupon) => coupon.apply(subtotal, &self.items),
            None => subtotal,
        }
    }

    /// How much the coupon took off.
    pub fn discount(&self) -> Money {
        self.subtotal() - self.total()
    }

    /// Snapshot of the order's numbers.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::from(self)
    }

    /// Multi-line receipt text.
    ///
    /// ```text
    /// Order Details - Suburban Store:
    /// 1. small margherita pizza, cheese - $12.00
    /// 2. 6 chicken wings - $9.00
    ///
    /// Subtotal: $21.00
    /// Coupon Applied: Fixed Discount: $5.00
    /// Discount Amount: -$5.00
    /// Final Total: $16.00
    /// ```
    ///
    /// Without a coupon the last three lines become `Total: {subtotal}`.
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return match self.store {
                Some(_) => "Order is empty".to_string(),
                None => "Empty Order".to_string(),
            };
        }

        let mut summary = match &self.store {
            Some(store) => format!("Order Details - {}:\n", store.name()),
            None => "Order Details:\n".to_string(),
        };

        for (i, item) in self.items.iter().enumerate() {
            summary.push_str(&format!(
                "{}. {} - {}\n",
                i + 1,
                item.description(),
                item.cost()
            ));
        }

        let subtotal = self.subtotal();
        summary.push_str(&format!("\nSubtotal: {}", subtotal));

        match &self.coupon {
            Some(coupon) => {
                let total = coupon.apply(subtotal, &self.items);
                summary.push_str(&format!("\nCoupon Applied: {}", coupon.describe()));
                summary.push_str(&format!("\nDiscount Amount: -{}", subtotal - total));
                summary.push_str(&format!("\nFinal Total: {}", total));
            }
            None => summary.push_str(&format!("\nTotal: {}", subtotal)),
        }

        summary
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Order numbers for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub store_name: Option<String>,
    pub item_count: usize,
    pub subtotal: Money,
    pub coupon: Option<String>,
    pub discount: Money,
    pub total: Money,
}

impl From<&Order> for OrderTotals {
    fn from(order: &Order) -> Self {
        let subtotal = order.subtotal();
        let total = order.total();
        OrderTotals {
            store_name: order.store().map(Store::name),
            item_count: order.len(),
            subtotal,
            coupon: order.coupon().map(|c| c.describe()),
            discount: subtotal - total,
            total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::Coupon;
    use crate::items::{BasePizza, Beverage, SideDish, Toppable};
    use crate::pricing::{PriceTable, CHEESE, PEPPERONI};
    use crate::store::StoreConfig;
    use crate::types::{ItemKind, Size};

    fn suburban() -> Store {
        let config = StoreConfig::new("002", "Suburban Store")
            .unwrap()
            .with_prices(PriceTable::standard())
            .unwrap();
        Store::new(config)
    }

    fn sample_order(store: &Store) -> Order {
        let mut order = Order::for_store(store.clone());
        order.add_item(BasePizza::new("margherita", Size::Small, store.prices()).top(CHEESE));
        order.add_item(SideDish::wings(6, store.prices()).unwrap());
        order
    }

    #[test]
    fn test_empty_order() {
        let order = Order::new();
        assert!(order.is_empty());
        assert_eq!(order.subtotal(), Money::zero());
        assert_eq!(order.total(), Money::zero());
        assert_eq!(order.summary(), "Empty Order");

        assert_eq!(Order::for_store(suburban()).summary(), "Order is empty");
    }

    #[test]
    fn test_subtotal_and_total_without_coupon() {
        let order = sample_order(&suburban());
        assert_eq!(order.len(), 2);
        assert_eq!(order.subtotal().cents(), 2100);
        assert_eq!(order.total().cents(), 2100);
        assert!(order.discount().is_zero());
    }

    #[test]
    fn test_coupon_replaces_previous() {
        let mut order = sample_order(&suburban());

        order.apply_coupon(Coupon::percent_off(50.0));
        assert_eq!(order.total().cents(), 1050);

        order.apply_coupon(Coupon::fixed_amount_off(Money::from_cents(500)));
        assert_eq!(order.total().cents(), 1600);
        assert_eq!(order.discount().cents(), 500);

        assert!(order.clear_coupon().is_some());
        assert_eq!(order.total().cents(), 2100);
        assert!(order.coupon().is_none());
    }

    #[test]
    fn test_totals_recomputed_after_price_change() {
        let store = suburban();
        let order = sample_order(&store);
        assert_eq!(order.subtotal().cents(), 2100);

        store
            .update(|cfg| cfg.set_item_price("wings_per_piece", Money::from_cents(200)))
            .unwrap();

        assert_eq!(order.subtotal().cents(), 2400);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut order = Order::new();
        order.add_item(Beverage::coke("small", std::sync::Arc::new(PriceTable::standard())));
        order.add_item(BasePizza::standard("margherita", Size::Large));
        let descriptions: Vec<String> = order.items().iter().map(|i| i.description()).collect();
        assert_eq!(descriptions, vec!["small coke", "large margherita pizza"]);
    }

    #[test]
    fn test_summary_without_coupon() {
        let mut order = Order::new();
        order.add_item(
            BasePizza::standard("margherita", Size::Small)
                .top(CHEESE)
                .top(PEPPERONI),
        );

        assert_eq!(
            order.summary(),
            "Order Details:\n\
             1. small margherita pizza, cheese, pepperoni - $15.00\n\
             \n\
             Subtotal: $15.00\n\
             Total: $15.00"
        );
    }

    #[test]
    fn test_store_summary_with_coupon() {
        let mut order = sample_order(&suburban());
        order.apply_coupon(Coupon::fixed_amount_off(Money::from_cents(500)));

        assert_eq!(
            order.summary(),
            "Order Details - Suburban Store:\n\
             1. small margherita pizza, cheese - $12.00\n\
             2. 6 chicken wings - $9.00\n\
             \n\
             Subtotal: $21.00\n\
             Coupon Applied: Fixed Discount: $5.00\n\
             Discount Amount: -$5.00\n\
             Final Total: $16.00"
        );
    }

    #[test]
    fn test_buy_one_get_one_through_order() {
        let mut order = Order::new();
        order.add_item(BasePizza::standard("margherita", Size::Small));
        order.add_item(BasePizza::standard("margherita", Size::Medium));
        order.apply_coupon(Coupon::buy_one_get_one_free(ItemKind::Pizza));

        assert_eq!(order.subtotal().cents(), 2500);
        assert_eq!(order.discount().cents(), 1000);
        assert_eq!(order.total().cents(), 1500);
    }

    #[test]
    fn test_coupon_total_never_exceeds_subtotal_on_bad_table() {
        let table: PriceTable =
            serde_json::from_str(r#"{"pizza_base": {"small": 1000}, "toppings": {"cheese": -2000}}"#)
                .unwrap();
        let mut order = Order::new();
        order.add_item(
            BasePizza::new("margherita", Size::Small, std::sync::Arc::new(table)).top(CHEESE),
        );
        order.apply_coupon(Coupon::fixed_amount_off(Money::from_cents(300)));

        assert_eq!(order.subtotal().cents(), 1000);
        assert_eq!(order.total().cents(), 700);
        assert!(order.total() <= order.subtotal());
    }

    #[test]
    fn test_totals_snapshot() {
        let mut order = sample_order(&suburban());
        order.apply_coupon(Coupon::cheapest_topping_free());

        let totals = order.totals();
        assert_eq!(totals.store_name.as_deref(), Some("Suburban Store"));
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal.cents(), 2100);
        assert_eq!(totals.discount.cents(), 200);
        assert_eq!(totals.total.cents(), 1900);
        assert_eq!(totals.coupon.as_deref(), Some("Free cheapest topping"));

        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["total"], 1900);
    }
}
