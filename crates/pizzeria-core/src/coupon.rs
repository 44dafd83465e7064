//! # Coupons
//!
//! Interchangeable discount strategies. An order holds at most one, and
//! swapping it never touches cart logic.
//!
//! ## Strategies
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ FixedAmountOff           │ subtotal - amount                            │
//! │ PercentOff               │ subtotal × (1 - percent/100)                 │
//! │ MinimumSpendOff          │ subtotal - amount, once subtotal ≥ threshold │
//! │ BuyOneGetOneFree         │ cheapest item of a kind free (needs ≥ 2)     │
//! │ CheapestToppingFree      │ cheapest topping in the cart free            │
//! │ FreeNCheapestToppings    │ n cheapest toppings free (needs ≥ n)         │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Every result is clamped to `[0, subtotal]`. Item-aware strategies return
//! the subtotal unchanged when the cart has nothing they can discount.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::items::BoxedItem;
use crate::money::Money;
use crate::types::{DiscountRate, ItemKind, ToppingLine};
use crate::validation::validate_discount_rate;

// =============================================================================
// DiscountStrategy Trait
// =============================================================================

/// A pricing policy turning a subtotal and cart into a final total.
///
/// Implementations must not fail and must return a value in
/// `[0, subtotal]`.
pub trait DiscountStrategy: fmt::Debug + Send + Sync {
    fn apply(&self, subtotal: Money, items: &[BoxedItem]) -> Money;

    /// Short text shown on the order summary.
    fn describe(&self) -> String;
}

// =============================================================================
// Coupon
// =============================================================================

/// The chain's built-in coupons.
///
/// Serialized with a `kind` tag so coupons can be declared in config:
///
/// ```toml
/// kind = "minimum_spend_off"
/// threshold_cents = 3000
/// amount_cents = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Coupon {
    FixedAmountOff {
        #[serde(rename = "amount_cents")]
        amount: Money,
    },
    PercentOff {
        #[serde(with = "percent_field")]
        percent: DiscountRate,
    },
    MinimumSpendOff {
        #[serde(rename = "threshold_cents")]
        threshold: Money,
        #[serde(rename = "amount_cents")]
        amount: Money,
    },
    BuyOneGetOneFree {
        target: ItemKind,
    },
    CheapestToppingFree,
    FreeNCheapestToppings {
        count: usize,
    },
}

impl Coupon {
    pub fn fixed_amount_off(amount: Money) -> Self {
        Coupon::FixedAmountOff { amount }
    }

    /// `percent` is on a 0-100 scale.
    pub fn percent_off(percent: f64) -> Self {
        Coupon::PercentOff {
            percent: DiscountRate::from_percentage(percent),
        }
    }

    pub fn minimum_spend_off(threshold: Money, amount: Money) -> Self {
        Coupon::MinimumSpendOff { threshold, amount }
    }

    pub fn buy_one_get_one_free(target: ItemKind) -> Self {
        Coupon::BuyOneGetOneFree { target }
    }

    pub fn cheapest_topping_free() -> Self {
        Coupon::CheapestToppingFree
    }

    pub fn free_cheapest_toppings(count: usize) -> Self {
        Coupon::FreeNCheapestToppings { count }
    }

    /// Machine name of the variant, matching the serde `kind` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Coupon::FixedAmountOff { .. } => "fixed_amount_off",
            Coupon::PercentOff { .. } => "percent_off",
            Coupon::MinimumSpendOff { .. } => "minimum_spend_off",
            Coupon::BuyOneGetOneFree { .. } => "buy_one_get_one_free",
            Coupon::CheapestToppingFree => "cheapest_topping_free",
            Coupon::FreeNCheapestToppings { .. } => "free_n_cheapest_toppings",
        }
    }

    /// Rejects definitions that could only come from a typo.
    ///
    /// Applying an unvalidated coupon is still safe: `Money` arithmetic
    /// saturates and the result is clamped.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidCoupon {
            coupon: self.kind_name().to_string(),
            reason: reason.to_string(),
        };

        match self {
            Coupon::FixedAmountOff { amount } if amount.is_negative() => {
                Err(invalid("amount must not be negative"))
            }
            Coupon::PercentOff { percent } => {
                validate_discount_rate(*percent)?;
                Ok(())
            }
            Coupon::MinimumSpendOff { threshold, amount } => {
                if threshold.is_negative() {
                    Err(invalid("threshold must not be negative"))
                } else if amount.is_negative() {
                    Err(invalid("amount must not be negative"))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Amount the coupon takes off before clamping.
    fn discount(&self, subtotal: Money, items: &[BoxedItem]) -> Money {
        match self {
            Coupon::FixedAmountOff { amount } => *amount,
            Coupon::PercentOff { percent } => {
                subtotal - subtotal.apply_percentage_discount(*percent)
            }
            Coupon::MinimumSpendOff { threshold, amount } => {
                if subtotal >= *threshold {
                    *amount
                } else {
                    Money::zero()
                }
            }
            Coupon::BuyOneGetOneFree { target } => {
                let costs: Vec<Money> = items
                    .iter()
                    .filter(|item| item.kind() == *target)
                    .map(|item| item.cost())
                    .collect();
                if costs.len() < 2 {
                    return Money::zero();
                }
                costs.into_iter().min().unwrap_or_default()
            }
            Coupon::CheapestToppingFree => cart_toppings(items)
                .iter()
                .map(|topping| topping.price)
                .min()
                .unwrap_or_default(),
            Coupon::FreeNCheapestToppings { count } => {
                let mut toppings = cart_toppings(items);
                if toppings.len() < *count {
                    return Money::zero();
                }
                // stable: equal prices keep cart order
                toppings.sort_by_key(|topping| topping.price);
                toppings.iter().take(*count).map(|topping| topping.price).sum()
            }
        }
    }
}

impl DiscountStrategy for Coupon {
    fn apply(&self, subtotal: Money, items: &[BoxedItem]) -> Money {
        let total = (subtotal - self.discount(subtotal, items)).clamp_to(subtotal);
        debug!(
            coupon = self.kind_name(),
            %subtotal,
            discount = %(subtotal - total),
            "Coupon applied"
        );
        total
    }

    fn describe(&self) -> String {
        match self {
            Coupon::FixedAmountOff { amount } => format!("Fixed Discount: {}", amount),
            Coupon::PercentOff { percent } => format!("Percentage Discount: {}", percent),
            Coupon::MinimumSpendOff { threshold, amount } => {
                format!("Spend at least {}, get {} off", threshold, amount)
            }
            Coupon::BuyOneGetOneFree { target } => format!("{} Buy One Get One", target),
            Coupon::CheapestToppingFree => "Free cheapest topping".to_string(),
            Coupon::FreeNCheapestToppings { count } => {
                format!("Free {} cheapest toppings", count)
            }
        }
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Every topping in the cart, item by item, innermost first.
fn cart_toppings(items: &[BoxedItem]) -> Vec<ToppingLine> {
    items.iter().flat_map(|item| item.toppings()).collect()
}

/// Percentages are written as plain numbers (`percent = 20`) in config.
mod percent_field {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::DiscountRate;

    pub fn serialize<S: Serializer>(rate: &DiscountRate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(rate.percentage())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DiscountRate, D::Error> {
        f64::deserialize(d).map(DiscountRate::from_percentage)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
