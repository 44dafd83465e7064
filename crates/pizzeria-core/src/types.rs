//! # Domain Types
//!
//! Small value types shared by items, coupons and store configuration.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │      Size       │   │    ItemKind     │   │  DiscountRate   │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  Small          │   │  Pizza          │   │  bps (u32)      │
//! │  Medium         │   │  Beverage       │   │  2000 = 20%     │
//! │  Large          │   │  Side           │   └─────────────────┘
//! └─────────────────┘   └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Pizza Size
// =============================================================================

/// Pizza size, the key into a store's base price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" => Ok(Size::Small),
            "medium" | "m" => Ok(Size::Medium),
            "large" | "l" => Ok(Size::Large),
            _ => Err(ValidationError::NotAllowed {
                field: "size".to_string(),
                allowed: Size::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Item Kind
// =============================================================================

/// Tag carried by every priced item.
///
/// Coupons that target a product line (buy one get one) match on this tag.
/// A topping reports the kind of the item it wraps, so a topped pizza is
/// still a `Pizza`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Pizza,
    Beverage,
    Side,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Pizza => "Pizza",
            ItemKind::Beverage => "Beverage",
            ItemKind::Side => "Side",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Topping Line
// =============================================================================

/// One topping on a pizza together with the price it currently resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingLine {
    pub name: String,
    pub price: Money,
}

impl ToppingLine {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        ToppingLine {
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount in basis points (1 bps = 0.01%).
///
/// Negative percentages saturate to zero. Rates above 100% are kept as-is;
/// the coupon clamps the resulting total at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(u32);

impl DiscountRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a 0-100 percentage, e.g. `12.5` for 12.5%.
    ///
    /// Precision is one basis point: the percentage is rounded to two
    /// decimals, so `33.333` becomes 33.33%.
    pub fn from_percentage(pct: f64) -> Self {
        // `as` saturates: negatives and NaN become 0
        DiscountRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
