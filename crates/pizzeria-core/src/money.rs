//! # Money Module
//!
//! Provides the `Money` type used for every price, subtotal and discount.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A pizza order adds many small prices together:                         │
//! │                                                                         │
//! │    10.0 + 2.0 + 1.5 + 1.5 + ... drifts when stored as f64              │
//! │                                                                         │
//! │  Storing cents keeps every topping, subtotal and coupon exact:         │
//! │    1000 + 200 + 150 = 1350 cents, always                               │
//! │                                                                         │
//! │  Only percentage coupons round, and they round once, explicitly.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::money::Money;
//!
//! let small_pizza = Money::from_cents(1000);   // $10.00
//! let cheese = Money::from_major_minor(2, 0);  // $2.00
//! assert_eq!((small_pizza + cheese).to_string(), "$12.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that intermediate results (`subtotal - coupon amount`) can dip
/// below zero before a coupon clamps them.
///
/// ```text
/// StoreConfig price ──► PricedItem::cost ──► Order::subtotal
///                                                  │
///                                                  ▼
///                                     DiscountStrategy::apply ──► total
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let wings_per_piece = Money::from_cents(150);
    /// assert_eq!(wings_per_piece.cents(), 150);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a per-piece price by a piece count, saturating at the
    /// `i64` bounds.
    ///
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let per_piece = Money::from_cents(150);
    /// assert_eq!(per_piece.multiply_quantity(6).cents(), 900);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns the amount left after taking `rate` off.
    ///
    /// The discount portion is rounded half-up to the nearest cent, so
    /// 20% off $50.00 is exactly $40.00 and 15% off $0.10 is $0.08.
    ///
    /// ```rust
    /// use pizzeria_core::money::Money;
    /// use pizzeria_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(5000);
    /// let after = subtotal.apply_percentage_discount(DiscountRate::from_percentage(20.0));
    /// assert_eq!(after.cents(), 4000);
    /// ```
    pub fn apply_percentage_discount(&self, rate: DiscountRate) -> Money {
        // i128 keeps large subtotals times 10_000 bps from overflowing
        let discount = (self.0 as i128 * rate.bps() as i128 + 5000).div_euclid(10000);
        let left = (self.0 as i128 - discount).clamp(i64::MIN as i128, i64::MAX as i128);
        Money::from_cents(left as i64)
    }

    /// Restricts a coupon result to `[0, ceiling]`.
    ///
    /// A negative ceiling collapses to zero.
    ///
    /// ```rust
    /// use pizzeria_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(300);
    /// assert_eq!(Money::from_cents(-200).clamp_to(subtotal), Money::zero());
    /// assert_eq!(Money::from_cents(450).clamp_to(subtotal), subtotal);
    /// ```
    pub fn clamp_to(self, ceiling: Money) -> Money {
        let ceiling = ceiling.max(Money::zero());
        self.max(Money::zero()).min(ceiling)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates so pricing stays total even over unvalidated tables.

/// Renders as `$12.50`, or `-$2.00` for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Sums left to right, so an order's subtotal follows insertion order.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
