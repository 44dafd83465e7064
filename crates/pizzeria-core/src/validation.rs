//! # Validation Module
//!
//! Input rules applied while stores and coupons are being set up.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog.toml / env ──► CatalogConfig::validate ──┐                     │
//! │                                                   ▼                     │
//! │  StoreConfig::new / set_*_price ──► THIS MODULE ──► typed errors        │
//! │                                                                         │
//! │  Pricing (cost, apply, total) never validates: it is total over         │
//! │  whatever the store tables contain.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::validation::{validate_price_key, validate_store_id};
//!
//! assert!(validate_store_id("001").is_ok());
//! assert!(validate_price_key("wings_per_piece").is_ok());
//! assert!(validate_price_key("").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::DiscountRate;
use crate::{MAX_PRICE_CENTS, MAX_SIDE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a store identifier such as `"001"`.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_store_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "store_id".to_string(),
        });
    }

    if id.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "store_id".to_string(),
            max: 20,
        });
    }

    if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: "store_id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a store display name, e.g. `"Downtown Store"`.
pub fn validate_store_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "store_name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "store_name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a price table key (topping name or `item_qualifier` key).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, spaces, hyphens and underscores only
pub fn validate_price_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "price key".to_string(),
        });
    }

    if key.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "price key".to_string(),
            max: 50,
        });
    }

    if !key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "price key".to_string(),
            reason: format!("'{}' contains unsupported characters", key),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price table entry.
///
/// Zero is allowed (free topping); negative prices are not, because every
/// item must cost at least nothing. Entries above `MAX_PRICE_CENTS` are
/// rejected as typos.
///
/// ```rust
/// use pizzeria_core::money::Money;
/// use pizzeria_core::validation::validate_price;
///
/// assert!(validate_price("cheese", Money::from_cents(250)).is_ok());
/// assert!(validate_price("cheese", Money::zero()).is_ok());
/// assert!(validate_price("cheese", Money::from_cents(-1)).is_err());
/// assert!(validate_price("cheese", Money::from_cents(i64::MAX)).is_err());
/// ```
pub fn validate_price(key: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::NegativePrice {
            key: key.to_string(),
            cents: price.cents(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::PriceTooHigh {
            key: key.to_string(),
            cents: price.cents(),
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a piece count for side dishes such as wings.
///
/// ## Rules
/// - At least 1
/// - At most `MAX_SIDE_QUANTITY`
pub fn validate_piece_count(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_SIDE_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SIDE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a percentage coupon rate (0% to 100%).
pub fn validate_discount_rate(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
