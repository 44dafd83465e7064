//! # Error Types
//!
//! Domain-specific error types for pizzeria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pizzeria-core errors (this file)                                      │
//! │  ├── CoreError        - Coupon and store setup failures                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pizzeria-catalog errors (separate crate)                              │
//! │  └── CatalogError     - Config file and catalog lookup failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → demo binary        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails. Unknown price keys resolve to zero, empty
//! carts leave totals unchanged and coupons clamp at zero. Errors only
//! surface while a store or coupon is being set up.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Setup-time failures in the pricing domain.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A coupon definition can never produce a sensible discount.
    ///
    /// ## When This Occurs
    /// - Fixed or minimum-spend amount is negative
    /// - Percentage is above 100%
    #[error("Invalid coupon {coupon}: {reason}")]
    InvalidCoupon { coupon: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A price would make an item cost less than nothing.
    #[error("price for {key} must not be negative (got {cents} cents)")]
    NegativePrice { key: String, cents: i64 },

    #[error("price for {key} exceeds {max} cents (got {cents} cents)")]
    PriceTooHigh { key: String, cents: i64, max: i64 },

    /// Invalid format (e.g. a price key with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
