//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌──────────────────────┐  ┌──────────────────────┐  ┌────────────────────┐
//! │   Configuration      │  │      Lookup          │  │      Domain        │
//! │                      │  │                      │  │                    │
//! │   ConfigLoadFailed   │  │   UnknownStore       │  │   Core             │
//! │   ConfigSaveFailed   │  │   UnknownCoupon      │  │   (CoreError,      │
//! │   InvalidConfig      │  │                      │  │    ValidationError)│
//! │   Duplicate          │  │                      │  │                    │
//! └──────────────────────┘  └──────────────────────┘  └────────────────────┘
//! ```

use pizzeria_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures while loading configuration or resolving stores and coupons.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config file could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Config parsed but is not usable.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// The same store id or coupon code is defined twice.
    #[error("Duplicate {kind} '{id}' in configuration")]
    Duplicate { kind: &'static str, id: String },

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    #[error("Unknown store: {0}")]
    UnknownStore(String),

    #[error("Unknown coupon code: {0}")]
    UnknownCoupon(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Core(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::ConfigSaveFailed(err.to_string())
    }
}

impl CatalogError {
    /// Returns true if fixing the config file would resolve this error.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::ConfigLoadFailed(_)
                | CatalogError::ConfigSaveFailed(_)
                | CatalogError::InvalidConfig(_)
                | CatalogError::Duplicate { .. }
                | CatalogError::Core(_)
        )
    }
}
