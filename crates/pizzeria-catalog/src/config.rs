//! # Catalog Configuration
//!
//! Store price tables and coupon codes declared in `catalog.toml`.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PIZZERIA_DEFAULT_STORE=003                                         │
//! │     PIZZERIA_INCLUDE_DEFAULTS=false                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit --config path, else $PIZZERIA_CONFIG,                     │
//! │     else ~/.config/pizzeria/catalog.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     three seeded stores, default store "002", no coupons               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! include_defaults = true
//! default_store = "004"
//!
//! [[stores]]
//! store_id = "004"
//! store_name = "Harbor Store"
//! pizza_base = { small = 1100, medium = 1600, large = 2100 }
//! toppings = { cheese = 225, pepperoni = 325 }
//! items = { coke_small = 225, wings_per_piece = 160 }
//!
//! [[coupons]]
//! code = "SPEND30"
//! kind = "minimum_spend_off"
//! threshold_cents = 3000
//! amount_cents = 500
//! ```
//!
//! All prices are in cents.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use pizzeria_core::validation::validate_store_id;
use pizzeria_core::Coupon;

use crate::catalog::StoreCatalog;
use crate::error::{CatalogError, CatalogResult};
use pizzeria_core::StoreConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PIZZERIA_CONFIG";

// =============================================================================
// Catalog Settings
// =============================================================================

/// The `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Seed the three default stores before adding configured ones.
    #[serde(default = "default_true")]
    pub include_defaults: bool,

    /// Store used when the caller does not pick one.
    #[serde(default = "default_store_id")]
    pub default_store: String,
}

fn default_true() -> bool {
    true
}

fn default_store_id() -> String {
    "002".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            include_defaults: default_true(),
            default_store: default_store_id(),
        }
    }
}

// =============================================================================
// Coupon Entry
// =============================================================================

/// A coupon definition redeemable by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponEntry {
    pub code: String,
    #[serde(flatten)]
    pub coupon: Coupon,
}

// =============================================================================
// Catalog Config
// =============================================================================

/// Full catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Extra stores; a store reusing a default id replaces that default.
    #[serde(default)]
    pub stores: Vec<StoreConfig>,

    #[serde(default)]
    pub coupons: Vec<CouponEntry>,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Catalog config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the default if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> CatalogResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;
        }
        std::fs::write(path, self.to_toml_string()?)
            .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Catalog config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        validate_store_id(&self.catalog.default_store)?;

        let mut store_ids = HashSet::new();
        for store in &self.stores {
            store.validate()?;
            if !store_ids.insert(store.store_id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "store",
                    id: store.store_id.clone(),
                });
            }
        }

        let mut codes = HashSet::new();
        for entry in &self.coupons {
            if entry.code.trim().is_empty() {
                return Err(CatalogError::InvalidConfig(
                    "coupon code must not be empty".into(),
                ));
            }
            entry.coupon.validate()?;
            if !codes.insert(entry.code.to_uppercase()) {
                return Err(CatalogError::Duplicate {
                    kind: "coupon",
                    id: entry.code.clone(),
                });
            }
        }

        if !self.catalog.include_defaults && self.stores.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "include_defaults = false requires at least one [[stores]] entry".into(),
            ));
        }

        Ok(())
    }

    /// Builds the store catalog and checks the default store exists.
    pub fn build_catalog(&self) -> CatalogResult<StoreCatalog> {
        let mut catalog = if self.catalog.include_defaults {
            StoreCatalog::with_default_stores()
        } else {
            StoreCatalog::new()
        };

        for store in &self.stores {
            if catalog.add(store.clone()).is_some() {
                debug!(store_id = %store.store_id, "Configured store replaces default");
            }
        }

        catalog.require(&self.catalog.default_store)?;
        Ok(catalog)
    }

    /// Finds a coupon by code, ignoring case.
    pub fn coupon(&self, code: &str) -> CatalogResult<&Coupon> {
        self.coupons
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
            .map(|entry| &entry.coupon)
            .ok_or_else(|| CatalogError::UnknownCoupon(code.to_string()))
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("PIZZERIA_DEFAULT_STORE") {
            debug!(store_id = %id, "Overriding default store from environment");
            self.catalog.default_store = id;
        }

        if let Some(flag) = lookup("PIZZERIA_INCLUDE_DEFAULTS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.catalog.include_defaults = true,
                "0" | "false" | "no" => self.catalog.include_defaults = false,
                _ => warn!(value = %flag, "Unknown PIZZERIA_INCLUDE_DEFAULTS value"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("com", "pizzeria", "pizzeria")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::{ItemKind, Money, Size};

    const SAMPLE: &str = r#"
[catalog]
default_store = "004"

[[stores]]
store_id = "004"
store_name = "Harbor Store"
pizza_base = { small = 1100, medium = 1600, large = 2100 }
toppings = { cheese = 225, pepperoni = 325 }
items = { coke_small = 225, wings_per_piece = 160 }

[[coupons]]
code = "SPEND30"
kind = "minimum_spend_off"
threshold_cents = 3000
amount_cents = 500

[[coupons]]
code = "bogo"
kind = "buy_one_get_one_free"
target = "pizza"

[[coupons]]
code = "TWENTY"
kind = "percent_off"
percent = 20
"#;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert!(config.catalog.include_defaults);
        assert_eq!(config.catalog.default_store, "002");
        assert!(config.validate().is_ok());

        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_parse_sample() {
        let config = CatalogConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.stores.len(), 1);

        let harbor = &config.stores[0];
        assert_eq!(harbor.store_name, "Harbor Store");
        assert_eq!(harbor.pizza_base_price(Size::Medium), Money::from_cents(1600));
        assert_eq!(harbor.topping_price("cheese"), Money::from_cents(225));
        assert_eq!(harbor.item_price("wings_per_piece", None), Money::from_cents(160));

        assert_eq!(
            config.coupon("spend30").unwrap(),
            &Coupon::minimum_spend_off(Money::from_cents(3000), Money::from_cents(500))
        );
        assert_eq!(
            config.coupon("BOGO").unwrap(),
            &Coupon::buy_one_get_one_free(ItemKind::Pizza)
        );
        assert_eq!(config.coupon("twenty").unwrap(), &Coupon::percent_off(20.0));
        assert!(matches!(
            config.coupon("NOPE"),
            Err(CatalogError::UnknownCoupon(_))
        ));
    }

    #[test]
    fn test_build_catalog_with_configured_store() {
        let config = CatalogConfig::from_toml_str(SAMPLE).unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.ids(), vec!["001", "002", "003", "004"]);
        assert_eq!(catalog.require("004").unwrap().name(), "Harbor Store");
    }

    #[test]
    fn test_default_store_must_exist() {
        let mut config = CatalogConfig::default();
        config.catalog.default_store = "404".to_string();
        assert!(matches!(
            config.build_catalog(),
            Err(CatalogError::UnknownStore(_))
        ));
    }

    #[test]
    fn test_rejects_negative_prices() {
        let config = CatalogConfig::from_toml_str(
            r#"
[[stores]]
store_id = "005"
store_name = "Broken Store"
toppings = { cheese = -100 }
"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(CatalogError::Core(_))));
    }

    #[test]
    fn test_rejects_absurd_prices() {
        let config = CatalogConfig::from_toml_str(
            r#"
[[stores]]
store_id = "006"
store_name = "Typo Store"
items = { wings_per_piece = 9223372036854775807 }
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(CatalogError::Core(pizzeria_core::CoreError::Validation(
                pizzeria_core::ValidationError::PriceTooHigh { .. }
            )))
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let config = CatalogConfig::from_toml_str(
            r#"
[[coupons]]
code = "FREE"
kind = "cheapest_topping_free"

[[coupons]]
code = "free"
kind = "free_n_cheapest_toppings"
count = 2
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(CatalogError::Duplicate { kind: "coupon", .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_coupon() {
        let config = CatalogConfig::from_toml_str(
            r#"
[[coupons]]
code = "TOOMUCH"
kind = "percent_off"
percent = 150
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_stores_at_all() {
        let mut config = CatalogConfig::default();
        config.catalog.include_defaults = false;
        assert!(matches!(
            config.validate(),
            Err(CatalogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CatalogConfig::default();
        config.apply_overrides_from(|key| match key {
            "PIZZERIA_DEFAULT_STORE" => Some("003".to_string()),
            "PIZZERIA_INCLUDE_DEFAULTS" => Some("FALSE".to_string()),
            _ => None,
        });
        assert_eq!(config.catalog.default_store, "003");
        assert!(!config.catalog.include_defaults);

        config.apply_overrides_from(|key| match key {
            "PIZZERIA_INCLUDE_DEFAULTS" => Some("maybe".to_string()),
            _ => None,
        });
        assert!(!config.catalog.include_defaults);
    }

    #[test]
    fn test_toml_serialization() {
        let config = CatalogConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("default_store = \"002\""));

        let parsed = CatalogConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
