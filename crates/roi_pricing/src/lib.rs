//! # roi_pricing
//!
//! Pricing plan configuration for the ROI calculator.
//!
//! A pricing document lists the evaluated product and its competitors, each
//! with ordered usage tiers and an automation rate, plus the global
//! assumptions (agent wage, throughput, upsell defaults) and the ranges those
//! assumptions may be edited within.
//!
//! ## Example
//!
//! ```rust,no_run
//! use roi_pricing::ConfigLoader;
//!
//! // Load a document from disk (JSON, YAML or TOML)
//! let mut config = ConfigLoader::from_path("pricing.yaml").unwrap();
//!
//! // Or fall back to the built-in document
//! let fallback = ConfigLoader::embedded().unwrap();
//!
//! // Let ROI_* environment variables adjust the defaults
//! ConfigLoader::apply_env_overrides(&mut config);
//!
//! for plan in config.competitors() {
//!     println!("{} ({} tiers)", plan.name, plan.tiers.len());
//! }
//! # let _ = fallback;
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod validator;

pub use error::{PricingError, PricingResult};
pub use loader::{ConfigFormat, ConfigLoader, DEFAULT_PRICING};
pub use models::*;
pub use validator::{ConfigValidator, ValidationResult};
