//! Pricing config loading.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{PricingError, PricingResult};
use crate::models::{Currency, PricingConfig};
use crate::validator::ConfigValidator;

/// Default pricing document compiled into the crate.
pub const DEFAULT_PRICING: &str = include_str!("../data/default_pricing.json");

/// Environment variable names read by [`ConfigLoader::apply_env_overrides`].
pub const ENV_AGENT_HOURLY_WAGE: &str = "ROI_AGENT_HOURLY_WAGE";
pub const ENV_TICKETS_PER_HOUR: &str = "ROI_TICKETS_PER_HOUR";
pub const ENV_UPSELL_LIFT_RATE: &str = "ROI_UPSELL_LIFT_RATE";
pub const ENV_CURRENCY: &str = "ROI_CURRENCY";

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Loader for pricing configuration documents.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a config file, picking the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> PricingResult<PricingConfig> {
        let path = path.as_ref();
        let config = Self::read_unchecked(path)?;
        Self::ensure_valid(&config)?;
        info!(
            "Loaded {} plans from {:?} (evaluated: {})",
            config.plans.len(),
            path,
            config.evaluated
        );
        Ok(config)
    }

    /// Read and parse a config file without validating it.
    pub fn read_unchecked(path: impl AsRef<Path>) -> PricingResult<PricingConfig> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PricingError::NotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| PricingError::UnsupportedFormat(path.to_path_buf()))?;

        debug!("Reading pricing config from {:?} as {:?}", path, format);
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse and validate a config document.
    pub fn from_str(content: &str, format: ConfigFormat) -> PricingResult<PricingConfig> {
        let config = Self::parse(content, format)?;
        Self::ensure_valid(&config)?;
        Ok(config)
    }

    /// Parse a config document without validating it.
    pub fn parse(content: &str, format: ConfigFormat) -> PricingResult<PricingConfig> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// The built-in pricing document.
    pub fn embedded() -> PricingResult<PricingConfig> {
        debug!("Using embedded pricing config");
        Self::from_str(DEFAULT_PRICING, ConfigFormat::Json)
    }

    /// Fail with every validation error joined, logging warnings.
    pub fn ensure_valid(config: &PricingConfig) -> PricingResult<()> {
        let result = ConfigValidator::validate(config);
        for warning in &result.warnings {
            warn!("{}", warning);
        }
        if result.valid {
            Ok(())
        } else {
            Err(PricingError::ValidationFailed(result.errors.join("; ")))
        }
    }

    /// Apply `ROI_*` environment overrides to the default assumptions.
    pub fn apply_env_overrides(config: &mut PricingConfig) {
        Self::apply_overrides_from(config, |key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Values that do not parse are skipped with a warning.
    pub fn apply_overrides_from<F>(config: &mut PricingConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| -> Option<f64> {
            let raw = lookup(key)?;
            match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Some(value),
                _ => {
                    warn!("Ignoring {}={:?}: not a number", key, raw);
                    None
                }
            }
        };

        if let Some(wage) = parse(ENV_AGENT_HOURLY_WAGE) {
            config.assumptions.agent_hourly_wage = config.bounds.agent_hourly_wage.clamp(wage);
        }
        if let Some(rate) = parse(ENV_TICKETS_PER_HOUR) {
            config.assumptions.tickets_per_hour = config.bounds.tickets_per_hour.clamp(rate);
        }
        if let Some(lift) = parse(ENV_UPSELL_LIFT_RATE) {
            config.assumptions.upsell_lift_rate = lift.max(0.0);
        }
        if let Some(code) = lookup(ENV_CURRENCY) {
            match Currency::from_code(&code) {
                Some(currency) => config.currency = currency,
                None => warn!("Ignoring {}={:?}: unknown currency", ENV_CURRENCY, code),
            }
        }
    }
}
