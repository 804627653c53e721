//! CLI command definitions.
//!
//! Each subcommand loads the pricing document once, runs the engine and
//! renders the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

use roi_engine::{CalculationInput, Period};
use roi_pricing::{ConfigLoader, Currency, PricingConfig};

pub mod compare;
pub mod plans;
pub mod sweep;
pub mod validate;

/// roi - support cost and ROI comparison
#[derive(Parser)]
#[command(name = "roi")]
#[command(version, about = "Compare support costs and ROI across pricing plans")]
#[command(long_about = r#"
roi compares the monthly or annual cost of running customer support on the
evaluated product against competing plans: software fees from each plan's
pricing tiers plus the cost of the agent hours automation does not cover.

COMMANDS:
  compare   → Cost, savings and ROI for one volume
  sweep     → Total cost per plan across a range of volumes
  plans     → List configured plans and tiers
  validate  → Check a pricing document

CONFIGURATION:
  --config / ROI_CONFIG selects a JSON, YAML or TOML pricing document;
  without it the built-in document is used. ROI_AGENT_HOURLY_WAGE,
  ROI_TICKETS_PER_HOUR, ROI_UPSELL_LIFT_RATE and ROI_CURRENCY adjust its
  defaults.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Pricing document (JSON, YAML or TOML)
    #[arg(short, long, global = true, env = "ROI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare costs for a single volume
    Compare(compare::CompareArgs),

    /// Compare total costs across a range of volumes
    Sweep(sweep::SweepArgs),

    /// List configured plans and tiers
    Plans(plans::PlansArgs),

    /// Validate the pricing document
    Validate(validate::ValidateArgs),
}

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Assumption overrides shared by `compare` and `sweep`.
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Report annual instead of monthly figures
    #[arg(long)]
    pub annual: bool,

    /// Agent hourly wage
    #[arg(long)]
    pub wage: Option<f64>,

    /// Interactions an agent resolves per hour
    #[arg(long)]
    pub tickets_per_hour: Option<f64>,

    /// Upsell lift rate
    #[arg(long)]
    pub lift: Option<f64>,

    /// Share of interactions converting to a purchase
    #[arg(long)]
    pub conversion_rate: Option<f64>,

    /// Average order value
    #[arg(long)]
    pub order_value: Option<f64>,

    /// Include upsell revenue for the evaluated product
    #[arg(long)]
    pub upsell: bool,

    /// Automation rate override, repeatable (e.g. --rate helpwave=0.6)
    #[arg(long = "rate", value_name = "SLUG=RATE", value_parser = parse_rate)]
    pub rates: Vec<(String, f64)>,
}

impl OverrideArgs {
    /// Build the calculator input for a volume.
    pub fn to_input(&self, volume: u64) -> CalculationInput {
        let mut input = CalculationInput::new(volume).with_period(if self.annual {
            Period::Annual
        } else {
            Period::Monthly
        });
        input.show_upsell_revenue = self.upsell;
        input.overrides.agent_hourly_wage = self.wage;
        input.overrides.tickets_per_hour = self.tickets_per_hour;
        input.overrides.upsell_lift_rate = self.lift;
        input.overrides.conversion_rate = self.conversion_rate;
        input.overrides.average_order_value = self.order_value;
        for (slug, rate) in &self.rates {
            input.overrides.automation_rates.insert(slug.clone(), *rate);
        }
        input
    }
}

/// Parse a `slug=rate` pair.
pub fn parse_rate(raw: &str) -> Result<(String, f64), String> {
    let (slug, rate) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SLUG=RATE, got '{}'", raw))?;
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(format!("missing plan slug in '{}'", raw));
    }
    let rate = rate
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid rate '{}' for plan '{}'", rate.trim(), slug))?;
    Ok((slug.to_string(), rate))
}

/// Load the pricing document, or the built-in one, and apply env overrides.
pub fn load_config(path: Option<&Path>) -> Result<PricingConfig> {
    let mut config = match path {
        Some(path) => ConfigLoader::from_path(path)
            .with_context(|| format!("Failed to load pricing config {}", path.display()))?,
        None => ConfigLoader::embedded().context("Built-in pricing config is invalid")?,
    };
    ConfigLoader::apply_env_overrides(&mut config);
    debug!("Using {} plans, evaluated plan '{}'", config.plans.len(), config.evaluated);
    Ok(config)
}

/// Machine-readable output envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T: Serialize> {
    pub generated_at: DateTime<Utc>,
    pub currency: Currency,
    pub data: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(currency: Currency, data: T) -> Self {
        Self {
            generated_at: Utc::now(),
            currency,
            data,
        }
    }
}

/// Print `data` as JSON or YAML, or fall back to the table renderer.
pub fn emit<T, F>(format: OutputFormat, currency: Currency, data: &T, table: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Table => print!("{}", table()),
        OutputFormat::Json => {
            let report = Report::new(currency, data);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            let report = Report::new(currency, data);
            print!("{}", serde_yaml::to_string(&report)?);
        }
    }
    Ok(())
}
