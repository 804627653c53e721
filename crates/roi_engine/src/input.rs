//! Calculator input and boundary sanitization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use roi_pricing::{GlobalAssumptions, PricingConfig};

/// Period the derived figures are reported for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Annual,
}

impl Period {
    /// Factor applied to per-month figures.
    pub fn multiplier(&self) -> f64 {
        match self {
            Period::Monthly => 1.0,
            Period::Annual => 12.0,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Period::Monthly => "/mo",
            Period::Annual => "/yr",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Monthly => write!(f, "monthly"),
            Period::Annual => write!(f, "annual"),
        }
    }
}

/// Optional replacements for the configured assumptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssumptionOverrides {
    pub agent_hourly_wage: Option<f64>,
    pub tickets_per_hour: Option<f64>,
    pub upsell_lift_rate: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub average_order_value: Option<f64>,
    /// Automation rate per plan slug
    pub automation_rates: HashMap<String, f64>,
}

/// Everything the user can change on the calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Support interactions per month
    pub volume: u64,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub show_upsell_revenue: bool,
    #[serde(default)]
    pub overrides: AssumptionOverrides,
}

impl CalculationInput {
    pub fn new(volume: u64) -> Self {
        Self {
            volume,
            ..Default::default()
        }
    }

    pub fn annual(mut self) -> Self {
        self.period = Period::Annual;
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn with_upsell(mut self) -> Self {
        self.show_upsell_revenue = true;
        self
    }

    pub fn with_wage(mut self, wage: f64) -> Self {
        self.overrides.agent_hourly_wage = Some(wage);
        self
    }

    pub fn with_tickets_per_hour(mut self, rate: f64) -> Self {
        self.overrides.tickets_per_hour = Some(rate);
        self
    }

    pub fn with_automation_rate(mut self, slug: impl Into<String>, rate: f64) -> Self {
        self.overrides.automation_rates.insert(slug.into(), rate);
        self
    }

    /// Clamp this input into the ranges allowed by `config`.
    ///
    /// Out-of-range values are pulled to the nearest bound; non-finite values
    /// fall back to the configured default. Overrides for unknown plans are
    /// dropped.
    pub fn resolve(&self, config: &PricingConfig) -> ResolvedInput {
        let defaults = &config.assumptions;
        let bounds = &config.bounds;
        let overrides = &self.overrides;

        let volume = bounds.volume.clamp(self.volume);
        if volume != self.volume {
            debug!("Clamped volume {} to {}", self.volume, volume);
        }

        let assumptions = GlobalAssumptions {
            agent_hourly_wage: bounds.agent_hourly_wage.clamp(finite_or(
                overrides.agent_hourly_wage,
                defaults.agent_hourly_wage,
            )),
            tickets_per_hour: bounds.tickets_per_hour.clamp(finite_or(
                overrides.tickets_per_hour,
                defaults.tickets_per_hour,
            )),
            upsell_lift_rate: finite_or(overrides.upsell_lift_rate, defaults.upsell_lift_rate)
                .max(0.0),
            conversion_rate: finite_or(overrides.conversion_rate, defaults.conversion_rate)
                .clamp(0.0, 1.0),
            average_order_value: finite_or(
                overrides.average_order_value,
                defaults.average_order_value,
            )
            .max(0.0),
        };

        let mut automation_rates = config.automation_rates();
        for (slug, rate) in &overrides.automation_rates {
            match automation_rates.get_mut(slug) {
                Some(current) => *current = finite_or(Some(*rate), *current).clamp(0.0, 1.0),
                None => debug!("Ignoring automation rate override for unknown plan '{}'", slug),
            }
        }

        ResolvedInput {
            volume,
            period: self.period,
            show_upsell_revenue: self.show_upsell_revenue,
            assumptions,
            automation_rates,
        }
    }
}

fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => fallback,
    }
}

/// Input after sanitization, ready for the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInput {
    pub volume: u64,
    pub period: Period,
    pub show_upsell_revenue: bool,
    pub assumptions: GlobalAssumptions,
    pub automation_rates: HashMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_pricing::{PricingPlan, Tier};

    fn config() -> PricingConfig {
        PricingConfig::new("ours")
            .with_plan(PricingPlan::new("ours", "Ours", 0.9).with_tier(Tier::chats(10.0, 100, 0.1)))
            .with_plan(PricingPlan::new("rival", "Rival", 0.4).with_tier(Tier::chats(10.0, 100, 0.1)))
    }

    #[test]
    fn test_defaults_pass_through() {
        let resolved = CalculationInput::new(750).resolve(&config());
        assert_eq!(resolved.volume, 750);
        assert_eq!(resolved.period, Period::Monthly);
        assert_eq!(resolved.assumptions, config().assumptions);
        assert_eq!(resolved.automation_rates["rival"], 0.4);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let input = CalculationInput::new(5_000_000)
            .with_wage(4.0)
            .with_tickets_per_hour(99.0)
            .with_automation_rate("rival", 1.7)
            .with_automation_rate("ours", -0.2);
        let resolved = input.resolve(&config());

        assert_eq!(resolved.volume, 1_000_000);
        assert_eq!(resolved.assumptions.agent_hourly_wage, 10.0);
        assert_eq!(resolved.assumptions.tickets_per_hour, 30.0);
        assert_eq!(resolved.automation_rates["rival"], 1.0);
        assert_eq!(resolved.automation_rates["ours"], 0.0);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        let mut input = CalculationInput::new(10).with_wage(f64::NAN);
        input.overrides.conversion_rate = Some(f64::INFINITY);
        input.overrides.automation_rates.insert("rival".into(), f64::NAN);
        let resolved = input.resolve(&config());

        assert_eq!(resolved.assumptions.agent_hourly_wage, 18.71);
        assert_eq!(resolved.assumptions.conversion_rate, 0.03);
        assert_eq!(resolved.automation_rates["rival"], 0.4);
    }

    #[test]
    fn test_unknown_plan_override_is_dropped() {
        let resolved = CalculationInput::new(10)
            .with_automation_rate("ghost", 0.5)
            .resolve(&config());
        assert!(!resolved.automation_rates.contains_key("ghost"));
        assert_eq!(resolved.automation_rates.len(), 2);
    }

    #[test]
    fn test_period_multiplier() {
        assert_eq!(Period::Monthly.multiplier(), 1.0);
        assert_eq!(Period::Annual.multiplier(), 12.0);
        assert_eq!(CalculationInput::new(1).annual().period, Period::Annual);
    }
}
