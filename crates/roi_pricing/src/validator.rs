//! Pricing config validation.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{AssumptionBounds, GlobalAssumptions, PricingConfig, PricingPlan};

/// Outcome of checking a pricing document.
///
/// Errors make the document unusable; warnings flag pricing that loads but
/// probably was not intended (flat-rate tiers, nothing to compare against).
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

fn slug_pattern() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid"))
}

/// Validator for pricing configuration.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate an entire pricing config.
    pub fn validate(config: &PricingConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        if config.plans.is_empty() {
            result.add_error("Config must define at least one plan");
        }

        let mut seen = HashSet::new();
        for plan in &config.plans {
            if !seen.insert(plan.slug.as_str()) {
                result.add_error(format!("Duplicate plan slug '{}'", plan.slug));
            }
            result.merge(Self::validate_plan(plan));
        }

        if config.evaluated_plan().is_none() {
            result.add_error(format!(
                "Evaluated plan '{}' is not defined in plans",
                config.evaluated
            ));
        } else if config.competitors().next().is_none() {
            result.add_warning("Only the evaluated plan is configured; there is nothing to compare against");
        }

        result.merge(Self::validate_bounds(&config.bounds));
        result.merge(Self::validate_assumptions(&config.assumptions, &config.bounds));

        result
    }

    /// Validate a single plan and its tiers.
    pub fn validate_plan(plan: &PricingPlan) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !slug_pattern().is_match(&plan.slug) {
            result.add_error(format!(
                "Plan slug '{}' must be lowercase letters, digits and single dashes",
                plan.slug
            ));
        }

        if plan.name.trim().is_empty() {
            result.add_error(format!("Plan '{}' has empty name", plan.slug));
        }

        if !(0.0..=1.0).contains(&plan.automation_rate) {
            result.add_error(format!(
                "Plan '{}' automation rate {} is outside [0, 1]",
                plan.slug, plan.automation_rate
            ));
        }

        if plan.tiers.is_empty() {
            result.add_error(format!("Plan '{}' has no pricing tiers", plan.slug));
            return result;
        }

        for (index, tier) in plan.tiers.iter().enumerate() {
            if !(tier.base.is_finite() && tier.base >= 0.0) {
                result.add_error(format!(
                    "Plan '{}' tier {} has invalid base price {}",
                    plan.slug, index, tier.base
                ));
            }
            if !(tier.overage.is_finite() && tier.overage >= 0.0) {
                result.add_error(format!(
                    "Plan '{}' tier {} has invalid overage rate {}",
                    plan.slug, index, tier.overage
                ));
            }
        }

        if let Some((_, largest)) = plan.largest_tier() {
            if largest.overage == 0.0 {
                result.add_warning(format!(
                    "Plan '{}' largest tier has no overage rate; usage beyond {} is priced flat",
                    plan.slug, largest.included
                ));
            }
        }

        let first_unit = plan.tiers[0].unit;
        if plan.tiers.iter().any(|t| t.unit != first_unit) {
            result.add_warning(format!(
                "Plan '{}' mixes chat and ticket thresholds",
                plan.slug
            ));
        }

        result
    }

    /// Validate editable ranges.
    pub fn validate_bounds(bounds: &AssumptionBounds) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !bounds.agent_hourly_wage.is_ordered() {
            result.add_error("Agent hourly wage bounds have min greater than max");
        }
        if !(bounds.agent_hourly_wage.min > 0.0) {
            result.add_error("Agent hourly wage lower bound must be positive");
        }
        if !bounds.tickets_per_hour.is_ordered() {
            result.add_error("Tickets per hour bounds have min greater than max");
        }
        if !(bounds.tickets_per_hour.min > 0.0) {
            result.add_error("Tickets per hour lower bound must be positive");
        }
        if !bounds.volume.is_ordered() {
            result.add_error("Volume bounds have min greater than max");
        }

        result
    }

    /// Validate default assumptions against their ranges.
    pub fn validate_assumptions(
        assumptions: &GlobalAssumptions,
        bounds: &AssumptionBounds,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !(assumptions.agent_hourly_wage > 0.0) {
            result.add_error("Agent hourly wage must be positive");
        } else if !bounds.agent_hourly_wage.contains(assumptions.agent_hourly_wage) {
            result.add_error(format!(
                "Agent hourly wage {} is outside [{}, {}]",
                assumptions.agent_hourly_wage, bounds.agent_hourly_wage.min, bounds.agent_hourly_wage.max
            ));
        }

        if !(assumptions.tickets_per_hour > 0.0) {
            result.add_error("Tickets per hour must be positive");
        } else if !bounds.tickets_per_hour.contains(assumptions.tickets_per_hour) {
            result.add_error(format!(
                "Tickets per hour {} is outside [{}, {}]",
                assumptions.tickets_per_hour, bounds.tickets_per_hour.min, bounds.tickets_per_hour.max
            ));
        }

        if !(assumptions.upsell_lift_rate >= 0.0) {
            result.add_error("Upsell lift rate cannot be negative");
        }
        if !(0.0..=1.0).contains(&assumptions.conversion_rate) {
            result.add_error(format!(
                "Conversion rate {} is outside [0, 1]",
                assumptions.conversion_rate
            ));
        }
        if !(assumptions.average_order_value >= 0.0) {
            result.add_error("Average order value cannot be negative");
        }

        result
    }
}
