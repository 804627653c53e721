//! Cost comparison engine.
//!
//! Every figure is derived from scratch on each call: the engine holds the
//! pricing configuration and nothing else.

use std::collections::HashMap;

use tracing::{debug, warn};

use roi_pricing::{GlobalAssumptions, PricingConfig, PricingPlan};

use crate::input::{CalculationInput, ResolvedInput};
use crate::result::{CalculationResult, Comparison, PlanCost};
use crate::tier::select_tier;

/// Monthly costs of every plan at the given volume.
///
/// A plan missing from `automation_rates` uses its configured rate. At zero
/// volume no tier is selected and every cost is zero. A plan without tiers
/// has no software cost.
pub fn compute_costs(
    volume: u64,
    assumptions: &GlobalAssumptions,
    plans: &[PricingPlan],
    automation_rates: &HashMap<String, f64>,
) -> Vec<PlanCost> {
    plans
        .iter()
        .map(|plan| {
            let automation_rate = automation_rates
                .get(&plan.slug)
                .copied()
                .unwrap_or(plan.automation_rate);
            plan_cost(volume, assumptions, plan, automation_rate)
        })
        .collect()
}

fn plan_cost(
    volume: u64,
    assumptions: &GlobalAssumptions,
    plan: &PricingPlan,
    automation_rate: f64,
) -> PlanCost {
    let human_units = volume as f64 * (1.0 - automation_rate);
    let agent_hours = if assumptions.tickets_per_hour > 0.0 {
        human_units / assumptions.tickets_per_hour
    } else {
        0.0
    };
    let agent_cost = agent_hours * assumptions.agent_hourly_wage;

    let tier = if volume == 0 {
        None
    } else {
        let selection = select_tier(&plan.tiers, volume);
        if selection.is_none() {
            warn!("Plan '{}' has no pricing tiers; software cost is zero", plan.slug);
        }
        selection
    };
    let software_cost = tier.as_ref().map_or(0.0, |t| t.price);

    PlanCost {
        slug: plan.slug.clone(),
        name: plan.name.clone(),
        automation_rate,
        human_units,
        agent_hours,
        agent_cost,
        software_cost,
        total_cost: agent_cost + software_cost,
        tier,
    }
}

/// Incremental revenue attributed to AI-assisted upsells.
pub fn upsell_revenue(volume: u64, assumptions: &GlobalAssumptions) -> f64 {
    volume as f64
        * assumptions.conversion_rate
        * assumptions.average_order_value
        * assumptions.upsell_lift_rate
}

/// First competitor with the highest total cost.
pub fn highest_competitor<'a>(costs: &'a [PlanCost], evaluated: &str) -> Option<&'a PlanCost> {
    costs
        .iter()
        .filter(|cost| cost.slug != evaluated)
        .fold(None, |best: Option<&PlanCost>, cost| match best {
            Some(current) if current.total_cost >= cost.total_cost => best,
            _ => Some(cost),
        })
}

/// Engine bound to one pricing configuration.
#[derive(Debug, Clone)]
pub struct CostEngine {
    config: PricingConfig,
}

impl CostEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Sanitize the input and run the comparison.
    pub fn calculate(&self, input: &CalculationInput) -> CalculationResult {
        let resolved = input.resolve(&self.config);
        self.calculate_resolved(&resolved)
    }

    /// Run the comparison on an already sanitized input.
    ///
    /// Tier selection always sees the monthly volume; the period factor is
    /// applied to the finished figures.
    pub fn calculate_resolved(&self, input: &ResolvedInput) -> CalculationResult {
        debug!(
            "Calculating costs for volume {} ({}) across {} plans",
            input.volume,
            input.period,
            self.config.plans.len()
        );

        let evaluated = self.config.evaluated.as_str();
        let plans = compute_costs(
            input.volume,
            &input.assumptions,
            &self.config.plans,
            &input.automation_rates,
        );

        let comparisons = match plans.iter().find(|p| p.slug == evaluated) {
            Some(evaluated_cost) => plans
                .iter()
                .filter(|p| p.slug != evaluated)
                .map(|p| Comparison::between(p, evaluated_cost, input.assumptions.tickets_per_hour))
                .collect(),
            None => {
                warn!("Evaluated plan '{}' is not configured; skipping comparisons", evaluated);
                Vec::new()
            }
        };

        let highest_competitor_cost =
            highest_competitor(&plans, evaluated).map(|p| p.slug.clone());

        let upsell = input
            .show_upsell_revenue
            .then(|| upsell_revenue(input.volume, &input.assumptions));

        CalculationResult {
            volume: input.volume,
            period: input.period,
            evaluated: evaluated.to_string(),
            plans,
            comparisons,
            highest_competitor_cost,
            upsell_revenue: upsell,
        }
        .scale_to_period()
    }
}
