//! Calculation results.

use serde::Serialize;

use crate::input::Period;
use crate::tier::TierSelection;

/// Costs of running support on one plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCost {
    pub slug: String,
    pub name: String,
    /// Automation rate the figures were computed with
    pub automation_rate: f64,
    /// Interactions that still need a human agent
    pub human_units: f64,
    pub agent_hours: f64,
    pub agent_cost: f64,
    pub software_cost: f64,
    pub total_cost: f64,
    /// Tier billed, `None` at zero volume or for a plan without tiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<TierSelection>,
}

impl PlanCost {
    fn scale(&mut self, factor: f64) {
        self.human_units *= factor;
        self.agent_hours *= factor;
        self.agent_cost *= factor;
        self.software_cost *= factor;
        self.total_cost *= factor;
    }
}

/// A competitor measured against the evaluated product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub slug: String,
    pub name: String,
    /// Competitor total minus evaluated total
    pub savings: f64,
    /// Savings as a percentage of the evaluated total; `None` when that total is zero
    pub roi_percent: Option<f64>,
    /// Agent hours the evaluated product avoids
    pub hours_saved: f64,
}

impl Comparison {
    /// Compare a competitor's costs against the evaluated product's.
    pub fn between(competitor: &PlanCost, evaluated: &PlanCost, tickets_per_hour: f64) -> Self {
        let savings = competitor.total_cost - evaluated.total_cost;
        let roi_percent = if evaluated.total_cost != 0.0 {
            Some(savings / evaluated.total_cost * 100.0)
        } else {
            None
        };
        let hours_saved = if tickets_per_hour > 0.0 {
            (competitor.human_units - evaluated.human_units) / tickets_per_hour
        } else {
            0.0
        };

        Self {
            slug: competitor.slug.clone(),
            name: competitor.name.clone(),
            savings,
            roi_percent,
            hours_saved,
        }
    }

    fn scale(&mut self, factor: f64) {
        self.savings *= factor;
        self.hours_saved *= factor;
    }
}

/// Full output of one calculator run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Monthly volume the figures were computed for
    pub volume: u64,
    pub period: Period,
    /// Slug of the evaluated product
    pub evaluated: String,
    /// Costs per plan, in configuration order
    pub plans: Vec<PlanCost>,
    /// One entry per competitor, in configuration order
    pub comparisons: Vec<Comparison>,
    /// Competitor with the highest total cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_competitor_cost: Option<String>,
    /// Incremental revenue for the evaluated product, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsell_revenue: Option<f64>,
}

impl CalculationResult {
    /// Cost figures for a plan.
    pub fn plan(&self, slug: &str) -> Option<&PlanCost> {
        self.plans.iter().find(|p| p.slug == slug)
    }

    /// The evaluated product's costs.
    pub fn evaluated_cost(&self) -> Option<&PlanCost> {
        self.plan(&self.evaluated)
    }

    /// Comparison against a competitor.
    pub fn comparison(&self, slug: &str) -> Option<&Comparison> {
        self.comparisons.iter().find(|c| c.slug == slug)
    }

    /// The comparison used for the headline figure.
    pub fn headline(&self) -> Option<&Comparison> {
        self.highest_competitor_cost
            .as_deref()
            .and_then(|slug| self.comparison(slug))
    }

    /// Multiply every per-period figure by the period's factor.
    pub(crate) fn scale_to_period(mut self) -> Self {
        let factor = self.period.multiplier();
        if factor == 1.0 {
            return self;
        }
        for plan in &mut self.plans {
            plan.scale(factor);
        }
        for comparison in &mut self.comparisons {
            comparison.scale(factor);
        }
        if let Some(revenue) = self.upsell_revenue.as_mut() {
            *revenue *= factor;
        }
        self
    }
}
