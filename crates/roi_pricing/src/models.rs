//! Data models for pricing configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Supported currencies for cost display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    EUR,
}

impl Currency {
    /// Parse a currency code such as "usd" or "EUR".
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }

    /// Format an amount with this currency's symbol and two decimals.
    pub fn format(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self, amount.abs())
        } else {
            format!("{}{:.2}", self, amount)
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::USD => write!(f, "$"),
            Currency::EUR => write!(f, "€"),
        }
    }
}

/// What a tier's included-usage threshold counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UsageUnit {
    Chats,
    Tickets,
}

impl std::fmt::Display for UsageUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageUnit::Chats => write!(f, "chats"),
            UsageUnit::Tickets => write!(f, "tickets"),
        }
    }
}

/// A usage bracket of a pricing plan.
///
/// In documents the threshold appears as either `includedChats` or
/// `includedTickets`; the key used is kept in [`Tier::unit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierDocument", into = "TierDocument")]
pub struct Tier {
    /// Optional display name (e.g. "Starter")
    pub name: Option<String>,
    /// Monthly fee
    pub base: f64,
    /// Usage included in the base fee
    pub included: u64,
    /// Unit the threshold is expressed in
    pub unit: UsageUnit,
    /// Fee per unit beyond the included threshold
    pub overage: f64,
}

impl Tier {
    pub fn new(base: f64, included: u64, unit: UsageUnit, overage: f64) -> Self {
        Self {
            name: None,
            base,
            included,
            unit,
            overage,
        }
    }

    /// Tier counting chats.
    pub fn chats(base: f64, included: u64, overage: f64) -> Self {
        Self::new(base, included, UsageUnit::Chats, overage)
    }

    /// Tier counting tickets.
    pub fn tickets(base: f64, included: u64, overage: f64) -> Self {
        Self::new(base, included, UsageUnit::Tickets, overage)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the included threshold covers the given volume.
    pub fn covers(&self, volume: u64) -> bool {
        self.included >= volume
    }

    /// Price of this tier at the given volume, including overage.
    pub fn price_at(&self, volume: u64) -> f64 {
        self.base + self.overage_units(volume) as f64 * self.overage
    }

    /// Units billed as overage at the given volume.
    pub fn overage_units(&self, volume: u64) -> u64 {
        volume.saturating_sub(self.included)
    }

    /// Display label, falling back to the threshold.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.included, self.unit),
        }
    }
}

/// On-disk shape of a tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TierDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    base: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    included_chats: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    included_tickets: Option<u64>,
    #[serde(default)]
    overage: f64,
}

impl TryFrom<TierDocument> for Tier {
    type Error = String;

    fn try_from(doc: TierDocument) -> Result<Self, Self::Error> {
        let (included, unit) = match (doc.included_chats, doc.included_tickets) {
            (Some(chats), None) => (chats, UsageUnit::Chats),
            (None, Some(tickets)) => (tickets, UsageUnit::Tickets),
            (Some(_), Some(_)) => {
                return Err("tier must set only one of includedChats or includedTickets".to_string())
            }
            (None, None) => {
                return Err("tier must set includedChats or includedTickets".to_string())
            }
        };

        Ok(Tier {
            name: doc.name,
            base: doc.base,
            included,
            unit,
            overage: doc.overage,
        })
    }
}

impl From<Tier> for TierDocument {
    fn from(tier: Tier) -> Self {
        let (included_chats, included_tickets) = match tier.unit {
            UsageUnit::Chats => (Some(tier.included), None),
            UsageUnit::Tickets => (None, Some(tier.included)),
        };
        TierDocument {
            name: tier.name,
            base: tier.base,
            included_chats,
            included_tickets,
            overage: tier.overage,
        }
    }
}

/// A named product with its pricing tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub slug: String,
    pub name: String,
    /// Ordered tiers (the document key is `plans`)
    #[serde(rename = "plans", default)]
    pub tiers: Vec<Tier>,
    /// Share of volume resolved without a human agent, in [0, 1]
    pub automation_rate: f64,
}

impl PricingPlan {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, automation_rate: f64) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            tiers: Vec::new(),
            automation_rate,
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Tier with the largest included threshold.
    pub fn largest_tier(&self) -> Option<(usize, &Tier)> {
        largest_tier(&self.tiers)
    }
}

/// Tier with the largest included threshold and its index.
///
/// Equal thresholds go to the lower base, then to the earlier tier.
pub fn largest_tier(tiers: &[Tier]) -> Option<(usize, &Tier)> {
    tiers.iter().enumerate().reduce(|best, candidate| {
        let (_, b) = best;
        let (_, c) = candidate;
        if c.included > b.included || (c.included == b.included && c.base < b.base) {
            candidate
        } else {
            best
        }
    })
}

/// Inclusive range an editable value is clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Editable ranges for calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssumptionBounds {
    pub agent_hourly_wage: Bounds<f64>,
    pub tickets_per_hour: Bounds<f64>,
    pub volume: Bounds<u64>,
}

impl Default for AssumptionBounds {
    fn default() -> Self {
        Self {
            agent_hourly_wage: Bounds::new(10.0, 30.0),
            tickets_per_hour: Bounds::new(10.0, 30.0),
            volume: Bounds::new(0, 1_000_000),
        }
    }
}

/// Global assumptions shared by every plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalAssumptions {
    /// Fully loaded hourly cost of a support agent
    pub agent_hourly_wage: f64,
    /// Interactions an agent resolves per hour
    pub tickets_per_hour: f64,
    /// Multiplier applied to attributed upsell revenue
    pub upsell_lift_rate: f64,
    /// Share of interactions that convert to a purchase
    pub conversion_rate: f64,
    /// Average value of a converted order
    pub average_order_value: f64,
}

impl Default for GlobalAssumptions {
    fn default() -> Self {
        Self {
            agent_hourly_wage: 18.71,
            tickets_per_hour: 20.0,
            upsell_lift_rate: 0.25,
            conversion_rate: 0.03,
            average_order_value: 75.0,
        }
    }
}

/// Root pricing configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    #[serde(default)]
    pub currency: Currency,
    /// Slug of the product being evaluated against the others
    pub evaluated: String,
    #[serde(default)]
    pub assumptions: GlobalAssumptions,
    #[serde(default)]
    pub bounds: AssumptionBounds,
    pub plans: Vec<PricingPlan>,
}

impl PricingConfig {
    pub fn new(evaluated: impl Into<String>) -> Self {
        Self {
            currency: Currency::default(),
            evaluated: evaluated.into(),
            assumptions: GlobalAssumptions::default(),
            bounds: AssumptionBounds::default(),
            plans: Vec::new(),
        }
    }

    pub fn with_plan(mut self, plan: PricingPlan) -> Self {
        self.plans.push(plan);
        self
    }

    pub fn with_assumptions(mut self, assumptions: GlobalAssumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    /// Look up a plan by slug.
    pub fn plan(&self, slug: &str) -> Option<&PricingPlan> {
        self.plans.iter().find(|p| p.slug == slug)
    }

    /// The evaluated product's plan, if configured.
    pub fn evaluated_plan(&self) -> Option<&PricingPlan> {
        self.plan(&self.evaluated)
    }

    /// Every plan except the evaluated one, in document order.
    pub fn competitors(&self) -> impl Iterator<Item = &PricingPlan> {
        self.plans.iter().filter(move |p| p.slug != self.evaluated)
    }

    /// Configured automation rate per plan slug.
    pub fn automation_rates(&self) -> HashMap<String, f64> {
        self.plans
            .iter()
            .map(|p| (p.slug.clone(), p.automation_rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_reads_either_threshold_key() {
        let chats: Tier =
            serde_json::from_str(r#"{"base": 29, "includedChats": 500, "overage": 0.1}"#).unwrap();
        assert_eq!(chats.unit, UsageUnit::Chats);
        assert_eq!(chats.included, 500);

        let tickets: Tier =
            serde_json::from_str(r#"{"base": 49, "includedTickets": 1000, "overage": 0.2}"#).unwrap();
        assert_eq!(tickets.unit, UsageUnit::Tickets);
        assert_eq!(tickets.included, 1000);
    }

    #[test]
    fn test_tier_rejects_missing_or_double_threshold() {
        assert!(serde_json::from_str::<Tier>(r#"{"base": 29, "overage": 0.1}"#).is_err());
        assert!(serde_json::from_str::<Tier>(
            r#"{"base": 29, "includedChats": 1, "includedTickets": 1, "overage": 0.1}"#
        )
        .is_err());
    }

    #[test]
    fn test_tier_serializes_original_key() {
        let json = serde_json::to_value(Tier::tickets(49.0, 1000, 0.2)).unwrap();
        assert_eq!(json["includedTickets"], 1000);
        assert!(json.get("includedChats").is_none());
    }

    #[test]
    fn test_tier_price_at() {
        let tier = Tier::chats(100.0, 2000, 0.10);
        assert_eq!(tier.price_at(1500), 100.0);
        assert!((tier.price_at(5000) - 400.0).abs() < 1e-9);
        assert_eq!(tier.overage_units(5000), 3000);
    }

    #[test]
    fn test_largest_tier_prefers_lower_base_on_tie() {
        let plan = PricingPlan::new("p", "P", 0.5)
            .with_tier(Tier::chats(10.0, 100, 0.5))
            .with_tier(Tier::chats(90.0, 1000, 0.2))
            .with_tier(Tier::chats(80.0, 1000, 0.3));
        let (index, tier) = plan.largest_tier().unwrap();
        assert_eq!(index, 2);
        assert_eq!(tier.base, 80.0);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(10.0, 30.0);
        assert_eq!(bounds.clamp(5.0), 10.0);
        assert_eq!(bounds.clamp(45.0), 30.0);
        assert_eq!(bounds.clamp(18.71), 18.71);
        assert!(!Bounds::new(3, 1).is_ordered());
    }

    #[test]
    fn test_currency_format() {
        assert_eq!(Currency::USD.format(14.0325), "$14.03");
        assert_eq!(Currency::EUR.format(-2.5), "-€2.50");
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("gbp"), None);
    }

    #[test]
    fn test_competitors_excludes_evaluated() {
        let config = PricingConfig::new("ours")
            .with_plan(PricingPlan::new("rival", "Rival", 0.5))
            .with_plan(PricingPlan::new("ours", "Ours", 0.9));
        let slugs: Vec<_> = config.competitors().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rival"]);
        assert_eq!(config.evaluated_plan().unwrap().name, "Ours");
    }
}
