//! Behavioural tests for the cost comparison engine.

use roi_engine::{volume_steps, CalculationInput, CostEngine, Period};
use roi_pricing::{ConfigLoader, PricingConfig, PricingPlan, Tier};

const EPSILON: f64 = 1e-6;

fn embedded_engine() -> CostEngine {
    CostEngine::new(ConfigLoader::embedded().unwrap())
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON * (1.0 + a.abs().max(b.abs()))
}

/// Increasing the volume never lowers any plan's total.
#[test]
fn test_total_cost_is_monotonic_in_volume() {
    let engine = embedded_engine();
    let curve = engine.cost_curve(&CalculationInput::new(0), volume_steps(0, 20_000, 37));

    for window in curve.windows(2) {
        for value in &window[0].totals {
            let next = window[1].total_for(&value.slug).unwrap();
            assert!(
                next >= value.total_cost,
                "{} dropped from {} to {} between volumes {} and {}",
                value.slug,
                value.total_cost,
                next,
                window[0].volume,
                window[1].volume
            );
        }
    }
}

/// Annual figures are the monthly figures times twelve.
#[test]
fn test_annual_is_twelve_times_monthly() {
    let engine = embedded_engine();
    for volume in [1, 750, 2_000, 2_001, 9_999] {
        let monthly = engine.calculate(&CalculationInput::new(volume).with_upsell());
        let annual = engine.calculate(&CalculationInput::new(volume).with_upsell().annual());

        assert_eq!(annual.period, Period::Annual);
        assert_eq!(annual.volume, monthly.volume);
        for (m, a) in monthly.plans.iter().zip(&annual.plans) {
            assert_eq!(a.total_cost, m.total_cost * 12.0);
            assert_eq!(a.agent_cost, m.agent_cost * 12.0);
            assert_eq!(a.software_cost, m.software_cost * 12.0);
            assert_eq!(a.human_units, m.human_units * 12.0);
            assert_eq!(a.agent_hours, m.agent_hours * 12.0);
            // Tier choice is made on the monthly volume
            assert_eq!(a.tier, m.tier);
        }
        for (m, a) in monthly.comparisons.iter().zip(&annual.comparisons) {
            assert_eq!(a.savings, m.savings * 12.0);
            assert_eq!(a.hours_saved, m.hours_saved * 12.0);
            assert_eq!(a.roi_percent, m.roi_percent);
        }
        assert_eq!(
            annual.upsell_revenue,
            monthly.upsell_revenue.map(|r| r * 12.0)
        );
        assert_eq!(annual.highest_competitor_cost, monthly.highest_competitor_cost);
    }
}

#[test]
fn test_zero_volume_costs_nothing() {
    let result = embedded_engine().calculate(&CalculationInput::new(0));
    for plan in &result.plans {
        assert_eq!(plan.total_cost, 0.0, "{} should cost nothing", plan.slug);
    }
    for comparison in &result.comparisons {
        assert_eq!(comparison.savings, 0.0);
        assert_eq!(comparison.roi_percent, None);
    }
}

#[test]
fn test_savings_and_roi_are_relative_to_evaluated_plan() {
    let engine = embedded_engine();
    for input in [
        CalculationInput::new(320),
        CalculationInput::new(4_200).annual(),
        CalculationInput::new(12_000).with_wage(29.0),
    ] {
        let result = engine.calculate(&input);
        let evaluated = result.evaluated_cost().unwrap();

        assert_eq!(result.comparisons.len(), result.plans.len() - 1);
        assert!(result.comparison(&result.evaluated).is_none());

        for comparison in &result.comparisons {
            let competitor = result.plan(&comparison.slug).unwrap();
            let savings = competitor.total_cost - evaluated.total_cost;
            assert!(approx(comparison.savings, savings));
            let roi = comparison.roi_percent.unwrap();
            assert!(approx(roi, savings / evaluated.total_cost * 100.0));
        }
    }
}

#[test]
fn test_headline_is_costliest_competitor() {
    let result = embedded_engine().calculate(&CalculationInput::new(3_000));
    let headline = result.headline().unwrap();
    let headline_cost = result.plan(&headline.slug).unwrap().total_cost;

    for plan in result.plans.iter().filter(|p| p.slug != result.evaluated) {
        assert!(plan.total_cost <= headline_cost);
    }
    assert_ne!(headline.slug, result.evaluated);
}

#[test]
fn test_volume_at_threshold_never_picks_smaller_tier() {
    let engine = embedded_engine();
    for plan in &engine.config().plans {
        for tier in &plan.tiers {
            let result = engine.calculate(&CalculationInput::new(tier.included));
            let selection = result.plan(&plan.slug).unwrap().tier.clone().unwrap();
            let selected = &plan.tiers[selection.index];
            assert!(selected.included >= tier.included);
            assert!(selected.base <= tier.base);
            assert!(!selection.has_overage());
        }
    }
}

/// Volume 750 at $18.71/h and 20 tickets/h.
#[test]
fn test_example_scenario_750_chats() {
    let result = embedded_engine().calculate(&CalculationInput::new(750));

    let ours = result.plan("assistly").unwrap();
    assert!(approx(ours.human_units, 15.0));
    assert!(approx(ours.agent_hours, 0.75));
    assert_eq!(format!("{:.2}", ours.agent_cost), "14.03");

    let rival = result.plan("helpwave").unwrap();
    assert!(approx(rival.human_units, 375.0));
    assert!(approx(rival.agent_hours, 18.75));
    assert_eq!(format!("{:.2}", rival.agent_cost), "350.81");

    assert!(rival.total_cost > ours.total_cost);
    let comparison = result.comparison("helpwave").unwrap();
    assert!(comparison.savings > 0.0);
    assert!(comparison.roi_percent.unwrap() > 0.0);
    assert!(approx(comparison.hours_saved, 18.0));
}

/// Volume beyond the largest threshold is billed as overage.
#[test]
fn test_example_scenario_overage() {
    let config = PricingConfig::new("ours")
        .with_plan(PricingPlan::new("ours", "Ours", 0.9).with_tier(Tier::chats(500.0, 10_000, 0.01)))
        .with_plan(
            PricingPlan::new("rival", "Rival", 0.5)
                .with_tier(Tier::tickets(40.0, 500, 0.30))
                .with_tier(Tier::tickets(100.0, 2_000, 0.10)),
        );
    let result = CostEngine::new(config).calculate(&CalculationInput::new(5_000));

    let rival = result.plan("rival").unwrap();
    assert!(approx(rival.software_cost, 100.0 + 3_000.0 * 0.10));
    let tier = rival.tier.as_ref().unwrap();
    assert_eq!(tier.index, 1);
    assert_eq!(tier.overage_units, 3_000);
}

#[test]
fn test_upsell_only_when_requested() {
    let engine = embedded_engine();
    assert!(engine.calculate(&CalculationInput::new(1_000)).upsell_revenue.is_none());

    let revenue = engine
        .calculate(&CalculationInput::new(1_000).with_upsell())
        .upsell_revenue
        .unwrap();
    // 1000 * 0.03 * 75 * 0.25
    assert!(approx(revenue, 562.5));
}

#[test]
fn test_out_of_range_input_is_clamped_not_rejected() {
    let engine = embedded_engine();
    let clamped = engine.calculate(&CalculationInput::new(750).with_wage(500.0));
    let at_max = engine.calculate(&CalculationInput::new(750).with_wage(30.0));
    assert_eq!(clamped, at_max);
}

#[test]
fn test_result_serializes_for_presentation() {
    let result = embedded_engine().calculate(&CalculationInput::new(750).with_upsell());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["evaluated"], "assistly");
    assert_eq!(json["period"], "monthly");
    assert!(json["highestCompetitorCost"].is_string());
    assert!(json["upsellRevenue"].is_number());
    assert!(json["plans"][0]["tier"]["label"].is_string());
}
