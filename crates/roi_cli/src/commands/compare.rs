//! Compare command - Costs, savings and ROI for one volume.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;

use roi_engine::{CalculationResult, CostEngine};
use roi_pricing::{Currency, GlobalAssumptions};

use super::{emit, load_config, OutputFormat, OverrideArgs};

#[derive(Args)]
pub struct CompareArgs {
    /// Support interactions per month
    #[arg(short = 'n', long)]
    pub volume: u64,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn execute(args: CompareArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let currency = config.currency;
    let engine = CostEngine::new(config);

    let input = args.overrides.to_input(args.volume);
    let resolved = input.resolve(engine.config());
    info!("Comparing {} plans at volume {}", engine.config().plans.len(), resolved.volume);

    let result = engine.calculate_resolved(&resolved);

    emit(args.format, currency, &result, || {
        render_table(&result, &resolved.assumptions, currency)
    })
}

/// Render a result as a text table.
pub fn render_table(
    result: &CalculationResult,
    assumptions: &GlobalAssumptions,
    currency: Currency,
) -> String {
    let suffix = result.period.suffix();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "ROI comparison for {} interactions/month ({} figures)",
        result.volume, result.period
    );
    let _ = writeln!(
        out,
        "Assumptions: {}/h agent wage, {} interactions/h per agent",
        currency.format(assumptions.agent_hourly_wage),
        assumptions.tickets_per_hour
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<16} {:<14} {:>12} {:>12} {:>12} {:>12} {:>9} {:>10}",
        "Plan", "Tier", "Software", "Agents", "Total", "Savings", "ROI", "Hours"
    );

    for plan in &result.plans {
        let marker = if plan.slug == result.evaluated { " *" } else { "" };
        let tier = match &plan.tier {
            Some(tier) if tier.has_overage() => format!("{} +{}", tier.label, tier.overage_units),
            Some(tier) => tier.label.clone(),
            None => "-".to_string(),
        };
        let (savings, roi, hours) = match result.comparison(&plan.slug) {
            Some(c) => (
                currency.format(c.savings),
                c.roi_percent
                    .map(|r| format!("{:.0}%", r))
                    .unwrap_or_else(|| "-".to_string()),
                format!("{:.1}", c.hours_saved),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };

        let _ = writeln!(
            out,
            "{:<16} {:<14} {:>12} {:>12} {:>12} {:>12} {:>9} {:>10}",
            format!("{}{}", plan.name, marker),
            tier,
            currency.format(plan.software_cost),
            currency.format(plan.agent_cost),
            currency.format(plan.total_cost),
            savings,
            roi,
            hours
        );
    }

    let _ = writeln!(out);
    if let Some(headline) = result.headline() {
        let roi = headline
            .roi_percent
            .map(|r| format!(", {:.0}% ROI", r))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "Headline: {}{} saved against {}{}, {:.1} agent hours freed",
            currency.format(headline.savings),
            suffix,
            headline.name,
            roi,
            headline.hours_saved
        );
    }
    if let Some(revenue) = result.upsell_revenue {
        let _ = writeln!(out, "Upsell revenue: {}{}", currency.format(revenue), suffix);
    }
    let _ = writeln!(out, "* evaluated product");

    out
}
