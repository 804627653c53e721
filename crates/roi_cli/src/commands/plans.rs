//! Plans command - List configured plans and tiers.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use clap::Args;

use roi_pricing::PricingConfig;

use super::{emit, load_config, OutputFormat};

#[derive(Args)]
pub struct PlansArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn execute(args: PlansArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    emit(args.format, config.currency, &config, || render_table(&config))
}

/// Render plans and their tiers.
pub fn render_table(config: &PricingConfig) -> String {
    let currency = config.currency;
    let mut out = String::new();

    for plan in &config.plans {
        let marker = if plan.slug == config.evaluated {
            " (evaluated)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{} [{}]{} - {:.0}% automated",
            plan.name,
            plan.slug,
            marker,
            plan.automation_rate * 100.0
        );
        for tier in &plan.tiers {
            let _ = writeln!(
                out,
                "    {:<14} {:>10}/mo  {:>8} {:<8} then {}/unit",
                tier.name.as_deref().unwrap_or("-"),
                currency.format(tier.base),
                tier.included,
                tier.unit,
                currency.format(tier.overage)
            );
        }
    }

    let a = &config.assumptions;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Defaults: {}/h wage, {} interactions/h, upsell lift {}, conversion {}, order value {}",
        currency.format(a.agent_hourly_wage),
        a.tickets_per_hour,
        a.upsell_lift_rate,
        a.conversion_rate,
        currency.format(a.average_order_value)
    );

    out
}
