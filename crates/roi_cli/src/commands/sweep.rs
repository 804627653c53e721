//! Sweep command - Total cost per plan across a range of volumes.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;

use roi_engine::{volume_steps, CostEngine, CurvePoint, Period};
use roi_pricing::{Bounds, Currency, PricingConfig};

use super::{emit, load_config, OutputFormat, OverrideArgs};

#[derive(Args)]
pub struct SweepArgs {
    /// First volume
    #[arg(long, default_value_t = 0)]
    pub from: u64,

    /// Last volume (inclusive)
    #[arg(long, default_value_t = 10_000)]
    pub to: u64,

    /// Volume increment
    #[arg(long, default_value_t = 500)]
    pub step: u64,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Upper limit on rows a single sweep may produce.
const MAX_SWEEP_POINTS: u64 = 10_000;

pub fn execute(args: SweepArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let volumes = sweep_volumes(args.from, args.to, args.step, &config.bounds.volume)?;
    info!("Sweeping {} volumes from {} to {}", volumes.len(), args.from, args.to);

    let currency = config.currency;
    let engine = CostEngine::new(config);
    let base = args.overrides.to_input(args.from);
    let curve = engine.cost_curve(&base, volumes);

    emit(args.format, currency, &curve, || {
        render_table(&curve, engine.config(), base.period, currency)
    })
}

/// Check a requested range against the configured volume bounds and expand it.
fn sweep_volumes(from: u64, to: u64, step: u64, bounds: &Bounds<u64>) -> Result<Vec<u64>> {
    if step == 0 {
        anyhow::bail!("Invalid argument: --step must be greater than zero");
    }
    if from > to {
        anyhow::bail!("Invalid argument: --from ({}) is greater than --to ({})", from, to);
    }
    if !bounds.contains(from) || !bounds.contains(to) {
        anyhow::bail!(
            "Invalid argument: sweep {}..={} is outside the volume range [{}, {}]",
            from,
            to,
            bounds.min,
            bounds.max
        );
    }
    let points = (to - from) / step + 2;
    if points > MAX_SWEEP_POINTS {
        anyhow::bail!(
            "Invalid argument: sweep would produce {} points (limit {}), use a larger --step",
            points,
            MAX_SWEEP_POINTS
        );
    }
    Ok(volume_steps(from, to, step))
}

/// Render a cost curve with one column per plan.
pub fn render_table(
    curve: &[CurvePoint],
    config: &PricingConfig,
    period: Period,
    currency: Currency,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total cost per plan ({} figures)", period);
    let _ = write!(out, "{:>10}", "Volume");
    for plan in &config.plans {
        let _ = write!(out, " {:>14}", truncate(&plan.name, 14));
    }
    let _ = writeln!(out, " {:>14}", "Headline");

    for point in curve {
        let _ = write!(out, "{:>10}", point.volume);
        for plan in &config.plans {
            let total = point
                .total_for(&plan.slug)
                .map(|t| currency.format(t))
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(out, " {:>14}", total);
        }
        let headline = point
            .headline_savings
            .map(|s| currency.format(s))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, " {:>14}", headline);
    }

    out
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}
