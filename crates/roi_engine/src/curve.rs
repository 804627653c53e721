//! Cost curves across a range of volumes, for charting.

use serde::Serialize;

use crate::engine::CostEngine;
use crate::input::CalculationInput;

/// Total cost of one plan at one volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveValue {
    pub slug: String,
    pub total_cost: f64,
}

/// Every plan's total cost at one volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub volume: u64,
    pub totals: Vec<CurveValue>,
    /// Savings against the highest-cost competitor at this volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline_savings: Option<f64>,
}

impl CurvePoint {
    pub fn total_for(&self, slug: &str) -> Option<f64> {
        self.totals.iter().find(|v| v.slug == slug).map(|v| v.total_cost)
    }
}

/// Volumes from `from` to `to` inclusive in steps of `step`.
///
/// `to` is always included even when the step overshoots it. A zero step
/// yields just `from`. Callers bound the range; every step is materialized.
pub fn volume_steps(from: u64, to: u64, step: u64) -> Vec<u64> {
    if step == 0 || from >= to {
        return vec![from];
    }
    let step = usize::try_from(step).unwrap_or(usize::MAX);
    let mut volumes: Vec<u64> = (from..=to).step_by(step).collect();
    if volumes.last() != Some(&to) {
        volumes.push(to);
    }
    volumes
}

impl CostEngine {
    /// Evaluate `base` at each volume, keeping every other input fixed.
    ///
    /// Volumes are clamped to the configured bounds; consecutive volumes that
    /// clamp to the same value produce a single point.
    pub fn cost_curve<I>(&self, base: &CalculationInput, volumes: I) -> Vec<CurvePoint>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut curve: Vec<CurvePoint> = volumes
            .into_iter()
            .map(|volume| {
                let input = CalculationInput {
                    volume,
                    ..base.clone()
                };
                let result = self.calculate(&input);
                CurvePoint {
                    volume: result.volume,
                    headline_savings: result.headline().map(|c| c.savings),
                    totals: result
                        .plans
                        .into_iter()
                        .map(|p| CurveValue {
                            slug: p.slug,
                            total_cost: p.total_cost,
                        })
                        .collect(),
                }
            })
            .collect();
        curve.dedup_by_key(|point| point.volume);
        curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_steps_include_end() {
        assert_eq!(volume_steps(0, 1000, 250), vec![0, 250, 500, 750, 1000]);
        assert_eq!(volume_steps(0, 1000, 300), vec![0, 300, 600, 900, 1000]);
    }

    #[test]
    fn test_volume_steps_degenerate() {
        assert_eq!(volume_steps(500, 500, 10), vec![500]);
        assert_eq!(volume_steps(10, 100, 0), vec![10]);
        assert_eq!(volume_steps(100, 10, 5), vec![100]);
    }

    #[test]
    fn test_volume_steps_huge_step() {
        assert_eq!(volume_steps(0, 10, u64::MAX), vec![0, 10]);
    }

    #[test]
    fn test_cost_curve_stops_at_volume_bound() {
        let config = roi_pricing::ConfigLoader::embedded().unwrap();
        let max = config.bounds.volume.max;
        let engine = CostEngine::new(config);

        let curve = engine.cost_curve(
            &CalculationInput::new(0),
            volume_steps(max - 2_000, max + 3_000, 1_000),
        );
        let volumes: Vec<u64> = curve.iter().map(|p| p.volume).collect();
        assert_eq!(volumes, vec![max - 2_000, max - 1_000, max]);
    }
}
