//! Tier selection.

use serde::Serialize;

use roi_pricing::{largest_tier, Tier};

/// The tier a volume was billed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSelection {
    /// Position of the tier in the plan's list
    pub index: usize,
    /// Tier display label
    pub label: String,
    /// Base fee of the tier
    pub base: f64,
    /// Units beyond the included threshold
    pub overage_units: u64,
    /// Base plus overage
    pub price: f64,
}

impl TierSelection {
    fn new(index: usize, tier: &Tier, volume: u64) -> Self {
        Self {
            index,
            label: tier.label(),
            base: tier.base,
            overage_units: tier.overage_units(volume),
            price: tier.price_at(volume),
        }
    }

    pub fn has_overage(&self) -> bool {
        self.overage_units > 0
    }
}

/// Pick the tier a volume is billed against.
///
/// The cheapest tier whose threshold covers the volume wins, earlier tiers
/// winning equal prices. When nothing covers the volume, the tier with the
/// largest threshold is billed with overage for the excess. Returns `None`
/// only for an empty tier list.
pub fn select_tier(tiers: &[Tier], volume: u64) -> Option<TierSelection> {
    let covering = tiers
        .iter()
        .enumerate()
        .filter(|(_, tier)| tier.covers(volume))
        .fold(None, |best: Option<(usize, &Tier)>, (index, tier)| match best {
            Some((_, current)) if current.base <= tier.base => best,
            _ => Some((index, tier)),
        });

    if let Some((index, tier)) = covering {
        return Some(TierSelection::new(index, tier, volume));
    }

    let (index, largest) = largest_tier(tiers)?;
    Some(TierSelection::new(index, largest, volume))
}
