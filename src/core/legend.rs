//! Legend generation from the shared magnitude tier table.

use crate::core::classify::{color_for, MAGNITUDE_TIERS};
use crate::domain::model::LegendEntry;

pub const LEGEND_TITLE: &str = "Magnitude";

/// Build the legend rows, ascending by magnitude. Each swatch samples the
/// classifier at `lower + 1` rather than at the lower bound itself, which
/// sits exactly on the tier boundary.
pub fn build_legend() -> Vec<LegendEntry> {
    let ascending: Vec<_> = MAGNITUDE_TIERS.iter().rev().collect();
    ascending
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let lower = tier.floor as u32;
            LegendEntry {
                lower,
                upper: ascending.get(i + 1).map(|next| next.floor as u32),
                color: color_for(f64::from(lower) + 1.0),
            }
        })
        .collect()
}
