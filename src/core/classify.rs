//! Magnitude classification: one ordered tier table drives both marker
//! styling and legend generation.

/// One visual tier. A magnitude belongs to the first tier whose `floor`
/// it strictly exceeds; the final entry is the catch-all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeTier {
    pub floor: f64,
    pub color: &'static str,
}

/// The six tiers, highest first. This table is the single source of
/// thresholds and colors for markers and legend alike.
pub const MAGNITUDE_TIERS: [MagnitudeTier; 6] = [
    MagnitudeTier {
        floor: 5.0,
        color: "#ff5f65",
    },
    MagnitudeTier {
        floor: 4.0,
        color: "#fca35d",
    },
    MagnitudeTier {
        floor: 3.0,
        color: "#fdb72a",
    },
    MagnitudeTier {
        floor: 2.0,
        color: "#f7db11",
    },
    MagnitudeTier {
        floor: 1.0,
        color: "#ddf400",
    },
    MagnitudeTier {
        floor: 0.0,
        color: "#a2f600",
    },
];

pub const SCALE_FACTOR: f64 = 5.0;

/// Marker radius in pixels. No clamping: zero and negative magnitudes
/// yield zero and negative radii, which the widget renders as a point.
pub fn size_for(magnitude: f64) -> f64 {
    magnitude * SCALE_FACTOR
}

/// Tier color for a magnitude. Comparison is strict `>` against each
/// floor top-down, so a value exactly on a boundary (4.0, 5.0) falls to
/// the lower tier. NaN fails every comparison and takes the catch-all.
pub fn color_for(magnitude: f64) -> &'static str {
    for tier in &MAGNITUDE_TIERS[..MAGNITUDE_TIERS.len() - 1] {
        if magnitude > tier.floor {
            return tier.color;
        }
    }
    MAGNITUDE_TIERS[MAGNITUDE_TIERS.len() - 1].color
}
