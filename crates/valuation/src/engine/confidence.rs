//! Confidence bands and the final low/high value range.

use crate::engine::finite;
use crate::inputs::ConfidenceLevel;
use crate::types::ConfidenceBand;

pub const HIGH_BAND: ConfidenceBand = ConfidenceBand::new(0.9, 1.1);
pub const MEDIUM_BAND: ConfidenceBand = ConfidenceBand::new(0.6, 1.0);
pub const LOW_BAND: ConfidenceBand = ConfidenceBand::new(0.3, 0.7);
pub const SPECULATIVE_BAND: ConfidenceBand = ConfidenceBand::new(0.1, 0.4);

/// Band for a confidence level. An unrecognised level gets Medium's band.
pub fn band(level: ConfidenceLevel) -> ConfidenceBand {
    match level {
        ConfidenceLevel::High => HIGH_BAND,
        ConfidenceLevel::Medium | ConfidenceLevel::Unrecognized => MEDIUM_BAND,
        ConfidenceLevel::Low => LOW_BAND,
        ConfidenceLevel::Speculative => SPECULATIVE_BAND,
    }
}

/// Final value range: `total × multiplier × band bound`.
///
/// A missing multiplier counts as 1.0. Both bounds are `None` when the total
/// is unknown.
///
/// The band is applied as-is, so for a negative total the "low" bound is the
/// larger number: `-1000` at Medium gives `(-600, -1000)`. `low <= high` only
/// holds when the total is non-negative.
pub fn final_value_range(
    total_economic_value: Option<f64>,
    strategic_multiplier: Option<f64>,
    level: ConfidenceLevel,
) -> (Option<f64>, Option<f64>) {
    let Some(total) = total_economic_value else {
        return (None, None);
    };
    let base = total * strategic_multiplier.unwrap_or(1.0);
    let band = band(level);
    (finite(base * band.low), finite(base * band.high))
}
