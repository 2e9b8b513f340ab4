//! Strategic multiplier: five strategy scores folded into a single factor in
//! `[0.5, 2.0]`.

use crate::engine::finite;
use crate::inputs::ValuationInput;

/// Closed range a strategic score is entered on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    /// Min-max normalises `score` onto `[0, 1]`.
    pub fn normalize(self, score: f64) -> f64 {
        (score - self.min) / (self.max - self.min)
    }
}

pub const REACH_RANGE: ScoreRange = ScoreRange { min: 1.0, max: 5.0 };
pub const IMPACT_RANGE: ScoreRange = ScoreRange { min: 0.25, max: 3.0 };
pub const ALIGNMENT_RANGE: ScoreRange = ScoreRange { min: 1.0, max: 5.0 };
pub const DIFFERENTIATION_RANGE: ScoreRange = ScoreRange { min: 1.0, max: 5.0 };
pub const URGENCY_RANGE: ScoreRange = ScoreRange { min: 1.0, max: 5.0 };

pub const MULTIPLIER_FLOOR: f64 = 0.5;
pub const MULTIPLIER_CEILING: f64 = 2.0;

/// Averages the normalised scores and maps the average linearly onto
/// `[MULTIPLIER_FLOOR, MULTIPLIER_CEILING]`. All five scores are required.
pub fn strategic_multiplier(
    reach: Option<u8>,
    impact: Option<f64>,
    alignment: Option<u8>,
    differentiation: Option<u8>,
    urgency: Option<u8>,
) -> Option<f64> {
    let normalized = [
        REACH_RANGE.normalize(f64::from(reach?)),
        IMPACT_RANGE.normalize(impact?),
        ALIGNMENT_RANGE.normalize(f64::from(alignment?)),
        DIFFERENTIATION_RANGE.normalize(f64::from(differentiation?)),
        URGENCY_RANGE.normalize(f64::from(urgency?)),
    ];
    let average = normalized.iter().sum::<f64>() / normalized.len() as f64;
    finite(MULTIPLIER_FLOOR + average * (MULTIPLIER_CEILING - MULTIPLIER_FLOOR))
}

/// [`strategic_multiplier`] over the scores carried by `input`.
pub fn multiplier_for(input: &ValuationInput) -> Option<f64> {
    strategic_multiplier(
        input.reach_score,
        input.impact_score,
        input.strategic_alignment_score,
        input.differentiation_score,
        input.urgency_score,
    )
}
