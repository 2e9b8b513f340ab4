//! RICE prioritisation score: Reach × Impact × Confidence / Effort.
//!
//! Independent of the value blend. Effort is measured in person-weeks.

use crate::engine::finite;
use crate::inputs::ConfidenceLevel;
use crate::settings::EngineSettings;

/// Weight applied to labels outside the known four.
const UNRECOGNIZED_CONFIDENCE_WEIGHT: f64 = 0.5;

/// RICE confidence weight for a confidence level.
pub fn confidence_weight(level: ConfidenceLevel) -> f64 {
    match level {
        ConfidenceLevel::High => 1.0,
        ConfidenceLevel::Medium => 0.8,
        ConfidenceLevel::Low => 0.5,
        ConfidenceLevel::Speculative => 0.2,
        ConfidenceLevel::Unrecognized => UNRECOGNIZED_CONFIDENCE_WEIGHT,
    }
}

/// RICE score. Requires reach and impact; missing or non-positive effort falls
/// back to `settings.rice_effort_floor_hours`.
///
/// Reach is normally the 1–5 reach score but any audience measure works.
pub fn rice_score(
    reach: Option<f64>,
    impact: Option<f64>,
    level: ConfidenceLevel,
    effort_hours: Option<f64>,
    settings: &EngineSettings,
) -> Option<f64> {
    let numerator = reach? * impact? * confidence_weight(level);
    let effort = match effort_hours {
        Some(hours) if hours > 0.0 => hours,
        _ => settings.rice_effort_floor_hours,
    };
    finite(numerator / (effort / settings.hours_per_person_week))
}

/// [`rice_score`] with default settings.
pub fn calculate_rice(
    reach: Option<f64>,
    impact: Option<f64>,
    level: ConfidenceLevel,
    effort_hours: Option<f64>,
) -> Option<f64> {
    rice_score(reach, impact, level, effort_hours, &EngineSettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_person_weeks_of_medium_confidence() {
        // 500 × 2 × 0.8 / (160 / 40)
        assert_eq!(
            calculate_rice(Some(500.0), Some(2.0), ConfidenceLevel::Medium, Some(160.0)),
            Some(200.0)
        );
    }

    #[test]
    fn reach_and_impact_are_required() {
        assert_eq!(calculate_rice(None, Some(2.0), ConfidenceLevel::High, Some(40.0)), None);
        assert_eq!(calculate_rice(Some(3.0), None, ConfidenceLevel::High, Some(40.0)), None);
    }

    #[test]
    fn zero_or_missing_effort_uses_floor() {
        let expected = Some(3.0 * 1.0 * 1.0 / (1.0 / 40.0));
        assert_eq!(calculate_rice(Some(3.0), Some(1.0), ConfidenceLevel::High, Some(0.0)), expected);
        assert_eq!(calculate_rice(Some(3.0), Some(1.0), ConfidenceLevel::High, None), expected);
        assert_eq!(calculate_rice(Some(3.0), Some(1.0), ConfidenceLevel::High, Some(-8.0)), expected);
    }

    #[test]
    fn unrecognised_confidence_weighs_half() {
        assert_eq!(confidence_weight(ConfidenceLevel::Unrecognized), 0.5);
        assert_eq!(
            calculate_rice(Some(4.0), Some(1.0), ConfidenceLevel::Unrecognized, Some(40.0)),
            Some(2.0)
        );
    }

    #[test]
    fn effort_floor_is_configurable() {
        let settings = EngineSettings {
            rice_effort_floor_hours: 40.0,
            ..EngineSettings::default()
        };
        assert_eq!(
            rice_score(Some(2.0), Some(1.0), ConfidenceLevel::High, None, &settings),
            Some(2.0)
        );
    }
}
