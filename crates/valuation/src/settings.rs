//! Engine settings.
//!
//! A handful of constants in the valuation formulas are policy rather than
//! arithmetic. They live here so a deployment can change them without touching
//! the formulas; the defaults reproduce the historical behaviour exactly.

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Tunable constants used by [`crate::ValuationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Number of years a one-time alternative-solution cost is spread over
    /// when expressed as an annual avoided cost.
    pub one_time_amortization_years: f64,

    /// Effort used for RICE when the product has no (or non-positive)
    /// estimated effort. Keeps the denominator non-zero; a tiny floor yields a
    /// very large score rather than an error.
    pub rice_effort_floor_hours: f64,

    /// Length of one person-week. RICE effort is expressed in person-weeks.
    pub hours_per_person_week: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            one_time_amortization_years: 3.0,
            rice_effort_floor_hours: 1.0,
            hours_per_person_week: 40.0,
        }
    }
}

impl EngineSettings {
    /// Checks that every setting is a finite, strictly positive number.
    ///
    /// # Errors
    ///
    /// Returns the first offending setting as [`SettingsError::NotPositive`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        let checks = [
            ("one_time_amortization_years", self.one_time_amortization_years),
            ("rice_effort_floor_hours", self.rice_effort_floor_hours),
            ("hours_per_person_week", self.hours_per_person_week),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::NotPositive { name, value });
            }
        }
        Ok(())
    }
}
