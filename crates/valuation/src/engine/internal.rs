//! Internal value: what the product saves the organisation each year.
//!
//! Four independent drivers (time savings, error reduction, cost avoidance,
//! risk mitigation) plus a directly entered process-standardisation value make
//! up the raw annual value, which is then scaled by adoption and ramp-up and
//! reduced by training cost.

use crate::engine::{finite, fraction, nonzero};
use crate::inputs::{AlternativePeriod, ValuationInput};
use crate::settings::EngineSettings;

pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Floor and ceiling of the ramp-up factor.
const RAMP_FACTOR_RANGE: (f64, f64) = (0.5, 1.0);

/// Result of the internal value stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InternalValue {
    pub time_savings: Option<f64>,
    pub error_reduction: Option<f64>,
    pub cost_avoidance: Option<f64>,
    pub risk_mitigation: Option<f64>,
    /// Sum of the drivers that could be computed plus process standardisation.
    /// Missing drivers contribute nothing; the sum itself is always defined.
    pub raw_total: f64,
    pub adoption_adjusted: Option<f64>,
    pub training_cost: Option<f64>,
}

impl InternalValue {
    /// Annual value carried into the blend: adoption-adjusted value when
    /// available (else the raw total), less training cost when available.
    pub fn net_total(&self) -> f64 {
        nonzero(self.adoption_adjusted).unwrap_or(self.raw_total) - self.training_cost.unwrap_or(0.0)
    }
}

/// Runs every internal calculation against `input`.
pub fn internal_value(input: &ValuationInput, settings: &EngineSettings) -> InternalValue {
    let time_savings = time_savings(
        input.hours_saved_per_user_per_week,
        input.number_of_affected_users,
        input.average_hourly_cost,
    );
    let error_reduction = error_reduction(
        input.current_errors_per_month,
        input.cost_per_error,
        input.expected_error_reduction_percent,
    );
    let cost_avoidance = cost_avoidance(
        input.alternative_solution_cost,
        input.alternative_solution_period,
        settings.one_time_amortization_years,
    );
    let risk_mitigation = risk_mitigation(
        input.risk_probability_percent,
        input.risk_cost_if_occurs,
        input.risk_reduction_percent,
    );

    let raw_total = [time_savings, error_reduction, cost_avoidance, risk_mitigation]
        .into_iter()
        .flatten()
        .sum::<f64>()
        + input.process_standardization_annual_value.unwrap_or(0.0);

    InternalValue {
        time_savings,
        error_reduction,
        cost_avoidance,
        risk_mitigation,
        raw_total,
        adoption_adjusted: adoption_adjusted_value(
            raw_total,
            input.expected_adoption_rate_percent,
            input.time_to_full_productivity_weeks,
        ),
        training_cost: training_cost(
            input.training_cost_per_user,
            input.number_of_affected_users,
            input.expected_adoption_rate_percent,
        ),
    }
}

// ---------------------------------------------------------------------------
// Value drivers
// ---------------------------------------------------------------------------

/// `hours × users × hourly cost × 52`.
pub fn time_savings(
    hours_saved_per_user_per_week: Option<f64>,
    affected_users: Option<u64>,
    average_hourly_cost: Option<f64>,
) -> Option<f64> {
    finite(
        hours_saved_per_user_per_week?
            * affected_users? as f64
            * average_hourly_cost?
            * WEEKS_PER_YEAR,
    )
}

/// `errors per month × 12 × cost per error × reduction%`.
pub fn error_reduction(
    errors_per_month: Option<u64>,
    cost_per_error: Option<f64>,
    reduction_percent: Option<f64>,
) -> Option<f64> {
    finite(errors_per_month? as f64 * MONTHS_PER_YEAR * cost_per_error? * fraction(reduction_percent?))
}

/// Annualised cost of the alternative the product replaces.
///
/// A one-time cost is spread over `amortization_years`. An unrecognised period
/// contributes nothing.
pub fn cost_avoidance(
    alternative_cost: Option<f64>,
    period: Option<AlternativePeriod>,
    amortization_years: f64,
) -> Option<f64> {
    let cost = alternative_cost?;
    let annual = match period? {
        AlternativePeriod::Monthly => cost * MONTHS_PER_YEAR,
        AlternativePeriod::Annually => cost,
        AlternativePeriod::OneTime => cost / amortization_years,
        AlternativePeriod::Unrecognized => return None,
    };
    finite(annual)
}

/// `probability% × cost if it occurs × reduction%`.
pub fn risk_mitigation(
    probability_percent: Option<f64>,
    cost_if_occurs: Option<f64>,
    reduction_percent: Option<f64>,
) -> Option<f64> {
    finite(fraction(probability_percent?) * cost_if_occurs? * fraction(reduction_percent?))
}

// ---------------------------------------------------------------------------
// Adoption and training
// ---------------------------------------------------------------------------

/// Adoption as a fraction; a missing or zero rate means everyone adopts.
pub fn adoption_rate(adoption_rate_percent: Option<f64>) -> f64 {
    fraction(nonzero(adoption_rate_percent).unwrap_or(100.0))
}

/// First-year productivity discount for the weeks users need to get up to
/// speed: `1 − weeks/52/2`, clamped to `[0.5, 1.0]`.
pub fn ramp_factor(time_to_full_productivity_weeks: Option<u32>) -> f64 {
    match time_to_full_productivity_weeks {
        Some(weeks) if weeks > 0 => {
            let (floor, ceiling) = RAMP_FACTOR_RANGE;
            (1.0 - f64::from(weeks) / WEEKS_PER_YEAR / 2.0).clamp(floor, ceiling)
        }
        _ => 1.0,
    }
}

/// Raw annual value scaled by adoption and ramp-up. `None` unless the raw
/// value is positive.
pub fn adoption_adjusted_value(
    raw_annual_value: f64,
    adoption_rate_percent: Option<f64>,
    time_to_full_productivity_weeks: Option<u32>,
) -> Option<f64> {
    if !(raw_annual_value > 0.0) {
        return None;
    }
    finite(
        raw_annual_value
            * adoption_rate(adoption_rate_percent)
            * ramp_factor(time_to_full_productivity_weeks),
    )
}

/// Training cost for the users expected to adopt.
pub fn training_cost(
    training_cost_per_user: Option<f64>,
    affected_users: Option<u64>,
    adoption_rate_percent: Option<f64>,
) -> Option<f64> {
    finite(training_cost_per_user? * affected_users? as f64 * adoption_rate(adoption_rate_percent))
}
