//! The valuation engine.
//!
//! A single pass over a [`ValuationInput`] that produces a [`ValuationOutput`].
//! Each stage lives in its own module and can be called on its own:
//!
//! | Stage | Module |
//! |-------|--------|
//! | Internal value drivers, adoption, training | [`internal`] |
//! | Revenue projection and customer economics | [`external`] |
//! | Product-type blend | [`blend`] |
//! | Strategic multiplier | [`strategic`] |
//! | Confidence band and final range | [`confidence`] |
//! | RICE score | [`rice`] |
//!
//! Missing prerequisites disable only the calculation that needs them. Every
//! calculation takes its prerequisites as `Option`s and unwraps them with `?`,
//! so "any input missing ⇒ output missing" holds by construction, and routes
//! its arithmetic result through [`finite`] so no NaN or infinity escapes.

pub mod blend;
pub mod confidence;
pub mod external;
pub mod internal;
pub mod rice;
pub mod strategic;

use tracing::debug;

use crate::errors::ValuationError;
use crate::inputs::{ProductType, ValuationInput};
use crate::outputs::ValuationOutput;
use crate::settings::EngineSettings;

/// Keeps a result only when it is a real number.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Treats an explicit zero the same as a missing value. Used for inputs whose
/// zero means "not filled in" rather than a real zero (adoption rate, blend
/// weights).
pub(crate) fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Converts a 0–100 percentage to a fraction.
pub(crate) fn fraction(percent: f64) -> f64 {
    percent / 100.0
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Runs valuations under a fixed set of [`EngineSettings`].
///
/// Holds no state besides its settings; calls are independent and the same
/// input always produces the same output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValuationEngine {
    settings: EngineSettings,
}

impl ValuationEngine {
    /// Creates an engine after validating `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidSettings`] if any setting is not a
    /// finite positive number.
    pub fn new(settings: EngineSettings) -> Result<Self, ValuationError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Settings this engine was built with.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Derives every valuation metric from `input`.
    ///
    /// `effort_hours` is the product's total estimated build effort; it only
    /// feeds the RICE score.
    pub fn calculate(
        &self,
        input: &ValuationInput,
        product_type: ProductType,
        effort_hours: Option<f64>,
    ) -> ValuationOutput {
        let internal = internal::internal_value(input, &self.settings);
        let external = external::external_value(input);

        let total_economic_value =
            blend::total_economic_value(product_type, input, internal.net_total(), external.headline());
        let strategic_multiplier = strategic::multiplier_for(input);

        let confidence = input.confidence();
        let (final_value_low, final_value_high) =
            confidence::final_value_range(total_economic_value, strategic_multiplier, confidence);

        let rice_score = rice::rice_score(
            input.reach_score.map(f64::from),
            input.impact_score,
            confidence,
            effort_hours,
            &self.settings,
        );

        let [year_1_revenue, year_2_revenue, year_3_revenue] = external.year_revenues;
        let output = ValuationOutput {
            annual_time_savings_value: internal.time_savings,
            annual_error_reduction_value: internal.error_reduction,
            annual_cost_avoidance_value: internal.cost_avoidance,
            annual_risk_mitigation_value: internal.risk_mitigation,
            adoption_adjusted_annual_value: internal.adoption_adjusted,
            total_training_cost: internal.training_cost,
            three_year_revenue_projection: external.three_year_revenue_projection,
            year_1_revenue,
            year_2_revenue,
            year_3_revenue,
            net_three_year_revenue: external.net_three_year_revenue,
            customer_ltv: external.customer_ltv,
            ltv_cac_ratio: external.ltv_cac_ratio,
            customer_payback_months: external.customer_payback_months,
            total_economic_value,
            strategic_multiplier,
            final_value_low,
            final_value_high,
            rice_score,
        };

        debug!(
            product_type = %product_type,
            confidence = confidence.label(),
            total_economic_value = ?output.total_economic_value,
            final_value_high = ?output.final_value_high,
            rice_score = ?output.rice_score,
            "valuation calculated"
        );

        output
    }
}

/// Derives every valuation metric from `input` using default settings.
pub fn calculate_all(
    input: &ValuationInput,
    product_type: ProductType,
    effort_hours: Option<f64>,
) -> ValuationOutput {
    ValuationEngine::default().calculate(input, product_type, effort_hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{AlternativePeriod, ConfidenceLevel};
    use pretty_assertions::assert_eq;

    fn internal_scenario() -> ValuationInput {
        ValuationInput {
            hours_saved_per_user_per_week: Some(5.0),
            number_of_affected_users: Some(20),
            average_hourly_cost: Some(50.0),
            expected_adoption_rate_percent: Some(80.0),
            reach_score: Some(5),
            impact_score: Some(2.0),
            strategic_alignment_score: Some(5),
            differentiation_score: Some(3),
            urgency_score: Some(4),
            confidence_level: Some(ConfidenceLevel::Medium),
            ..ValuationInput::default()
        }
    }

    #[test]
    fn internal_product_end_to_end() {
        let output = calculate_all(&internal_scenario(), ProductType::Internal, Some(160.0));

        assert_eq!(output.annual_time_savings_value, Some(260_000.0));
        assert_eq!(output.adoption_adjusted_annual_value, Some(208_000.0));
        assert_eq!(output.total_training_cost, None);
        assert_eq!(output.total_economic_value, Some(208_000.0));

        let multiplier = output.strategic_multiplier.unwrap();
        let expected_multiplier = 0.5 + (1.0 + 1.75 / 2.75 + 1.0 + 0.5 + 0.75) / 5.0 * 1.5;
        assert!((multiplier - expected_multiplier).abs() < 1e-12);

        let low = output.final_value_low.unwrap();
        let high = output.final_value_high.unwrap();
        assert!((low - 208_000.0 * expected_multiplier * 0.6).abs() < 1e-6);
        assert!((high - 208_000.0 * expected_multiplier * 1.0).abs() < 1e-6);

        // 5 × 2 × 0.8 / (160 / 40)
        assert_eq!(output.rice_score, Some(2.0));

        assert_eq!(output.three_year_revenue_projection, None);
        assert_eq!(output.customer_ltv, None);
    }

    #[test]
    fn empty_input_yields_all_none() {
        let output = calculate_all(&ValuationInput::default(), ProductType::Both, None);
        assert_eq!(output, ValuationOutput::default());
    }

    #[test]
    fn external_product_uses_net_revenue() {
        let input = ValuationInput {
            average_deal_size: Some(1_000.0),
            year_1_customers: Some(10),
            year_2_customers: Some(20),
            year_3_customers: Some(30),
            customer_acquisition_cost: Some(100.0),
            annual_marketing_spend: Some(1_000.0),
            confidence_level: Some(ConfidenceLevel::High),
            ..ValuationInput::default()
        };
        let output = calculate_all(&input, ProductType::External, None);

        assert_eq!(output.three_year_revenue_projection, Some(60_000.0));
        // 60k − 60 × 100 − 3 × 1k
        assert_eq!(output.net_three_year_revenue, Some(51_000.0));
        assert_eq!(output.total_economic_value, Some(51_000.0));
        assert_eq!(output.strategic_multiplier, None);
        assert_eq!(output.final_value_low, Some(51_000.0 * 0.9));
        assert_eq!(output.final_value_high, Some(51_000.0 * 1.1));
    }

    #[test]
    fn internal_product_ignores_revenue() {
        let input = ValuationInput {
            average_deal_size: Some(1_000.0),
            year_1_customers: Some(10),
            year_2_customers: Some(20),
            year_3_customers: Some(30),
            ..ValuationInput::default()
        };
        let output = calculate_all(&input, ProductType::Internal, None);

        assert_eq!(output.three_year_revenue_projection, Some(60_000.0));
        assert_eq!(output.total_economic_value, None);
        assert_eq!(output.final_value_low, None);
        assert_eq!(output.final_value_high, None);
    }

    #[test]
    fn both_blends_internal_and_external() {
        let input = ValuationInput {
            alternative_solution_cost: Some(1_000.0),
            alternative_solution_period: Some(AlternativePeriod::Monthly),
            average_deal_size: Some(1_000.0),
            year_1_customers: Some(10),
            year_2_customers: Some(10),
            year_3_customers: Some(10),
            internal_value_weight: Some(40.0),
            external_value_weight: Some(60.0),
            ..ValuationInput::default()
        };
        let output = calculate_all(&input, ProductType::Both, None);

        assert_eq!(output.annual_cost_avoidance_value, Some(12_000.0));
        assert_eq!(output.net_three_year_revenue, Some(30_000.0));
        // 12k × 0.4 + 30k × 0.6
        assert_eq!(output.total_economic_value, Some(22_800.0));
    }

    #[test]
    fn rejects_invalid_settings() {
        let settings = EngineSettings {
            hours_per_person_week: 0.0,
            ..EngineSettings::default()
        };
        assert!(matches!(
            ValuationEngine::new(settings),
            Err(ValuationError::InvalidSettings(_))
        ));
    }

    #[test]
    fn custom_settings_flow_through() {
        let engine = ValuationEngine::new(EngineSettings {
            one_time_amortization_years: 4.0,
            ..EngineSettings::default()
        })
        .unwrap();
        let input = ValuationInput {
            alternative_solution_cost: Some(10_000.0),
            alternative_solution_period: Some(AlternativePeriod::OneTime),
            ..ValuationInput::default()
        };
        let output = engine.calculate(&input, ProductType::Internal, None);

        assert_eq!(output.annual_cost_avoidance_value, Some(2_500.0));
        assert_eq!(output.total_economic_value, Some(2_500.0));
    }
}
