//! Derived valuation metrics.

use serde::{Deserialize, Serialize};

/// Every metric a valuation derives from its inputs.
///
/// Each field is either a finite number or `None`. `None` means "not
/// computable from the inputs given"; it is never a stand-in for zero and a
/// zero is never a stand-in for it. Serialises to a flat JSON object with
/// `null` for missing metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationOutput {
    // Internal value drivers
    pub annual_time_savings_value: Option<f64>,
    pub annual_error_reduction_value: Option<f64>,
    pub annual_cost_avoidance_value: Option<f64>,
    pub annual_risk_mitigation_value: Option<f64>,
    pub adoption_adjusted_annual_value: Option<f64>,
    pub total_training_cost: Option<f64>,

    // External value
    pub three_year_revenue_projection: Option<f64>,
    pub year_1_revenue: Option<f64>,
    pub year_2_revenue: Option<f64>,
    pub year_3_revenue: Option<f64>,
    pub net_three_year_revenue: Option<f64>,
    pub customer_ltv: Option<f64>,
    pub ltv_cac_ratio: Option<f64>,
    pub customer_payback_months: Option<f64>,

    // Blend, strategy and scoring
    pub total_economic_value: Option<f64>,
    pub strategic_multiplier: Option<f64>,
    pub final_value_low: Option<f64>,
    pub final_value_high: Option<f64>,
    pub rice_score: Option<f64>,
}

impl ValuationOutput {
    /// Iterates over `(field name, value)` pairs in declaration order.
    ///
    /// Useful for rendering and for checking the finiteness invariant without
    /// naming every field.
    pub fn metrics(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> {
        [
            ("annual_time_savings_value", self.annual_time_savings_value),
            ("annual_error_reduction_value", self.annual_error_reduction_value),
            ("annual_cost_avoidance_value", self.annual_cost_avoidance_value),
            ("annual_risk_mitigation_value", self.annual_risk_mitigation_value),
            ("adoption_adjusted_annual_value", self.adoption_adjusted_annual_value),
            ("total_training_cost", self.total_training_cost),
            ("three_year_revenue_projection", self.three_year_revenue_projection),
            ("year_1_revenue", self.year_1_revenue),
            ("year_2_revenue", self.year_2_revenue),
            ("year_3_revenue", self.year_3_revenue),
            ("net_three_year_revenue", self.net_three_year_revenue),
            ("customer_ltv", self.customer_ltv),
            ("ltv_cac_ratio", self.ltv_cac_ratio),
            ("customer_payback_months", self.customer_payback_months),
            ("total_economic_value", self.total_economic_value),
            ("strategic_multiplier", self.strategic_multiplier),
            ("final_value_low", self.final_value_low),
            ("final_value_high", self.final_value_high),
            ("rice_score", self.rice_score),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_metrics_serialise_as_null() {
        let output = ValuationOutput {
            rice_score: Some(200.0),
            ..ValuationOutput::default()
        };
        let value = serde_json::to_value(&output).unwrap();
        let map = value.as_object().unwrap();

        assert_eq!(map.len(), 19);
        assert_eq!(map["rice_score"], serde_json::json!(200.0));
        assert!(map["customer_ltv"].is_null());
    }

    #[test]
    fn metrics_cover_every_serialised_field() {
        let output = ValuationOutput::default();
        let value = serde_json::to_value(&output).unwrap();
        let names: Vec<_> = output.metrics().map(|(name, _)| name).collect();

        assert_eq!(names.len(), value.as_object().unwrap().len());
        for name in names {
            assert!(value.get(name).is_some(), "{name} missing from serialised output");
        }
    }
}
