//! Valuation inputs.
//!
//! [`ValuationInput`] is the typed form of the flat field mapping a valuation
//! form produces. Every field is independently optional; each calculation
//! names the fields it needs and yields `None` when any of them is missing.
//! Field names match the snake_case keys of the mapping, so a JSON object
//! deserialises straight into this struct. Unknown keys are ignored.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValuationError;

// ---------------------------------------------------------------------------
// Enumerated labels
// ---------------------------------------------------------------------------

/// How sure the estimator is about the figures they entered.
///
/// Any label outside the four known ones deserialises to
/// [`ConfidenceLevel::Unrecognized`] instead of failing. An unrecognised label
/// receives Medium's confidence band but a RICE confidence weight of 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    #[default]
    Medium,
    Low,
    Speculative,
    #[serde(other)]
    Unrecognized,
}

impl ConfidenceLevel {
    /// The label as it appears on the valuation form.
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Speculative => "Speculative",
            ConfidenceLevel::Unrecognized => "Unrecognized",
        }
    }
}

/// Billing period of the alternative solution the product would replace.
///
/// An unrecognised period contributes nothing to cost avoidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlternativePeriod {
    Monthly,
    Annually,
    #[serde(rename = "One-time")]
    OneTime,
    #[serde(other)]
    Unrecognized,
}

/// How an external product is priced. Descriptive only; no calculation reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingModel {
    #[serde(rename = "One-time")]
    OneTime,
    Monthly,
    Annual,
    #[serde(rename = "Usage-based")]
    UsageBased,
    #[serde(rename = "Per-seat")]
    PerSeat,
    #[serde(other)]
    Unrecognized,
}

/// Who the product creates value for, which selects how internal and external
/// value are combined into a single total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProductType {
    /// Value comes from savings inside the organisation.
    Internal,
    /// Value comes from revenue earned from customers.
    External,
    /// A weighted blend of both.
    Both,
}

impl ProductType {
    /// The label stored on the product record.
    pub fn label(self) -> &'static str {
        match self {
            ProductType::Internal => "Internal",
            ProductType::External => "External",
            ProductType::Both => "Both",
        }
    }
}

impl FromStr for ProductType {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" => Ok(ProductType::Internal),
            "external" => Ok(ProductType::External),
            "both" => Ok(ProductType::Both),
            _ => Err(ValuationError::UnknownProductType {
                label: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reads the label the same way [`FromStr`] does, so `"internal"` in a
/// portfolio file is as valid as `"Internal"` on the command line.
impl<'de> Deserialize<'de> for ProductType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Whole-number fields
// ---------------------------------------------------------------------------

/// Reads a count or score that may arrive as `20` or as `20.0`.
///
/// Float columns round-trip through JSON with a trailing `.0`; such values
/// are accepted as long as they are finite, non-negative, whole and in range
/// for the target type.
mod whole_number {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let Some(value) = Option::<f64>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let whole = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
        if !whole || value > u64::MAX as f64 {
            return Err(D::Error::invalid_value(
                Unexpected::Float(value),
                &"a non-negative whole number",
            ));
        }
        T::try_from(value as u64)
            .map(Some)
            .map_err(|_| D::Error::invalid_value(Unexpected::Float(value), &"a whole number in range"))
    }
}

// ---------------------------------------------------------------------------
// Input record
// ---------------------------------------------------------------------------

/// Every business input a valuation may carry.
///
/// Percentages are on a 0–100 scale. Ranges are assumed to have been checked
/// by whoever collected the figures; the engine does not re-validate them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationInput {
    pub confidence_level: Option<ConfidenceLevel>,
    pub confidence_notes: Option<String>,

    // Time savings
    pub hours_saved_per_user_per_week: Option<f64>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub number_of_affected_users: Option<u64>,
    pub average_hourly_cost: Option<f64>,

    // Error reduction
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub current_errors_per_month: Option<u64>,
    pub cost_per_error: Option<f64>,
    pub expected_error_reduction_percent: Option<f64>,

    // Cost avoidance
    pub alternative_solution_cost: Option<f64>,
    pub alternative_solution_period: Option<AlternativePeriod>,

    // Risk mitigation
    pub risk_description: Option<String>,
    pub risk_probability_percent: Option<f64>,
    pub risk_cost_if_occurs: Option<f64>,
    pub risk_reduction_percent: Option<f64>,

    // Adoption and training
    pub expected_adoption_rate_percent: Option<f64>,
    pub training_cost_per_user: Option<f64>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub rollout_months: Option<u32>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub time_to_full_productivity_weeks: Option<u32>,
    /// Direct annual value of standardising a process. Counts as 0 when absent.
    pub process_standardization_annual_value: Option<f64>,

    // Market sizing
    pub target_customer_segment: Option<String>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub total_potential_customers: Option<u64>,
    pub serviceable_percent: Option<f64>,
    pub achievable_market_share_percent: Option<f64>,

    // Pricing and sales
    pub price_per_unit: Option<f64>,
    pub pricing_model: Option<PricingModel>,
    pub average_deal_size: Option<f64>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub sales_cycle_months: Option<u32>,
    pub conversion_rate_percent: Option<f64>,

    // Customer economics
    pub gross_margin_percent: Option<f64>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub expected_customer_lifetime_months: Option<u32>,
    pub customer_acquisition_cost: Option<f64>,
    pub monthly_churn_rate_percent: Option<f64>,

    // Go-to-market and bottom-up projection
    pub annual_marketing_spend: Option<f64>,
    pub annual_sales_team_cost: Option<f64>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub year_1_customers: Option<u64>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub year_2_customers: Option<u64>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub year_3_customers: Option<u64>,

    // Competitive reference
    pub competitor_name: Option<String>,
    pub competitor_pricing: Option<f64>,
    pub differentiation_summary: Option<String>,

    // Blend weights (percent; expected to sum near 100, not enforced)
    pub internal_value_weight: Option<f64>,
    pub external_value_weight: Option<f64>,

    // Strategic scores
    /// 1–5.
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub reach_score: Option<u8>,
    /// 0.25–3.
    pub impact_score: Option<f64>,
    /// 1–5.
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub strategic_alignment_score: Option<u8>,
    /// 1–5.
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub differentiation_score: Option<u8>,
    /// 1–5.
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub urgency_score: Option<u8>,
}

impl ValuationInput {
    /// Reads a flat JSON object of named fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidInput`] when `value` is not an object
    /// or a known field holds a value of the wrong type.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ValuationError> {
        if !value.is_object() {
            return Err(ValuationError::InvalidInput {
                message: "expected a JSON object of named valuation fields".to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Confidence label with a missing label resolved to Medium.
    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence_level.unwrap_or_default()
    }
}
