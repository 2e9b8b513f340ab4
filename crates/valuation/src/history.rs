//! Valuation history snapshots and portfolio ranking.
//!
//! Every time a product's valuation is saved, a [`ValuationSnapshot`] records
//! the headline metrics together with the full input/output mapping, so the
//! trend of a product's value can be shown later. Persisting snapshots is the
//! caller's concern; this module only builds them.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ValuationError;
use crate::identifiers::{ProductId, SnapshotId};
use crate::inputs::{ConfidenceLevel, ProductType, ValuationInput};
use crate::outputs::ValuationOutput;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// A point-in-time copy of a product's valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub id: SnapshotId,
    pub product_id: ProductId,
    pub valuation_date: NaiveDate,
    pub confidence_level: ConfidenceLevel,
    pub total_economic_value: Option<f64>,
    pub three_year_revenue_projection: Option<f64>,
    pub strategic_multiplier: Option<f64>,
    pub final_value_low: Option<f64>,
    pub final_value_high: Option<f64>,
    pub rice_score: Option<f64>,
    /// Inputs and outputs merged into one flat object, outputs winning on
    /// key collisions.
    pub snapshot_json: Value,
    pub created_at: Timestamp,
}

impl ValuationSnapshot {
    /// Captures a snapshot of a freshly calculated valuation.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidInput`] if the input or output cannot be
    /// represented as a JSON object.
    pub fn capture(
        product_id: ProductId,
        valuation_date: NaiveDate,
        input: &ValuationInput,
        output: &ValuationOutput,
    ) -> Result<Self, ValuationError> {
        let mut merged = as_object(serde_json::to_value(input)?)?;
        merged.extend(as_object(serde_json::to_value(output)?)?);

        Ok(Self {
            id: SnapshotId::new_random(),
            product_id,
            valuation_date,
            confidence_level: input.confidence(),
            total_economic_value: output.total_economic_value,
            three_year_revenue_projection: output.three_year_revenue_projection,
            strategic_multiplier: output.strategic_multiplier,
            final_value_low: output.final_value_low,
            final_value_high: output.final_value_high,
            rice_score: output.rice_score,
            snapshot_json: Value::Object(merged),
            created_at: Timestamp::now(),
        })
    }
}

fn as_object(value: Value) -> Result<Map<String, Value>, ValuationError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValuationError::InvalidInput {
            message: format!("expected a JSON object, found {other}"),
        }),
    }
}

/// Value a product contributes to cost/ROI analysis: its high final value,
/// or zero when it has never been valued.
pub fn estimated_value_for_product(output: Option<&ValuationOutput>) -> f64 {
    output.and_then(|o| o.final_value_high).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

/// A product and the headline metrics of its current valuation, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub product_status: Option<String>,
    pub product_type: ProductType,
    #[serde(default)]
    pub confidence_level: Option<ConfidenceLevel>,
    #[serde(default)]
    pub total_economic_value: Option<f64>,
    #[serde(default)]
    pub three_year_revenue_projection: Option<f64>,
    #[serde(default)]
    pub strategic_multiplier: Option<f64>,
    #[serde(default)]
    pub final_value_low: Option<f64>,
    #[serde(default)]
    pub final_value_high: Option<f64>,
    #[serde(default)]
    pub rice_score: Option<f64>,
    #[serde(default)]
    pub valuation_date: Option<NaiveDate>,
}

impl PortfolioEntry {
    /// Whether the product has a usable valuation.
    pub fn has_valuation(&self) -> bool {
        self.final_value_high.is_some()
    }
}

/// A portfolio entry with its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    #[serde(flatten)]
    pub entry: PortfolioEntry,
    pub has_valuation: bool,
}

/// Orders products by high final value, highest first, with unvalued products
/// last and ties broken by name.
pub fn rank_portfolio(mut entries: Vec<PortfolioEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| {
        by_value_desc(a.final_value_high, b.final_value_high)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedEntry {
            rank: i + 1,
            has_valuation: entry.has_valuation(),
            entry,
        })
        .collect()
}

fn by_value_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
