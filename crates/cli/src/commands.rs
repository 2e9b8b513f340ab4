//! Subcommand handlers.
//!
//! Each handler takes the raw request text and returns a serialisable report;
//! reading the request and printing the report are left to `main`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use valuation::costing::{self, HealthColor, TaskEstimate};
use valuation::history::{self, PortfolioEntry, RankedEntry, ValuationSnapshot};
use valuation::{
    CostPlan, CostSummary, ProductId, ProductType, ValuationEngine, ValuationInput,
    ValuationOutput,
};

// ---------------------------------------------------------------------------
// value
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ValueRequest {
    product_type: String,
    #[serde(default)]
    effort_hours: Option<f64>,
    #[serde(default)]
    tasks: Vec<TaskEstimate>,
    #[serde(default)]
    inputs: Option<Value>,
}

/// Where a snapshot should be filed, when one is requested.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotTarget {
    pub product_id: ProductId,
    pub valuation_date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ValueReport {
    Metrics(ValuationOutput),
    Snapshot(Box<ValuationSnapshot>),
}

pub fn value(
    engine: &ValuationEngine,
    request: &str,
    snapshot: Option<SnapshotTarget>,
) -> Result<ValueReport> {
    let request: ValueRequest =
        serde_json::from_str(request).context("failed to parse valuation request")?;
    let product_type: ProductType = request.product_type.parse()?;
    let input = ValuationInput::from_json_value(
        request.inputs.unwrap_or_else(|| Value::Object(Map::new())),
    )
    .context("invalid valuation inputs")?;

    let effort_hours = request.effort_hours.or_else(|| {
        (!request.tasks.is_empty()).then(|| costing::effort_hours(&request.tasks))
    });
    let output = engine.calculate(&input, product_type, effort_hours);

    info!(
        %product_type,
        final_value_high = ?output.final_value_high,
        "valuation complete"
    );

    match snapshot {
        Some(target) => {
            let snapshot = ValuationSnapshot::capture(
                target.product_id,
                target.valuation_date,
                &input,
                &output,
            )?;
            info!(snapshot_id = %snapshot.id, product_id = %snapshot.product_id, "snapshot captured");
            Ok(ValueReport::Snapshot(Box::new(snapshot)))
        }
        None => Ok(ValueReport::Metrics(output)),
    }
}

// ---------------------------------------------------------------------------
// cost
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CostRequest {
    #[serde(flatten)]
    plan: CostPlan,
    /// Valuation supplying the estimated value when the plan carries none.
    #[serde(default)]
    valuation: Option<ValuationOutput>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub color: HealthColor,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CostReport {
    #[serde(flatten)]
    pub summary: CostSummary,
    pub health: Health,
}

pub fn cost(request: &str) -> Result<CostReport> {
    let CostRequest {
        mut plan,
        valuation,
    } = serde_json::from_str(request).context("failed to parse cost plan")?;
    if plan.estimated_value == 0.0 {
        plan.estimated_value = history::estimated_value_for_product(valuation.as_ref());
    }

    let summary = costing::summarize(&plan);
    let (color, label) = costing::health_from_roi(summary.roi_percent.mid().finite());

    info!(
        total_cost_max = summary.overhead.total_max,
        action = summary.recommendation.action.label(),
        "cost summary complete"
    );

    Ok(CostReport {
        summary,
        health: Health { color, label },
    })
}

// ---------------------------------------------------------------------------
// portfolio
// ---------------------------------------------------------------------------

pub fn portfolio(request: &str) -> Result<Vec<RankedEntry>> {
    let entries: Vec<PortfolioEntry> =
        serde_json::from_str(request).context("failed to parse portfolio entries")?;
    let ranked = history::rank_portfolio(entries);
    info!(
        products = ranked.len(),
        valued = ranked.iter().filter(|r| r.has_valuation).count(),
        "portfolio ranked"
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use valuation::Action;

    #[test]
    fn value_sums_task_hours_when_effort_is_absent() {
        let request = r#"{
            "product_type": "internal",
            "tasks": [
                {"name": "a", "estimated_hours": 100, "hourly_cost_min": 50, "hourly_cost_max": 80},
                {"name": "b", "estimated_hours": 60, "hourly_cost_min": 50, "hourly_cost_max": 80}
            ],
            "inputs": {"reach_score": 5, "impact_score": 2, "confidence_level": "Medium"}
        }"#;
        let report = value(&ValuationEngine::default(), request, None).unwrap();
        let ValueReport::Metrics(output) = report else {
            panic!("expected metrics");
        };
        // 5 × 2 × 0.8 / (160 / 40)
        assert_eq!(output.rice_score, Some(2.0));
    }

    #[test]
    fn value_rejects_unknown_product_type() {
        let request = r#"{"product_type": "hybrid", "inputs": {}}"#;
        assert!(value(&ValuationEngine::default(), request, None).is_err());
    }

    #[test]
    fn value_without_inputs_yields_empty_metrics() {
        let report = value(&ValuationEngine::default(), r#"{"product_type": "Both"}"#, None).unwrap();
        let ValueReport::Metrics(output) = report else {
            panic!("expected metrics");
        };
        assert_eq!(output, ValuationOutput::default());
    }

    #[test]
    fn value_snapshot_carries_target() {
        let target = SnapshotTarget {
            product_id: ProductId::new(3),
            valuation_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        };
        let request = r#"{"product_type": "External", "inputs": {"confidence_level": "Low"}}"#;
        let report = value(&ValuationEngine::default(), request, Some(target)).unwrap();
        let ValueReport::Snapshot(snapshot) = report else {
            panic!("expected snapshot");
        };
        assert_eq!(snapshot.product_id, ProductId::new(3));
        assert_eq!(snapshot.valuation_date, target.valuation_date);
    }

    #[test]
    fn cost_takes_estimated_value_from_valuation() {
        let request = r#"{
            "tasks": [{"name": "a", "estimated_hours": 10, "hourly_cost_min": 100, "hourly_cost_max": 100}],
            "valuation": {"final_value_high": 5000}
        }"#;
        let report = cost(request).unwrap();
        assert_eq!(report.summary.estimated_value, 5_000.0);
        assert_eq!(report.summary.recommendation.action, Action::Build);
        assert_eq!(report.health.label, "BUILD");
    }

    #[test]
    fn portfolio_ranks_entries() {
        let request = r#"[
            {"product_id": 1, "product_name": "B", "product_type": "Internal"},
            {"product_id": 2, "product_name": "A", "product_type": "External", "final_value_high": 10}
        ]"#;
        let ranked = portfolio(request).unwrap();
        assert_eq!(ranked[0].entry.product_name, "A");
        assert!(!ranked[1].has_valuation);
    }

    #[test]
    fn portfolio_accepts_lowercase_product_types() {
        let request = r#"[
            {"product_id": 1, "product_name": "A", "product_type": "internal"},
            {"product_id": 2, "product_name": "B", "product_type": "BOTH"}
        ]"#;
        let ranked = portfolio(request).unwrap();
        assert_eq!(ranked[0].entry.product_type, ProductType::Internal);
        assert_eq!(ranked[1].entry.product_type, ProductType::Both);
    }

    #[test]
    fn value_accepts_whole_number_floats_for_counts() {
        let request = r#"{
            "product_type": "Internal",
            "inputs": {"hours_saved_per_user_per_week": 5, "number_of_affected_users": 20.0, "average_hourly_cost": 50}
        }"#;
        let report = value(&ValuationEngine::default(), request, None).unwrap();
        let ValueReport::Metrics(output) = report else {
            panic!("expected metrics");
        };
        // 5 × 20 × 50 × 52
        assert_eq!(output.annual_time_savings_value, Some(260_000.0));
    }
}
