//! Build cost, ROI, and the Build / Consider / Defer / Kill recommendation.
//!
//! Cost comes from two sources: labour (estimated hours per task at the
//! assigned position's hourly rate range) and software (each tool's monthly
//! cost times the share allocated to the product). A service fee is applied
//! on top. Comparing the product's estimated value to the resulting cost
//! range gives ROI and gain/pain ranges, and the midpoint ROI picks the
//! recommendation.
//!
//! ROI and gain/pain divide by cost, so a zero cost is modelled as
//! [`Bound::Unbounded`] rather than as an IEEE infinity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Bound;

/// Actual/estimated ratio below which a task is running under budget.
pub const UNDER_THRESHOLD: f64 = 0.9;
/// Actual/estimated ratio above which a task is running over budget.
pub const OVER_THRESHOLD: f64 = 1.1;

/// Value substituted for an unbounded ROI percentage when ranking.
pub const UNBOUNDED_ROI_PERCENT: f64 = 1000.0;
/// Value substituted for an unbounded gain/pain ratio when ranking.
pub const UNBOUNDED_GAIN_PAIN: f64 = 100.0;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// One unit of estimated work, priced at its position's hourly rate range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEstimate {
    pub name: String,
    #[serde(default)]
    pub position_title: String,
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    pub hourly_cost_min: f64,
    pub hourly_cost_max: f64,
}

/// Estimated and actual cost of a task at both ends of the rate range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskCosts {
    pub task_cost_min: f64,
    pub task_cost_max: f64,
    pub actual_cost_min: f64,
    pub actual_cost_max: f64,
}

/// Progress of logged hours against the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursStatus {
    NotStarted,
    Under,
    OnTrack,
    Over,
}

/// A task with its costs and progress worked out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskLine {
    pub name: String,
    pub position_title: String,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub hours_progress: f64,
    pub hours_status: HoursStatus,
    pub hourly_cost_min: f64,
    pub hourly_cost_max: f64,
    #[serde(flatten)]
    pub costs: TaskCosts,
}

impl TaskLine {
    pub fn from_task(task: &TaskEstimate) -> Self {
        let actual = task.actual_hours.unwrap_or(0.0);
        Self {
            name: task.name.clone(),
            position_title: task.position_title.clone(),
            estimated_hours: task.estimated_hours,
            actual_hours: actual,
            hours_progress: hours_progress(actual, task.estimated_hours),
            hours_status: hours_status(actual, task.estimated_hours),
            hourly_cost_min: task.hourly_cost_min,
            hourly_cost_max: task.hourly_cost_max,
            costs: task_costs(task),
        }
    }
}

/// Prices a task's estimated and logged hours.
pub fn task_costs(task: &TaskEstimate) -> TaskCosts {
    let actual = task.actual_hours.unwrap_or(0.0);
    TaskCosts {
        task_cost_min: task.estimated_hours * task.hourly_cost_min,
        task_cost_max: task.estimated_hours * task.hourly_cost_max,
        actual_cost_min: actual * task.hourly_cost_min,
        actual_cost_max: actual * task.hourly_cost_max,
    }
}

/// Logged hours as a percentage of the estimate, to one decimal place.
/// Zero when there is no positive estimate.
pub fn hours_progress(actual_hours: f64, estimated_hours: f64) -> f64 {
    if estimated_hours <= 0.0 {
        return 0.0;
    }
    (actual_hours / estimated_hours * 1000.0).round() / 10.0
}

/// Classifies logged hours against the estimate.
pub fn hours_status(actual_hours: f64, estimated_hours: f64) -> HoursStatus {
    if actual_hours == 0.0 || estimated_hours <= 0.0 {
        return HoursStatus::NotStarted;
    }
    let ratio = actual_hours / estimated_hours;
    if ratio < UNDER_THRESHOLD {
        HoursStatus::Under
    } else if ratio <= OVER_THRESHOLD {
        HoursStatus::OnTrack
    } else {
        HoursStatus::Over
    }
}

/// Total estimated build effort, the figure RICE divides by.
pub fn effort_hours(tasks: &[TaskEstimate]) -> f64 {
    tasks.iter().map(|t| t.estimated_hours).sum()
}

// ---------------------------------------------------------------------------
// Software and fees
// ---------------------------------------------------------------------------

/// A share of a software subscription charged to the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareAllocation {
    pub software_name: String,
    pub monthly_cost: f64,
    pub allocation_percent: f64,
}

impl SoftwareAllocation {
    /// Monthly cost charged to the product.
    pub fn allocated_cost(&self) -> f64 {
        self.monthly_cost * self.allocation_percent / 100.0
    }
}

/// Labour plus software, with the service fee applied on top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheadAndFees {
    pub overhead_min: f64,
    pub overhead_max: f64,
    pub fee_percent: f64,
    pub fee_amount_min: f64,
    pub fee_amount_max: f64,
    pub total_min: f64,
    pub total_max: f64,
}

pub fn overhead_and_fees(
    labor_cost_min: f64,
    labor_cost_max: f64,
    software_cost: f64,
    fee_percent: f64,
) -> OverheadAndFees {
    let overhead_min = labor_cost_min + software_cost;
    let overhead_max = labor_cost_max + software_cost;
    let fee_amount_min = overhead_min * fee_percent / 100.0;
    let fee_amount_max = overhead_max * fee_percent / 100.0;
    OverheadAndFees {
        overhead_min,
        overhead_max,
        fee_percent,
        fee_amount_min,
        fee_amount_max,
        total_min: overhead_min + fee_amount_min,
        total_max: overhead_max + fee_amount_max,
    }
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

/// A service department sharing the product's cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub department_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub allocation_percent: Option<f64>,
}

/// A department's share of the total cost range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCost {
    pub department_name: String,
    pub role: String,
    pub allocation_percent: f64,
    pub cost_min: f64,
    pub cost_max: f64,
}

/// Splits the total cost across departments by their allocation percent, or
/// evenly when no department has one. Empty when there is nothing to split.
pub fn department_breakdown(
    total_min: f64,
    total_max: f64,
    departments: &[Department],
) -> Vec<DepartmentCost> {
    if departments.is_empty() || total_max <= 0.0 {
        return Vec::new();
    }
    let has_allocations = departments
        .iter()
        .any(|d| d.allocation_percent.is_some_and(|pct| pct != 0.0));
    let equal_share = 100.0 / departments.len() as f64;

    departments
        .iter()
        .map(|d| {
            let pct = if has_allocations {
                d.allocation_percent.unwrap_or(0.0)
            } else {
                equal_share
            };
            DepartmentCost {
                department_name: d.department_name.clone(),
                role: d.role.clone(),
                allocation_percent: pct,
                cost_min: total_min * pct / 100.0,
                cost_max: total_max * pct / 100.0,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ROI and gain/pain
// ---------------------------------------------------------------------------

/// A pessimistic/optimistic pair computed against the max/min cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundRange {
    pub low: Bound,
    pub high: Bound,
}

impl BoundRange {
    /// Midpoint of the range; the low end alone when the high end is unbounded.
    pub fn mid(self) -> Bound {
        match (self.low, self.high) {
            (Bound::Finite(low), Bound::Finite(high)) => Bound::Finite((low + high) / 2.0),
            (low, Bound::Unbounded) => low,
            (Bound::Unbounded, Bound::Finite(_)) => Bound::Unbounded,
        }
    }
}

fn ratio_range(value: f64, cost_min: f64, cost_max: f64, ratio: impl Fn(f64) -> f64) -> BoundRange {
    if cost_max <= 0.0 {
        let both = if value == 0.0 { Bound::Finite(0.0) } else { Bound::Unbounded };
        return BoundRange { low: both, high: both };
    }
    BoundRange {
        low: Bound::Finite(ratio(cost_max)),
        high: if cost_min > 0.0 {
            Bound::Finite(ratio(cost_min))
        } else {
            Bound::Unbounded
        },
    }
}

/// ROI percentage range: low against the max cost, high against the min cost.
pub fn roi(estimated_value: f64, cost_min: f64, cost_max: f64) -> BoundRange {
    ratio_range(estimated_value, cost_min, cost_max, |cost| {
        (estimated_value - cost) / cost * 100.0
    })
}

/// Value-to-cost ratio range: low against the max cost, high against the min cost.
pub fn gain_pain(estimated_value: f64, cost_min: f64, cost_max: f64) -> BoundRange {
    ratio_range(estimated_value, cost_min, cost_max, |cost| estimated_value / cost)
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// What to do with the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Build,
    Consider,
    Defer,
    Kill,
}

/// Traffic-light colour shown next to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthColor {
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl Action {
    /// Action for a midpoint ROI percentage.
    pub fn from_roi_mid(roi_mid: f64) -> Self {
        if roi_mid >= 100.0 {
            Action::Build
        } else if roi_mid >= 50.0 {
            Action::Consider
        } else if roi_mid >= 0.0 {
            Action::Defer
        } else {
            Action::Kill
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Build => "BUILD",
            Action::Consider => "CONSIDER",
            Action::Defer => "DEFER",
            Action::Kill => "KILL",
        }
    }

    pub fn color(self) -> HealthColor {
        match self {
            Action::Build => HealthColor::Green,
            Action::Consider => HealthColor::Yellow,
            Action::Defer => HealthColor::Orange,
            Action::Kill => HealthColor::Red,
        }
    }
}

/// An action with its colour and a one-line justification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub action: Action,
    pub color: HealthColor,
    pub reasoning: String,
}

/// Recommends an action from the ROI range and the gain/pain midpoint.
///
/// Unbounded figures are capped at [`UNBOUNDED_ROI_PERCENT`] and
/// [`UNBOUNDED_GAIN_PAIN`] before comparison.
pub fn recommend(roi: BoundRange, gain_pain_mid: Bound) -> Recommendation {
    let low = roi.low.or_cap(UNBOUNDED_ROI_PERCENT);
    let high = roi.high.or_cap(UNBOUNDED_ROI_PERCENT);
    let gain_pain = gain_pain_mid.or_cap(UNBOUNDED_GAIN_PAIN);
    let action = Action::from_roi_mid((low + high) / 2.0);

    let reasoning = match action {
        Action::Build => format!(
            "Strong ROI range of {low:.0}%-{high:.0}% justifies investment. \
             Gain/Pain ratio of {gain_pain:.1}x indicates clear value."
        ),
        Action::Consider => format!(
            "Moderate ROI range of {low:.0}%-{high:.0}%. Consider if strategic value \
             justifies investment or if costs can be reduced."
        ),
        Action::Defer => format!(
            "Low ROI range of {low:.0}%-{high:.0}%. Defer until value proposition \
             improves or costs decrease significantly."
        ),
        Action::Kill => format!(
            "Negative ROI range of {low:.0}%-{high:.0}%. Costs exceed projected value. \
             Recommend not proceeding."
        ),
    };

    Recommendation {
        action,
        color: action.color(),
        reasoning,
    }
}

/// Dashboard health for a midpoint ROI; gray "N/A" when there is none.
pub fn health_from_roi(roi_mid: Option<f64>) -> (HealthColor, &'static str) {
    match roi_mid {
        Some(mid) => {
            let action = Action::from_roi_mid(mid);
            (action.color(), action.label())
        }
        None => (HealthColor::Gray, "N/A"),
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Everything needed to cost a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPlan {
    pub tasks: Vec<TaskEstimate>,
    pub software: Vec<SoftwareAllocation>,
    pub departments: Vec<Department>,
    pub fee_percent: f64,
    /// Value the product is expected to deliver (typically the valuation's
    /// high final value).
    pub estimated_value: f64,
}

/// Aggregated cost picture of a product with its recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub tasks: Vec<TaskLine>,
    pub department_cost_breakdown: Vec<DepartmentCost>,
    pub total_hours: f64,
    pub total_actual_hours: f64,
    pub overall_hours_progress: f64,
    pub overall_hours_status: HoursStatus,
    pub total_labor_cost_min: f64,
    pub total_labor_cost_max: f64,
    pub total_actual_labor_cost_min: f64,
    pub total_actual_labor_cost_max: f64,
    pub total_software_cost: f64,
    pub overhead: OverheadAndFees,
    pub total_actual_cost_min: f64,
    pub total_actual_cost_max: f64,
    pub estimated_value: f64,
    pub roi_percent: BoundRange,
    pub gain_pain_ratio: BoundRange,
    pub recommendation: Recommendation,
}

/// Costs every task and allocation in `plan` and recommends an action.
pub fn summarize(plan: &CostPlan) -> CostSummary {
    let tasks: Vec<TaskLine> = plan.tasks.iter().map(TaskLine::from_task).collect();

    let total_hours: f64 = tasks.iter().map(|t| t.estimated_hours).sum();
    let total_actual_hours: f64 = tasks.iter().map(|t| t.actual_hours).sum();
    let labor = tasks.iter().fold(TaskCosts::default(), |acc, t| TaskCosts {
        task_cost_min: acc.task_cost_min + t.costs.task_cost_min,
        task_cost_max: acc.task_cost_max + t.costs.task_cost_max,
        actual_cost_min: acc.actual_cost_min + t.costs.actual_cost_min,
        actual_cost_max: acc.actual_cost_max + t.costs.actual_cost_max,
    });
    let total_software_cost: f64 = plan.software.iter().map(SoftwareAllocation::allocated_cost).sum();

    let overhead = overhead_and_fees(
        labor.task_cost_min,
        labor.task_cost_max,
        total_software_cost,
        plan.fee_percent,
    );
    let roi_percent = roi(plan.estimated_value, overhead.total_min, overhead.total_max);
    let gain_pain_ratio = gain_pain(plan.estimated_value, overhead.total_min, overhead.total_max);
    let recommendation = recommend(roi_percent, gain_pain_ratio.mid());

    debug!(
        tasks = tasks.len(),
        total_hours,
        total_cost_max = overhead.total_max,
        action = recommendation.action.label(),
        "cost summary computed"
    );

    CostSummary {
        department_cost_breakdown: department_breakdown(
            overhead.total_min,
            overhead.total_max,
            &plan.departments,
        ),
        overall_hours_progress: hours_progress(total_actual_hours, total_hours),
        overall_hours_status: hours_status(total_actual_hours, total_hours),
        tasks,
        total_hours,
        total_actual_hours,
        total_labor_cost_min: labor.task_cost_min,
        total_labor_cost_max: labor.task_cost_max,
        total_actual_labor_cost_min: labor.actual_cost_min,
        total_actual_labor_cost_max: labor.actual_cost_max,
        total_software_cost,
        total_actual_cost_min: labor.actual_cost_min + total_software_cost,
        total_actual_cost_max: labor.actual_cost_max + total_software_cost,
        overhead,
        estimated_value: plan.estimated_value,
        roi_percent,
        gain_pain_ratio,
        recommendation,
    }
}
