//! Product valuation domain.
//!
//! Turns the business inputs collected for a product (time saved, errors
//! avoided, projected customers, strategy scores, a confidence label) into a
//! set of economic-value metrics, and prices the build against that value to
//! recommend whether to build it.
//!
//! ## Architectural Layer
//!
//! **Pure business logic.** This crate has no I/O dependencies. Reading input
//! files, persisting snapshots, and configuring logging belong to the binary.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`inputs`] | `ValuationInput` and its enumerated labels |
//! | [`outputs`] | `ValuationOutput`, the nineteen derived metrics |
//! | [`engine`] | `ValuationEngine` and one module per calculation stage |
//! | [`costing`] | Build cost, ROI, gain/pain, and the recommendation |
//! | [`history`] | Valuation snapshots and portfolio ranking |
//! | [`settings`] | Tunable engine constants |
//! | [`identifiers`] | Newtype identifiers (`ProductId`, `SnapshotId`) |
//! | [`types`] | Shared value types (`ConfidenceBand`, `Bound`, `Timestamp`) |
//! | [`errors`] | Top-level error types |

pub mod costing;
pub mod engine;
pub mod errors;
pub mod history;
pub mod identifiers;
pub mod inputs;
pub mod outputs;
pub mod settings;
pub mod types;

// Re-export the everyday surface at the crate root.
pub use costing::{summarize, Action, CostPlan, CostSummary, HealthColor, Recommendation};
pub use engine::{calculate_all, ValuationEngine};
pub use errors::{SettingsError, ValuationError};
pub use history::{rank_portfolio, PortfolioEntry, RankedEntry, ValuationSnapshot};
pub use identifiers::{ProductId, SnapshotId};
pub use inputs::{AlternativePeriod, ConfidenceLevel, PricingModel, ProductType, ValuationInput};
pub use outputs::ValuationOutput;
pub use settings::EngineSettings;
pub use types::{Bound, ConfidenceBand, Timestamp};
