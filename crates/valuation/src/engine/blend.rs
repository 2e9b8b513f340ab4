//! Combines internal and external value into a single total, according to
//! the product type.

use crate::engine::{finite, fraction, nonzero};
use crate::inputs::{ProductType, ValuationInput};

const DEFAULT_WEIGHT_PERCENT: f64 = 50.0;

/// How the two value streams are combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendStrategy {
    /// Internal net value only.
    InternalOnly,
    /// External revenue only (net when known, else gross).
    ExternalOnly,
    /// `internal × internal_weight + external × external_weight`, weights as fractions.
    Weighted { internal: f64, external: f64 },
}

impl BlendStrategy {
    /// Picks the strategy for `product_type`, reading the blend weights from
    /// `input` for [`ProductType::Both`]. A missing or zero weight defaults to 50%.
    pub fn for_product(product_type: ProductType, input: &ValuationInput) -> Self {
        match product_type {
            ProductType::Internal => BlendStrategy::InternalOnly,
            ProductType::External => BlendStrategy::ExternalOnly,
            ProductType::Both => BlendStrategy::Weighted {
                internal: fraction(nonzero(input.internal_value_weight).unwrap_or(DEFAULT_WEIGHT_PERCENT)),
                external: fraction(nonzero(input.external_value_weight).unwrap_or(DEFAULT_WEIGHT_PERCENT)),
            },
        }
    }

    /// Total economic value.
    ///
    /// - internal only: the internal total when positive.
    /// - external only: the external headline as-is (may be negative).
    /// - weighted: a non-positive internal total and a missing external value
    ///   both count as zero; the result is `None` when neither side is positive.
    pub fn apply(self, internal_total: f64, external: Option<f64>) -> Option<f64> {
        match self {
            BlendStrategy::InternalOnly => finite(internal_total).filter(|v| *v > 0.0),
            BlendStrategy::ExternalOnly => external.and_then(finite),
            BlendStrategy::Weighted {
                internal: internal_weight,
                external: external_weight,
            } => {
                let internal = if internal_total > 0.0 { internal_total } else { 0.0 };
                let external = external.unwrap_or(0.0);
                if !(internal > 0.0 || external > 0.0) {
                    return None;
                }
                finite(internal * internal_weight + external * external_weight)
            }
        }
    }
}

/// Blends the stage results for `product_type`.
pub fn total_economic_value(
    product_type: ProductType,
    input: &ValuationInput,
    internal_total: f64,
    external: Option<f64>,
) -> Option<f64> {
    BlendStrategy::for_product(product_type, input).apply(internal_total, external)
}
