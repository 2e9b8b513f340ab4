//! Shared value types for the valuation domain.
//!
//! Unlike the plain `Option<f64>` metrics on [`crate::ValuationOutput`], these
//! types carry a small invariant of their own (an ordered band, a ratio that
//! may be unbounded, a UTC instant) and participate in several modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Confidence band
// ---------------------------------------------------------------------------

/// A `(low, high)` pair of multipliers applied to a value to express how sure
/// the estimator is about it.
///
/// Always satisfies `0 < low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Multiplier for the pessimistic end of the range.
    pub low: f64,
    /// Multiplier for the optimistic end of the range.
    pub high: f64,
}

impl ConfidenceBand {
    pub(crate) const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Width of the band (`high - low`).
    pub fn width(self) -> f64 {
        self.high - self.low
    }
}

// ---------------------------------------------------------------------------
// Bounded / unbounded ratios
// ---------------------------------------------------------------------------

/// A ratio that is either a finite number or unbounded because its
/// denominator (a cost) is zero.
///
/// Used for ROI and gain/pain in place of IEEE infinity, so nothing downstream
/// ever has to compare against `f64::INFINITY`. Serialises as the number, or
/// `null` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// A well-defined value.
    Finite(f64),
    /// The denominator was zero while the numerator was not.
    Unbounded,
}

impl Bound {
    /// Returns the finite value, or `None` when unbounded.
    pub fn finite(self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(v),
            Bound::Unbounded => None,
        }
    }

    /// Returns the finite value, substituting `cap` when unbounded.
    pub fn or_cap(self, cap: f64) -> f64 {
        self.finite().unwrap_or(cap)
    }

    /// Returns `true` for [`Bound::Unbounded`].
    pub fn is_unbounded(self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Finite(v) => serializer.serialize_some(v),
            Bound::Unbounded => serializer.serialize_none(),
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Finite(v) => write!(f, "{v:.2}"),
            Bound::Unbounded => write!(f, "unbounded"),
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_serialises_as_null() {
        assert_eq!(serde_json::to_string(&Bound::Unbounded).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Bound::Finite(12.5)).unwrap(), "12.5");
    }

    #[test]
    fn or_cap_only_replaces_unbounded() {
        assert_eq!(Bound::Unbounded.or_cap(1000.0), 1000.0);
        assert_eq!(Bound::Finite(-20.0).or_cap(1000.0), -20.0);
    }

    #[test]
    fn timestamp_wraps_and_returns_the_same_instant() {
        let dt = DateTime::parse_from_rfc3339("2026-03-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_utc(dt);
        assert_eq!(ts.as_datetime(), dt);
        assert_eq!(ts.to_string(), "2026-03-01T12:30:00+00:00");

        let back: Timestamp = serde_json::from_str(&serde_json::to_string(&ts).unwrap()).unwrap();
        assert_eq!(back.as_datetime(), dt);
    }
}
