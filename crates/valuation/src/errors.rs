//! Error types for the valuation domain.
//!
//! The calculation path itself never fails: missing data propagates as `None`
//! and unrecognised enumerated labels resolve to documented defaults. The
//! errors here cover the edges where a caller hands the crate something it
//! cannot interpret at all: an unknown product type, malformed settings, or
//! an input mapping that is not a JSON object.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Settings errors
// ---------------------------------------------------------------------------

/// A rejected [`crate::EngineSettings`] value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// The named setting must be a finite, strictly positive number.
    #[error("Setting '{name}' must be finite and greater than zero (got {value})")]
    NotPositive {
        /// Setting key as it appears in the settings file.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

// ---------------------------------------------------------------------------
// Top-level errors
// ---------------------------------------------------------------------------

/// Errors raised at the boundary of the valuation crate.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// The product type label is not one of `Internal`, `External`, `Both`.
    #[error("Unknown product type '{label}' (expected Internal, External or Both)")]
    UnknownProductType {
        /// The label that failed to parse.
        label: String,
    },

    /// Engine settings failed validation.
    #[error("Invalid engine settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    /// The supplied input mapping could not be read as valuation fields.
    #[error("Invalid valuation input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the mapping.
        message: String,
    },
}

impl From<serde_json::Error> for ValuationError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput {
            message: err.to_string(),
        }
    }
}
