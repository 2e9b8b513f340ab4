//! Settings file loading.
//!
//! The file is TOML with a single `[engine]` table:
//!
//! ```toml
//! [engine]
//! one_time_amortization_years = 3.0
//! rice_effort_floor_hours = 1.0
//! hours_per_person_week = 40.0
//! ```
//!
//! Every key is optional and falls back to its default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use valuation::EngineSettings;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub engine: EngineSettings,
}

/// Parses and validates settings file contents.
pub fn parse(contents: &str) -> Result<CliConfig> {
    let config: CliConfig = toml::from_str(contents).context("failed to parse settings file")?;
    config
        .engine
        .validate()
        .context("invalid [engine] settings")?;
    Ok(config)
}

/// Loads settings from `path`, or returns defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let config = parse(&contents).with_context(|| format!("in {}", path.display()))?;
    debug!(path = %path.display(), "loaded settings");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn partial_engine_table_keeps_other_defaults() {
        let config = parse("[engine]\nhours_per_person_week = 37.5\n").unwrap();
        assert_eq!(config.engine.hours_per_person_week, 37.5);
        assert_eq!(
            config.engine.one_time_amortization_years,
            EngineSettings::default().one_time_amortization_years
        );
    }

    #[test]
    fn non_positive_values_are_rejected() {
        assert!(parse("[engine]\nrice_effort_floor_hours = 0.0\n").is_err());
    }

    #[test]
    fn unknown_tables_are_rejected() {
        assert!(parse("[server]\nport = 80\n").is_err());
    }

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load(None).unwrap(), CliConfig::default());
    }
}
