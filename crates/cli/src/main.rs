//! Valuator CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Wire observability**: configure `tracing-subscriber` with an
//!    `EnvFilter` and a text or JSON layer. All `tracing` events emitted by the
//!    `valuation` crate flow through this layer to stderr.
//! 2. **Parse configuration**: load the optional TOML settings file and
//!    validate its `[engine]` table.
//! 3. **Construct the engine**: build a `ValuationEngine` from the settings.
//! 4. **Dispatch**: read the request JSON for the chosen subcommand, run it,
//!    and print the report as pretty JSON on stdout.

mod args;
mod commands;
mod config;
mod logging;

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use valuation::{ProductId, ValuationEngine};

use crate::args::{Cli, Command};
use crate::commands::SnapshotTarget;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;

    let config = config::load(cli.config.as_deref())?;
    let engine = ValuationEngine::new(config.engine).context("failed to construct valuation engine")?;
    debug!(settings = ?engine.settings(), "engine ready");

    match cli.command {
        Command::Value {
            input,
            snapshot,
            product_id,
            date,
        } => {
            let target = match (snapshot, product_id) {
                (true, Some(id)) => Some(SnapshotTarget {
                    product_id: ProductId::new(id),
                    valuation_date: date.unwrap_or_else(|| Local::now().date_naive()),
                }),
                _ => None,
            };
            emit(&commands::value(&engine, &read_input(&input)?, target)?)
        }
        Command::Cost { input } => emit(&commands::cost(&read_input(&input)?)?),
        Command::Portfolio { input } => emit(&commands::portfolio(&read_input(&input)?)?),
    }
}

/// Reads a request from `path`, or from stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read request from stdin")?;
        return Ok(contents);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn emit<T: Serialize>(report: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, report).context("failed to write report")?;
    writeln!(stdout).context("failed to write report")?;
    Ok(())
}
