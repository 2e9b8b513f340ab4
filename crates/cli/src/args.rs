//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "valuator")]
#[command(about = "Estimate product value and recommend whether to build it", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file with an [engine] table
    #[arg(long, global = true, env = "VALUATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive every valuation metric for one product
    Value {
        /// Valuation request JSON file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Print a history snapshot instead of the bare metrics
        #[arg(long, requires = "product_id")]
        snapshot: bool,

        /// Product the snapshot belongs to
        #[arg(long)]
        product_id: Option<u64>,

        /// Valuation date recorded on the snapshot (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Cost a product build and recommend an action
    Cost {
        /// Cost plan JSON file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Rank products by their high final value
    Portfolio {
        /// Portfolio entries JSON file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,
    },
}
