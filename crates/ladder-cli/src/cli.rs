//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use ladder_alm::types::{BucketMode, ReportingUnit};

use crate::commands::{BucketsArgs, LadderArgs, MatrixArgs, ScheduleArgs};

/// Ladder - Bond cash flow projection and asset-liability ladders
#[derive(Parser)]
#[command(name = "ladder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Projection settings file (TOML)
    #[arg(short, long, env = "LADDER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Project positions and print per-event dollar schedules
    Schedule(ScheduleArgs),

    /// Aggregate projected cash flows into period buckets
    Buckets(BucketsArgs),

    /// Combine asset buckets with liability series
    Ladder(LadderArgs),

    /// Write the monthly cash flow matrix
    Matrix(MatrixArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Period axis unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    /// Whole years, first future year is 1
    Year,
    /// Whole months, no offset
    Month,
}

impl From<PeriodArg> for BucketMode {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Year => BucketMode::Year,
            PeriodArg::Month => BucketMode::Month,
        }
    }
}

/// Unit asset values are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    /// Currency units
    Units,
    /// Thousands
    Thousands,
    /// Millions
    Millions,
}

impl From<UnitArg> for ReportingUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Units => ReportingUnit::Units,
            UnitArg::Thousands => ReportingUnit::Thousands,
            UnitArg::Millions => ReportingUnit::Millions,
        }
    }
}
