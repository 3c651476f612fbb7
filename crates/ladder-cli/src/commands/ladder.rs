//! Ladder command implementation.
//!
//! Combines bucketed asset cash flows with liability series into a
//! period-by-period net and cumulative position.

use std::path::{Path, PathBuf};

use clap::Args;

use ladder_alm::bucketing::PeriodBucketizer;
use ladder_alm::ladder::{LadderCombiner, LiabilitySeries};
use ladder_alm::liability::LiabilityProvider;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, project, ProjectionArgs};
use crate::error::CliResult;
use crate::input::read_liabilities;
use crate::output::{format_amount, print_dynamic, print_header, print_json, print_warning};

/// Arguments for the ladder command.
#[derive(Args, Debug)]
pub struct LadderArgs {
    #[command(flatten)]
    pub projection: ProjectionArgs,

    /// Liability feed (CSV: as_of_date,group_name,period,series,value)
    #[arg(short, long)]
    pub liabilities: Option<PathBuf>,

    /// Liability snapshot date (YYYY-MM-DD). Defaults to the reference date.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Liability groups to include (all when omitted)
    #[arg(long = "group", value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Liability series to include (all when omitted)
    #[arg(long = "series", value_delimiter = ',')]
    pub series: Vec<String>,

    /// Last period shown
    #[arg(long, default_value = "50")]
    pub max_period: u32,
}

/// Execute the ladder command.
pub fn execute(
    args: &LadderArgs,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> CliResult<()> {
    let projected = project(&args.projection, config_path)?;
    let config = &projected.config;

    let report = PeriodBucketizer::from_config(projected.reference_date, config)
        .report(&projected.outcome.projections, config);
    for skipped in &report.skipped {
        print_warning(&format!("skipped {}: {}", skipped.position_id, skipped.message));
    }

    let liabilities = match &args.liabilities {
        Some(path) => {
            let book = read_liabilities(path)?;
            let as_of = match &args.as_of {
                Some(s) => parse_date(s)?,
                None => projected.reference_date,
            };
            let series = book.series_as_of(as_of, &args.groups, &args.series);
            if series.is_empty() {
                print_warning(&format!("no liabilities as of {as_of}"));
            }
            series
        }
        None => LiabilitySeries::new(),
    };

    let divisor = config.reporting_unit.divisor();
    let liabilities: LiabilitySeries = liabilities
        .into_iter()
        .map(|(name, values)| {
            let scaled = values.into_iter().map(|(p, v)| (p, v / divisor)).collect();
            (name, scaled)
        })
        .collect();

    let ladder = LadderCombiner::new(config.asset_series_name.clone())
        .combine(&report.bucket.scaled(config.reporting_unit), &liabilities)
        .zero_filled()
        .truncated(args.max_period);

    if format == OutputFormat::Json {
        return print_json(&ladder);
    }

    if format == OutputFormat::Table {
        print_header(&format!(
            "Cash flow ladder from {}",
            projected.reference_date
        ));
    }

    let mut header = vec!["Period".to_string()];
    header.extend(ladder.series_names.iter().cloned());
    header.push("Net".to_string());
    header.push("Cumulative".to_string());

    let records: Vec<Vec<String>> = ladder
        .rows
        .iter()
        .map(|row| {
            let mut record = vec![row.period.to_string()];
            record.extend(row.values.iter().map(|v| format_amount(*v)));
            record.push(format_amount(row.net_value));
            record.push(format_amount(row.cumulative_net_value));
            record
        })
        .collect();

    print_dynamic(&header, &records, format)
}
