//! Buckets command implementation.
//!
//! Aggregates projected cash flows by period and group, with optional
//! security-level drill-down.

use std::collections::BTreeSet;
use std::path::Path;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ladder_alm::bucketing::{rows_for_periods, PeriodBucketizer};
use ladder_alm::types::BucketMode;

use crate::cli::OutputFormat;
use crate::commands::{project, ProjectionArgs};
use crate::error::CliResult;
use crate::output::{format_amount, format_opt, print_header, print_output, print_warning};

/// Arguments for the buckets command.
#[derive(Args, Debug)]
pub struct BucketsArgs {
    #[command(flatten)]
    pub projection: ProjectionArgs,

    /// Sum across groups and zero-fill missing periods
    #[arg(long, conflicts_with = "securities")]
    pub totals: bool,

    /// Print security-level rows instead of group cells
    #[arg(long)]
    pub securities: bool,

    /// Restrict security rows to these periods
    #[arg(long = "select", value_delimiter = ',', requires = "securities")]
    pub select: Vec<u32>,
}

/// One `(period, group)` cell.
#[derive(Debug, Serialize, Tabled)]
pub struct CellRow {
    #[tabled(rename = "Period")]
    pub period: u32,
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Coupon")]
    pub coupon: String,
    #[tabled(rename = "Principal")]
    pub principal: String,
}

/// Drill-down row of one position in one period.
#[derive(Debug, Serialize, Tabled)]
pub struct SecurityRow {
    #[tabled(rename = "Period")]
    pub period: u32,
    #[tabled(rename = "Position")]
    pub position_id: String,
    #[tabled(rename = "Security")]
    pub security_name: String,
    #[tabled(rename = "Fund")]
    pub fund_code: String,
    #[tabled(rename = "Asset Type")]
    pub asset_type: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Notional")]
    pub notional: String,
    #[tabled(rename = "Coupon %")]
    pub coupon_rate: String,
    #[tabled(rename = "Freq")]
    pub coupon_frequency: i32,
    #[tabled(rename = "Years")]
    pub time_until_maturity: String,
}

/// Execute the buckets command.
pub fn execute(
    args: &BucketsArgs,
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

    let unit = config.reporting_unit.divisor();
    let bucket = report.bucket.scaled(config.reporting_unit);

    if format == OutputFormat::Table {
        let axis = match config.bucket_mode {
            BucketMode::Year => "years",
            BucketMode::Month => "months",
        };
        print_header(&format!(
            "Cash flows by {axis} from {}",
            projected.reference_date
        ));
    }

    if args.securities {
        let selected: BTreeSet<u32> = args.select.iter().copied().collect();
        let rows = if selected.is_empty() {
            report.rows
        } else {
            rows_for_periods(&report.rows, &selected)
        };
        let rows: Vec<SecurityRow> = rows
            .iter()
            .map(|r| SecurityRow {
                period: r.period,
                position_id: r.position_id.clone(),
                security_name: r.security_name.clone(),
                fund_code: r.fund_code.clone(),
                asset_type: format_opt(r.asset_type.as_deref()),
                value: format_amount(r.value / unit),
                notional: format_amount(r.notional),
                coupon_rate: r.coupon_rate.normalize().to_string(),
                coupon_frequency: r.coupon_frequency,
                time_until_maturity: r
                    .time_until_maturity
                    .map(|t| format!("{t:.2}"))
                    .unwrap_or_default(),
            })
            .collect();
        return print_output(&rows, format);
    }

    let rows: Vec<CellRow> = if args.totals {
        let periods = bucket.periods();
        match (periods.first(), periods.last()) {
            (Some(&first), Some(&last)) => bucket
                .dense_totals(first..=last)
                .into_iter()
                .map(|(period, v)| CellRow {
                    period,
                    group: "Total".to_string(),
                    value: format_amount(v.value),
                    coupon: format_amount(v.coupon),
                    principal: format_amount(v.principal),
                })
                .collect(),
            _ => Vec::new(),
        }
    } else {
        bucket
            .iter()
            .map(|(period, group, v)| CellRow {
                period,
                group: group.to_string(),
                value: format_amount(v.value),
                coupon: format_amount(v.coupon),
                principal: format_amount(v.principal),
            })
            .collect()
    };

    print_output(&rows, format)
}
