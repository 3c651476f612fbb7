//! CLI command implementations.

pub mod buckets;
pub mod ladder;
pub mod matrix;
pub mod schedule;

pub use buckets::BucketsArgs;
pub use ladder::LadderArgs;
pub use matrix::MatrixArgs;
pub use schedule::ScheduleArgs;

use std::path::{Path, PathBuf};

use clap::Args;

use ladder_alm::analytics::{project_positions, ProjectionOutcome};
use ladder_alm::cache::InMemoryScheduleCache;
use ladder_alm::types::{GroupDimension, ProjectionConfig};
use ladder_core::types::Date;

use crate::cli::{PeriodArg, UnitArg};
use crate::error::{CliError, CliResult};
use crate::input::{load_config, read_overrides, read_positions};
use crate::output::report_outcome;

/// Inputs shared by every command.
#[derive(Args, Debug)]
pub struct ProjectionArgs {
    /// Position feed (CSV)
    #[arg(short, long)]
    pub positions: PathBuf,

    /// Coupon-date override feed (CSV: security_id,category,value)
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Date periods are counted from (YYYY-MM-DD). Defaults to the earliest closing date.
    #[arg(short, long)]
    pub reference_date: Option<String>,

    /// Period axis unit
    #[arg(long, value_enum)]
    pub period: Option<PeriodArg>,

    /// Redeem at maturity even when a call date is set
    #[arg(long)]
    pub to_maturity: bool,

    /// Reporting unit for bucket values
    #[arg(long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Maximum number of positions projected
    #[arg(long)]
    pub max_positions: Option<usize>,

    /// Restrict to these funds
    #[arg(long = "fund", value_delimiter = ',')]
    pub funds: Vec<String>,

    /// Group by these dimensions
    #[arg(long = "group-by", value_delimiter = ',', value_parser = parse_dimension)]
    pub group_by: Vec<GroupDimension>,
}

/// A projected position feed with its settings.
pub struct Projected {
    /// Effective settings.
    pub config: ProjectionConfig,
    /// Projection result.
    pub outcome: ProjectionOutcome,
    /// Date periods are counted from.
    pub reference_date: Date,
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

fn parse_dimension(s: &str) -> Result<GroupDimension, String> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "fund" => Ok(GroupDimension::Fund),
        "asset_type" => Ok(GroupDimension::AssetType),
        "manager" => Ok(GroupDimension::Manager),
        "account" => Ok(GroupDimension::Account),
        "currency" => Ok(GroupDimension::Currency),
        "security" => Ok(GroupDimension::Security),
        other => Err(format!(
            "unknown dimension '{other}' (fund, asset-type, manager, account, currency, security)"
        )),
    }
}

/// Merges command-line flags into file settings.
pub fn effective_config(
    args: &ProjectionArgs,
    config_path: Option<&Path>,
) -> CliResult<ProjectionConfig> {
    let mut config = load_config(config_path)?;

    if let Some(period) = args.period {
        config = config.with_bucket_mode(period.into());
    }
    if args.to_maturity {
        config.schedule = config.schedule.with_to_next_call(false);
    }
    if let Some(unit) = args.unit {
        config = config.with_reporting_unit(unit.into());
    }
    if let Some(max) = args.max_positions {
        config = config.with_max_positions(max);
    }
    if !args.funds.is_empty() {
        config.filter = config.filter.with_funds(args.funds.iter().cloned());
    }
    if !args.group_by.is_empty() {
        config = config.with_grouping(args.group_by.clone());
    }
    Ok(config)
}

/// Loads the feeds and projects every position.
pub fn project(args: &ProjectionArgs, config_path: Option<&Path>) -> CliResult<Projected> {
    let config = effective_config(args, config_path)?;
    let positions = read_positions(&args.positions)?;
    let overrides = read_overrides(args.overrides.as_deref())?;

    let reference_date = match &args.reference_date {
        Some(s) => parse_date(s)?,
        None => positions
            .iter()
            .map(|p| p.closing_date)
            .min()
            .ok_or_else(|| CliError::NoPositions(args.positions.clone()))?,
    };

    let cache = InMemoryScheduleCache::new();
    let outcome = project_positions(&positions, &overrides, &config, &cache);
    report_outcome(&outcome);

    Ok(Projected {
        config,
        outcome,
        reference_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_alm::types::BucketMode;

    fn args() -> ProjectionArgs {
        ProjectionArgs {
            positions: PathBuf::from("positions.csv"),
            overrides: None,
            reference_date: None,
            period: None,
            to_maturity: false,
            unit: None,
            max_positions: None,
            funds: Vec::new(),
            group_by: Vec::new(),
        }
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("asset-type"), Ok(GroupDimension::AssetType));
        assert_eq!(parse_dimension("Fund"), Ok(GroupDimension::Fund));
        assert!(parse_dimension("rating").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut args = args();
        args.period = Some(PeriodArg::Month);
        args.to_maturity = true;
        args.funds = vec!["F100".to_string()];

        let config = effective_config(&args, None).unwrap();
        assert_eq!(config.bucket_mode, BucketMode::Month);
        assert!(!config.schedule.to_next_call);
        assert_eq!(config.filter.funds, vec!["F100".to_string()]);
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-12-31").is_ok());
        assert!(matches!(parse_date("31/12/2024"), Err(CliError::InvalidDate(_))));
    }
}
