//! Matrix command implementation.
//!
//! Writes one row per position with a column per calendar month.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Args;

use ladder_alm::matrix::CashflowMatrix;

use crate::cli::OutputFormat;
use crate::commands::{project, ProjectionArgs};
use crate::error::{CliError, CliResult};
use crate::output::{format_amount, print_dynamic, print_json, write_dynamic_csv};

/// Arguments for the matrix command.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub projection: ProjectionArgs,

    /// Write CSV to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

const IDENTITY_COLUMNS: [&str; 11] = [
    "position_id",
    "fund_code",
    "asset_type",
    "account_code",
    "security_name",
    "security_id",
    "currency",
    "fx_rate",
    "coupon_rate",
    "coupon_frequency",
    "notional",
];

fn header(matrix: &CashflowMatrix) -> Vec<String> {
    IDENTITY_COLUMNS
        .iter()
        .map(|c| (*c).to_string())
        .chain(matrix.months.iter().cloned())
        .collect()
}

fn records(matrix: &CashflowMatrix) -> Vec<Vec<String>> {
    matrix
        .rows
        .iter()
        .map(|row| {
            let mut record = vec![
                row.position_id.clone(),
                row.fund_code.clone(),
                row.asset_type.clone().unwrap_or_default(),
                row.account_code.clone().unwrap_or_default(),
                row.security_name.clone(),
                row.security_id.clone().unwrap_or_default(),
                row.currency.clone(),
                row.fx_rate.normalize().to_string(),
                row.coupon_rate.normalize().to_string(),
                row.coupon_frequency.to_string(),
                format_amount(row.notional),
            ];
            record.extend(
                row.cells
                    .iter()
                    .map(|cell| cell.map(format_amount).unwrap_or_default()),
            );
            record
        })
        .collect()
}

/// Execute the matrix command.
pub fn execute(
    args: &MatrixArgs,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> CliResult<()> {
    let projected = project(&args.projection, config_path)?;
    let matrix = CashflowMatrix::from_projections(&projected.outcome.projections);
    tracing::info!(
        rows = matrix.rows.len(),
        months = matrix.months.len(),
        "built cash flow matrix"
    );

    if let Some(path) = &args.output {
        let file = File::create(path).map_err(|e| CliError::input(path, e))?;
        write_dynamic_csv(file, &header(&matrix), &records(&matrix))?;
        eprintln!("Wrote {} rows to {}", matrix.rows.len(), path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json(&matrix),
        OutputFormat::Table | OutputFormat::Csv => {
            print_dynamic(&header(&matrix), &records(&matrix), format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_alm::matrix::MatrixRow;
    use rust_decimal_macros::dec;

    #[test]
    fn test_records_leave_unpaid_months_blank() {
        let matrix = CashflowMatrix {
            months: vec!["2024-12".to_string(), "2025-01".to_string()],
            rows: vec![MatrixRow {
                position_id: "P1".to_string(),
                fund_code: "F100".to_string(),
                asset_type: None,
                account_code: None,
                security_name: "Bond".to_string(),
                security_id: Some("SEC1".to_string()),
                currency: "USD".to_string(),
                fx_rate: dec!(1),
                coupon_rate: dec!(4.00),
                coupon_frequency: 2,
                notional: dec!(1000000),
                cells: vec![Some(dec!(20000)), None],
            }],
        };

        let header = header(&matrix);
        assert_eq!(header.len(), IDENTITY_COLUMNS.len() + 2);
        assert_eq!(header.last().map(String::as_str), Some("2025-01"));

        let records = records(&matrix);
        assert_eq!(records[0][8], "4");
        assert_eq!(records[0][11], "20000.00");
        assert_eq!(records[0][12], "");
    }
}
