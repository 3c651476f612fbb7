//! Output formatting utilities.

use std::io::Write;

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use ladder_alm::analytics::ProjectionOutcome;

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints a serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_table<T: Tabled>(data: &[T]) -> CliResult<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

fn print_csv<T: Serialize>(data: &[T]) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints a table whose columns are only known at run time.
pub fn print_dynamic(
    header: &[String],
    records: &[Vec<String>],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Csv => write_dynamic_csv(std::io::stdout(), header, records),
        OutputFormat::Table | OutputFormat::Json => {
            if records.is_empty() {
                println!("No results.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(header.iter().cloned());
            for record in records {
                builder.push_record(record.iter().cloned());
            }
            let table = builder
                .build()
                .with(Style::rounded())
                .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{table}");
            Ok(())
        }
    }
}

/// Writes a header and records as CSV.
pub fn write_dynamic_csv<W: Write>(
    writer: W,
    header: &[String],
    records: &[Vec<String>],
) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header)?;
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a currency amount with two decimals.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Formats an optional string, empty when absent.
pub fn format_opt(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Surfaces data-quality signals of a projection on stderr.
pub fn report_outcome(outcome: &ProjectionOutcome) {
    for skipped in &outcome.skipped {
        print_warning(&format!(
            "skipped {}: {}",
            skipped.position_id, skipped.message
        ));
    }
    if !outcome.indeterminate.is_empty() {
        print_warning(&format!(
            "{} position(s) without cash flow data (workout date disagrees with effective maturity): {}",
            outcome.indeterminate.len(),
            outcome.indeterminate.join(", ")
        ));
    }
    if !outcome.zero_notional.is_empty() {
        print_warning(&format!(
            "{} position(s) with zero notional: {}",
            outcome.zero_notional.len(),
            outcome.zero_notional.join(", ")
        ));
    }
    if outcome.over_budget > 0 {
        print_warning(&format!(
            "{} position(s) beyond the position budget were not projected",
            outcome.over_budget
        ));
    }
}
