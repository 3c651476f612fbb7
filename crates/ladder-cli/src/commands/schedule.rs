//! Schedule command implementation.
//!
//! Prints the dollar cash flow events of every projected position.

use std::path::Path;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ladder_core::types::CashflowKind;

use crate::cli::OutputFormat;
use crate::commands::{project, ProjectionArgs};
use crate::error::CliResult;
use crate::output::{format_amount, print_output};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub projection: ProjectionArgs,

    /// Only print this position
    #[arg(long)]
    pub position: Option<String>,
}

/// One cash flow event of a position.
#[derive(Debug, Serialize, Tabled)]
pub struct EventRow {
    #[tabled(rename = "Position")]
    pub position_id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Coupon %")]
    pub coupon_pct: String,
    #[tabled(rename = "Principal %")]
    pub principal_pct: String,
    #[tabled(rename = "Coupon")]
    pub coupon: String,
    #[tabled(rename = "Principal")]
    pub principal: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
}

/// Execute the schedule command.
pub fn execute(
    args: &ScheduleArgs,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> CliResult<()> {
    let projected = project(&args.projection, config_path)?;

    let rows: Vec<EventRow> = projected
        .outcome
        .projections
        .iter()
        .filter(|p| {
            args.position
                .as_deref()
                .map_or(true, |id| p.terms.position_id == id)
        })
        .flat_map(|p| {
            p.schedule
                .iter()
                .zip(p.dollars.iter())
                .map(move |(event, flow)| EventRow {
                    position_id: p.terms.position_id.clone(),
                    date: flow.date().to_string(),
                    kind: match flow.kind() {
                        CashflowKind::Coupon => "coupon".to_string(),
                        CashflowKind::Terminal => "terminal".to_string(),
                    },
                    coupon_pct: event.coupon_pct().normalize().to_string(),
                    principal_pct: event.principal_pct().normalize().to_string(),
                    coupon: format_amount(flow.coupon()),
                    principal: format_amount(flow.principal()),
                    amount: format_amount(flow.amount()),
                })
        })
        .collect();

    print_output(&rows, format)
}
