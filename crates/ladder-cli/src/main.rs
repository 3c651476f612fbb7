//! Ladder CLI - Bond cash flow projection and asset-liability ladders.
//!
//! # Usage
//!
//! ```bash
//! # Dollar schedule of every position
//! ladder schedule --positions positions.csv
//!
//! # Yearly buckets by fund, in thousands
//! ladder buckets -p positions.csv --group-by fund --unit thousands
//!
//! # Net and cumulative ladder against liabilities
//! ladder ladder -p positions.csv --liabilities liabilities.csv -r 2024-12-31
//!
//! # Monthly matrix to a file
//! ladder matrix -p positions.csv --output matrix.csv
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "ladder=debug" } else { "ladder=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let config = cli.config.as_deref();

    match &cli.command {
        Commands::Schedule(args) => commands::schedule::execute(args, config, format)?,
        Commands::Buckets(args) => commands::buckets::execute(args, config, format)?,
        Commands::Ladder(args) => commands::ladder::execute(args, config, format)?,
        Commands::Matrix(args) => commands::matrix::execute(args, config, format)?,
    }

    Ok(())
}
