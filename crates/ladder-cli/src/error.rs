//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use ladder_alm::AlmError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Input file could not be read or parsed.
    #[error("Cannot read {path}: {reason}")]
    Input {
        /// File being read.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Nothing to project.
    #[error("No positions found in {0}")]
    NoPositions(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Projection error.
    #[error(transparent)]
    Projection(#[from] AlmError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Creates an input error for `path`.
    pub fn input(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Input {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
