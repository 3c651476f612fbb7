//! Error types for asset-liability projection.

use thiserror::Error;

use ladder_bonds::BondError;
use ladder_core::CoreError;

/// Result type for projection operations.
pub type AlmResult<T> = Result<T, AlmError>;

/// Errors that can occur while projecting and aggregating a portfolio.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlmError {
    /// A cash flow is dated before the bucketing reference date.
    #[error("Cash flow of position '{position_id}' on {event_date} precedes reference date {reference_date}")]
    EventBeforeReference {
        /// Position the cash flow belongs to.
        position_id: String,
        /// Date of the offending cash flow.
        event_date: String,
        /// Reference date of the bucketing request.
        reference_date: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// Bond-level error.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl AlmError {
    /// Create an event-before-reference error.
    #[must_use]
    pub fn event_before_reference(
        position_id: impl Into<String>,
        event_date: impl ToString,
        reference_date: impl ToString,
    ) -> Self {
        Self::EventBeforeReference {
            position_id: position_id.into(),
            event_date: event_date.to_string(),
            reference_date: reference_date.to_string(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlmError::event_before_reference("P-1", "2024-06-30", "2024-12-31");
        assert!(err.to_string().contains("P-1"));
        assert!(err.to_string().contains("2024-12-31"));

        let err: AlmError = BondError::invalid_input("P-2", "negative frequency").into();
        assert_eq!(
            err.to_string(),
            "Invalid input for position P-2: negative frequency"
        );
    }
}
