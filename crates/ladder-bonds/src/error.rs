//! Error types for bond schedule operations.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while projecting a single bond.
///
/// Every variant is fatal for the position it was raised for only; batch
/// callers skip the position and continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BondError {
    /// Position terms cannot produce a schedule.
    #[error("Invalid input for position {position_id}: {reason}")]
    InvalidInput {
        /// Position the terms belong to.
        position_id: String,
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Coupon-date override record could not be interpreted.
    #[error("Invalid coupon date override for {security_id}: {reason}")]
    InvalidOverride {
        /// Security the override belongs to.
        security_id: String,
        /// Description of what's invalid.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] ladder_core::CoreError),
}

impl BondError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(position_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            position_id: position_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid override error.
    #[must_use]
    pub fn invalid_override(security_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOverride {
            security_id: security_id.into(),
            reason: reason.into(),
        }
    }
}
