//! # Ladder Core
//!
//! Core types for the Ladder bond cash flow projection engine.
//!
//! This crate provides the value types shared by every stage of the
//! projection pipeline:
//!
//! - **Dates**: A `Date` newtype with month stepping and calendar deltas
//! - **Schedules**: Percent-of-par `CashflowSchedule` and its currency twin `DollarSchedule`
//!
//! All types are immutable once built.
//!
//! ## Example
//!
//! ```rust
//! use ladder_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let schedule = CashflowSchedule::from_events(vec![
//!     CashflowEvent::coupon(Date::from_ymd(2025, 6, 30).unwrap(), dec!(2)),
//!     CashflowEvent::terminal(Date::from_ymd(2025, 12, 31).unwrap(), dec!(2), dec!(100)),
//! ]);
//! assert_eq!(schedule.total_pct(), dec!(104));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        CashflowEvent, CashflowKind, CashflowSchedule, Date, DollarCashflow, DollarSchedule,
        RelativeDelta,
    };
}

pub use error::{CoreError, CoreResult};
pub use types::Date;
