//! Domain types for cash flow projection.
//!
//! - [`Date`]: Calendar date with month arithmetic
//! - [`RelativeDelta`]: Calendar distance in years, months and days
//! - [`CashflowEvent`] / [`CashflowSchedule`]: Percent-of-par payments
//! - [`DollarCashflow`] / [`DollarSchedule`]: Currency payments

mod cashflow;
mod date;
mod dollar;

pub use cashflow::{CashflowEvent, CashflowKind, CashflowSchedule};
pub use date::{Date, RelativeDelta};
pub use dollar::{DollarCashflow, DollarSchedule};
