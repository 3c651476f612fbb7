//! # Ladder Bonds
//!
//! Bond cash flow projection for the Ladder engine.
//!
//! This crate provides:
//!
//! - **Terms**: `BondTerms`, the static record of one position
//! - **Schedules**: Coupon dates stepped back from the workout date, with
//!   call and penultimate-date handling
//! - **Scaling**: Conversion of percent-of-par schedules into currency
//!
//! ## Example
//!
//! ```rust
//! use ladder_bonds::prelude::*;
//! use ladder_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let terms = BondTerms::builder()
//!     .position_id("P-1")
//!     .closing_date(Date::from_ymd(2024, 12, 31).unwrap())
//!     .maturity_date(Date::from_ymd(2027, 12, 31).unwrap())
//!     .coupon_rate(dec!(4.0))
//!     .coupon_frequency(2)
//!     .position_quantity(dec!(1000000))
//!     .build()
//!     .unwrap();
//!
//! let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();
//! let dollars = NotionalScaler::scale(&schedule, &terms).unwrap();
//! assert_eq!(dollars.last_date(), Some(Date::from_ymd(2027, 12, 31).unwrap()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_excessive_bools)]

pub mod cashflows;
pub mod error;
pub mod terms;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{
        CouponDateBook, CouponDateOverrides, DateStepper, FirstCouponPolicy, NotionalScaler,
        OverrideRecord, ScheduleBuilder, ScheduleConfig, Workout,
    };
    pub use crate::error::{BondError, BondResult};
    pub use crate::terms::{BondTerms, BondTermsBuilder, DEFAULT_MBS_COUPON_RATE};
}

pub use error::{BondError, BondResult};
pub use terms::BondTerms;
