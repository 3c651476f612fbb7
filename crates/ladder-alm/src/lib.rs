//! # Ladder ALM
//!
//! Portfolio projection and asset-liability ladders.
//!
//! This crate turns a position feed into a period-indexed ladder by
//! aggregating bond-level schedules from `ladder-bonds`.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All inputs explicit, no I/O
//! - **Skip, don't abort**: A bad position is recorded and the batch continues
//! - **Explicit memoization**: Schedule caches are passed in, never global
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use ladder_alm::prelude::*;
//! use ladder_bonds::cashflows::CouponDateBook;
//! use ladder_bonds::BondTerms;
//! use ladder_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let closing = Date::from_ymd(2024, 12, 31).unwrap();
//! let positions = vec![BondTerms::builder()
//!     .position_id("P-1")
//!     .fund_code("F100")
//!     .closing_date(closing)
//!     .maturity_date(Date::from_ymd(2027, 12, 31).unwrap())
//!     .coupon_rate(dec!(4))
//!     .coupon_frequency(2)
//!     .position_quantity(dec!(1000000))
//!     .build()
//!     .unwrap()];
//!
//! let config = ProjectionConfig::default();
//! let outcome = project_positions(&positions, &CouponDateBook::new(), &config, &NoCache);
//!
//! let report = PeriodBucketizer::from_config(closing, &config).report(&outcome.projections, &config);
//! let ladder = LadderCombiner::new(config.asset_series_name.clone())
//!     .combine(&report.bucket, &LiabilitySeries::new());
//! assert_eq!(ladder.final_cumulative(), outcome.total_cashflow());
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Batch projection and parallel helpers
//! - [`bucketing`] - Period buckets and drill-down rows
//! - [`cache`] - Schedule memoization
//! - [`ladder`] - Asset-liability ladder assembly
//! - [`liability`] - Liability feed selection
//! - [`matrix`] - Monthly cash flow matrix
//! - [`types`] - Configuration, grouping and filtering
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon for positions counts at or above
//!   `ProjectionConfig::parallel_threshold`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod analytics;
pub mod bucketing;
pub mod cache;
pub mod error;
pub mod ladder;
pub mod liability;
pub mod matrix;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        project_positions, PositionProjection, ProjectionOutcome, SkipReason, SkippedPosition,
    };
    pub use crate::bucketing::{
        rows_for_periods, BucketReport, BucketValue, PeriodBucket, PeriodBucketizer,
        SecurityCashflowRow,
    };
    pub use crate::cache::{InMemoryScheduleCache, NoCache, ScheduleCache, ScheduleKey};
    pub use crate::error::{AlmError, AlmResult};
    pub use crate::ladder::{Ladder, LadderCombiner, LadderRow, LiabilitySeries, SeriesValues};
    pub use crate::liability::{LiabilityBook, LiabilityProvider, LiabilityRecord};
    pub use crate::matrix::{CashflowMatrix, MatrixRow};
    pub use crate::types::{
        BucketMode, GroupDimension, GroupKey, PositionFilter, ProjectionConfig, ReportingUnit,
    };
}

pub use error::{AlmError, AlmResult};
