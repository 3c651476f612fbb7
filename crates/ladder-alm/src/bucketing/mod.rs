//! Period bucketing of dollar cash flows.
//!
//! - [`PeriodBucketizer`]: assigns events to year or month offsets
//! - [`PeriodBucket`]: sparse `(period, group)` aggregate
//! - [`SecurityCashflowRow`]: per-position drill-down

mod bucket;
mod bucketizer;
mod rows;

pub use bucket::{BucketCell, BucketValue, PeriodBucket};
pub use bucketizer::{BucketReport, PeriodBucketizer};
pub use rows::{rows_for_periods, SecurityCashflowRow};
