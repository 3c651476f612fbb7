//! Domain types for portfolio projection.
//!
//! - [`ProjectionConfig`]: Configuration for a projection request
//! - [`BucketMode`]: Year or month period axis
//! - [`GroupKey`]: Tuple of reporting dimension values
//! - [`PositionFilter`]: Exclusion rules applied before projection

mod config;
mod filter;
mod group;

pub use config::{BucketMode, ProjectionConfig, ReportingUnit};
pub use filter::PositionFilter;
pub use group::{GroupDimension, GroupKey};
