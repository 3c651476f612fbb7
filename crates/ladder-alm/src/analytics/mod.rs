//! Portfolio-level projection.
//!
//! - [`project_positions`]: filter, schedule and scale a batch of positions
//! - Parallel helpers switching to rayon above a size threshold

mod parallel;
mod projection;

pub use parallel::{maybe_parallel_fold, maybe_parallel_map};
pub use projection::{
    project_positions, PositionProjection, ProjectionOutcome, SkipReason, SkippedPosition,
};
