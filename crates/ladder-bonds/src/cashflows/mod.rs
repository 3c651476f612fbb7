//! Cash flow schedule generation.
//!
//! - [`DateStepper`]: periodic dates walked back from an anchor
//! - [`ScheduleBuilder`]: dated percent-of-par schedule for one bond
//! - [`NotionalScaler`]: currency-valued twin of a schedule
//! - [`CouponDateBook`]: coupon-date overrides keyed by security

mod builder;
mod overrides;
mod scaler;
mod stepper;

pub use builder::{FirstCouponPolicy, ScheduleBuilder, ScheduleConfig, Workout};
pub use overrides::{CouponDateBook, CouponDateOverrides, OverrideCategory, OverrideRecord};
pub use scaler::NotionalScaler;
pub use stepper::{months_per_period, DateStepper, SteppedDates};
