//! Backward coupon date stepping.
//!
//! Coupon dates are generated as `anchor - k * step` months, each computed
//! from the anchor directly. Chaining single-period shifts instead would
//! drift off month ends (Dec 31 -> Jun 30 -> Dec 30).

use ladder_core::types::Date;
use ladder_core::CoreResult;

/// Months between coupons for a given annual frequency.
///
/// Returns `None` unless `frequency` is positive and divides 12.
#[must_use]
pub fn months_per_period(frequency: i32) -> Option<i32> {
    (frequency > 0 && 12 % frequency == 0).then(|| 12 / frequency)
}

/// Dates produced by walking back from an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteppedDates {
    /// Dates on or after the floor, descending.
    pub dates: Vec<Date>,
    /// First stepped date that fell before the floor.
    pub stepped_past: Date,
}

/// Generates periodic dates backward from an anchor date.
///
/// # Example
///
/// ```rust
/// use ladder_bonds::cashflows::DateStepper;
/// use ladder_core::types::Date;
///
/// let stepper = DateStepper::new(Date::from_ymd(2027, 12, 31).unwrap(), 6);
/// let stepped = stepper
///     .back_to(Date::from_ymd(2026, 6, 1).unwrap(), 1)
///     .unwrap();
/// assert_eq!(
///     stepped.dates,
///     vec![
///         Date::from_ymd(2027, 6, 30).unwrap(),
///         Date::from_ymd(2026, 12, 31).unwrap(),
///         Date::from_ymd(2026, 6, 30).unwrap(),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateStepper {
    anchor: Date,
    step_months: i32,
}

impl DateStepper {
    /// Creates a stepper. `step_months` must be positive.
    #[must_use]
    pub fn new(anchor: Date, step_months: i32) -> Self {
        Self {
            anchor,
            step_months: step_months.max(1),
        }
    }

    /// Returns the anchor date.
    #[must_use]
    pub fn anchor(&self) -> Date {
        self.anchor
    }

    /// Returns the step in months.
    #[must_use]
    pub fn step_months(&self) -> i32 {
        self.step_months
    }

    /// The date `n` periods before the anchor.
    pub fn nth_before(&self, n: i32) -> CoreResult<Date> {
        self.anchor.add_months(-n * self.step_months)
    }

    /// Collects dates `anchor - k * step` for `k >= skip` while they are on
    /// or after `floor`.
    pub fn back_to(&self, floor: Date, skip: i32) -> CoreResult<SteppedDates> {
        let mut dates = Vec::new();
        let mut k = skip;
        loop {
            let date = self.nth_before(k)?;
            if date < floor {
                return Ok(SteppedDates {
                    dates,
                    stepped_past: date,
                });
            }
            dates.push(date);
            k += 1;
        }
    }
}
