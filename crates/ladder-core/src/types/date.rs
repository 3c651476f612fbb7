//! Date type for cash flow projection.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::error::{CoreError, CoreResult};

/// A calendar date used throughout the projection engine.
///
/// Newtype over `chrono::NaiveDate` exposing the month arithmetic that
/// coupon stepping and period bucketing depend on.
///
/// # Example
///
/// ```rust
/// use ladder_core::types::Date;
///
/// let date = Date::from_ymd(2027, 12, 31).unwrap();
/// let earlier = date.add_months(-6).unwrap();
/// assert_eq!(earlier, Date::from_ymd(2027, 6, 30).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Checks if the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Shifts the date by a number of months.
    ///
    /// The day is clamped to the last valid day of the target month, so
    /// `2027-12-31` shifted by `-6` lands on `2027-06-30`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DateOutOfRange` if the result cannot be represented.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let out_of_range = || CoreError::DateOutOfRange {
            date: self.to_string(),
            months,
        };

        let total_months = (self.year() * 12 + self.month() as i32 - 1)
            .checked_add(months)
            .ok_or_else(out_of_range)?;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));

        NaiveDate::from_ymd_opt(new_year, new_month, new_day)
            .map(Date)
            .ok_or_else(out_of_range)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Calendar distance from `base` to `self`, split into whole years,
    /// whole months and leftover days.
    ///
    /// Months are counted so that `base` shifted by the whole months never
    /// overshoots `self`; both components carry the sign of the distance.
    ///
    /// ```rust
    /// use ladder_core::types::Date;
    ///
    /// let base = Date::from_ymd(2024, 12, 31).unwrap();
    /// let event = Date::from_ymd(2025, 6, 30).unwrap();
    /// let delta = event.relative_to(base).unwrap();
    /// assert_eq!((delta.years(), delta.months()), (0, 6));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DateOutOfRange` if an intermediate shift is not representable.
    pub fn relative_to(&self, base: Date) -> CoreResult<RelativeDelta> {
        let mut total_months = (self.year() - base.year()) * 12 + self.month() as i32
            - base.month() as i32;
        let mut shifted = base.add_months(total_months)?;

        if *self >= base {
            while *self < shifted {
                total_months -= 1;
                shifted = base.add_months(total_months)?;
            }
        } else {
            while *self > shifted {
                total_months += 1;
                shifted = base.add_months(total_months)?;
            }
        }

        Ok(RelativeDelta {
            years: total_months / 12,
            months: total_months % 12,
            days: shifted.days_between(self),
        })
    }

    /// Returns the first day of the month.
    #[must_use]
    pub fn start_of_month(&self) -> Self {
        Date(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Formats the month as `YYYY-MM`.
    #[must_use]
    pub fn year_month(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

/// Calendar difference between two dates.
///
/// Produced by [`Date::relative_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelativeDelta {
    years: i32,
    months: i32,
    days: i64,
}

impl RelativeDelta {
    /// Whole years.
    #[must_use]
    pub fn years(&self) -> i32 {
        self.years
    }

    /// Whole months beyond the whole years (-11..=11).
    #[must_use]
    pub fn months(&self) -> i32 {
        self.months
    }

    /// Remaining days after the whole months.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Total whole months (`years * 12 + months`).
    #[must_use]
    pub fn total_months(&self) -> i32 {
        self.years * 12 + self.months
    }

    /// Returns true if the later date precedes the base date.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.total_months() < 0 || (self.total_months() == 0 && self.days < 0)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
