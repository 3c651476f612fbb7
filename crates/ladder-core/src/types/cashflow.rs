//! Percent-of-par cash flow events and schedules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Kind of projected payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashflowKind {
    /// Periodic coupon payment
    Coupon,
    /// Workout payment: final coupon plus redemption
    Terminal,
}

impl fmt::Display for CashflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CashflowKind::Coupon => write!(f, "Coupon"),
            CashflowKind::Terminal => write!(f, "Coupon+Principal"),
        }
    }
}

/// A single dated payment expressed as percent of par.
///
/// The payment is carried as its coupon and principal components; a
/// coupon event has no principal.
///
/// # Example
///
/// ```rust
/// use ladder_core::types::{CashflowEvent, Date};
/// use rust_decimal_macros::dec;
///
/// let event = CashflowEvent::terminal(
///     Date::from_ymd(2027, 12, 31).unwrap(),
///     dec!(2.0),
///     dec!(100),
/// );
/// assert_eq!(event.payment_pct(), dec!(102.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CashflowEvent {
    date: Date,
    coupon_pct: Decimal,
    principal_pct: Decimal,
    kind: CashflowKind,
}

impl CashflowEvent {
    /// Creates a coupon-only event.
    #[must_use]
    pub fn coupon(date: Date, coupon_pct: Decimal) -> Self {
        Self {
            date,
            coupon_pct,
            principal_pct: Decimal::ZERO,
            kind: CashflowKind::Coupon,
        }
    }

    /// Creates the workout event paying the last coupon and the redemption.
    #[must_use]
    pub fn terminal(date: Date, coupon_pct: Decimal, principal_pct: Decimal) -> Self {
        Self {
            date,
            coupon_pct,
            principal_pct,
            kind: CashflowKind::Terminal,
        }
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the total payment in percent of par.
    #[must_use]
    pub fn payment_pct(&self) -> Decimal {
        self.coupon_pct + self.principal_pct
    }

    /// Returns the coupon component in percent of par.
    #[must_use]
    pub fn coupon_pct(&self) -> Decimal {
        self.coupon_pct
    }

    /// Returns the principal component in percent of par.
    #[must_use]
    pub fn principal_pct(&self) -> Decimal {
        self.principal_pct
    }

    /// Returns the payment kind.
    #[must_use]
    pub fn kind(&self) -> CashflowKind {
        self.kind
    }

    /// Returns true for the workout event.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind == CashflowKind::Terminal
    }
}

impl fmt::Display for CashflowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}% ({})", self.date, self.payment_pct(), self.kind)
    }
}

/// Ordered percent-of-par schedule for one bond.
///
/// Events are kept sorted ascending by date. An empty schedule means no
/// cash flow data is available for the bond.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowSchedule {
    events: Vec<CashflowEvent>,
    accrual_anchor: Option<Date>,
}

impl CashflowSchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a schedule from events in any order.
    #[must_use]
    pub fn from_events(mut events: Vec<CashflowEvent>) -> Self {
        events.sort_by_key(CashflowEvent::date);
        Self {
            events,
            accrual_anchor: None,
        }
    }

    /// Records the coupon date preceding the first projected event.
    #[must_use]
    pub fn with_accrual_anchor(mut self, anchor: Date) -> Self {
        self.accrual_anchor = Some(anchor);
        self
    }

    /// Returns the coupon date preceding the first projected event, if recorded.
    #[must_use]
    pub fn accrual_anchor(&self) -> Option<Date> {
        self.accrual_anchor
    }

    /// Returns the events as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashflowEvent] {
        &self.events
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there are no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns an iterator over the events.
    pub fn iter(&self) -> impl Iterator<Item = &CashflowEvent> {
        self.events.iter()
    }

    /// Returns the workout event, if any.
    #[must_use]
    pub fn terminal(&self) -> Option<&CashflowEvent> {
        self.events.iter().rev().find(|e| e.is_terminal())
    }

    /// Returns the date of the last event.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.events.last().map(CashflowEvent::date)
    }

    /// Returns the total of all payments in percent of par.
    #[must_use]
    pub fn total_pct(&self) -> Decimal {
        self.events.iter().map(CashflowEvent::payment_pct).sum()
    }
}

impl IntoIterator for CashflowSchedule {
    type Item = CashflowEvent;
    type IntoIter = std::vec::IntoIter<CashflowEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashflowSchedule {
    type Item = &'a CashflowEvent;
    type IntoIter = std::slice::Iter<'a, CashflowEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromIterator<CashflowEvent> for CashflowSchedule {
    fn from_iter<I: IntoIterator<Item = CashflowEvent>>(iter: I) -> Self {
        Self::from_events(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_coupon_event() {
        let event = CashflowEvent::coupon(d(2025, 6, 30), dec!(2.0));
        assert_eq!(event.payment_pct(), dec!(2.0));
        assert_eq!(event.principal_pct(), Decimal::ZERO);
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_terminal_event() {
        let event = CashflowEvent::terminal(d(2027, 12, 31), dec!(2.0), dec!(101));
        assert_eq!(event.payment_pct(), dec!(103.0));
        assert!(event.is_terminal());
        assert_eq!(event.to_string(), "2027-12-31: 103.0% (Coupon+Principal)");
    }

    #[test]
    fn test_schedule_sorts_events() {
        let schedule: CashflowSchedule = vec![
            CashflowEvent::terminal(d(2026, 12, 31), dec!(2), dec!(100)),
            CashflowEvent::coupon(d(2025, 12, 31), dec!(2)),
            CashflowEvent::coupon(d(2026, 6, 30), dec!(2)),
        ]
        .into_iter()
        .collect();

        let dates: Vec<Date> = schedule.iter().map(CashflowEvent::date).collect();
        assert_eq!(dates, vec![d(2025, 12, 31), d(2026, 6, 30), d(2026, 12, 31)]);
        assert_eq!(schedule.last_date(), Some(d(2026, 12, 31)));
        assert_eq!(schedule.total_pct(), dec!(106));
        assert_eq!(schedule.terminal().map(CashflowEvent::date), Some(d(2026, 12, 31)));
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = CashflowSchedule::empty();
        assert!(schedule.is_empty());
        assert!(schedule.terminal().is_none());
        assert_eq!(schedule.total_pct(), Decimal::ZERO);
    }
}
