//! Liability and premium series selection.
//!
//! Liability valuations arrive as dated snapshots per group. A ladder uses
//! the latest snapshot on or before the ALM date.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ladder_core::types::Date;

use crate::ladder::LiabilitySeries;

/// Guaranteed benefit outflows.
pub const GUARANTEED_LIABILITIES: &str = "Guaranteed Liabilities";

/// Premium inflows.
pub const PREMIUM_CASHFLOWS: &str = "Premium Cashflows";

/// Discretionary benefit outflows.
pub const NON_GUARANTEED_LIABILITIES: &str = "Non Guaranteed Liabilities";

/// One liability value from the valuation feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityRecord {
    /// Valuation date of the snapshot.
    pub as_of_date: Date,
    /// Liability group (product line or fund).
    pub group_name: String,
    /// Period index on the ladder axis.
    pub period: u32,
    /// Series name.
    pub series: String,
    /// Signed value.
    pub value: Decimal,
}

/// Source of liability series for a ladder.
pub trait LiabilityProvider {
    /// Series from the latest snapshot on or before `date`, restricted to
    /// `groups` and `series_names` when those are non-empty.
    fn series_as_of(
        &self,
        date: Date,
        groups: &[String],
        series_names: &[String],
    ) -> LiabilitySeries;
}

/// In-memory liability feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityBook {
    records: Vec<LiabilityRecord>,
}

impl LiabilityBook {
    /// Creates a book from feed records.
    #[must_use]
    pub fn new(records: Vec<LiabilityRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the book holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest snapshot date on or before `date`.
    #[must_use]
    pub fn latest_as_of(&self, date: Date) -> Option<Date> {
        self.records
            .iter()
            .map(|r| r.as_of_date)
            .filter(|d| *d <= date)
            .max()
    }

    /// Distinct group names, sorted.
    #[must_use]
    pub fn groups(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.group_name.as_str()).collect()
    }
}

impl LiabilityProvider for LiabilityBook {
    fn series_as_of(
        &self,
        date: Date,
        groups: &[String],
        series_names: &[String],
    ) -> LiabilitySeries {
        let mut series = LiabilitySeries::new();
        let Some(as_of) = self.latest_as_of(date) else {
            tracing::debug!(date = %date, "no liability snapshot on or before date");
            return series;
        };

        let selected =
            |list: &[String], value: &str| list.is_empty() || list.iter().any(|v| v == value);

        for record in self.records.iter().filter(|r| {
            r.as_of_date == as_of
                && selected(groups, &r.group_name)
                && selected(series_names, &r.series)
        }) {
            *series
                .entry(record.series.clone())
                .or_default()
                .entry(record.period)
                .or_default() += record.value;
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn record(
        as_of: Date,
        group: &str,
        period: u32,
        series: &str,
        value: Decimal,
    ) -> LiabilityRecord {
        LiabilityRecord {
            as_of_date: as_of,
            group_name: group.to_string(),
            period,
            series: series.to_string(),
            value,
        }
    }

    fn book() -> LiabilityBook {
        LiabilityBook::new(vec![
            record(d(2024, 9, 30), "Par", 1, GUARANTEED_LIABILITIES, dec!(-999)),
            record(d(2024, 12, 31), "Par", 1, GUARANTEED_LIABILITIES, dec!(-100)),
            record(d(2024, 12, 31), "NonPar", 1, GUARANTEED_LIABILITIES, dec!(-50)),
            record(d(2024, 12, 31), "Par", 2, GUARANTEED_LIABILITIES, dec!(-70)),
            record(d(2024, 12, 31), "Par", 1, PREMIUM_CASHFLOWS, dec!(20)),
            record(d(2025, 3, 31), "Par", 1, GUARANTEED_LIABILITIES, dec!(-1)),
        ])
    }

    #[test]
    fn test_latest_snapshot_on_or_before() {
        let book = book();
        assert_eq!(book.latest_as_of(d(2025, 1, 15)), Some(d(2024, 12, 31)));
        assert_eq!(book.latest_as_of(d(2024, 12, 31)), Some(d(2024, 12, 31)));
        assert_eq!(book.latest_as_of(d(2024, 1, 1)), None);
    }

    #[test]
    fn test_series_sum_across_groups() {
        let series = book().series_as_of(d(2025, 1, 15), &[], &[]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[GUARANTEED_LIABILITIES][&1], dec!(-150));
        assert_eq!(series[GUARANTEED_LIABILITIES][&2], dec!(-70));
        assert_eq!(series[PREMIUM_CASHFLOWS][&1], dec!(20));
    }

    #[test]
    fn test_group_and_series_filters() {
        let series = book().series_as_of(
            d(2025, 1, 15),
            &["NonPar".to_string()],
            &[GUARANTEED_LIABILITIES.to_string()],
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series[GUARANTEED_LIABILITIES][&1], dec!(-50));
        assert!(!series[GUARANTEED_LIABILITIES].contains_key(&2));
    }

    #[test]
    fn test_no_snapshot_yields_empty() {
        assert!(book().series_as_of(d(2020, 1, 1), &[], &[]).is_empty());
    }
}
