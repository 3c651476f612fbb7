//! Asset-liability ladder assembly.
//!
//! Combines the asset bucket with named liability series on a common
//! period axis and derives net and cumulative net columns.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bucketing::PeriodBucket;

/// Values of one series by period index.
pub type SeriesValues = BTreeMap<u32, Decimal>;

/// Named series keyed by series name.
pub type LiabilitySeries = BTreeMap<String, SeriesValues>;

/// One period of a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderRow {
    /// Period index.
    pub period: u32,
    /// Series values, in [`Ladder::series_names`] order.
    pub values: Vec<Decimal>,
    /// Sum of all series at this period.
    pub net_value: Decimal,
    /// Running sum of `net_value` from the first period.
    pub cumulative_net_value: Decimal,
}

/// Period-indexed table of asset and liability series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladder {
    /// Column names; the asset series comes first.
    pub series_names: Vec<String>,
    /// Rows in ascending period order.
    pub rows: Vec<LadderRow>,
}

impl Ladder {
    /// Returns true if the ladder has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row for `period`.
    #[must_use]
    pub fn row(&self, period: u32) -> Option<&LadderRow> {
        self.rows.iter().find(|r| r.period == period)
    }

    /// Value of a named series at `period`.
    #[must_use]
    pub fn value(&self, series: &str, period: u32) -> Option<Decimal> {
        let column = self.series_names.iter().position(|n| n == series)?;
        self.row(period).map(|r| r.values[column])
    }

    /// Net value of the last period.
    #[must_use]
    pub fn final_cumulative(&self) -> Decimal {
        self.rows
            .last()
            .map_or(Decimal::ZERO, |r| r.cumulative_net_value)
    }

    /// Fills every period between the first and last row.
    ///
    /// Inserted rows carry zero values and the running cumulative of the
    /// row before them.
    #[must_use]
    pub fn zero_filled(&self) -> Self {
        let (Some(first), Some(last)) = (self.rows.first(), self.rows.last()) else {
            return self.clone();
        };

        let mut existing = self.rows.iter().peekable();
        let mut cumulative = Decimal::ZERO;
        let rows = (first.period..=last.period)
            .map(|period| match existing.next_if(|r| r.period == period) {
                Some(row) => {
                    cumulative = row.cumulative_net_value;
                    row.clone()
                }
                None => LadderRow {
                    period,
                    values: vec![Decimal::ZERO; self.series_names.len()],
                    net_value: Decimal::ZERO,
                    cumulative_net_value: cumulative,
                },
            })
            .collect();

        Self {
            series_names: self.series_names.clone(),
            rows,
        }
    }

    /// Keeps periods up to and including `max_period`.
    ///
    /// Rows are ascending, so the kept cumulative values are unchanged.
    #[must_use]
    pub fn truncated(&self, max_period: u32) -> Self {
        Self {
            series_names: self.series_names.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| r.period <= max_period)
                .cloned()
                .collect(),
        }
    }
}

/// Aligns the asset bucket with liability series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderCombiner {
    asset_series_name: String,
}

impl Default for LadderCombiner {
    fn default() -> Self {
        Self::new("Asset Cashflows")
    }
}

impl LadderCombiner {
    /// Creates a combiner naming the asset column `asset_series_name`.
    #[must_use]
    pub fn new(asset_series_name: impl Into<String>) -> Self {
        Self {
            asset_series_name: asset_series_name.into(),
        }
    }

    /// Combines assets and liabilities into a ladder.
    ///
    /// The period axis is the union of every input's periods; absent values
    /// are zero. Values are summed as given: liabilities are expected to
    /// carry their own (usually negative) sign. A liability series sharing
    /// the asset series name is added into the asset column.
    #[must_use]
    pub fn combine(&self, assets: &PeriodBucket, liabilities: &LiabilitySeries) -> Ladder {
        let mut columns: BTreeMap<&str, SeriesValues> = BTreeMap::new();
        columns.insert(self.asset_series_name.as_str(), assets.value_series());

        for (name, values) in liabilities {
            let column = columns.entry(name.as_str()).or_default();
            for (period, value) in values {
                *column.entry(*period).or_default() += *value;
            }
        }

        let mut series_names = vec![self.asset_series_name.clone()];
        series_names.extend(
            liabilities
                .keys()
                .filter(|n| **n != self.asset_series_name)
                .cloned(),
        );

        let periods: BTreeSet<u32> = columns
            .values()
            .flat_map(|values| values.keys().copied())
            .collect();

        let mut cumulative = Decimal::ZERO;
        let rows = periods
            .into_iter()
            .map(|period| {
                let values: Vec<Decimal> = series_names
                    .iter()
                    .map(|name| {
                        columns
                            .get(name.as_str())
                            .and_then(|c| c.get(&period))
                            .copied()
                            .unwrap_or_default()
                    })
                    .collect();
                let net_value: Decimal = values.iter().copied().sum();
                cumulative += net_value;
                LadderRow {
                    period,
                    values,
                    net_value,
                    cumulative_net_value: cumulative,
                }
            })
            .collect();

        Ladder { series_names, rows }
    }
}
