//! Assignment of dated cash flows to relative periods.

use std::collections::BTreeMap;

use ladder_core::types::{Date, DollarSchedule};

use super::rows::sort_rows;
use super::{BucketValue, PeriodBucket, SecurityCashflowRow};
use crate::analytics::{maybe_parallel_fold, PositionProjection, SkipReason, SkippedPosition};
use crate::error::{AlmError, AlmResult};
use crate::types::{BucketMode, GroupDimension, GroupKey, ProjectionConfig};

/// Output of [`PeriodBucketizer::report`].
#[derive(Debug, Clone)]
pub struct BucketReport {
    /// Aggregated cash flows.
    pub bucket: PeriodBucket,
    /// Drill-down rows, by period then descending value.
    pub rows: Vec<SecurityCashflowRow>,
    /// Positions with a cash flow before the reference date.
    pub skipped: Vec<SkippedPosition>,
}

#[derive(Debug, Clone)]
struct PartialReport {
    bucket: PeriodBucket,
    rows: Vec<SecurityCashflowRow>,
    skipped: Vec<SkippedPosition>,
}

impl PartialReport {
    fn merge(mut self, other: PartialReport) -> Self {
        self.bucket = self.bucket.merge(other.bucket);
        self.rows.extend(other.rows);
        self.skipped.extend(other.skipped);
        self
    }
}

/// Buckets dollar schedules by whole years or months from a reference date.
///
/// Year mode places an event `floor(years elapsed) + 1`; an event in the
/// first twelve months lands in period 1. Month mode uses whole months
/// elapsed with no offset.
///
/// # Example
///
/// ```rust
/// use ladder_alm::bucketing::PeriodBucketizer;
/// use ladder_alm::types::BucketMode;
/// use ladder_core::types::Date;
///
/// let bucketizer = PeriodBucketizer::new(Date::from_ymd(2024, 12, 31).unwrap(), BucketMode::Month);
/// let period = bucketizer.period_index(Date::from_ymd(2025, 6, 30).unwrap()).unwrap();
/// assert_eq!(period, Some(6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodBucketizer {
    reference_date: Date,
    mode: BucketMode,
}

impl PeriodBucketizer {
    /// Creates a bucketizer.
    #[must_use]
    pub fn new(reference_date: Date, mode: BucketMode) -> Self {
        Self {
            reference_date,
            mode,
        }
    }

    /// Creates a bucketizer using the configured period unit.
    #[must_use]
    pub fn from_config(reference_date: Date, config: &ProjectionConfig) -> Self {
        Self::new(reference_date, config.bucket_mode)
    }

    /// Returns the reference date.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Returns the period unit.
    #[must_use]
    pub fn mode(&self) -> BucketMode {
        self.mode
    }

    /// Period index of `date`, or `None` when it precedes the reference date.
    pub fn period_index(&self, date: Date) -> AlmResult<Option<u32>> {
        if date < self.reference_date {
            return Ok(None);
        }
        let delta = date.relative_to(self.reference_date)?;
        let index = match self.mode {
            BucketMode::Year => delta.years() + 1,
            BucketMode::Month => delta.total_months(),
        };
        Ok(u32::try_from(index).ok())
    }

    fn period_values(
        &self,
        label: &str,
        dollars: &DollarSchedule,
    ) -> AlmResult<BTreeMap<u32, BucketValue>> {
        let mut periods: BTreeMap<u32, BucketValue> = BTreeMap::new();
        for flow in dollars.iter() {
            let period = self.period_index(flow.date())?.ok_or_else(|| {
                AlmError::event_before_reference(label, flow.date(), self.reference_date)
            })?;
            *periods.entry(period).or_default() += BucketValue::from_flow(flow);
        }
        Ok(periods)
    }

    /// Buckets one position's schedule under `key`.
    ///
    /// # Errors
    ///
    /// Returns `AlmError::EventBeforeReference` if any cash flow precedes the
    /// reference date.
    pub fn bucketize_schedule(
        &self,
        position_id: &str,
        dollars: &DollarSchedule,
        key: &GroupKey,
    ) -> AlmResult<PeriodBucket> {
        let mut bucket = PeriodBucket::new(self.mode, self.reference_date);
        for (period, value) in self.period_values(position_id, dollars)? {
            bucket.add(period, key.clone(), value);
        }
        Ok(bucket)
    }

    /// Buckets a set of schedules, summing those that share a group key.
    ///
    /// # Errors
    ///
    /// Fails on the first schedule with a cash flow before the reference
    /// date; the error names the schedule by its position in the input.
    pub fn bucketize(&self, schedules: &[(DollarSchedule, GroupKey)]) -> AlmResult<PeriodBucket> {
        schedules.iter().enumerate().try_fold(
            PeriodBucket::new(self.mode, self.reference_date),
            |acc, (i, (dollars, key))| {
                let label = format!("#{i} ({key})");
                Ok(acc.merge(self.bucketize_schedule(&label, dollars, key)?))
            },
        )
    }

    fn partial(
        &self,
        projection: &PositionProjection,
        grouping: &[GroupDimension],
    ) -> PartialReport {
        let mut partial = PartialReport {
            bucket: PeriodBucket::new(self.mode, self.reference_date),
            rows: Vec::new(),
            skipped: Vec::new(),
        };

        let position_id = projection.terms.position_id.as_str();
        match self.period_values(position_id, &projection.dollars) {
            Ok(periods) => {
                let key = GroupKey::for_terms(&projection.terms, grouping);
                for (period, value) in periods {
                    partial.bucket.add(period, key.clone(), value);
                    partial
                        .rows
                        .push(SecurityCashflowRow::new(projection, period, value));
                }
            }
            Err(e) => {
                tracing::warn!(position_id = %position_id, error = %e, "skipping position");
                partial.skipped.push(SkippedPosition {
                    position_id: position_id.to_string(),
                    reason: SkipReason::BeforeReference,
                    message: e.to_string(),
                });
            }
        }
        partial
    }

    /// Buckets projected positions grouped by `config.grouping`.
    ///
    /// Positions with a cash flow before the reference date are skipped and
    /// recorded; the rest of the batch is still aggregated.
    #[must_use]
    pub fn report(
        &self,
        projections: &[PositionProjection],
        config: &ProjectionConfig,
    ) -> BucketReport {
        let identity = PartialReport {
            bucket: PeriodBucket::new(self.mode, self.reference_date),
            rows: Vec::new(),
            skipped: Vec::new(),
        };

        let merged = maybe_parallel_fold(
            projections,
            config,
            identity,
            |acc, projection| acc.merge(self.partial(projection, &config.grouping)),
            PartialReport::merge,
        );

        let mut rows = merged.rows;
        sort_rows(&mut rows);
        let mut skipped = merged.skipped;
        skipped.sort_by(|a, b| a.position_id.cmp(&b.position_id));

        tracing::debug!(
            mode = %self.mode,
            reference_date = %self.reference_date,
            cells = merged.bucket.len(),
            skipped = skipped.len(),
            "bucketing complete"
        );

        BucketReport {
            bucket: merged.bucket,
            rows,
            skipped,
        }
    }

    /// Drill-down rows of the positions that bucket cleanly.
    #[must_use]
    pub fn security_rows(
        &self,
        projections: &[PositionProjection],
        config: &ProjectionConfig,
    ) -> Vec<SecurityCashflowRow> {
        self.report(projections, config).rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_core::types::{CashflowKind, DollarCashflow};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn schedule() -> DollarSchedule {
        DollarSchedule::new(
            dec!(1000),
            vec![
                DollarCashflow::new(d(2025, 6, 30), dec!(20), Decimal::ZERO, CashflowKind::Coupon),
                DollarCashflow::new(d(2025, 12, 31), dec!(20), Decimal::ZERO, CashflowKind::Coupon),
                DollarCashflow::new(d(2026, 6, 30), dec!(20), dec!(1000), CashflowKind::Terminal),
            ],
        )
    }

    #[test]
    fn test_month_index() {
        let bucketizer = PeriodBucketizer::new(d(2024, 12, 31), BucketMode::Month);
        assert_eq!(bucketizer.period_index(d(2025, 6, 30)).unwrap(), Some(6));
        assert_eq!(bucketizer.period_index(d(2024, 12, 31)).unwrap(), Some(0));
        assert_eq!(bucketizer.period_index(d(2025, 1, 30)).unwrap(), Some(0));
        assert_eq!(bucketizer.period_index(d(2024, 12, 30)).unwrap(), None);
    }

    #[test]
    fn test_year_index_is_floor_plus_one() {
        let bucketizer = PeriodBucketizer::new(d(2024, 12, 31), BucketMode::Year);
        assert_eq!(bucketizer.period_index(d(2024, 12, 31)).unwrap(), Some(1));
        assert_eq!(bucketizer.period_index(d(2025, 12, 30)).unwrap(), Some(1));
        assert_eq!(bucketizer.period_index(d(2025, 12, 31)).unwrap(), Some(2));
        assert_eq!(bucketizer.period_index(d(2027, 12, 31)).unwrap(), Some(4));
    }

    #[test]
    fn test_bucketize_sums_shared_keys() {
        let bucketizer = PeriodBucketizer::new(d(2024, 12, 31), BucketMode::Year);
        let key = GroupKey::new(["F100"]);
        let bucket = bucketizer
            .bucketize(&[(schedule(), key.clone()), (schedule(), key.clone())])
            .unwrap();

        assert_eq!(bucket.get(1, &key).value, dec!(80));
        assert_eq!(bucket.get(2, &key).value, dec!(2040));
        assert_eq!(bucket.get(2, &key).principal, dec!(2000));
        assert_eq!(bucket.total().value, dec!(2120));
    }

    #[test]
    fn test_event_before_reference_is_rejected() {
        let bucketizer = PeriodBucketizer::new(d(2025, 7, 1), BucketMode::Month);
        let err = bucketizer
            .bucketize(&[(schedule(), GroupKey::default())])
            .unwrap_err();
        assert!(matches!(err, AlmError::EventBeforeReference { .. }));
    }
}
