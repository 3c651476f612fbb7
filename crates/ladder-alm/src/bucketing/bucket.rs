//! Aggregated cash flows keyed by period and group.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Add, AddAssign, RangeInclusive};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ladder_core::types::{Date, DollarCashflow};

use crate::types::{BucketMode, GroupKey, ReportingUnit};

/// Dollar value of a bucket cell with its coupon/principal split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketValue {
    /// Total payment.
    pub value: Decimal,
    /// Coupon component.
    pub coupon: Decimal,
    /// Principal component.
    pub principal: Decimal,
}

impl BucketValue {
    /// Value of a single dollar cash flow.
    #[must_use]
    pub fn from_flow(flow: &DollarCashflow) -> Self {
        Self {
            value: flow.amount(),
            coupon: flow.coupon(),
            principal: flow.principal(),
        }
    }

    /// Divides every component by `divisor`.
    #[must_use]
    pub fn scaled(self, divisor: Decimal) -> Self {
        if divisor.is_zero() {
            return self;
        }
        Self {
            value: self.value / divisor,
            coupon: self.coupon / divisor,
            principal: self.principal / divisor,
        }
    }
}

impl Add for BucketValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            coupon: self.coupon + rhs.coupon,
            principal: self.principal + rhs.principal,
        }
    }
}

impl AddAssign for BucketValue {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// One populated cell of a [`PeriodBucket`], in serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCell {
    /// Period index.
    pub period: u32,
    /// Group the cell belongs to.
    pub group: GroupKey,
    /// Total payment.
    pub value: Decimal,
    /// Coupon component.
    pub coupon: Decimal,
    /// Principal component.
    pub principal: Decimal,
}

/// Dollar cash flows summed by `(period_index, group_key)`.
///
/// Sparse: only populated cells are stored. Use [`PeriodBucket::dense_totals`]
/// to obtain a zero-filled period axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodBucket {
    mode: BucketMode,
    reference_date: Date,
    cells: BTreeMap<(u32, GroupKey), BucketValue>,
}

impl PeriodBucket {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new(mode: BucketMode, reference_date: Date) -> Self {
        Self {
            mode,
            reference_date,
            cells: BTreeMap::new(),
        }
    }

    /// Returns the period unit.
    #[must_use]
    pub fn mode(&self) -> BucketMode {
        self.mode
    }

    /// Returns the date periods are counted from.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Adds a value to a cell.
    pub fn add(&mut self, period: u32, key: GroupKey, value: BucketValue) {
        *self.cells.entry((period, key)).or_default() += value;
    }

    /// Sums another bucket into this one.
    #[must_use]
    pub fn merge(mut self, other: PeriodBucket) -> Self {
        for (cell, value) in other.cells {
            *self.cells.entry(cell).or_default() += value;
        }
        self
    }

    /// Value of a cell, zero when absent.
    #[must_use]
    pub fn get(&self, period: u32, key: &GroupKey) -> BucketValue {
        self.cells
            .get(&(period, key.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Iterates populated cells in period, then group order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &GroupKey, &BucketValue)> {
        self.cells.iter().map(|((p, k), v)| (*p, k, v))
    }

    /// Number of populated cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distinct groups, sorted.
    #[must_use]
    pub fn groups(&self) -> BTreeSet<GroupKey> {
        self.cells.keys().map(|(_, k)| k.clone()).collect()
    }

    /// Distinct populated periods, sorted.
    #[must_use]
    pub fn periods(&self) -> BTreeSet<u32> {
        self.cells.keys().map(|(p, _)| *p).collect()
    }

    /// Values summed across groups.
    #[must_use]
    pub fn totals_by_period(&self) -> BTreeMap<u32, BucketValue> {
        let mut totals: BTreeMap<u32, BucketValue> = BTreeMap::new();
        for ((period, _), value) in &self.cells {
            *totals.entry(*period).or_default() += *value;
        }
        totals
    }

    /// Total payment per period, summed across groups.
    #[must_use]
    pub fn value_series(&self) -> BTreeMap<u32, Decimal> {
        self.totals_by_period()
            .into_iter()
            .map(|(p, v)| (p, v.value))
            .collect()
    }

    /// Total payment per period for one group.
    #[must_use]
    pub fn group_series(&self, key: &GroupKey) -> BTreeMap<u32, Decimal> {
        self.cells
            .iter()
            .filter(|((_, k), _)| k == key)
            .map(|((p, _), v)| (*p, v.value))
            .collect()
    }

    /// Sum over every cell.
    #[must_use]
    pub fn total(&self) -> BucketValue {
        self.cells
            .values()
            .fold(BucketValue::default(), |acc, v| acc + *v)
    }

    /// Period totals over `range`, zero for periods without cash flow.
    #[must_use]
    pub fn dense_totals(&self, range: RangeInclusive<u32>) -> Vec<(u32, BucketValue)> {
        let totals = self.totals_by_period();
        range
            .map(|p| (p, totals.get(&p).copied().unwrap_or_default()))
            .collect()
    }

    /// Copy of the bucket expressed in `unit`.
    #[must_use]
    pub fn scaled(&self, unit: ReportingUnit) -> Self {
        let divisor = unit.divisor();
        Self {
            mode: self.mode,
            reference_date: self.reference_date,
            cells: self
                .cells
                .iter()
                .map(|(cell, v)| (cell.clone(), v.scaled(divisor)))
                .collect(),
        }
    }

    /// Populated cells in serializable form.
    #[must_use]
    pub fn cells(&self) -> Vec<BucketCell> {
        self.cells
            .iter()
            .map(|((period, group), v)| BucketCell {
                period: *period,
                group: group.clone(),
                value: v.value,
                coupon: v.coupon,
                principal: v.principal,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn value(v: Decimal) -> BucketValue {
        BucketValue {
            value: v,
            coupon: v,
            principal: Decimal::ZERO,
        }
    }

    fn bucket() -> PeriodBucket {
        let mut bucket =
            PeriodBucket::new(BucketMode::Year, Date::from_ymd(2024, 12, 31).unwrap());
        bucket.add(1, GroupKey::new(["A"]), value(dec!(10)));
        bucket.add(1, GroupKey::new(["B"]), value(dec!(5)));
        bucket.add(3, GroupKey::new(["A"]), value(dec!(7)));
        bucket.add(1, GroupKey::new(["A"]), value(dec!(1)));
        bucket
    }

    #[test]
    fn test_add_sums_same_cell() {
        let bucket = bucket();
        assert_eq!(bucket.len(), 3);
        assert_eq!(bucket.get(1, &GroupKey::new(["A"])).value, dec!(11));
        assert_eq!(bucket.get(2, &GroupKey::new(["A"])), BucketValue::default());
        assert_eq!(bucket.total().value, dec!(23));
    }

    #[test]
    fn test_series_and_dense_totals() {
        let bucket = bucket();
        assert_eq!(
            bucket.group_series(&GroupKey::new(["A"])),
            BTreeMap::from([(1, dec!(11)), (3, dec!(7))])
        );
        assert_eq!(
            bucket.value_series(),
            BTreeMap::from([(1, dec!(16)), (3, dec!(7))])
        );

        let dense = bucket.dense_totals(0..=3);
        let values: Vec<Decimal> = dense.iter().map(|(_, v)| v.value).collect();
        assert_eq!(values, vec![dec!(0), dec!(16), dec!(0), dec!(7)]);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut other = PeriodBucket::new(BucketMode::Year, Date::from_ymd(2024, 12, 31).unwrap());
        other.add(3, GroupKey::new(["A"]), value(dec!(3)));
        other.add(4, GroupKey::new(["C"]), value(dec!(2)));

        let left = bucket().merge(other.clone());
        let right = other.merge(bucket());
        assert_eq!(left, right);
        assert_eq!(left.get(3, &GroupKey::new(["A"])).value, dec!(10));
    }

    #[test]
    fn test_scaled_to_millions() {
        let mut bucket =
            PeriodBucket::new(BucketMode::Month, Date::from_ymd(2024, 12, 31).unwrap());
        bucket.add(6, GroupKey::default(), value(dec!(2500000)));

        let scaled = bucket.scaled(ReportingUnit::Millions);
        assert_eq!(scaled.get(6, &GroupKey::default()).value, dec!(2.5));
        assert_eq!(scaled.mode(), BucketMode::Month);
    }

    #[test]
    fn test_cells_serialize() {
        let json = serde_json::to_string(&bucket().cells()).unwrap();
        assert!(json.contains("\"period\":3"));
    }
}
