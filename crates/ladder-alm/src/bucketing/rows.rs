//! Security-level drill-down rows.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::PositionProjection;

use super::BucketValue;

/// Cash flow of one position within one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityCashflowRow {
    /// Position identifier.
    pub position_id: String,
    /// Security description.
    pub security_name: String,
    /// Security identifier.
    pub security_id: Option<String>,
    /// Fund code.
    pub fund_code: String,
    /// Reporting asset type.
    pub asset_type: Option<String>,
    /// Portfolio manager.
    pub manager: Option<String>,
    /// Period index.
    pub period: u32,
    /// Total payment in the period.
    pub value: Decimal,
    /// Coupon component.
    pub coupon: Decimal,
    /// Principal component.
    pub principal: Decimal,
    /// Notional used for scaling.
    pub notional: Decimal,
    /// Annual coupon rate in percent.
    pub coupon_rate: Decimal,
    /// Coupons per year.
    pub coupon_frequency: i32,
    /// Years from closing date to the last cash flow.
    pub time_until_maturity: Option<f64>,
}

impl SecurityCashflowRow {
    pub(crate) fn new(projection: &PositionProjection, period: u32, value: BucketValue) -> Self {
        let terms = &projection.terms;
        Self {
            position_id: terms.position_id.clone(),
            security_name: terms.security_name.clone(),
            security_id: terms.security_id.clone(),
            fund_code: terms.fund_code.clone(),
            asset_type: terms.asset_type.clone(),
            manager: terms.manager.clone(),
            period,
            value: value.value,
            coupon: value.coupon,
            principal: value.principal,
            notional: projection.notional(),
            coupon_rate: terms.coupon_rate,
            coupon_frequency: terms.coupon_frequency,
            time_until_maturity: projection.time_until_maturity,
        }
    }
}

/// Orders rows by period ascending, then value descending.
pub(crate) fn sort_rows(rows: &mut [SecurityCashflowRow]) {
    rows.sort_by(|a, b| {
        a.period
            .cmp(&b.period)
            .then_with(|| b.value.cmp(&a.value))
            .then_with(|| a.position_id.cmp(&b.position_id))
    });
}

/// Keeps rows whose period is among `periods`.
#[must_use]
pub fn rows_for_periods(
    rows: &[SecurityCashflowRow],
    periods: &BTreeSet<u32>,
) -> Vec<SecurityCashflowRow> {
    rows.iter()
        .filter(|r| periods.contains(&r.period))
        .cloned()
        .collect()
}
