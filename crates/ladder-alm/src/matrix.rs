//! Monthly cash flow matrix.
//!
//! One row per position, one column per calendar month from the earliest
//! closing date to the latest cash flow.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ladder_core::types::Date;

use crate::analytics::PositionProjection;

/// Identifying columns and monthly cells of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    /// Position identifier.
    pub position_id: String,
    /// Fund code.
    pub fund_code: String,
    /// Reporting asset type.
    pub asset_type: Option<String>,
    /// Account code.
    pub account_code: Option<String>,
    /// Security description.
    pub security_name: String,
    /// Security identifier.
    pub security_id: Option<String>,
    /// Position currency.
    pub currency: String,
    /// FX rate to the reporting currency.
    pub fx_rate: Decimal,
    /// Annual coupon rate in percent.
    pub coupon_rate: Decimal,
    /// Coupons per year.
    pub coupon_frequency: i32,
    /// Notional used for scaling.
    pub notional: Decimal,
    /// Payment per month column; `None` when nothing is paid.
    pub cells: Vec<Option<Decimal>>,
}

/// Position-by-month table of dollar payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowMatrix {
    /// Month labels (`YYYY-MM`), ascending.
    pub months: Vec<String>,
    /// One row per projection with cash flow.
    pub rows: Vec<MatrixRow>,
}

/// Labels of every month from `start` through `end`.
fn month_labels(start: Date, end: Date) -> Vec<String> {
    let mut labels = Vec::new();
    let mut month = start.start_of_month();
    let last = end.start_of_month();
    while month <= last {
        labels.push(month.year_month());
        match month.add_months(1) {
            Ok(next) => month = next,
            Err(_) => break,
        }
    }
    labels
}

impl CashflowMatrix {
    /// Builds the matrix from projected positions.
    ///
    /// Payments falling in the same month are summed. Positions without
    /// cash flow are left out.
    #[must_use]
    pub fn from_projections(projections: &[PositionProjection]) -> Self {
        let with_flows: Vec<&PositionProjection> = projections
            .iter()
            .filter(|p| !p.dollars.is_empty())
            .collect();

        let start = with_flows.iter().map(|p| p.terms.closing_date).min();
        let end = with_flows.iter().filter_map(|p| p.dollars.last_date()).max();
        let (Some(start), Some(end)) = (start, end) else {
            return Self::default();
        };

        let months = month_labels(start, end);
        let column: BTreeMap<&str, usize> = months
            .iter()
            .enumerate()
            .map(|(i, m)| (m.as_str(), i))
            .collect();

        let rows = with_flows
            .into_iter()
            .map(|projection| {
                let mut cells: Vec<Option<Decimal>> = vec![None; months.len()];
                for flow in projection.dollars.iter() {
                    let label = flow.date().year_month();
                    if let Some(&i) = column.get(label.as_str()) {
                        *cells[i].get_or_insert(Decimal::ZERO) += flow.amount();
                    }
                }

                let terms = &projection.terms;
                MatrixRow {
                    position_id: terms.position_id.clone(),
                    fund_code: terms.fund_code.clone(),
                    asset_type: terms.asset_type.clone(),
                    account_code: terms.account_code.clone(),
                    security_name: terms.security_name.clone(),
                    security_id: terms.security_id.clone(),
                    currency: terms.currency.clone(),
                    fx_rate: terms.fx_rate,
                    coupon_rate: terms.coupon_rate,
                    coupon_frequency: terms.coupon_frequency,
                    notional: projection.notional(),
                    cells,
                }
            })
            .collect();

        Self { months, rows }
    }

    /// Column totals.
    #[must_use]
    pub fn month_totals(&self) -> Vec<Decimal> {
        (0..self.months.len())
            .map(|i| self.rows.iter().filter_map(|r| r.cells[i]).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_bonds::cashflows::{NotionalScaler, ScheduleBuilder};
    use ladder_bonds::BondTerms;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn projection(id: &str, closing: Date, maturity: Date) -> PositionProjection {
        let terms = BondTerms::builder()
            .position_id(id)
            .closing_date(closing)
            .maturity_date(maturity)
            .coupon_rate(dec!(4))
            .coupon_frequency(2)
            .position_quantity(dec!(1000))
            .build()
            .unwrap();
        let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();
        let dollars = NotionalScaler::scale(&schedule, &terms).unwrap();
        PositionProjection {
            terms,
            schedule,
            dollars,
            time_until_maturity: None,
        }
    }

    #[test]
    fn test_month_labels_span() {
        let labels = month_labels(d(2024, 11, 15), d(2025, 2, 1));
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_matrix_columns_and_cells() {
        let matrix = CashflowMatrix::from_projections(&[
            projection("P-1", d(2024, 12, 31), d(2025, 12, 31)),
            projection("P-2", d(2024, 12, 31), d(2025, 6, 30)),
        ]);

        assert_eq!(matrix.months.first().map(String::as_str), Some("2024-12"));
        assert_eq!(matrix.months.last().map(String::as_str), Some("2025-12"));
        assert_eq!(matrix.months.len(), 13);

        let p1 = &matrix.rows[0];
        assert_eq!(p1.cells[0], Some(dec!(20)));
        assert_eq!(p1.cells[1], None);
        assert_eq!(p1.cells[6], Some(dec!(20)));
        assert_eq!(p1.cells[12], Some(dec!(1020)));

        let totals = matrix.month_totals();
        assert_eq!(totals[6], dec!(1040));
    }

    #[test]
    fn test_empty_projections() {
        assert_eq!(CashflowMatrix::from_projections(&[]), CashflowMatrix::default());
    }
}
