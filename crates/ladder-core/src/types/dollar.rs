//! Currency-valued twin of a percent-of-par schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CashflowKind, Date};

/// A dated payment in currency, split into coupon and principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DollarCashflow {
    date: Date,
    coupon: Decimal,
    principal: Decimal,
    kind: CashflowKind,
}

impl DollarCashflow {
    /// Creates a dollar cash flow.
    #[must_use]
    pub fn new(date: Date, coupon: Decimal, principal: Decimal, kind: CashflowKind) -> Self {
        Self {
            date,
            coupon,
            principal,
            kind,
        }
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the total payment.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.coupon + self.principal
    }

    /// Returns the coupon component.
    #[must_use]
    pub fn coupon(&self) -> Decimal {
        self.coupon
    }

    /// Returns the principal component.
    #[must_use]
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// Returns the payment kind.
    #[must_use]
    pub fn kind(&self) -> CashflowKind {
        self.kind
    }
}

/// Dollar cash flows of one position together with the notional used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DollarSchedule {
    notional: Decimal,
    flows: Vec<DollarCashflow>,
}

impl DollarSchedule {
    /// Creates a schedule from flows already sorted by date.
    #[must_use]
    pub fn new(notional: Decimal, flows: Vec<DollarCashflow>) -> Self {
        Self { notional, flows }
    }

    /// Returns the notional the flows were scaled by.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Returns the flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[DollarCashflow] {
        &self.flows
    }

    /// Returns an iterator over the flows.
    pub fn iter(&self) -> impl Iterator<Item = &DollarCashflow> {
        self.flows.iter()
    }

    /// Returns the number of flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if there are no flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Sum of all payments.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.flows.iter().map(DollarCashflow::amount).sum()
    }

    /// Sum of coupon components.
    #[must_use]
    pub fn coupon_total(&self) -> Decimal {
        self.flows.iter().map(DollarCashflow::coupon).sum()
    }

    /// Sum of principal components.
    #[must_use]
    pub fn principal_total(&self) -> Decimal {
        self.flows.iter().map(DollarCashflow::principal).sum()
    }

    /// Date of the last flow.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.flows.last().map(DollarCashflow::date)
    }
}

impl<'a> IntoIterator for &'a DollarSchedule {
    type Item = &'a DollarCashflow;
    type IntoIter = std::slice::Iter<'a, DollarCashflow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
