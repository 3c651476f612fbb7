//! Conversion of percent-of-par schedules into currency amounts.

use rust_decimal::Decimal;

use ladder_core::types::{CashflowSchedule, DollarCashflow, DollarSchedule};

use crate::error::{BondError, BondResult};
use crate::terms::BondTerms;

/// Notional-to-market-value ratio above which the notional is assumed to be
/// quoted in the wrong unit.
const UNIT_MISMATCH_RATIO: Decimal = Decimal::ONE_HUNDRED;

/// Correction applied when the unit mismatch is detected.
const UNIT_MISMATCH_DIVISOR: Decimal = Decimal::ONE_THOUSAND;

/// Scales schedules by a position's notional.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotionalScaler;

impl NotionalScaler {
    /// Computes the notional exposure of a position.
    ///
    /// Returns zero when the reference net market value is zero. A notional
    /// more than a hundred times the reference value is divided by a
    /// thousand; a ratio too large to represent counts as such a mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::InvalidInput`] when the notional itself does not
    /// fit in a `Decimal`.
    pub fn notional(terms: &BondTerms) -> BondResult<Decimal> {
        let notional = [
            terms.position_quantity,
            terms.effective_mortgage_factor(),
            terms.effective_principal_factor(),
            terms.fx_rate,
        ]
        .into_iter()
        .try_fold(terms.unit_price, |acc, factor| acc.checked_mul(factor))
        .ok_or_else(|| {
            BondError::invalid_input(&terms.position_id, "notional overflows decimal range")
        })?;

        let Some(net_mv) = terms.net_market_value else {
            return Ok(notional);
        };

        if net_mv.is_zero() {
            tracing::debug!(
                position_id = %terms.position_id,
                "reference market value is zero, notional set to zero"
            );
            return Ok(Decimal::ZERO);
        }

        let out_of_scale = notional
            .checked_div(net_mv)
            .map_or(true, |ratio| ratio > UNIT_MISMATCH_RATIO);
        if out_of_scale {
            tracing::debug!(
                position_id = %terms.position_id,
                notional = %notional,
                net_market_value = %net_mv,
                "notional out of scale with market value, dividing by 1000"
            );
            return Ok(notional / UNIT_MISMATCH_DIVISOR);
        }

        Ok(notional)
    }

    /// Produces the currency-valued twin of a schedule.
    ///
    /// Each payment becomes `payment_pct / 100 * notional`, keeping the
    /// coupon and principal components apart.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::InvalidInput`] when the notional or any scaled
    /// payment overflows.
    pub fn scale(schedule: &CashflowSchedule, terms: &BondTerms) -> BondResult<DollarSchedule> {
        Self::scale_by(schedule, Self::notional(terms)?).ok_or_else(|| {
            BondError::invalid_input(&terms.position_id, "scaled payment overflows decimal range")
        })
    }

    /// Scales a schedule by an explicit notional.
    ///
    /// Returns `None` if a scaled payment overflows.
    #[must_use]
    pub fn scale_by(schedule: &CashflowSchedule, notional: Decimal) -> Option<DollarSchedule> {
        let per_pct = notional / Decimal::ONE_HUNDRED;
        let flows = schedule
            .iter()
            .map(|event| {
                Some(DollarCashflow::new(
                    event.date(),
                    event.coupon_pct().checked_mul(per_pct)?,
                    event.principal_pct().checked_mul(per_pct)?,
                    event.kind(),
                ))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(DollarSchedule::new(notional, flows))
    }
}
