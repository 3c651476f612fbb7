//! Batch projection of portfolio positions.
//!
//! Each position is projected independently; a position whose terms cannot
//! produce a schedule is skipped and recorded, never aborting the batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ladder_bonds::cashflows::{CouponDateBook, NotionalScaler, ScheduleBuilder};
use ladder_bonds::{BondError, BondTerms};
use ladder_core::types::{CashflowSchedule, DollarSchedule};

use super::parallel::maybe_parallel_map;
use crate::cache::{ScheduleCache, ScheduleKey};
use crate::types::ProjectionConfig;

/// Why a position was left out of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// Terms cannot produce a schedule.
    InvalidTerms,
    /// A cash flow falls before the bucketing reference date.
    BeforeReference,
}

/// A position skipped during projection or bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPosition {
    /// Position identifier.
    pub position_id: String,
    /// Category of the failure.
    pub reason: SkipReason,
    /// Description of the failure.
    pub message: String,
}

/// Projected cash flows of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionProjection {
    /// Terms after overrides and coupon fallback were applied.
    pub terms: BondTerms,
    /// Percent-of-par schedule.
    pub schedule: CashflowSchedule,
    /// Currency schedule.
    pub dollars: DollarSchedule,
    /// Years from closing date to the last cash flow, rounded to six places.
    pub time_until_maturity: Option<f64>,
}

impl PositionProjection {
    /// Returns the notional used for scaling.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.dollars.notional()
    }

    /// Returns true if the schedule was left empty.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Result of projecting a batch of positions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionOutcome {
    /// Projected positions, in input order.
    pub projections: Vec<PositionProjection>,
    /// Positions skipped for invalid terms.
    pub skipped: Vec<SkippedPosition>,
    /// Positions whose schedule was left empty.
    pub indeterminate: Vec<String>,
    /// Positions whose notional came out zero.
    pub zero_notional: Vec<String>,
    /// Positions dropped by the position filter.
    pub filtered_out: usize,
    /// Positions beyond the per-request budget.
    pub over_budget: usize,
}

impl ProjectionOutcome {
    /// Sum of all projected dollar cash flows.
    #[must_use]
    pub fn total_cashflow(&self) -> Decimal {
        self.projections.iter().map(|p| p.dollars.total()).sum()
    }
}

/// Years from closing date to the last cash flow, rounded to six places.
fn time_until_maturity(terms: &BondTerms, schedule: &CashflowSchedule) -> Option<f64> {
    let last = schedule.last_date()?;
    let years = (last - terms.closing_date) as f64 / 365.25;
    Some((years * 1e6).round() / 1e6)
}

fn cached_schedule(
    builder: &ScheduleBuilder,
    terms: &BondTerms,
    cache: &dyn ScheduleCache,
) -> Result<CashflowSchedule, BondError> {
    let Some(security_id) = terms.security_id.as_deref() else {
        return builder.build_schedule(terms);
    };

    let key = ScheduleKey::new(terms.closing_date, security_id);
    if let Some(schedule) = cache.get(&key) {
        return Ok(schedule);
    }

    let schedule = builder.build_schedule(terms)?;
    cache.insert(key, schedule.clone());
    Ok(schedule)
}

fn project_one(
    terms: &BondTerms,
    overrides: &CouponDateBook,
    builder: &ScheduleBuilder,
    cache: &dyn ScheduleCache,
) -> Result<PositionProjection, SkippedPosition> {
    let terms = overrides
        .apply(terms.clone())
        .with_mbs_coupon_fallback(builder.config().mbs_fallback_rate);

    let schedule = cached_schedule(builder, &terms, cache).map_err(|e| SkippedPosition {
        position_id: terms.position_id.clone(),
        reason: SkipReason::InvalidTerms,
        message: e.to_string(),
    })?;

    let dollars = NotionalScaler::scale(&schedule, &terms).map_err(|e| SkippedPosition {
        position_id: terms.position_id.clone(),
        reason: SkipReason::InvalidTerms,
        message: e.to_string(),
    })?;
    let time_until_maturity = time_until_maturity(&terms, &schedule);

    Ok(PositionProjection {
        terms,
        schedule,
        dollars,
        time_until_maturity,
    })
}

/// Projects a batch of positions into dollar schedules.
///
/// Positions rejected by the configured filter are counted, positions
/// beyond `max_positions` are dropped, and positions with invalid terms
/// are recorded in `skipped`. Schedules are memoized through `cache` by
/// closing date and security identifier.
pub fn project_positions(
    positions: &[BondTerms],
    overrides: &CouponDateBook,
    config: &ProjectionConfig,
    cache: &dyn ScheduleCache,
) -> ProjectionOutcome {
    let mut kept: Vec<&BondTerms> = positions
        .iter()
        .filter(|p| config.filter.accepts(p))
        .collect();
    let filtered_out = positions.len() - kept.len();

    let mut over_budget = 0;
    if let Some(max) = config.max_positions {
        if kept.len() > max {
            over_budget = kept.len() - max;
            tracing::warn!(
                budget = max,
                dropped = over_budget,
                "position budget exceeded, projecting the first positions only"
            );
            kept.truncate(max);
        }
    }

    let builder = ScheduleBuilder::new(config.schedule.clone());
    let results = maybe_parallel_map(&kept, config, |terms| {
        project_one(terms, overrides, &builder, cache)
    });

    let mut outcome = ProjectionOutcome {
        filtered_out,
        over_budget,
        ..ProjectionOutcome::default()
    };

    for result in results {
        match result {
            Ok(projection) => {
                if projection.is_indeterminate() {
                    outcome
                        .indeterminate
                        .push(projection.terms.position_id.clone());
                } else if projection.notional().is_zero() {
                    outcome
                        .zero_notional
                        .push(projection.terms.position_id.clone());
                }
                outcome.projections.push(projection);
            }
            Err(skipped) => {
                tracing::warn!(
                    position_id = %skipped.position_id,
                    error = %skipped.message,
                    "skipping position"
                );
                outcome.skipped.push(skipped);
            }
        }
    }

    tracing::info!(
        positions = positions.len(),
        projected = outcome.projections.len(),
        skipped = outcome.skipped.len(),
        indeterminate = outcome.indeterminate.len(),
        zero_notional = outcome.zero_notional.len(),
        filtered_out = outcome.filtered_out,
        "projection complete"
    );

    outcome
}
