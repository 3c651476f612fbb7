//! Percent-of-par schedule construction for a single bond.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ladder_core::types::{CashflowEvent, CashflowSchedule, Date};

use super::stepper::{months_per_period, DateStepper};
use crate::error::{BondError, BondResult};
use crate::terms::{BondTerms, DEFAULT_MBS_COUPON_RATE};

/// How a `first_coupon_date` override is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstCouponPolicy {
    /// Stepping stops before the closing date; the override is not consulted.
    #[default]
    Ignore,
    /// The override becomes the schedule's accrual anchor when it lies
    /// strictly between the first date stepped past the closing date and
    /// the closing date. Adds no cash.
    AccrualAnchor,
}

/// Configuration for schedule construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Treat a call at or before maturity as the workout date.
    pub to_next_call: bool,
    /// Treatment of the first coupon date override.
    pub first_coupon_policy: FirstCouponPolicy,
    /// Add the coupon rate to the single payment of a zero-coupon bond.
    pub zero_coupon_pays_rate: bool,
    /// Annual coupon substituted for mortgage pools reporting zero.
    pub mbs_fallback_rate: Decimal,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            to_next_call: true,
            first_coupon_policy: FirstCouponPolicy::Ignore,
            zero_coupon_pays_rate: false,
            mbs_fallback_rate: DEFAULT_MBS_COUPON_RATE,
        }
    }
}

impl ScheduleConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether calls drive the workout date.
    #[must_use]
    pub fn with_to_next_call(mut self, to_next_call: bool) -> Self {
        self.to_next_call = to_next_call;
        self
    }

    /// Sets the first coupon date policy.
    #[must_use]
    pub fn with_first_coupon_policy(mut self, policy: FirstCouponPolicy) -> Self {
        self.first_coupon_policy = policy;
        self
    }

    /// Sets whether zero-coupon bonds pay their rate at workout.
    #[must_use]
    pub fn with_zero_coupon_pays_rate(mut self, pays: bool) -> Self {
        self.zero_coupon_pays_rate = pays;
        self
    }

    /// Sets the mortgage pool fallback coupon.
    #[must_use]
    pub fn with_mbs_fallback_rate(mut self, rate: Decimal) -> Self {
        self.mbs_fallback_rate = rate;
        self
    }
}

/// Workout date and redemption of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workout {
    /// Date principal is returned.
    pub date: Date,
    /// True when the workout is a call.
    pub is_call: bool,
    /// Principal paid at workout in percent of par.
    pub redemption: Decimal,
}

/// Builds percent-of-par cash flow schedules.
///
/// # Example
///
/// ```rust
/// use ladder_bonds::prelude::*;
/// use ladder_core::types::Date;
/// use rust_decimal_macros::dec;
///
/// let terms = BondTerms::builder()
///     .position_id("P-1")
///     .closing_date(Date::from_ymd(2024, 12, 31).unwrap())
///     .maturity_date(Date::from_ymd(2027, 12, 31).unwrap())
///     .coupon_rate(dec!(4.0))
///     .coupon_frequency(2)
///     .build()
///     .unwrap();
///
/// let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();
/// assert_eq!(schedule.terminal().unwrap().payment_pct(), dec!(102.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    config: ScheduleConfig,
}

impl ScheduleBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Determines the workout date and redemption amount.
    #[must_use]
    pub fn workout(&self, terms: &BondTerms) -> Workout {
        let (date, is_call) = match terms.call_date {
            Some(call) if self.config.to_next_call && call <= terms.maturity_date => (call, true),
            _ => (terms.maturity_date, false),
        };

        let redemption = match terms.call_price {
            Some(price) if is_call && !price.is_zero() && price != terms.redemption_value => price,
            _ => terms.effective_redemption_value(),
        };

        Workout {
            date,
            is_call,
            redemption,
        }
    }

    /// Coupon paid per period in percent of par.
    #[must_use]
    pub fn coupon_payment_pct(terms: &BondTerms) -> Decimal {
        if terms.coupon_frequency == 0 {
            terms.coupon_rate
        } else {
            terms.coupon_rate / Decimal::from(terms.coupon_frequency)
        }
    }

    /// Builds the schedule for one bond.
    ///
    /// Returns an empty schedule when the workout date disagrees with the
    /// feed's effective maturity; callers treat that as "no cash flow data".
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInput` for a negative coupon frequency, a
    /// frequency that does not divide twelve months, or a workout date
    /// before the closing date.
    pub fn build_schedule(&self, terms: &BondTerms) -> BondResult<CashflowSchedule> {
        let id = terms.position_id.as_str();

        if terms.coupon_frequency < 0 {
            return Err(BondError::invalid_input(
                id,
                format!("coupon frequency {} is negative", terms.coupon_frequency),
            ));
        }

        let workout = self.workout(terms);

        if workout.date < terms.closing_date {
            return Err(BondError::invalid_input(
                id,
                format!(
                    "workout date {} precedes closing date {}",
                    workout.date, terms.closing_date
                ),
            ));
        }

        if self.config.to_next_call {
            if let Some(effective) = terms.effective_maturity {
                if effective != workout.date {
                    tracing::warn!(
                        position_id = %id,
                        workout = %workout.date,
                        effective_maturity = %effective,
                        "workout date disagrees with effective maturity, schedule left empty"
                    );
                    return Ok(CashflowSchedule::empty());
                }
            }
        }

        let coupon = Self::coupon_payment_pct(terms);

        if terms.coupon_frequency == 0 {
            let coupon = if self.config.zero_coupon_pays_rate {
                coupon
            } else {
                Decimal::ZERO
            };
            return Ok(CashflowSchedule::from_events(vec![CashflowEvent::terminal(
                workout.date,
                coupon,
                workout.redemption,
            )]));
        }

        let step = months_per_period(terms.coupon_frequency).ok_or_else(|| {
            BondError::invalid_input(
                id,
                format!(
                    "coupon frequency {} does not divide twelve months",
                    terms.coupon_frequency
                ),
            )
        })?;

        // Coupons are counted from the override when it precedes the
        // workout, otherwise from the workout date itself skipping k = 0.
        let (stepper, skip) = match terms.penultimate_coupon_date {
            Some(penultimate) if penultimate < workout.date => {
                (DateStepper::new(penultimate, step), 0)
            }
            _ => (DateStepper::new(workout.date, step), 1),
        };
        let stepped = stepper.back_to(terms.closing_date, skip)?;

        let mut events = Vec::with_capacity(stepped.dates.len() + 1);
        events.extend(
            stepped
                .dates
                .iter()
                .map(|&date| CashflowEvent::coupon(date, coupon)),
        );
        events.push(CashflowEvent::terminal(workout.date, coupon, workout.redemption));

        let schedule = CashflowSchedule::from_events(events);

        Ok(match self.config.first_coupon_policy {
            FirstCouponPolicy::Ignore => schedule,
            FirstCouponPolicy::AccrualAnchor => {
                let anchor = match terms.first_coupon_date {
                    Some(first) if first > stepped.stepped_past && first < terms.closing_date => {
                        first
                    }
                    _ => stepped.stepped_past,
                };
                schedule.with_accrual_anchor(anchor)
            }
        })
    }
}
