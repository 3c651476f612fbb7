//! Property and scenario tests for schedule construction and scaling.
//!
//! These tests verify invariants that must hold for every bond:
//! - Zero-coupon bonds pay a single redemption at workout
//! - Coupons are equal and evenly spaced in months
//! - Scaling is reversible when the notional is non-zero

use approx::assert_relative_eq;
use ladder_bonds::prelude::*;
use ladder_core::types::{CashflowEvent, Date};
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

const FREQUENCIES: [i32; 6] = [1, 2, 3, 4, 6, 12];

fn bond_strategy() -> impl Strategy<Value = BondTerms> {
    (
        0i64..3_000,
        1i64..15_000,
        0usize..FREQUENCIES.len(),
        0u32..1_200,
        1u32..5_000,
        prop::bool::ANY,
    )
        .prop_map(|(closing_offset, tenor, freq_idx, rate_bp, qty_k, callable)| {
            let closing = d(2020, 1, 1).add_days(closing_offset);
            let maturity = closing.add_days(tenor);
            let mut builder = BondTerms::builder()
                .position_id(format!("P-{closing_offset}-{tenor}"))
                .closing_date(closing)
                .maturity_date(maturity)
                .coupon_rate(Decimal::new(i64::from(rate_bp), 2))
                .coupon_frequency(FREQUENCIES[freq_idx])
                .position_quantity(Decimal::from(qty_k) * dec!(1000));
            if callable {
                builder = builder.call(closing.add_days(tenor / 2), dec!(101));
            }
            builder.build().unwrap()
        })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_zero_coupon_single_redemption(mut terms in bond_strategy()) {
        terms.coupon_frequency = 0;
        let builder = ScheduleBuilder::default();
        let schedule = builder.build_schedule(&terms).unwrap();
        let workout = builder.workout(&terms);

        prop_assert_eq!(schedule.len(), 1);
        let event = schedule.as_slice()[0];
        prop_assert_eq!(event.date(), workout.date);
        prop_assert_eq!(event.payment_pct(), workout.redemption);
    }

    #[test]
    fn prop_coupons_equal_and_evenly_spaced(terms in bond_strategy()) {
        let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();
        let f = terms.coupon_frequency;
        let step = 12 / f;
        let expected = terms.coupon_rate / Decimal::from(f);

        for event in schedule.iter().filter(|e| !e.is_terminal()) {
            prop_assert_eq!(event.payment_pct(), expected);
            prop_assert!(event.date() >= terms.closing_date);
        }

        let dates: Vec<Date> = schedule.iter().map(CashflowEvent::date).collect();
        for pair in dates.windows(2) {
            let delta = pair[1].relative_to(pair[0]).unwrap();
            prop_assert_eq!(delta.total_months(), step);
        }
    }

    #[test]
    fn prop_exactly_one_terminal_event_at_workout(terms in bond_strategy()) {
        let builder = ScheduleBuilder::default();
        let schedule = builder.build_schedule(&terms).unwrap();
        let terminals: Vec<_> = schedule.iter().filter(|e| e.is_terminal()).collect();

        prop_assert_eq!(terminals.len(), 1);
        prop_assert_eq!(terminals[0].date(), builder.workout(&terms).date);
        prop_assert_eq!(schedule.last_date(), Some(terminals[0].date()));
    }

    #[test]
    fn prop_build_is_idempotent(terms in bond_strategy()) {
        let builder = ScheduleBuilder::default();
        prop_assert_eq!(
            builder.build_schedule(&terms).unwrap(),
            builder.build_schedule(&terms).unwrap()
        );
    }

    #[test]
    fn prop_scale_round_trip(terms in bond_strategy()) {
        let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();
        let dollars = NotionalScaler::scale(&schedule, &terms).unwrap();
        prop_assume!(!dollars.notional().is_zero());

        let per_pct = dollars.notional() / dec!(100);
        for (event, flow) in schedule.iter().zip(dollars.iter()) {
            let recovered = (flow.amount() / per_pct).to_f64().unwrap();
            assert_relative_eq!(
                recovered,
                event.payment_pct().to_f64().unwrap(),
                epsilon = 1e-9
            );
        }
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

fn scenario_terms() -> BondTerms {
    BondTerms::builder()
        .position_id("SCENARIO")
        .closing_date(d(2024, 12, 31))
        .maturity_date(d(2027, 12, 31))
        .coupon_rate(dec!(4.0))
        .coupon_frequency(2)
        .redemption_value(dec!(100))
        .position_quantity(dec!(1000000))
        .unit_price(Decimal::ONE)
        .factors(Decimal::ONE, Decimal::ONE)
        .fx_rate(Decimal::ONE)
        .build()
        .unwrap()
}

#[test]
fn test_three_year_semiannual_scenario() {
    let terms = scenario_terms();
    let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();

    let coupon_dates: Vec<Date> = schedule
        .iter()
        .filter(|e| !e.is_terminal())
        .map(CashflowEvent::date)
        .collect();
    for expected in [
        d(2025, 6, 30),
        d(2025, 12, 31),
        d(2026, 6, 30),
        d(2026, 12, 31),
        d(2027, 6, 30),
    ] {
        assert!(coupon_dates.contains(&expected), "missing {expected}");
    }
    assert!(schedule
        .iter()
        .filter(|e| !e.is_terminal())
        .all(|e| e.payment_pct() == dec!(2.0)));

    let terminal = schedule.terminal().unwrap();
    assert_eq!(terminal.date(), d(2027, 12, 31));
    assert_eq!(terminal.payment_pct(), dec!(102.0));

    let dollars = NotionalScaler::scale(&schedule, &terms).unwrap();
    assert_eq!(dollars.as_slice().last().unwrap().amount(), dec!(1020000));
}

#[test]
fn test_zero_factors_treated_as_one() {
    let mut terms = scenario_terms();
    terms.mortgage_factor = Decimal::ZERO;
    terms.principal_factor = Decimal::ZERO;

    assert_eq!(NotionalScaler::notional(&terms).unwrap(), dec!(1000000));
}

#[test]
fn test_callable_bond_redeems_at_call_price() {
    let mut terms = scenario_terms();
    terms.call_date = Some(d(2026, 6, 30));
    terms.call_price = Some(dec!(101));

    let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();
    let terminal = schedule.terminal().unwrap();
    assert_eq!(terminal.date(), d(2026, 6, 30));
    assert_eq!(terminal.principal_pct(), dec!(101));
    assert_eq!(terminal.payment_pct(), dec!(103.0));
}

#[test]
fn test_override_book_feeds_builder() {
    let book = CouponDateBook::from_records(&[OverrideRecord {
        security_id: "BBG000TEST".to_string(),
        category: "penultimate_coupon_date".to_string(),
        value: d(2027, 10, 31),
    }]);

    let mut terms = scenario_terms();
    terms.security_id = Some("BBG000TEST".to_string());
    let terms = book.apply(terms);

    let schedule = ScheduleBuilder::default().build_schedule(&terms).unwrap();
    let dates: Vec<Date> = schedule.iter().map(CashflowEvent::date).collect();
    assert_eq!(dates[dates.len() - 2], d(2027, 10, 31));
    assert_eq!(dates[dates.len() - 3], d(2027, 4, 30));
}
