//! Cash flow amounts and accrued interest for complete bonds.

use accrual_bonds::prelude::*;
use accrual_core::daycounts::DayCountConvention;
use accrual_core::types::Date;
use accrual_core::AccrualError;
use approx::assert_relative_eq;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ============================================================================
// Helper Functions
// ============================================================================

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn five_percent(settlement: Date, maturity: Date) -> FixedRateBondBuilder {
    FixedRateBond::builder()
        .identifier("TEST")
        .coupon_rate(dec!(0.05))
        .settlement(settlement)
        .maturity(maturity)
}

fn amounts(flows: &[CashFlowRow]) -> Vec<Decimal> {
    flows.iter().map(|row| row.amount).collect()
}

// ============================================================================
// Regular Bonds
// ============================================================================

#[test]
fn test_regular_bond_on_coupon_date() {
    let bond = five_percent(d(2020, 1, 15), d(2025, 7, 15)).build().unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(flows.len(), 12);
    assert_eq!(flows[0].date, d(2020, 1, 15));
    assert_eq!(flows[0].amount, Decimal::ZERO);
    for row in &flows[1..11] {
        assert_eq!(row.amount, dec!(2.5));
    }
    assert_eq!(flows[11].date, d(2025, 7, 15));
    assert_eq!(flows[11].amount, dec!(102.5));
    assert_eq!(bond.accrued_interest().unwrap(), Decimal::ZERO);
}

#[test]
fn test_regular_bond_mid_period() {
    let bond = five_percent(d(2020, 3, 15), d(2025, 7, 15)).build().unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(flows.len(), 12);
    assert_eq!(flows[0].amount, dec!(2.5) * dec!(122) / dec!(182));
    assert_eq!(flows[1].amount, dec!(2.5));

    let accrued = bond.accrued_interest().unwrap();
    assert_eq!(accrued, dec!(2.5) * dec!(60) / dec!(182));
    assert_relative_eq!(
        (accrued + flows[0].amount).to_f64().unwrap(),
        2.5,
        epsilon = 1e-12
    );
}

#[test]
fn test_face_value_scales_amounts() {
    let bond = five_percent(d(2020, 1, 15), d(2025, 7, 15))
        .face_value(dec!(1000))
        .build()
        .unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(bond.regular_coupon_amount(), dec!(25));
    assert_eq!(flows[1].amount, dec!(25));
    assert_eq!(flows.last().unwrap().amount, dec!(1025));
}

// ============================================================================
// Odd First Coupon
// ============================================================================

#[test]
fn test_short_first_coupon_amounts() {
    let bond = five_percent(d(2020, 1, 15), d(2025, 7, 15))
        .first_coupon(d(2020, 4, 15))
        .build()
        .unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(flows.len(), 13);
    assert_eq!(flows[0].amount, dec!(2.5) * dec!(91) / dec!(183));
    assert_eq!(flows[1].date, d(2020, 4, 15));
    assert_eq!(flows[1].amount, dec!(2.5));
    for row in &flows[2..12] {
        assert_eq!(row.amount, dec!(2.5));
    }
    assert_eq!(flows[12].date, d(2025, 7, 15));
    assert_eq!(
        flows[12].amount,
        dec!(2.5) * dec!(91) / dec!(183) + dec!(100)
    );

    // Accrual runs from the quasi issue date 2019-10-15.
    assert_eq!(
        bond.accrued_interest().unwrap(),
        dec!(2.5) * dec!(92) / dec!(183)
    );
}

#[test]
fn test_first_coupon_with_issue_accrues_from_issue() {
    let bond = five_percent(d(2020, 1, 15), d(2025, 7, 15))
        .issue(d(2019, 12, 15))
        .first_coupon(d(2020, 4, 15))
        .build()
        .unwrap();
    let flows = bond.cash_flows().unwrap();

    // Issue 2019-12-15 to first coupon 2020-04-15 spans 122 of the 183 day period.
    assert_eq!(flows[1].amount, dec!(2.5) * dec!(122) / dec!(183));
    assert_eq!(flows[0].amount, dec!(2.5) * dec!(91) / dec!(183));
    assert_eq!(
        bond.accrued_interest().unwrap(),
        dec!(2.5) * dec!(31) / dec!(183)
    );
}

#[test]
fn test_long_first_coupon_without_issue_pays_one_coupon() {
    let early = five_percent(d(2019, 1, 15), d(2025, 7, 15))
        .first_coupon(d(2020, 4, 15))
        .build()
        .unwrap();
    let late = five_percent(d(2019, 11, 1), d(2025, 7, 15))
        .first_coupon(d(2020, 4, 15))
        .build()
        .unwrap();

    assert_eq!(early.schedule().quasi_issue_date().unwrap(), d(2018, 10, 15));
    assert_eq!(early.schedule().full_odd_first_count().unwrap(), 1);

    let early_flows = early.cash_flows().unwrap();
    let late_flows = late.cash_flows().unwrap();

    // The first coupon does not depend on who settles.
    assert_eq!(early_flows[1].date, d(2020, 4, 15));
    assert_eq!(late_flows[1].date, d(2020, 4, 15));
    assert_eq!(early_flows[1].amount, dec!(2.5));
    assert_eq!(late_flows[1].amount, dec!(2.5));

    // 2018-10-15 .. 2020-04-15 is 548 days, 456 of them after settlement.
    assert_eq!(early_flows[0].amount, dec!(2.5) * dec!(456) / dec!(548));
    assert_eq!(
        early.accrued_interest().unwrap(),
        dec!(2.5) * dec!(92) / dec!(548)
    );
    // 2019-10-15 .. 2020-04-15 is 183 days, 166 of them after settlement.
    assert_eq!(late_flows[0].amount, dec!(2.5) * dec!(166) / dec!(183));

    for bond in [&early, &late] {
        let total = bond.accrued_interest().unwrap() + bond.cash_flows().unwrap()[0].amount;
        assert_relative_eq!(total.to_f64().unwrap(), 2.5, epsilon = 1e-12);
    }
}

// ============================================================================
// Odd Last Coupon
// ============================================================================

#[test]
fn test_long_last_coupon_amounts() {
    let bond = five_percent(d(2023, 1, 15), d(2025, 3, 15))
        .last_coupon(d(2024, 7, 15))
        .build()
        .unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(
        flows.iter().map(|row| row.date).collect::<Vec<_>>(),
        vec![
            d(2023, 1, 15),
            d(2023, 7, 15),
            d(2024, 1, 15),
            d(2024, 7, 15),
            d(2025, 3, 15),
        ]
    );
    assert_eq!(
        amounts(&flows),
        vec![
            Decimal::ZERO,
            dec!(2.5),
            dec!(2.5),
            dec!(2.5),
            dec!(2.5) * dec!(1) + dec!(2.5) * dec!(59) / dec!(181) + dec!(100),
        ]
    );
}

#[test]
fn test_settlement_after_last_coupon() {
    let bond = five_percent(d(2024, 10, 15), d(2025, 3, 15))
        .last_coupon(d(2024, 7, 15))
        .build()
        .unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(flows.len(), 2);
    // 92 of 184 days to 2025-01-15, then 59 of 181 days into the notional period.
    assert_eq!(
        flows[0].amount,
        dec!(1.25) + dec!(2.5) * dec!(59) / dec!(181)
    );
    assert_eq!(
        flows[1].amount,
        dec!(2.5) * dec!(1) + dec!(2.5) * dec!(59) / dec!(181) + dec!(100)
    );
    assert_eq!(bond.accrued_interest().unwrap(), dec!(1.25));
}

#[test]
fn test_first_and_last_coupon_amounts() {
    let bond = five_percent(d(2020, 1, 15), d(2025, 7, 15))
        .first_coupon(d(2020, 4, 15))
        .last_coupon(d(2024, 10, 15))
        .build()
        .unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(flows.len(), 12);
    assert_eq!(flows[0].amount, dec!(2.5) * dec!(91) / dec!(183));
    assert_eq!(flows[1].amount, dec!(2.5));
    assert_eq!(flows[10].date, d(2024, 10, 15));
    assert_eq!(flows[10].amount, dec!(2.5));
    assert_eq!(
        flows[11].amount,
        dec!(2.5) * dec!(1) + dec!(2.5) * dec!(91) / dec!(183) + dec!(100)
    );
}

#[test]
fn test_first_and_last_coupon_settled_in_last_stub() {
    let bond = five_percent(d(2025, 1, 1), d(2025, 7, 15))
        .first_coupon(d(2020, 4, 15))
        .last_coupon(d(2024, 10, 15))
        .build()
        .unwrap();
    let flows = bond.cash_flows().unwrap();
    let tail_coupon = dec!(2.5) * dec!(1) + dec!(2.5) * dec!(91) / dec!(183);

    assert_eq!(flows.len(), 2);
    assert_eq!(flows[1].date, d(2025, 7, 15));
    assert_eq!(flows[1].amount, tail_coupon + dec!(100));

    // 104 of the 182 days to 2025-04-15, then 91 of 183 days of the notional period.
    assert_eq!(
        flows[0].amount,
        dec!(2.5) * dec!(104) / dec!(182) + dec!(2.5) * dec!(91) / dec!(183)
    );
    // Accrual runs from the last coupon 2024-10-15.
    let accrued = bond.accrued_interest().unwrap();
    assert_eq!(accrued, dec!(2.5) * dec!(78) / dec!(182));
    assert_relative_eq!(
        (accrued + flows[0].amount).to_f64().unwrap(),
        tail_coupon.to_f64().unwrap(),
        epsilon = 1e-12
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_cash_flows_at_maturity_fail() {
    let bond = five_percent(d(2025, 7, 15), d(2025, 7, 15)).build().unwrap();

    assert!(matches!(
        bond.cash_flows(),
        Err(BondError::NoUpcomingCoupon { .. })
    ));
}

#[test]
fn test_unimplemented_day_count_fails_closed() {
    let bond = five_percent(d(2020, 3, 15), d(2025, 7, 15))
        .day_count(DayCountConvention::Thirty360)
        .build()
        .unwrap();

    assert!(matches!(
        bond.cash_flows(),
        Err(BondError::Core(AccrualError::UnimplementedConvention { .. }))
    ));
    assert!(bond.accrued_interest().is_err());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_bond_from_toml() {
    let config = BondConfig::from_toml_str(
        r#"
        identifier = "ODD-FIRST"
        settlement = "2020-01-15"
        maturity = "2025-07-15"
        first_coupon = "2020-04-15"
        coupon_rate = 0.05
        "#,
    )
    .unwrap();
    let bond = config.build().unwrap();
    let flows = bond.cash_flows().unwrap();

    assert_eq!(bond.identifier(), "ODD-FIRST");
    assert_eq!(flows.len(), 13);
    assert_relative_eq!(
        flows[1].amount.to_f64().unwrap(),
        2.5,
        epsilon = 1e-12
    );
}

#[test]
fn test_cash_flow_rows_serialize() {
    let bond = five_percent(d(2020, 1, 15), d(2025, 7, 15)).build().unwrap();
    let flows = bond.cash_flows().unwrap();

    let json = serde_json::to_value(&flows[11]).unwrap();
    assert_eq!(json["date"], "2025-07-15");
    assert_relative_eq!(json["amount"].as_f64().unwrap(), 102.5);
    assert_relative_eq!(json["year_fraction"].as_f64().unwrap(), 11.0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_regular_coupons_are_constant(offset in 0i64..3000, day in 1u32..=27) {
        let bond = five_percent(d(2020, 1, 1).add_days(offset), d(2030, 6, day))
            .build()
            .unwrap();
        let flows = bond.cash_flows().unwrap();
        let last = flows.len() - 1;

        for row in &flows[1..last] {
            prop_assert_eq!(row.amount, dec!(2.5));
        }
        prop_assert_eq!(flows[last].amount, dec!(102.5));
    }

    #[test]
    fn prop_accrued_and_settlement_amount_cover_one_coupon(
        offset in 0i64..3000,
        day in 1u32..=27,
    ) {
        let bond = five_percent(d(2020, 1, 1).add_days(offset), d(2030, 6, day))
            .build()
            .unwrap();
        let accrued = bond.accrued_interest().unwrap();
        let remaining = bond.cash_flows().unwrap()[0].amount;

        if accrued.is_zero() {
            prop_assert!(remaining.is_zero());
        } else {
            let total = (accrued + remaining).to_f64().unwrap();
            prop_assert!((total - 2.5).abs() < 1e-12);
        }
    }
}
