use mortgage_core::amortization::{compute_payment, compute_schedule, schedule_rows, LoanInputs};
use mortgage_core::MortgageError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Payment tests
// ===========================================================================

#[test]
fn test_payment_300k_6pct_30y() {
    let payment = compute_payment(dec!(300000), dec!(6.0), 30).unwrap();
    let diff = (payment - dec!(1798.65)).abs();
    assert!(diff < dec!(0.005), "Payment {} should be ~1798.65", payment);
}

#[test]
fn test_payment_zero_rate_exact() {
    for (principal, years) in [(dec!(100000), 30u32), (dec!(12345.67), 7), (dec!(1), 1)] {
        let payment = compute_payment(principal, Decimal::ZERO, years).unwrap();
        assert_eq!(payment, principal / Decimal::from(years * 12));
    }
}

#[test]
fn test_payment_idempotent() {
    let a = compute_payment(dec!(425000), dec!(6.875), 30).unwrap();
    let b = compute_payment(dec!(425000), dec!(6.875), 30).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_payment_zero_term_rejected() {
    let result = compute_payment(dec!(100000), Decimal::ZERO, 0);
    assert!(matches!(result, Err(MortgageError::InvalidInput { .. })));
}

#[test]
fn test_payment_rejects_each_invalid_field() {
    let cases = [
        (dec!(0), dec!(5), 30, "principal"),
        (dec!(-5000), dec!(5), 30, "principal"),
        (dec!(100000), dec!(-1), 30, "annual_rate_percent"),
        (dec!(100000), dec!(5), 0, "term_years"),
    ];
    for (principal, rate, years, field) in cases {
        let err = compute_payment(principal, rate, years).unwrap_err();
        assert_eq!(err.field(), Some(field), "case {principal}/{rate}/{years}");
    }
}

#[test]
fn test_error_message_is_human_readable() {
    let err = compute_payment(dec!(100000), dec!(5), 0).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("term_years"), "message was: {msg}");
    assert!(msg.contains("greater than zero"), "message was: {msg}");
}

#[test]
fn test_higher_rate_means_higher_payment() {
    let low = compute_payment(dec!(300000), dec!(3), 30).unwrap();
    let high = compute_payment(dec!(300000), dec!(7), 30).unwrap();
    assert!(high > low);
}

// ===========================================================================
// Schedule tests
// ===========================================================================

#[test]
fn test_schedule_first_row_300k() {
    let schedule = compute_schedule(dec!(300000), dec!(6.0), 30).unwrap();
    let first = &schedule.rows[0];

    assert_eq!(first.month, 1);
    assert!((first.interest_portion - dec!(1500.00)).abs() < dec!(0.005));
    assert!((first.principal_portion - dec!(298.65)).abs() < dec!(0.005));
    assert!((first.remaining_balance - dec!(299701.35)).abs() < dec!(0.005));
}

#[test]
fn test_schedule_final_balance_near_zero() {
    let cases = [
        (dec!(300000), dec!(6.0), 30u32),
        (dec!(85000), dec!(3.25), 15),
        (dec!(1250000), dec!(9.99), 40),
        (dec!(5000), dec!(0.01), 1),
        (dec!(640000), dec!(12.5), 50),
    ];
    for (principal, rate, years) in cases {
        let schedule = compute_schedule(principal, rate, years).unwrap();
        let last = schedule.final_balance();
        assert!(
            last.abs() < dec!(0.01),
            "Final balance {} for {}/{}/{} should be ~0",
            last,
            principal,
            rate,
            years
        );
    }
}

#[test]
fn test_schedule_principal_sums_to_loan() {
    let principal = dec!(275000);
    let schedule = compute_schedule(principal, dec!(5.5), 25).unwrap();
    let total: Decimal = schedule.rows.iter().map(|r| r.principal_portion).sum();
    let relative = ((total - principal) / principal).abs();
    assert!(
        relative < dec!(0.000001),
        "Principal sum {} deviates from {}",
        total,
        principal
    );
    assert_eq!(total, schedule.total_principal);
}

#[test]
fn test_schedule_balance_strictly_decreasing() {
    let schedule = compute_schedule(dec!(200000), dec!(4.0), 30).unwrap();
    let mut previous = dec!(200000);
    for row in &schedule.rows {
        assert!(
            row.remaining_balance < previous,
            "Balance rose at month {}",
            row.month
        );
        previous = row.remaining_balance;
    }
}

#[test]
fn test_schedule_months_are_sequential() {
    let schedule = compute_schedule(dec!(90000), dec!(7.1), 10).unwrap();
    let months: Vec<u32> = schedule.rows.iter().map(|r| r.month).collect();
    let expected: Vec<u32> = (1..=120).collect();
    assert_eq!(months, expected);
}

#[test]
fn test_schedule_interest_declines_principal_rises() {
    let schedule = compute_schedule(dec!(300000), dec!(6.0), 30).unwrap();
    for pair in schedule.rows.windows(2) {
        assert!(pair[1].interest_portion < pair[0].interest_portion);
        assert!(pair[1].principal_portion > pair[0].principal_portion);
    }
}

#[test]
fn test_schedule_zero_rate_has_no_interest() {
    let schedule = compute_schedule(dec!(120000), Decimal::ZERO, 10).unwrap();
    assert_eq!(schedule.total_interest, Decimal::ZERO);
    assert!(schedule.rows.iter().all(|r| r.principal_portion == dec!(1000)));
    assert_eq!(schedule.final_balance(), Decimal::ZERO);
}

#[test]
fn test_schedule_rejected_like_payment() {
    let result = compute_schedule(dec!(100000), dec!(-2), 30);
    assert!(matches!(result, Err(MortgageError::InvalidInput { .. })));
}

#[test]
fn test_lazy_rows_match_materialized_schedule() {
    let loan = LoanInputs::new(dec!(310000), dec!(6.25), 20);
    let lazy: Vec<_> = schedule_rows(&loan).unwrap().collect();
    let full = compute_schedule(dec!(310000), dec!(6.25), 20).unwrap();
    assert_eq!(lazy, full.rows);
}

#[test]
fn test_loan_inputs_json_shape() {
    let json = r#"{"principal":"300000","annual_rate_percent":"6.0","term_years":30}"#;
    let loan: LoanInputs = serde_json::from_str(json).unwrap();
    assert_eq!(loan, LoanInputs::new(dec!(300000), dec!(6.0), 30));
}
