//! Fixed-rate annuity payment for a fully amortizing loan.
//!
//! The monthly payment is derived from the present value of an ordinary
//! annuity: P * r(1+r)^n / ((1+r)^n - 1), where r is the monthly rate and n
//! the number of monthly payments. A zero rate falls back to straight-line
//! repayment, since the annuity formula is undefined there.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Core loan parameters shared by payment and schedule calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate as a percentage (5.5 = 5.5% per year)
    pub annual_rate_percent: Percent,
    /// Loan term in whole years
    pub term_years: u32,
    /// Due date of the first payment, used to date schedule rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanInputs {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Self {
        LoanInputs {
            principal,
            annual_rate_percent,
            term_years,
            first_payment_date: None,
        }
    }

    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    /// Reject non-positive principal, negative rate, or a zero term.
    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.term_years == 0 {
            return Err(MortgageError::InvalidInput {
                field: "term_years".into(),
                reason: "Loan term must be greater than zero".into(),
            });
        }
        if self.term_years.checked_mul(MONTHS_PER_YEAR).is_none() {
            return Err(MortgageError::out_of_range("term_years"));
        }
        Ok(())
    }

    /// Periodic rate: annual percentage / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
    }

    /// Number of monthly payments. Saturates for terms `validate` rejects.
    pub fn term_months(&self) -> u32 {
        self.term_years.saturating_mul(MONTHS_PER_YEAR)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly payment that fully amortizes `principal` over `term_years` at
/// `annual_rate_percent`.
pub fn compute_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageResult<Money> {
    compute_payment_for(&LoanInputs::new(principal, annual_rate_percent, term_years))
}

/// Same as [`compute_payment`] for an already assembled [`LoanInputs`].
pub fn compute_payment_for(loan: &LoanInputs) -> MortgageResult<Money> {
    loan.validate()?;
    let payment = annuity_payment(loan.principal, loan.monthly_rate(), loan.term_months())?;
    debug!(
        principal = %loan.principal,
        annual_rate_percent = %loan.annual_rate_percent,
        term_months = loan.term_months(),
        payment = %payment,
        "computed monthly payment"
    );
    Ok(payment)
}

// ---------------------------------------------------------------------------
// Math helpers
// ---------------------------------------------------------------------------

/// Standard fixed-rate payment: P * r(1+r)^n / ((1+r)^n - 1).
///
/// Inputs are assumed validated. Every multiplication is checked, so a rate
/// and term combination that overflows the decimal range is rejected rather
/// than panicking.
pub(crate) fn annuity_payment(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
) -> MortgageResult<Money> {
    if monthly_rate.is_zero() {
        // Interest-free: straight-line amortisation
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + r)^n via iterative multiplication
    let one_plus_r = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound = compound.checked_mul(one_plus_r).ok_or_else(rate_out_of_range)?;
    }

    let numerator = principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(compound))
        .ok_or_else(rate_out_of_range)?;
    let denominator = compound - Decimal::ONE;

    // Only reachable when r is below decimal resolution.
    if denominator.is_zero() {
        return Ok(principal / Decimal::from(total_months));
    }

    Ok(numerator / denominator)
}

fn rate_out_of_range() -> MortgageError {
    MortgageError::out_of_range("annual_rate_percent")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        let diff = (actual - expected).abs();
        assert!(
            diff < tol,
            "expected {} within {} of {}, diff {}",
            actual,
            tol,
            expected,
            diff
        );
    }

    #[test]
    fn test_thirty_year_six_percent() {
        let payment = compute_payment(dec!(300000), dec!(6.0), 30).unwrap();
        assert_close(payment, dec!(1798.65), dec!(0.01));
    }

    #[test]
    fn test_fifteen_year_payment() {
        // $200k at 4.5% over 15 years, ~$1,529.99/mo
        let payment = compute_payment(dec!(200000), dec!(4.5), 15).unwrap();
        assert_close(payment, dec!(1529.99), dec!(0.01));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = compute_payment(dec!(360000), Decimal::ZERO, 30).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_monthly_rate_derivation() {
        let loan = LoanInputs::new(dec!(100000), dec!(6), 30);
        assert_eq!(loan.monthly_rate(), dec!(0.005));
        assert_eq!(loan.term_months(), 360);
    }

    #[test]
    fn test_zero_principal_rejected() {
        let err = compute_payment(Decimal::ZERO, dec!(5), 30).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = compute_payment(dec!(100000), dec!(-0.1), 30).unwrap_err();
        assert_eq!(err.field(), Some("annual_rate_percent"));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = compute_payment(dec!(100000), dec!(5), 0).unwrap_err();
        assert_eq!(err.field(), Some("term_years"));
    }

    #[test]
    fn test_long_terms_accepted() {
        // No cap on the term: 51 and 100 years price like any other loan
        let p51 = compute_payment(dec!(100000), dec!(5), 51).unwrap();
        let p100 = compute_payment(dec!(100000), dec!(5), 100).unwrap();
        assert!(p100 < p51);
        // Interest-only is the floor as the term grows
        assert!(p100 > dec!(100000) * dec!(5) / dec!(1200));
    }

    #[test]
    fn test_term_months_overflow_rejected() {
        let loan = LoanInputs::new(dec!(100000), dec!(5), u32::MAX);
        let err = loan.validate().unwrap_err();
        assert_eq!(err.field(), Some("term_years"));
        assert_eq!(loan.term_months(), u32::MAX);
    }

    #[test]
    fn test_extreme_rate_overflow_is_an_error() {
        let result = compute_payment(dec!(100000), dec!(5000), 50);
        assert!(matches!(result, Err(MortgageError::InvalidInput { .. })));
    }

    #[test]
    fn test_payment_exceeds_interest_only() {
        let loan = LoanInputs::new(dec!(250000), dec!(7.25), 30);
        let payment = compute_payment_for(&loan).unwrap();
        assert!(payment > loan.principal * loan.monthly_rate());
    }
}
