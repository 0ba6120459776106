//! End-to-end mortgage analysis for a purchase form.
//!
//! Combines loan-amount derivation, the annuity payment, recurring housing
//! costs, and (optionally) the full amortization schedule into a single
//! `ComputationOutput` envelope with non-fatal warnings.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::loan_amount::{derive_loan_amount, down_payment_ratio};
use super::recurring::{monthly_cost_breakdown, MonthlyCostBreakdown, RecurringCosts};
use crate::amortization::{compute_payment_for, compute_schedule_for, AmortizationRow, LoanInputs};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

/// Down payment share at or above which lenders normally waive PMI.
const PMI_WAIVER_RATIO: Decimal = dec!(0.20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything a mortgage form collects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Purchase price; when present the loan amount is derived from it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    /// Amount financed, used only when no home price is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    #[serde(default)]
    pub recurring_costs: RecurringCosts,
    /// Attach the month-by-month schedule to the output
    #[serde(default)]
    pub include_schedule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

/// Result of a full mortgage analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub loan_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment_ratio: Option<Rate>,
    /// Principal and interest only
    pub monthly_payment: Money,
    /// Payment plus taxes, insurance, HOA and PMI
    pub total_monthly_cost: Money,
    pub cost_breakdown: MonthlyCostBreakdown,
    pub number_of_payments: u32,
    /// Sum of all principal and interest payments over the term
    pub total_of_payments: Money,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationRow>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyze a mortgage: derive the loan, price it, and total the monthly cost.
pub fn analyze_mortgage(
    input: &MortgageInput,
) -> MortgageResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (loan_amount, dp_ratio) = resolve_loan_amount(input, &mut warnings)?;

    let loan = LoanInputs {
        principal: loan_amount,
        annual_rate_percent: input.annual_rate_percent,
        term_years: input.term_years,
        first_payment_date: input.first_payment_date,
    };

    let (monthly_payment, schedule) = if input.include_schedule {
        let schedule = compute_schedule_for(&loan)?;
        (schedule.monthly_payment, Some(schedule.rows))
    } else {
        (compute_payment_for(&loan)?, None)
    };

    let cost_breakdown =
        monthly_cost_breakdown(monthly_payment, loan_amount, &input.recurring_costs)?;

    if input.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payment is straight-line principal only".into());
    }
    if let Some(ratio) = dp_ratio {
        let has_pmi = input.recurring_costs.has_pmi();
        if ratio < PMI_WAIVER_RATIO && !has_pmi {
            warnings.push(format!(
                "Down payment is {:.1}% of price; lenders usually require PMI below 20%",
                ratio * dec!(100)
            ));
        } else if ratio >= PMI_WAIVER_RATIO && has_pmi {
            warnings.push(
                "PMI entered although down payment is at least 20% of price".into(),
            );
        }
    }

    let number_of_payments = loan.term_months();
    let total_of_payments = monthly_payment
        .checked_mul(Decimal::from(number_of_payments))
        .ok_or_else(|| MortgageError::out_of_range("loan_amount"))?;
    let payoff_date = input
        .first_payment_date
        .and_then(|d| d.checked_add_months(Months::new(number_of_payments - 1)));

    let output = MortgageOutput {
        loan_amount,
        down_payment_ratio: dp_ratio,
        monthly_payment,
        total_monthly_cost: cost_breakdown.total,
        cost_breakdown,
        number_of_payments,
        total_of_payments,
        total_interest: total_of_payments - loan_amount,
        payoff_date,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-rate amortizing mortgage (annuity payment, monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_loan_amount(
    input: &MortgageInput,
    warnings: &mut Vec<String>,
) -> MortgageResult<(Money, Option<Rate>)> {
    match (input.home_price, input.loan_amount) {
        (Some(price), explicit) => {
            let down = input.down_payment.unwrap_or(Decimal::ZERO);
            let derived = derive_loan_amount(price, down)?;
            if let Some(la) = explicit {
                if la != derived {
                    warnings.push(format!(
                        "loan_amount {la} ignored; using home price less down payment ({derived})"
                    ));
                }
            }
            let ratio = if price.is_zero() {
                None
            } else {
                Some(down_payment_ratio(price, down)?)
            };
            Ok((derived, ratio))
        }
        (None, Some(la)) => {
            if input.down_payment.is_some() {
                warnings.push("down_payment ignored without a home price".into());
            }
            Ok((la, None))
        }
        (None, None) => Err(MortgageError::InvalidInput {
            field: "home_price".into(),
            reason: "Either home_price or loan_amount is required".into(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_purchase() -> MortgageInput {
        MortgageInput {
            home_price: Some(dec!(375000)),
            down_payment: Some(dec!(75000)),
            loan_amount: None,
            annual_rate_percent: dec!(6.0),
            term_years: 30,
            recurring_costs: RecurringCosts {
                yearly_property_tax: Some(dec!(3600)),
                yearly_home_insurance: Some(dec!(1200)),
                monthly_hoa_fees: Some(dec!(50)),
                pmi_percent: None,
            },
            include_schedule: false,
            first_payment_date: None,
        }
    }

    #[test]
    fn test_loan_derived_from_price() {
        let out = analyze_mortgage(&sample_purchase()).unwrap();
        assert_eq!(out.result.loan_amount, dec!(300000));
        assert_eq!(out.result.down_payment_ratio, Some(dec!(0.2)));
        assert!((out.result.monthly_payment - dec!(1798.65)).abs() < dec!(0.01));
        // 1798.65 + 300 + 100 + 50
        assert!((out.result.total_monthly_cost - dec!(2248.65)).abs() < dec!(0.01));
        assert!(out.result.schedule.is_none());
        assert!(out.warnings.is_empty(), "unexpected warnings {:?}", out.warnings);
    }

    #[test]
    fn test_schedule_attached_on_request() {
        let mut input = sample_purchase();
        input.include_schedule = true;
        let out = analyze_mortgage(&input).unwrap();
        assert_eq!(out.result.schedule.as_ref().map(Vec::len), Some(360));
    }

    #[test]
    fn test_low_down_payment_without_pmi_warns() {
        let mut input = sample_purchase();
        input.down_payment = Some(dec!(18750)); // 5%
        let out = analyze_mortgage(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("PMI")));
    }

    #[test]
    fn test_pmi_with_large_down_payment_warns() {
        let mut input = sample_purchase();
        input.recurring_costs.pmi_percent = Some(dec!(0.5));
        let out = analyze_mortgage(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("at least 20%")));
    }

    #[test]
    fn test_explicit_loan_amount_without_price() {
        let input = MortgageInput {
            home_price: None,
            down_payment: None,
            loan_amount: Some(dec!(150000)),
            annual_rate_percent: Decimal::ZERO,
            term_years: 10,
            recurring_costs: RecurringCosts::default(),
            include_schedule: false,
            first_payment_date: None,
        };
        let out = analyze_mortgage(&input).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(1250));
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("Zero interest")));
    }

    #[test]
    fn test_missing_price_and_loan_rejected() {
        let mut input = sample_purchase();
        input.home_price = None;
        input.down_payment = None;
        assert!(analyze_mortgage(&input).is_err());
    }

    #[test]
    fn test_payoff_date() {
        let mut input = sample_purchase();
        input.first_payment_date = NaiveDate::from_ymd_opt(2026, 1, 1);
        let out = analyze_mortgage(&input).unwrap();
        assert_eq!(out.result.payoff_date, NaiveDate::from_ymd_opt(2055, 12, 1));
    }

    #[test]
    fn test_full_cash_purchase_rejected() {
        let mut input = sample_purchase();
        input.down_payment = input.home_price;
        let err = analyze_mortgage(&input).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_total_of_payments_beyond_decimal_range_rejected() {
        let input = MortgageInput {
            home_price: None,
            down_payment: None,
            loan_amount: Some(dec!(40000000000000000000000000000)),
            annual_rate_percent: dec!(6),
            term_years: 30,
            recurring_costs: RecurringCosts::default(),
            include_schedule: false,
            first_payment_date: None,
        };
        let err = analyze_mortgage(&input).unwrap_err();
        assert_eq!(err.field(), Some("loan_amount"));
    }
}
