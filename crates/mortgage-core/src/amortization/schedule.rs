//! Month-by-month amortization schedule.
//!
//! Each payment is split into interest on the opening balance and a
//! principal reduction equal to the remainder of the payment. Rows are
//! produced lazily by [`ScheduleIter`]; [`compute_schedule`] materializes
//! them along with lifetime totals.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::payment::{compute_payment_for, LoanInputs};
use crate::error::MortgageError;
use crate::types::{checked_total, Money, Percent, Rate};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Month number (1-indexed)
    pub month: u32,
    /// Due date, when the loan carries a first payment date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Scheduled payment (constant across the term)
    pub payment: Money,
    /// Portion of the payment that reduces the balance
    pub principal_portion: Money,
    /// Interest accrued on the opening balance
    pub interest_portion: Money,
    /// Balance after this payment
    pub remaining_balance: Money,
}

/// Full schedule with lifetime totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn final_balance(&self) -> Money {
        self.rows
            .last()
            .map(|r| r.remaining_balance)
            .unwrap_or(Decimal::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Lazy row generation
// ---------------------------------------------------------------------------

/// Iterator over schedule rows. Emits exactly `term_months` rows and does not
/// stop early or clamp the balance if the last month drifts below zero.
#[derive(Debug, Clone)]
pub struct ScheduleIter {
    payment: Money,
    monthly_rate: Rate,
    balance: Money,
    month: u32,
    term_months: u32,
    first_payment_date: Option<NaiveDate>,
}

impl ScheduleIter {
    pub fn payment(&self) -> Money {
        self.payment
    }
}

impl Iterator for ScheduleIter {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.month >= self.term_months {
            return None;
        }
        self.month += 1;

        let interest = self.balance * self.monthly_rate;
        let principal = self.payment - interest;
        self.balance -= principal;

        let payment_date = self
            .first_payment_date
            .and_then(|d| d.checked_add_months(Months::new(self.month - 1)));

        Some(AmortizationRow {
            month: self.month,
            payment_date,
            payment: self.payment,
            principal_portion: principal,
            interest_portion: interest,
            remaining_balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.term_months - self.month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScheduleIter {}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Lazily generate the schedule for `loan`.
pub fn schedule_rows(loan: &LoanInputs) -> MortgageResult<ScheduleIter> {
    let payment = compute_payment_for(loan)?;
    Ok(ScheduleIter {
        payment,
        monthly_rate: loan.monthly_rate(),
        balance: loan.principal,
        month: 0,
        term_months: loan.term_months(),
        first_payment_date: loan.first_payment_date,
    })
}

/// Full amortization schedule for the given loan parameters.
pub fn compute_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> MortgageResult<AmortizationSchedule> {
    compute_schedule_for(&LoanInputs::new(principal, annual_rate_percent, term_years))
}

/// Same as [`compute_schedule`] for an already assembled [`LoanInputs`].
pub fn compute_schedule_for(loan: &LoanInputs) -> MortgageResult<AmortizationSchedule> {
    let iter = schedule_rows(loan)?;
    let monthly_payment = iter.payment();
    let rows: Vec<AmortizationRow> = iter.collect();

    let total_principal = checked_total(rows.iter().map(|r| r.principal_portion))
        .ok_or_else(|| MortgageError::out_of_range("principal"))?;
    let total_interest = checked_total(rows.iter().map(|r| r.interest_portion))
        .ok_or_else(|| MortgageError::out_of_range("principal"))?;
    let total_paid = total_principal
        .checked_add(total_interest)
        .ok_or_else(|| MortgageError::out_of_range("principal"))?;

    debug!(rows = rows.len(), total_interest = %total_interest, "built amortization schedule");

    Ok(AmortizationSchedule {
        monthly_payment,
        total_principal,
        total_interest,
        total_paid,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
