//! Recurring housing costs layered on top of the loan payment.
//!
//! Property tax and insurance are quoted per year, HOA dues per month, and
//! PMI as an annual percentage of the loan principal. Everything is
//! normalized to a monthly amount before summation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{checked_total, Money, Percent};
use crate::MortgageResult;

const MONTHS: Decimal = dec!(12);

/// Optional recurring costs. A missing value counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringCosts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_property_tax: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_home_insurance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_hoa_fees: Option<Money>,
    /// Annual PMI premium as a percentage of principal (0.5 = 0.5%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmi_percent: Option<Percent>,
}

impl RecurringCosts {
    pub fn has_pmi(&self) -> bool {
        self.pmi_percent.is_some_and(|p| p > Decimal::ZERO)
    }

    fn validate(&self) -> MortgageResult<()> {
        let fields = [
            ("yearly_property_tax", self.yearly_property_tax),
            ("yearly_home_insurance", self.yearly_home_insurance),
            ("monthly_hoa_fees", self.monthly_hoa_fees),
            ("pmi_percent", self.pmi_percent),
        ];
        for (field, value) in fields {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(MortgageError::InvalidInput {
                    field: field.into(),
                    reason: "Recurring costs cannot be negative".into(),
                });
            }
        }
        Ok(())
    }
}

/// Monthly housing cost split by component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCostBreakdown {
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub home_insurance: Money,
    pub hoa_fees: Money,
    pub pmi: Money,
    pub total: Money,
}

/// Total monthly housing cost: loan payment plus each recurring cost
/// normalized to a month. Missing costs are treated as zero, and signs are
/// not checked; the only failure is a sum beyond the decimal range.
pub fn compute_total_monthly_cost(
    payment: Money,
    yearly_property_tax: Option<Money>,
    yearly_home_insurance: Option<Money>,
    monthly_hoa_fees: Option<Money>,
    pmi_percent: Option<Percent>,
    principal: Money,
) -> MortgageResult<Money> {
    let costs = RecurringCosts {
        yearly_property_tax,
        yearly_home_insurance,
        monthly_hoa_fees,
        pmi_percent,
    };
    Ok(breakdown(payment, principal, &costs)?.total)
}

/// Per-component breakdown of the monthly cost. Unlike
/// [`compute_total_monthly_cost`], negative costs are rejected.
pub fn monthly_cost_breakdown(
    payment: Money,
    principal: Money,
    costs: &RecurringCosts,
) -> MortgageResult<MonthlyCostBreakdown> {
    costs.validate()?;
    breakdown(payment, principal, costs)
}

fn breakdown(
    payment: Money,
    principal: Money,
    costs: &RecurringCosts,
) -> MortgageResult<MonthlyCostBreakdown> {
    let property_tax = costs.yearly_property_tax.unwrap_or(Decimal::ZERO) / MONTHS;
    let home_insurance = costs.yearly_home_insurance.unwrap_or(Decimal::ZERO) / MONTHS;
    let hoa_fees = costs.monthly_hoa_fees.unwrap_or(Decimal::ZERO);
    let pmi = principal
        .checked_mul(costs.pmi_percent.unwrap_or(Decimal::ZERO))
        .ok_or_else(|| MortgageError::out_of_range("pmi_percent"))?
        / dec!(100)
        / MONTHS;

    let total = checked_total([payment, property_tax, home_insurance, hoa_fees, pmi])
        .ok_or_else(|| MortgageError::out_of_range("payment"))?;

    Ok(MonthlyCostBreakdown {
        principal_and_interest: payment,
        property_tax,
        home_insurance,
        hoa_fees,
        pmi,
        total,
    })
}
