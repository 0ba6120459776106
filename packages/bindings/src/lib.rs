use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use mortgage_core::amortization::{self, LoanInputs};
use mortgage_core::housing_cost::{self, MortgageInput, RecurringCosts};
use mortgage_core::{from_json, to_json};

/// Convert an engine error into a napi::Error carrying its message.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Request shapes that have no engine-side struct
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TotalCostRequest {
    payment: Decimal,
    #[serde(default)]
    principal: Decimal,
    #[serde(flatten)]
    costs: RecurringCosts,
}

#[derive(Deserialize)]
struct LoanAmountRequest {
    home_price: Decimal,
    #[serde(default)]
    down_payment: Decimal,
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_payment(input_json: String) -> NapiResult<String> {
    let loan: LoanInputs = from_json(&input_json).map_err(to_napi_error)?;
    let payment = amortization::compute_payment_for(&loan).map_err(to_napi_error)?;
    to_json(&serde_json::json!({ "monthly_payment": payment })).map_err(to_napi_error)
}

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let loan: LoanInputs = from_json(&input_json).map_err(to_napi_error)?;
    let schedule = amortization::compute_schedule_for(&loan).map_err(to_napi_error)?;
    to_json(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Housing cost
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_total_monthly_cost(input_json: String) -> NapiResult<String> {
    let req: TotalCostRequest = from_json(&input_json).map_err(to_napi_error)?;
    let breakdown = housing_cost::monthly_cost_breakdown(req.payment, req.principal, &req.costs)
        .map_err(to_napi_error)?;
    to_json(&breakdown).map_err(to_napi_error)
}

#[napi]
pub fn derive_loan_amount(input_json: String) -> NapiResult<String> {
    let req: LoanAmountRequest = from_json(&input_json).map_err(to_napi_error)?;
    let loan_amount =
        housing_cost::derive_loan_amount(req.home_price, req.down_payment).map_err(to_napi_error)?;
    to_json(&serde_json::json!({ "loan_amount": loan_amount })).map_err(to_napi_error)
}

#[napi]
pub fn analyze_mortgage(input_json: String) -> NapiResult<String> {
    let input: MortgageInput = from_json(&input_json).map_err(to_napi_error)?;
    let output = housing_cost::analyze_mortgage(&input).map_err(to_napi_error)?;
    to_json(&output).map_err(to_napi_error)
}
