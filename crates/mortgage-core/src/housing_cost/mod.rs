pub mod loan_amount;
pub mod mortgage;
pub mod recurring;

pub use loan_amount::{derive_loan_amount, down_payment_ratio};
pub use mortgage::{analyze_mortgage, MortgageInput, MortgageOutput};
pub use recurring::{
    compute_total_monthly_cost, monthly_cost_breakdown, MonthlyCostBreakdown, RecurringCosts,
};
