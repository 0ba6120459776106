pub mod amortization;
pub mod housing_cost;
