use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_core::housing_cost::{self, MortgageInput, RecurringCosts};

use crate::input;

/// Recurring cost flags shared by `total-cost` and `analyze`
#[derive(Args)]
pub struct RecurringCostArgs {
    /// Yearly property tax
    #[arg(long, allow_hyphen_values = true)]
    pub property_tax: Option<Decimal>,

    /// Yearly homeowner's insurance
    #[arg(long, allow_hyphen_values = true)]
    pub insurance: Option<Decimal>,

    /// Monthly HOA fees
    #[arg(long, allow_hyphen_values = true)]
    pub hoa: Option<Decimal>,

    /// Annual PMI as a percent of the loan amount
    #[arg(long, allow_hyphen_values = true)]
    pub pmi: Option<Decimal>,
}

impl RecurringCostArgs {
    fn into_costs(self) -> RecurringCosts {
        RecurringCosts {
            yearly_property_tax: self.property_tax,
            yearly_home_insurance: self.insurance,
            monthly_hoa_fees: self.hoa,
            pmi_percent: self.pmi,
        }
    }
}

/// Arguments for the total monthly housing cost
#[derive(Args)]
pub struct TotalCostArgs {
    /// Monthly principal and interest payment
    #[arg(long)]
    pub payment: Decimal,

    /// Loan amount (needed for PMI)
    #[arg(long, alias = "loan-amount")]
    pub principal: Option<Decimal>,

    #[command(flatten)]
    pub costs: RecurringCostArgs,
}

/// Arguments for loan amount derivation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanAmountArgs {
    /// Home purchase price
    #[arg(long)]
    pub home_price: Decimal,

    /// Down payment
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub down_payment: Decimal,
}

/// Arguments for the full mortgage analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Home purchase price
    #[arg(long, allow_hyphen_values = true)]
    pub home_price: Option<Decimal>,

    /// Down payment
    #[arg(long, allow_hyphen_values = true)]
    pub down_payment: Option<Decimal>,

    /// Loan amount, when no home price is given
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub years: Option<u32>,

    #[command(flatten)]
    pub costs: RecurringCostArgs,

    /// Include the month-by-month schedule
    #[arg(long)]
    pub schedule: bool,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_total_cost(args: TotalCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let costs = args.costs.into_costs();
    let principal = match args.principal {
        Some(p) => p,
        None if costs.has_pmi() => return Err("--principal is required when --pmi is set".into()),
        None => Decimal::ZERO,
    };
    let total = housing_cost::compute_total_monthly_cost(
        args.payment,
        costs.yearly_property_tax,
        costs.yearly_home_insurance,
        costs.monthly_hoa_fees,
        costs.pmi_percent,
        principal,
    )?;
    let mut value = json!({
        "total_monthly_cost": total,
        "monthly_payment": args.payment,
        "principal": principal,
    });
    if let Value::Object(ref mut map) = value {
        if let Value::Object(inputs) = serde_json::to_value(&costs)? {
            map.extend(inputs);
        }
    }
    Ok(value)
}

pub fn run_loan_amount(args: LoanAmountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_amount = housing_cost::derive_loan_amount(args.home_price, args.down_payment)?;
    let mut value = json!({
        "loan_amount": loan_amount,
        "home_price": args.home_price,
        "down_payment": args.down_payment,
    });
    if !args.home_price.is_zero() {
        value["down_payment_ratio"] = json!(housing_cost::down_payment_ratio(
            args.home_price,
            args.down_payment
        )?);
    }
    Ok(value)
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.rate.is_some() || args.years.is_some() {
        MortgageInput {
            home_price: args.home_price,
            down_payment: args.down_payment,
            loan_amount: args.loan_amount,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years.ok_or("--years is required (or provide --input)")?,
            recurring_costs: args.costs.into_costs(),
            include_schedule: args.schedule,
            first_payment_date: args.start_date,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--rate and --years are required (or provide --input)".into());
    };
    let result = housing_cost::analyze_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
