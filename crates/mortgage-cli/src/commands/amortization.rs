use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_core::amortization::{self, LoanInputs};

use crate::input;

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "loan-amount", allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub years: Option<u32>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: PaymentArgs,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = read_loan(args)?;
    let payment = amortization::compute_payment_for(&loan)?;
    Ok(json!({
        "monthly_payment": payment,
        "principal": loan.principal,
        "annual_rate_percent": loan.annual_rate_percent,
        "term_months": loan.term_months(),
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut loan = read_loan(args.loan)?;
    if let Some(date) = args.start_date {
        loan.first_payment_date = Some(date);
    }
    let schedule = amortization::compute_schedule_for(&loan)?;
    Ok(serde_json::to_value(schedule)?)
}

fn read_loan(args: PaymentArgs) -> Result<LoanInputs, Box<dyn std::error::Error>> {
    let has_flags = args.principal.is_some() || args.rate.is_some() || args.years.is_some();
    let loan: LoanInputs = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if has_flags {
        LoanInputs::new(
            args.principal
                .ok_or("--principal is required (or provide --input)")?,
            args.rate.ok_or("--rate is required (or provide --input)")?,
            args.years.ok_or("--years is required (or provide --input)")?,
        )
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--principal, --rate and --years are required (or provide --input)".into());
    };
    Ok(loan)
}
