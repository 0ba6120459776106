mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::amortization::{PaymentArgs, ScheduleArgs};
use commands::housing_cost::{AnalyzeArgs, LoanAmountArgs, TotalCostArgs};

/// Fixed-rate mortgage payments and amortization schedules
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage payments and amortization schedules",
    long_about = "Compute the monthly payment on a fixed-rate mortgage, the full \
                  month-by-month amortization schedule, and the total monthly \
                  housing cost including property tax, insurance, HOA dues and PMI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Decimal places for displayed amounts
    #[arg(long, default_value_t = 2, global = true)]
    precision: u32,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly principal and interest payment
    Payment(PaymentArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Total monthly housing cost (payment + tax, insurance, HOA, PMI)
    TotalCost(TotalCostArgs),
    /// Loan amount from home price and down payment
    LoanAmount(LoanAmountArgs),
    /// Full mortgage analysis from a purchase form
    Analyze(AnalyzeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::TotalCost(args) => commands::housing_cost::run_total_cost(args),
        Commands::LoanAmount(args) => commands::housing_cost::run_loan_amount(args),
        Commands::Analyze(args) => commands::housing_cost::run_analyze(args),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            let display = output::round_amounts(&value, cli.precision);
            output::format_output(&cli.output, &display);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
