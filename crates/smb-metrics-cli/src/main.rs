mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::growth::{ProjectRevenueArgs, RequiredGrowthArgs};
use commands::metrics::MetricsArgs;

/// Small-business financial metrics
#[derive(Parser)]
#[command(
    name = "smbm",
    version,
    about = "Small-business financial metrics",
    long_about = "A CLI for small-business financial metrics with decimal precision. \
                  Computes break-even, profit margin, cash flow, ROI, payback period, \
                  runway, market share and compound revenue growth from monthly figures."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full set of monthly business metrics
    Metrics(MetricsArgs),
    /// Monthly growth rate needed to reach a target revenue
    RequiredGrowth(RequiredGrowthArgs),
    /// Project revenue forward under compound monthly growth
    ProjectRevenue(ProjectRevenueArgs),
    /// List the formula behind every output field
    Formulas,
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

fn init_logging(verbose: bool) {
    let default = if verbose {
        "smb_metrics_core=debug,smbm=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Metrics(args) => commands::metrics::run_metrics(args),
        Commands::RequiredGrowth(args) => commands::growth::run_required_growth(args),
        Commands::ProjectRevenue(args) => commands::growth::run_project_revenue(args),
        Commands::Formulas => commands::metrics::run_formulas(),
        Commands::Version => {
            println!("smbm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
