use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use smb_metrics_core::growth;

/// Arguments for the required-growth solver
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RequiredGrowthArgs {
    /// Current monthly revenue
    #[arg(long)]
    pub current: Decimal,

    /// Target monthly revenue
    #[arg(long)]
    pub target: Decimal,

    /// Months available to reach the target
    #[arg(long)]
    pub months: Decimal,
}

/// Arguments for a compound revenue projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProjectRevenueArgs {
    /// Current monthly revenue
    #[arg(long)]
    pub current: Decimal,

    /// Monthly growth rate in % (negative for decline)
    #[arg(long)]
    pub growth_rate: Decimal,

    /// Months to project forward
    #[arg(long)]
    pub months: Decimal,
}

#[derive(Serialize)]
struct RequiredGrowthOutput {
    required_growth_rate_pct: Decimal,
    current_revenue: Decimal,
    target_revenue: Decimal,
    months: Decimal,
}

#[derive(Serialize)]
struct ProjectionOutput {
    projected_revenue: Decimal,
    current_revenue: Decimal,
    growth_rate_pct: Decimal,
    months: Decimal,
}

pub fn run_required_growth(args: RequiredGrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate = growth::required_growth_rate(args.current, args.target, args.months)?;
    Ok(serde_json::to_value(RequiredGrowthOutput {
        required_growth_rate_pct: rate,
        current_revenue: args.current,
        target_revenue: args.target,
        months: args.months,
    })?)
}

pub fn run_project_revenue(args: ProjectRevenueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projected = growth::projected_revenue(args.current, args.growth_rate, args.months)?;
    Ok(serde_json::to_value(ProjectionOutput {
        projected_revenue: projected,
        current_revenue: args.current,
        growth_rate_pct: args.growth_rate,
        months: args.months,
    })?)
}
