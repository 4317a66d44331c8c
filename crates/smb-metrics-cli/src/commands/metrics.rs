use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use smb_metrics_core::business::calculator::{self, FinancialInputs};
use smb_metrics_core::business::formulas;
use smb_metrics_core::CurrencyConfig;

use crate::input;

/// Arguments for the monthly metrics calculation.
///
/// Every figure defaults to 0 when omitted, matching an empty input form.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MetricsArgs {
    /// Monthly revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Rent (fixed, per month)
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Salaries (fixed, per month)
    #[arg(long)]
    pub salaries: Option<Decimal>,

    /// Supplies (fixed, per month)
    #[arg(long)]
    pub supplies: Option<Decimal>,

    /// Utilities (fixed, per month)
    #[arg(long)]
    pub utilities: Option<Decimal>,

    /// Insurance (fixed, per month)
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Marketing (fixed, per month)
    #[arg(long)]
    pub marketing: Option<Decimal>,

    /// Other fixed costs per month
    #[arg(long)]
    pub other_fixed: Option<Decimal>,

    /// Card commissions, % of revenue (e.g. 2.5)
    #[arg(long, alias = "commissions")]
    pub card_commissions: Option<Decimal>,

    /// Cost of goods sold, % of revenue
    #[arg(long)]
    pub cogs: Option<Decimal>,

    /// Other variable costs, % of revenue
    #[arg(long)]
    pub other_variable: Option<Decimal>,

    /// Initial investment
    #[arg(long)]
    pub investment: Option<Decimal>,

    /// Total addressable market, same period basis as revenue
    #[arg(long)]
    pub market_cap: Option<Decimal>,

    /// Tax rate in % (accepted, not applied)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Monthly growth rate in % (e.g. 5 for 5%)
    #[arg(long)]
    pub growth_rate: Option<Decimal>,

    /// Currency name used for display
    #[arg(long, default_value = "EUR")]
    pub currency: String,

    /// Exchange rate against the euro (display only)
    #[arg(long)]
    pub currency_ratio: Option<Decimal>,

    /// Path to JSON or YAML input file. A file, or data piped on stdin,
    /// takes precedence over the individual figure flags.
    #[arg(long)]
    pub input: Option<String>,
}

impl MetricsArgs {
    /// Whether any figure was given on the command line.
    fn has_figure_flags(&self) -> bool {
        [
            self.revenue,
            self.rent,
            self.salaries,
            self.supplies,
            self.utilities,
            self.insurance,
            self.marketing,
            self.other_fixed,
            self.card_commissions,
            self.cogs,
            self.other_variable,
            self.investment,
            self.market_cap,
            self.tax_rate,
            self.growth_rate,
            self.currency_ratio,
        ]
        .iter()
        .any(Option::is_some)
            || self.currency != "EUR"
    }

    fn into_inputs(self) -> FinancialInputs {
        let or_zero = |v: Option<Decimal>| v.unwrap_or(Decimal::ZERO);
        FinancialInputs {
            currency_config: CurrencyConfig {
                ratio: self.currency_ratio.unwrap_or(dec!(1)),
                currency_name: self.currency,
            },
            rent: or_zero(self.rent),
            salaries: or_zero(self.salaries),
            supplies: or_zero(self.supplies),
            utilities: or_zero(self.utilities),
            insurance: or_zero(self.insurance),
            marketing: or_zero(self.marketing),
            other_fixed_costs: or_zero(self.other_fixed),
            credit_card_commissions: or_zero(self.card_commissions),
            cost_of_goods_sold: or_zero(self.cogs),
            other_variable_costs: or_zero(self.other_variable),
            initial_investment: or_zero(self.investment),
            total_market_cap: or_zero(self.market_cap),
            monthly_revenue: or_zero(self.revenue),
            tax_rate: or_zero(self.tax_rate),
            growth_rate: or_zero(self.growth_rate),
        }
    }
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fin_input: FinancialInputs = match args.input.clone() {
        Some(path) => {
            if args.has_figure_flags() {
                tracing::warn!(path = %path, "figure flags ignored in favour of the input file");
            }
            input::file::read_input(&path)?
        }
        None => match input::stdin::read_stdin()? {
            Some(data) => {
                if args.has_figure_flags() {
                    tracing::warn!("figure flags ignored in favour of piped stdin input");
                }
                serde_json::from_value(data)?
            }
            None => args.into_inputs(),
        },
    };

    tracing::debug!(
        revenue = %fin_input.monthly_revenue,
        currency = %fin_input.currency_config.currency_name,
        "computing financial metrics"
    );

    let result = calculator::analyze_financial_metrics(&fin_input)?;
    let status = result.result.profit_status();

    let mut value = serde_json::to_value(result)?;
    if let Some(res) = value.get_mut("result").and_then(Value::as_object_mut) {
        res.insert("profit_status".into(), Value::String(status.label().into()));
    }
    Ok(value)
}

pub fn run_formulas() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(formulas::calculation_formulas())?)
}
