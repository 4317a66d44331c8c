use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::SmbMetricsError;
use crate::growth::{self, HUNDRED};
use crate::types::{with_metadata, ComputationOutput, CurrencyConfig, Money, Percent, Rate};
use crate::SmbResult;

/// Horizons, in months, of the revenue projections in every result.
pub const PROJECTION_HORIZONS: [u64; 3] = [3, 6, 12];

// ---------------------------------------------------------------------------
// Types — Inputs
// ---------------------------------------------------------------------------

/// Monthly operating figures for a small business.
///
/// Every field defaults to zero when missing from serialized input. Negative
/// values are accepted; cost fields at or below zero are left out of the
/// totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInputs {
    /// Display currency; amounts are already expressed in it
    pub currency_config: CurrencyConfig,

    // Fixed costs, monetary amounts per month
    pub rent: Money,
    pub salaries: Money,
    pub supplies: Money,
    pub utilities: Money,
    pub insurance: Money,
    pub marketing: Money,
    pub other_fixed_costs: Money,

    // Variable costs, percentages of revenue
    pub credit_card_commissions: Percent,
    pub cost_of_goods_sold: Percent,
    pub other_variable_costs: Percent,

    /// Capital put into the business up front
    pub initial_investment: Money,
    /// Size of the addressable market, same period basis as revenue
    pub total_market_cap: Money,
    pub monthly_revenue: Money,

    /// Accepted for interface compatibility. No output depends on it yet;
    /// whether net profit should be taxed is an open question.
    pub tax_rate: Percent,
    /// Expected month-over-month revenue growth
    pub growth_rate: Percent,
}

impl FinancialInputs {
    /// Fixed-cost lines by field name.
    pub fn fixed_costs(&self) -> [(&'static str, Money); 7] {
        [
            ("rent", self.rent),
            ("salaries", self.salaries),
            ("supplies", self.supplies),
            ("utilities", self.utilities),
            ("insurance", self.insurance),
            ("marketing", self.marketing),
            ("other_fixed_costs", self.other_fixed_costs),
        ]
    }

    /// Variable-cost percentages by field name.
    pub fn variable_cost_percentages(&self) -> [(&'static str, Percent); 3] {
        [
            ("credit_card_commissions", self.credit_card_commissions),
            ("cost_of_goods_sold", self.cost_of_goods_sold),
            ("other_variable_costs", self.other_variable_costs),
        ]
    }
}

// ---------------------------------------------------------------------------
// Types — Output
// ---------------------------------------------------------------------------

/// Everything derived from a [`FinancialInputs`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialCalculations {
    // Currency pass-through; inputs are already in the target currency
    pub converted_monthly_revenue: Money,
    pub converted_total_fixed_costs: Money,
    pub converted_total_variable_costs: Money,

    // Break-even analysis
    /// Sum of the strictly positive fixed-cost lines
    pub total_fixed_costs: Money,
    /// Revenue × sum of strictly positive variable-cost percentages / 100
    pub total_variable_costs: Money,
    /// Revenue - variable costs
    pub contribution_margin: Money,
    /// Contribution margin / revenue
    pub contribution_margin_ratio: Rate,
    /// Revenue needed to cover fixed costs: fixed costs / CM ratio
    pub break_even_point: Money,
    /// Break-even revenue expressed in months of current revenue
    pub break_even_point_months: Decimal,

    // Profit analysis
    pub gross_profit: Money,
    pub net_profit: Money,
    /// Net profit / revenue
    pub profit_margin: Rate,

    // Market analysis
    pub market_share: Rate,
    pub market_share_percentage: Percent,

    // Cash and investment
    pub cash_flow: Money,
    /// Monthly net profit / initial investment
    pub return_on_investment: Rate,
    /// Months of net profit needed to recover the initial investment
    pub payback_period: Decimal,
    pub monthly_burn_rate: Money,
    /// Months the initial investment covers at the current burn rate.
    /// `None` when the burn rate is zero and the investment positive.
    pub runway_months: Option<Decimal>,

    // Growth projections; `None` when the compounded figure does not fit
    // in a `Decimal`
    pub projected_revenue_3_months: Option<Money>,
    pub projected_revenue_6_months: Option<Money>,
    pub projected_revenue_12_months: Option<Money>,
    /// Input growth rate, echoed in percentage units
    pub growth_rate: Percent,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `numerator / denominator` when the guard value is positive, zero otherwise.
fn guarded_div(guard: Decimal, numerator: Decimal, denominator: Decimal) -> Decimal {
    if guard > Decimal::ZERO {
        numerator / denominator
    } else {
        Decimal::ZERO
    }
}

/// Sum only the strictly positive amounts; negatives never offset positives.
fn sum_positive<'a>(values: impl IntoIterator<Item = &'a (&'static str, Decimal)>) -> Decimal {
    values
        .into_iter()
        .map(|(_, v)| *v)
        .filter(|v| *v > Decimal::ZERO)
        .sum()
}

// ---------------------------------------------------------------------------
// Function 1: compute_financial_metrics
// ---------------------------------------------------------------------------

/// Derive break-even, profitability, market share, cash, investment and
/// growth metrics from one month of operating figures.
///
/// Always succeeds: every division that could be singular is guarded and
/// yields zero instead, except the runway's burn-rate denominator (see
/// [`FinancialCalculations::runway_months`]). Projections that leave the
/// `Decimal` range are `None`.
pub fn compute_financial_metrics(input: &FinancialInputs) -> FinancialCalculations {
    let monthly_revenue = input.monthly_revenue;

    // --- Growth projections ---
    let rate = growth::percent_to_rate(input.growth_rate);
    let [p3, p6, p12] = PROJECTION_HORIZONS.map(|m| growth::compound(monthly_revenue, rate, m));

    // --- Cost totals ---
    let total_fixed_costs = sum_positive(&input.fixed_costs());
    let total_variable_pct = sum_positive(&input.variable_cost_percentages());
    let total_variable_costs = monthly_revenue * total_variable_pct / HUNDRED;

    // --- Break-even ---
    let contribution_margin = monthly_revenue - total_variable_costs;
    let contribution_margin_ratio =
        guarded_div(monthly_revenue, contribution_margin, monthly_revenue);
    let break_even_point = guarded_div(
        contribution_margin_ratio,
        total_fixed_costs,
        contribution_margin_ratio,
    );
    let break_even_point_months = guarded_div(monthly_revenue, break_even_point, monthly_revenue);

    // --- Profit ---
    let gross_profit = monthly_revenue - total_variable_costs;
    let net_profit = gross_profit - total_fixed_costs;
    let profit_margin = guarded_div(monthly_revenue, net_profit, monthly_revenue);

    // --- Market ---
    let market_share = guarded_div(
        input.total_market_cap,
        monthly_revenue,
        input.total_market_cap,
    );
    let market_share_percentage = market_share * HUNDRED;

    // --- Cash and investment ---
    let cash_flow = monthly_revenue - (total_fixed_costs + total_variable_costs);
    let investment = input.initial_investment;
    let return_on_investment = guarded_div(investment, net_profit, investment);
    let payback_period = guarded_div(net_profit, investment, net_profit);
    let monthly_burn_rate = total_fixed_costs + total_variable_costs;
    // Only the investment is guarded; a zero burn rate leaves runway undefined.
    let runway_months = if investment > Decimal::ZERO {
        investment.checked_div(monthly_burn_rate)
    } else {
        Some(Decimal::ZERO)
    };

    FinancialCalculations {
        converted_monthly_revenue: monthly_revenue,
        converted_total_fixed_costs: total_fixed_costs,
        converted_total_variable_costs: total_variable_costs,
        total_fixed_costs,
        total_variable_costs,
        contribution_margin,
        contribution_margin_ratio,
        break_even_point,
        break_even_point_months,
        gross_profit,
        net_profit,
        profit_margin,
        market_share,
        market_share_percentage,
        cash_flow,
        return_on_investment,
        payback_period,
        monthly_burn_rate,
        runway_months,
        projected_revenue_3_months: p3,
        projected_revenue_6_months: p6,
        projected_revenue_12_months: p12,
        growth_rate: input.growth_rate,
    }
}

// ---------------------------------------------------------------------------
// Function 2: analyze_financial_metrics
// ---------------------------------------------------------------------------

/// Run [`compute_financial_metrics`] inside the standard output envelope,
/// with warnings for inputs that are accepted but ignored or degenerate.
///
/// Fails only when the growth projections cannot be represented.
pub fn analyze_financial_metrics(
    input: &FinancialInputs,
) -> SmbResult<ComputationOutput<FinancialCalculations>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Reject projections the calculator would report as out of range ---
    for months in PROJECTION_HORIZONS {
        growth::projected_revenue(input.monthly_revenue, input.growth_rate, Decimal::from(months))
            .map_err(|_| SmbMetricsError::InvalidInput {
                field: "growth_rate".into(),
                reason: format!(
                    "{}% monthly growth on {} overflows the {months}-month projection",
                    input.growth_rate, input.monthly_revenue
                ),
            })?;
    }

    let output = compute_financial_metrics(input);

    // --- Warnings ---
    for (name, value) in input.fixed_costs() {
        if value < Decimal::ZERO {
            warnings.push(format!(
                "Fixed cost '{name}' is negative ({value}); excluded from total fixed costs"
            ));
        }
    }
    for (name, value) in input.variable_cost_percentages() {
        if value < Decimal::ZERO {
            warnings.push(format!(
                "Variable cost '{name}' is negative ({value}%); excluded from total variable costs"
            ));
        }
    }

    if !input.tax_rate.is_zero() {
        warnings.push(format!(
            "tax_rate ({}%) is accepted but not applied to any metric",
            input.tax_rate
        ));
    }

    if input.currency_config.ratio != Decimal::ONE {
        warnings.push(format!(
            "Currency ratio {} for {} is display metadata only; amounts are not converted",
            input.currency_config.ratio, input.currency_config.currency_name
        ));
    }

    if input.monthly_revenue > Decimal::ZERO && output.contribution_margin_ratio <= Decimal::ZERO {
        warnings.push(
            "Variable costs consume all revenue; break-even is unreachable (reported as 0)"
                .to_string(),
        );
    }

    if output.runway_months.is_none() {
        warnings.push(
            "Monthly burn rate is zero; runway is undefined for a positive investment".to_string(),
        );
    }

    for w in &warnings {
        tracing::debug!(warning = %w, "financial metrics warning");
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Small-business break-even, profitability, cash runway and compound growth analysis",
        &serde_json::json!({
            "currency": input.currency_config.currency_name,
            "currency_ratio": input.currency_config.ratio.to_string(),
            "monthly_revenue": input.monthly_revenue.to_string(),
            "growth_rate_pct": input.growth_rate.to_string(),
            "tax_rate_pct": input.tax_rate.to_string(),
            "projection_horizons_months": PROJECTION_HORIZONS,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn cafe_input() -> FinancialInputs {
        FinancialInputs {
            rent: dec!(2000),
            salaries: dec!(6000),
            utilities: dec!(400),
            insurance: dec!(100),
            marketing: dec!(500),
            credit_card_commissions: dec!(2),
            cost_of_goods_sold: dec!(28),
            monthly_revenue: dec!(20000),
            initial_investment: dec!(50000),
            total_market_cap: dec!(1000000),
            growth_rate: dec!(2),
            ..Default::default()
        }
    }

    fn approx(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    // -----------------------------------------------------------------------
    // Zero / identity
    // -----------------------------------------------------------------------

    #[test]
    fn test_zero_input_yields_all_zero() {
        let result = compute_financial_metrics(&FinancialInputs::default());
        let zero = Decimal::ZERO;
        let expected = FinancialCalculations {
            converted_monthly_revenue: zero,
            converted_total_fixed_costs: zero,
            converted_total_variable_costs: zero,
            total_fixed_costs: zero,
            total_variable_costs: zero,
            contribution_margin: zero,
            contribution_margin_ratio: zero,
            break_even_point: zero,
            break_even_point_months: zero,
            gross_profit: zero,
            net_profit: zero,
            profit_margin: zero,
            market_share: zero,
            market_share_percentage: zero,
            cash_flow: zero,
            return_on_investment: zero,
            payback_period: zero,
            monthly_burn_rate: zero,
            runway_months: Some(zero),
            projected_revenue_3_months: Some(zero),
            projected_revenue_6_months: Some(zero),
            projected_revenue_12_months: Some(zero),
            growth_rate: zero,
        };
        assert_eq!(result, expected);
    }

    #[test]
    fn test_converted_fields_are_pass_through() {
        let mut input = cafe_input();
        input.currency_config = CurrencyConfig {
            ratio: dec!(1.17),
            currency_name: "USD".into(),
        };
        let result = compute_financial_metrics(&input);
        assert_eq!(result.converted_monthly_revenue, input.monthly_revenue);
        assert_eq!(result.converted_total_fixed_costs, result.total_fixed_costs);
        assert_eq!(result.converted_total_variable_costs, result.total_variable_costs);
    }

    // -----------------------------------------------------------------------
    // Cost totals
    // -----------------------------------------------------------------------

    #[test]
    fn test_negative_fixed_cost_is_excluded_not_netted() {
        let input = FinancialInputs {
            rent: dec!(-50),
            salaries: dec!(100),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert_eq!(result.total_fixed_costs, dec!(100));
    }

    #[test]
    fn test_negative_variable_percentage_is_excluded() {
        let input = FinancialInputs {
            monthly_revenue: dec!(1000),
            credit_card_commissions: dec!(-5),
            cost_of_goods_sold: dec!(40),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert_eq!(result.total_variable_costs, dec!(400));
    }

    #[test]
    fn test_cafe_totals() {
        let result = compute_financial_metrics(&cafe_input());
        // 2000 + 6000 + 400 + 100 + 500
        assert_eq!(result.total_fixed_costs, dec!(9000));
        // 20000 * 30 / 100
        assert_eq!(result.total_variable_costs, dec!(6000));
        assert_eq!(result.monthly_burn_rate, dec!(15000));
        assert_eq!(result.cash_flow, dec!(5000));
        assert_eq!(result.net_profit, dec!(5000));
        assert_eq!(result.profit_margin, dec!(0.25));
    }

    // -----------------------------------------------------------------------
    // Break-even
    // -----------------------------------------------------------------------

    #[test]
    fn test_break_even_example() {
        let input = FinancialInputs {
            monthly_revenue: dec!(10000),
            cost_of_goods_sold: dec!(30),
            rent: dec!(3000),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert_eq!(result.total_variable_costs, dec!(3000));
        assert_eq!(result.contribution_margin, dec!(7000));
        assert_eq!(result.contribution_margin_ratio, dec!(0.7));
        assert!(approx(result.break_even_point, dec!(4285.71), dec!(0.01)));
        assert!(approx(result.break_even_point_months, dec!(0.4286), dec!(0.0001)));
    }

    #[test]
    fn test_negative_contribution_ratio_gives_zero_break_even() {
        let input = FinancialInputs {
            monthly_revenue: dec!(1000),
            cost_of_goods_sold: dec!(80),
            other_variable_costs: dec!(40),
            rent: dec!(500),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert!(result.contribution_margin_ratio < Decimal::ZERO);
        assert_eq!(result.break_even_point, Decimal::ZERO);
        assert_eq!(result.break_even_point_months, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // Investment
    // -----------------------------------------------------------------------

    #[test]
    fn test_roi_payback_and_runway() {
        let result = compute_financial_metrics(&cafe_input());
        // 5000 / 50000
        assert_eq!(result.return_on_investment, dec!(0.1));
        // 50000 / 5000
        assert_eq!(result.payback_period, dec!(10));
        // 50000 / 15000
        let runway = result.runway_months.unwrap();
        assert!(approx(runway, dec!(3.3333), dec!(0.0001)));
    }

    #[test]
    fn test_payback_zero_when_loss_making() {
        let mut input = cafe_input();
        input.rent = dec!(50000);
        input.initial_investment = dec!(1000000000);
        let result = compute_financial_metrics(&input);
        assert!(result.net_profit < Decimal::ZERO);
        assert_eq!(result.payback_period, Decimal::ZERO);
        assert!(result.return_on_investment < Decimal::ZERO);
    }

    #[test]
    fn test_runway_undefined_when_nothing_is_burned() {
        let input = FinancialInputs {
            initial_investment: dec!(10000),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert_eq!(result.monthly_burn_rate, Decimal::ZERO);
        assert_eq!(result.runway_months, None);
    }

    #[test]
    fn test_runway_zero_without_investment() {
        let mut input = cafe_input();
        input.initial_investment = dec!(-10);
        let result = compute_financial_metrics(&input);
        assert_eq!(result.runway_months, Some(Decimal::ZERO));
        assert_eq!(result.return_on_investment, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // Market and growth
    // -----------------------------------------------------------------------

    #[test]
    fn test_market_share_literal() {
        let input = FinancialInputs {
            monthly_revenue: dec!(5000),
            total_market_cap: dec!(100000),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert_eq!(result.market_share, dec!(0.05));
        assert_eq!(result.market_share_percentage, dec!(5));
    }

    #[test]
    fn test_market_share_zero_without_market() {
        let input = FinancialInputs {
            monthly_revenue: dec!(5000),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert_eq!(result.market_share, Decimal::ZERO);
        assert_eq!(result.market_share_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_growth_projections_and_echo() {
        let input = FinancialInputs {
            monthly_revenue: dec!(1000),
            growth_rate: dec!(10),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        assert!(approx(result.projected_revenue_3_months.unwrap(), dec!(1331.00), dec!(0.01)));
        assert!(approx(result.projected_revenue_6_months.unwrap(), dec!(1771.56), dec!(0.01)));
        assert!(approx(result.projected_revenue_12_months.unwrap(), dec!(3138.43), dec!(0.01)));
        assert_eq!(result.growth_rate, dec!(10));
    }

    #[test]
    fn test_out_of_range_growth_does_not_panic() {
        // A 10000% monthly growth typo on a 1,000,000 revenue business
        let input = FinancialInputs {
            monthly_revenue: dec!(1000000),
            growth_rate: dec!(10000),
            rent: dec!(2000),
            ..Default::default()
        };
        let result = compute_financial_metrics(&input);
        // 1000000 * 101^3 still fits; the longer horizons do not
        assert_eq!(result.projected_revenue_3_months, Some(dec!(1030301000000)));
        assert_eq!(result.projected_revenue_6_months, Some(dec!(1061520150601000000)));
        assert_eq!(result.projected_revenue_12_months, None);
        assert_eq!(result.net_profit, dec!(998000));
        assert_eq!(result.growth_rate, dec!(10000));
    }

    #[test]
    fn test_tax_rate_has_no_effect() {
        let base = compute_financial_metrics(&cafe_input());
        let mut taxed = cafe_input();
        taxed.tax_rate = dec!(25);
        assert_eq!(compute_financial_metrics(&taxed), base);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let input = cafe_input();
        assert_eq!(compute_financial_metrics(&input), compute_financial_metrics(&input));
    }

    // -----------------------------------------------------------------------
    // Envelope
    // -----------------------------------------------------------------------

    #[test]
    fn test_envelope_clean_input_has_no_warnings() {
        let out = analyze_financial_metrics(&cafe_input()).unwrap();
        assert!(out.warnings.is_empty(), "unexpected: {:?}", out.warnings);
        assert_eq!(out.result.net_profit, dec!(5000));
        assert_eq!(out.assumptions["currency"], "EUR");
    }

    #[test]
    fn test_envelope_warns_on_ignored_inputs() {
        let mut input = cafe_input();
        input.tax_rate = dec!(21);
        input.rent = dec!(-10);
        input.currency_config.ratio = dec!(1.1);
        let out = analyze_financial_metrics(&input).unwrap();
        assert_eq!(out.warnings.len(), 3);
        assert!(out.warnings.iter().any(|w| w.contains("tax_rate")));
        assert!(out.warnings.iter().any(|w| w.contains("'rent'")));
        assert!(out.warnings.iter().any(|w| w.contains("display metadata")));
    }

    #[test]
    fn test_envelope_warns_on_undefined_runway() {
        let input = FinancialInputs {
            initial_investment: dec!(10000),
            ..Default::default()
        };
        let out = analyze_financial_metrics(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("runway is undefined")));
    }

    #[test]
    fn test_envelope_rejects_overflowing_growth() {
        let input = FinancialInputs {
            monthly_revenue: dec!(1000000000),
            growth_rate: dec!(1000000),
            ..Default::default()
        };
        let err = analyze_financial_metrics(&input).unwrap_err();
        assert!(matches!(
            err,
            SmbMetricsError::InvalidInput { ref field, .. } if field == "growth_rate"
        ));
    }
}
