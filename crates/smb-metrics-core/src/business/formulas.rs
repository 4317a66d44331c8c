use std::collections::BTreeMap;

/// Field name of [`FinancialCalculations`](super::calculator::FinancialCalculations)
/// paired with the formula that produces it.
const FORMULAS: [(&str, &str); 23] = [
    ("converted_monthly_revenue", "Monthly Revenue (in target currency)"),
    ("converted_total_fixed_costs", "Total Fixed Costs (in target currency)"),
    (
        "converted_total_variable_costs",
        "(Monthly Revenue × Total Variable Cost Percentage) / 100 (positive percentages only)",
    ),
    (
        "total_fixed_costs",
        "Rent + Salaries + Supplies + Utilities + Insurance + Marketing + Other Fixed Costs (positive values only)",
    ),
    (
        "total_variable_costs",
        "(Monthly Revenue × Total Variable Cost Percentage) / 100 (positive percentages only)",
    ),
    ("contribution_margin", "Monthly Revenue - Total Variable Costs"),
    ("contribution_margin_ratio", "Contribution Margin / Monthly Revenue"),
    ("break_even_point", "Total Fixed Costs / Contribution Margin Ratio"),
    ("break_even_point_months", "Break Even Point / Monthly Revenue"),
    ("gross_profit", "Monthly Revenue - Total Variable Costs"),
    ("net_profit", "Gross Profit - Total Fixed Costs"),
    ("profit_margin", "Net Profit / Monthly Revenue"),
    ("market_share", "Monthly Revenue / Total Market Cap"),
    ("market_share_percentage", "Market Share × 100"),
    (
        "cash_flow",
        "Monthly Revenue - (Total Fixed Costs + Total Variable Costs)",
    ),
    ("return_on_investment", "Net Profit / Initial Investment"),
    ("payback_period", "Initial Investment / Net Profit"),
    ("monthly_burn_rate", "Total Fixed Costs + Total Variable Costs"),
    ("runway_months", "Initial Investment / Monthly Burn Rate"),
    (
        "projected_revenue_3_months",
        "Monthly Revenue × (1 + Growth Rate / 100)^3",
    ),
    (
        "projected_revenue_6_months",
        "Monthly Revenue × (1 + Growth Rate / 100)^6",
    ),
    (
        "projected_revenue_12_months",
        "Monthly Revenue × (1 + Growth Rate / 100)^12",
    ),
    ("growth_rate", "Growth Rate (as entered, in %)"),
];

/// Human-readable formula for every output field, keyed by field name.
pub fn calculation_formulas() -> BTreeMap<&'static str, &'static str> {
    FORMULAS.into_iter().collect()
}

/// Formula for a single output field.
pub fn formula_for(field: &str) -> Option<&'static str> {
    FORMULAS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, formula)| *formula)
}
