use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use smb_metrics_core::business::calculator::{self, FinancialInputs};
use smb_metrics_core::business::{formulas, status::ProfitStatus};
use smb_metrics_core::growth;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_inputs(input_json: &str) -> NapiResult<FinancialInputs> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Bare result record, recomputed on every form change.
#[napi]
pub fn compute_financial_metrics(input_json: String) -> NapiResult<String> {
    let input = parse_inputs(&input_json)?;
    let output = calculator::compute_financial_metrics(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_financial_metrics(input_json: String) -> NapiResult<String> {
    let input = parse_inputs(&input_json)?;
    let output = calculator::analyze_financial_metrics(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculation_formulas() -> NapiResult<String> {
    serde_json::to_string(&formulas::calculation_formulas()).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ProfitStatusInput {
    net_profit: Decimal,
}

#[derive(Serialize)]
struct ProfitStatusOutput {
    status: ProfitStatus,
    label: &'static str,
}

#[napi]
pub fn profit_status(input_json: String) -> NapiResult<String> {
    let input: ProfitStatusInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let status = ProfitStatus::from_net_profit(input.net_profit);
    serde_json::to_string(&ProfitStatusOutput {
        status,
        label: status.label(),
    })
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RequiredGrowthInput {
    current_revenue: Decimal,
    target_revenue: Decimal,
    months: Decimal,
}

#[derive(Deserialize)]
struct ProjectionInput {
    current_revenue: Decimal,
    growth_rate: Decimal,
    months: Decimal,
}

#[napi]
pub fn required_growth_rate(input_json: String) -> NapiResult<String> {
    let input: RequiredGrowthInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rate = growth::required_growth_rate(
        input.current_revenue,
        input.target_revenue,
        input.months,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "required_growth_rate_pct": rate }))
        .map_err(to_napi_error)
}

#[napi]
pub fn projected_revenue(input_json: String) -> NapiResult<String> {
    let input: ProjectionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let revenue = growth::projected_revenue(input.current_revenue, input.growth_rate, input.months)
        .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "projected_revenue": revenue }))
        .map_err(to_napi_error)
}
