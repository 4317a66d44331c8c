use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Result fields grouped the way a monthly review reads them.
const SECTIONS: [(&str, &[&str]); 6] = [
    (
        "Break-even",
        &[
            "total_fixed_costs",
            "total_variable_costs",
            "contribution_margin",
            "contribution_margin_ratio",
            "break_even_point",
            "break_even_point_months",
        ],
    ),
    (
        "Profitability",
        &["profit_status", "gross_profit", "net_profit", "profit_margin"],
    ),
    ("Market", &["market_share", "market_share_percentage"]),
    (
        "Cash & investment",
        &[
            "cash_flow",
            "return_on_investment",
            "payback_period",
            "monthly_burn_rate",
            "runway_months",
        ],
    ),
    (
        "Growth",
        &[
            "growth_rate",
            "projected_revenue_3_months",
            "projected_revenue_6_months",
            "projected_revenue_12_months",
        ],
    ),
    (
        "Currency",
        &[
            "converted_monthly_revenue",
            "converted_total_fixed_costs",
            "converted_total_variable_costs",
        ],
    ),
];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_envelope(result, map),
            _ => print_fields(map.iter()),
        },
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let sectioned = SECTIONS.iter().any(|(_, keys)| keys.iter().any(|k| result.contains_key(*k)));

    if sectioned {
        let mut builder = Builder::default();
        builder.push_record(["Section", "Metric", "Value"]);
        for (section, keys) in SECTIONS {
            for (i, key) in keys.iter().enumerate() {
                if let Some(val) = result.get(*key) {
                    let label = if i == 0 { section } else { "" };
                    builder.push_record([label, *key, &format_value(val)]);
                }
            }
        }
        println!("{}", Table::from(builder));
    } else {
        print_fields(result.iter());
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields<'a>(fields: impl Iterator<Item = (&'a String, &'a Value)>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

/// Decimal strings are rounded to 4 places for display; everything else
/// prints as-is.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<rust_decimal::Decimal>() {
            Ok(d) => d.round_dp(4).normalize().to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "undefined".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
