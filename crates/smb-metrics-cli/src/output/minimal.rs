use serde_json::Value;

/// Print just the headline figure of the output.
///
/// Metrics print net profit with its status; the growth commands print
/// their single answer; anything else falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "net_profit",
        "required_growth_rate_pct",
        "projected_revenue",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
                match map.get("profit_status").and_then(Value::as_str) {
                    Some(status) if *key == "net_profit" => {
                        println!("{} ({})", format_minimal(val), status)
                    }
                    _ => println!("{}", format_minimal(val)),
                }
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
