use serde_json::Value;
use std::io;

use smb_metrics_core::business::formulas::formula_for;

/// Write output as CSV to stdout.
///
/// Result fields become `field,value,formula` rows; the formula column is
/// empty for fields without one (growth command outputs, profit status).
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let rows = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        },
        _ => {
            let _ = wtr.write_record([format_csv_value(value)]);
            let _ = wtr.flush();
            return;
        }
    };

    let _ = wtr.write_record(["field", "value", "formula"]);
    for (key, val) in rows {
        let formula = formula_for(key).unwrap_or_default();
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val), formula]);
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
