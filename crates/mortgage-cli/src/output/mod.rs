pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Column order for schedule rows; unknown keys follow alphabetically.
const ROW_COLUMNS: [&str; 6] = [
    "month",
    "payment_date",
    "payment",
    "principal_portion",
    "interest_portion",
    "remaining_balance",
];

/// Rates and ratios keep their full precision; only amounts are rounded.
const UNROUNDED_KEYS: [&str; 3] = ["annual_rate_percent", "pmi_percent", "down_payment_ratio"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Round every decimal amount to `places` for display.
///
/// Amounts arrive as decimal strings; they are rounded half away from zero
/// and padded so each one shows exactly `places` digits. Dates, labels,
/// integer counts and the fields in `UNROUNDED_KEYS` pass through untouched.
pub fn round_amounts(value: &Value, places: u32) -> Value {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => {
                let rounded = d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
                Value::String(format!("{:.*}", places as usize, rounded))
            }
            Err(_) => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(|v| round_amounts(v, places)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if UNROUNDED_KEYS.contains(&k.as_str()) {
                        v.clone()
                    } else {
                        round_amounts(v, places)
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Headers for an array of row objects, schedule columns first.
pub(crate) fn ordered_headers(first: &Map<String, Value>) -> Vec<String> {
    let mut headers: Vec<String> = ROW_COLUMNS
        .iter()
        .filter(|c| first.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    for key in first.keys() {
        if !ROW_COLUMNS.contains(&key.as_str()) {
            headers.push(key.clone());
        }
    }
    headers
}

/// First field holding a non-empty array of objects (e.g. schedule rows).
pub(crate) fn find_row_array(map: &Map<String, Value>) -> Option<(&str, &Vec<Value>)> {
    map.iter().find_map(|(k, v)| match v {
        Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_))) => {
            Some((k.as_str(), arr))
        }
        _ => None,
    })
}

/// Render a scalar JSON value as plain text.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
