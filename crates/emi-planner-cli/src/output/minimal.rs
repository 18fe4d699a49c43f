use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    println!("{}", minimal_line(result_obj));
}

fn minimal_line(result_obj: &Value) -> String {
    // Priority list of key output fields
    let priority_keys = [
        "message",
        "valid",
        "totalInterest",
        "bankYear1Total",
        "written",
        "id",
    ];

    match result_obj {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        return format_minimal(val);
                    }
                }
            }
            match map.iter().next() {
                Some((key, val)) => format!("{}: {}", key, format_minimal(val)),
                None => String::new(),
            }
        }
        // Lists print one entry per line: ids for saved plans, P/L for schedules
        Value::Array(rows) => rows
            .iter()
            .map(|row| match row {
                Value::Object(map) => map
                    .get("id")
                    .or_else(|| map.get("pl"))
                    .map(format_minimal)
                    .unwrap_or_default(),
                other => format_minimal(other),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => format_minimal(other),
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_message_wins() {
        let v = json!({"valid": false, "message": "Loan tenure must be greater than 0 years"});
        assert_eq!(minimal_line(&v), "Loan tenure must be greater than 0 years");
        let v = json!({"valid": true, "message": null, "kind": null});
        assert_eq!(minimal_line(&v), "true");
    }

    #[test]
    fn test_saved_plan_ids_one_per_line() {
        let v = json!([{"id": "a", "loanType": "x"}, {"id": "b", "loanType": "y"}]);
        assert_eq!(minimal_line(&v), "a\nb");
    }
}
