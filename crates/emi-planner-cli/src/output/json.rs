use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print JSON to stdout.
pub fn print_json(value: &Value) {
    if let Err(e) = write_json(&mut io::stdout().lock(), value) {
        eprintln!("JSON output error: {}", e);
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decimal_strings_stay_strings() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({"loanAmount": "250000.00"})).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\n  \"loanAmount\": \"250000.00\"\n}\n"
        );
    }
}
