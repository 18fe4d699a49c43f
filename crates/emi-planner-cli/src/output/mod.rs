pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::commands::CommandOutput;
use crate::OutputFormat;
use serde_json::Value;

/// Print a command's output; documents bypass the format switch.
pub fn emit(format: &OutputFormat, output: &CommandOutput) {
    match output {
        CommandOutput::Value(value) => format_output(format, value),
        CommandOutput::Text(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
