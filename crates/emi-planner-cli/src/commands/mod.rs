pub mod export;
pub mod plan;
pub mod plans;

use serde_json::Value;

/// What a command hands back for printing.
pub enum CommandOutput {
    /// Structured data, rendered with the selected `--output` format
    Value(Value),
    /// A finished document printed as-is
    Text(String),
}

impl From<Value> for CommandOutput {
    fn from(value: Value) -> Self {
        CommandOutput::Value(value)
    }
}

pub type CommandResult = Result<CommandOutput, Box<dyn std::error::Error>>;
