//! Evaluate rules against JSON input

use tracing::debug;

use super::{CliError, registry};
use crate::output::{to_json, to_json_pretty};
use crate::{Value, parse_str};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The rule to evaluate
    pub rule: String,
    /// JSON data; `null` when absent
    pub data: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Accept extension operators
    pub extensions: bool,
}

/// Evaluates the rule and returns the result as JSON text.
pub fn execute_eval(options: &EvalOptions) -> Result<String, CliError> {
    let clause = parse_str(&options.rule)?;
    let program = registry(options.extensions).compile(&clause)?;

    let data = match &options.data {
        Some(text) if !text.trim().is_empty() => {
            let json: serde_json::Value = serde_json::from_str(text).map_err(CliError::Data)?;
            Value::from(json)
        }
        _ => {
            debug!("no data supplied, evaluating against null");
            Value::Null
        }
    };

    let result = program.eval(&data);
    Ok(if options.pretty {
        to_json_pretty(&result)
    } else {
        to_json(&result)
    })
}
