//! Validate a rule without running it

use super::{CliError, registry};
use crate::parse_str;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule to validate
    pub rule: String,
    /// Accept extension operators
    pub extensions: bool,
}

/// Parses and compiles the rule, discarding the result.
pub fn execute_check(options: &CheckOptions) -> Result<(), CliError> {
    let clause = parse_str(&options.rule)?;
    registry(options.extensions).compile(&clause)?;
    Ok(())
}
