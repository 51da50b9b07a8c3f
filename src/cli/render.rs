//! Normalize rule text

use super::CliError;
use crate::output::{render, render_pretty};
use crate::parse_str;

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// The rule to render
    pub rule: String,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Parses the rule and renders it back in canonical form.
pub fn execute_render(options: &RenderOptions) -> Result<String, CliError> {
    let clause = parse_str(&options.rule)?;
    let bytes = if options.pretty {
        render_pretty(&clause)
    } else {
        render(&clause)
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
