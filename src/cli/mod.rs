//! CLI support for jsonlogic
//!
//! Provides programmatic access to the `jsonlogic` command's functionality
//! for embedding in other tools.

mod check;
mod eval;
mod render;

pub use check::{CheckOptions, execute_check};
pub use eval::{EvalOptions, execute_eval};
pub use render::{RenderOptions, execute_render};

use std::io;

use thiserror::Error;

use crate::compiler::standard_registry;
use crate::{CompileError, ParseError, Registry, extensions};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// The rule is not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The rule uses an operator the registry does not know
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// The data is not valid JSON
    #[error("Invalid data JSON: {0}")]
    Data(#[source] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The registry a command compiles against.
pub fn registry(with_extensions: bool) -> Registry {
    if with_extensions {
        extensions::extended()
    } else {
        standard_registry().clone()
    }
}

/// Registered operator names, sorted.
pub fn list_operators(with_extensions: bool) -> Vec<String> {
    registry(with_extensions)
        .operators()
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
