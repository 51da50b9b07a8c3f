//! # jsonlogic
//!
//! A [JsonLogic](https://jsonlogic.com) rule engine. Rules are JSON
//! documents such as `{"<": [{"var": "age"}, 18]}`; they are parsed once into
//! a [`Clause`] tree, compiled once into a [`CompiledOp`] closure tree, and
//! then evaluated cheaply against any number of data values.
//!
//! ```
//! use jsonlogic::{Value, compile, parse};
//!
//! let rule = parse(br#"{"and": [{">": [{"var": "age"}, 17]}, {"var": "verified"}]}"#).unwrap();
//! let program = compile(&rule).unwrap();
//!
//! let adult: Value = serde_json::json!({"age": 30, "verified": true}).into();
//! let minor: Value = serde_json::json!({"age": 12, "verified": true}).into();
//!
//! assert_eq!(program.eval(&adult), Value::Bool(true));
//! assert_eq!(program.eval(&minor), Value::Bool(false));
//! ```
//!
//! Evaluation never fails: unexpected shapes resolve to `null`, `false`,
//! `NaN` or an empty list, the same way the JavaScript reference does. Only
//! malformed JSON ([`ParseError`]) and unknown operators ([`CompileError`])
//! are errors.

pub mod ast;
pub mod compiler;
pub mod convert;
pub mod extensions;
pub mod operators;
pub mod output;
pub mod parser;
pub mod path;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

use thiserror::Error;

pub use ast::{Argument, Arguments, Clause, Operator};
pub use compiler::{Builder, CompileError, CompiledOp, Registry, build_arg, build_args, compile};
pub use output::{render, render_pretty, to_json, to_json_pretty};
pub use parser::{ParseError, parse, parse_arguments, parse_str};
pub use value::Value;

/// Either way a rule can be rejected before it runs.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Parses, compiles and evaluates a rule in one go.
///
/// Convenient for one-off checks; rules evaluated repeatedly should be
/// compiled once and kept.
///
/// ```
/// use jsonlogic::{Value, apply};
///
/// let data: Value = serde_json::json!({"a": 1}).into();
/// assert_eq!(apply(br#"{"var": "a"}"#, &data).unwrap(), Value::from(1.0));
/// ```
pub fn apply(rule: &[u8], data: &Value) -> Result<Value, Error> {
    let clause = parse(rule)?;
    let program = compile(&clause)?;
    Ok(program.eval(data))
}
