//! JSON text to [`Clause`] tree.
//!
//! Rules are plain JSON, so the only hard failure is malformed JSON. Every
//! well formed document is *some* clause; ambiguous shapes are resolved by
//! precedence:
//!
//! 1. an object with exactly one key is an operator application
//! 2. an array holding a one-key object anywhere inside (through nested
//!    arrays and one-key objects) is a naked argument list
//! 3. everything else is a literal

use std::str::FromStr;

use thiserror::Error;

use crate::ast::{Argument, Arguments, Clause};
use crate::convert::json_to_value;
use crate::value::{Map, Value};

/// Malformed rule text.
#[derive(Debug, Error)]
#[error("invalid rule JSON: {source}")]
pub struct ParseError {
    #[from]
    source: serde_json::Error,
}

impl ParseError {
    /// 1-based line of the syntax error.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// 1-based column of the syntax error.
    pub fn column(&self) -> usize {
        self.source.column()
    }
}

/// Parses rule bytes into a clause tree.
///
/// # Examples
///
/// ```
/// use jsonlogic::parse;
///
/// let clause = parse(br#"{"==": [1, 1]}"#).unwrap();
/// assert_eq!(clause.operator.as_str(), "==");
/// assert_eq!(clause.arguments.len(), 2);
///
/// // Single arguments need no array
/// let clause = parse(br#"{"var": "a"}"#).unwrap();
/// assert_eq!(clause.arguments.len(), 1);
///
/// assert!(parse(b"{not json").is_err());
/// ```
pub fn parse(bytes: &[u8]) -> Result<Clause, ParseError> {
    let raw: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(clause_from_json(raw))
}

/// Parses rule text into a clause tree.
pub fn parse_str(text: &str) -> Result<Clause, ParseError> {
    parse(text.as_bytes())
}

/// Builds a clause from an already decoded JSON document.
pub fn clause_from_json(raw: serde_json::Value) -> Clause {
    match raw {
        serde_json::Value::Object(obj) if obj.len() == 1 => {
            let mut entries = obj.into_iter();
            match entries.next() {
                Some((operator, args)) => Clause::new(operator, parse_arguments(args)),
                None => Clause::literal(Value::map(Map::new())),
            }
        }
        serde_json::Value::Array(items) if items.iter().any(holds_clause) => {
            Clause::naked(items.into_iter().map(argument_from_json).collect())
        }
        raw => Clause::literal(json_to_value(raw)),
    }
}

/// Turns the value of a `{"op": value}` pair into an argument list.
///
/// Arrays provide one argument per element; any other value is a single
/// argument.
pub fn parse_arguments(value: serde_json::Value) -> Arguments {
    match value {
        serde_json::Value::Array(items) => items.into_iter().map(argument_from_json).collect(),
        single => vec![argument_from_json(single)],
    }
}

fn argument_from_json(value: serde_json::Value) -> Argument {
    Argument::from(clause_from_json(value))
}

/// Whether this value is, or nests through arrays, a one-key object.
fn holds_clause(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(obj) => obj.len() == 1,
        serde_json::Value::Array(items) => items.iter().any(holds_clause),
        _ => false,
    }
}

impl FromStr for Clause {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}

impl From<serde_json::Value> for Clause {
    fn from(raw: serde_json::Value) -> Self {
        clause_from_json(raw)
    }
}
