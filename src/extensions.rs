//! Operators outside the standard library.
//!
//! None of these are registered by [`Registry::standard`]; opt in with
//! [`register`] or [`extended`].
//!
//! ```
//! use jsonlogic::{Value, extensions, parse};
//!
//! let registry = extensions::extended();
//! let rule = parse(br#"{"match": [{"var": ""}, "^th"]}"#).unwrap();
//! let program = registry.compile(&rule).unwrap();
//!
//! assert_eq!(program.eval(&Value::from("this matches")), Value::Bool(true));
//! assert_eq!(program.eval(&Value::from("not this")), Value::Bool(false));
//! assert_eq!(program.eval(&Value::from(1.0)), Value::Bool(false));
//! ```

use regex::Regex;
use tracing::debug;

use crate::ast::Argument;
use crate::compiler::{CompileError, CompiledOp, Registry, build_arg};
use crate::value::Value;

/// Adds every extension operator to `registry`.
pub fn register(registry: &mut Registry) {
    registry.register("match", build_match);
}

/// The standard registry plus every extension operator.
pub fn extended() -> Registry {
    let mut registry = Registry::standard();
    register(&mut registry);
    registry
}

/// `{"match": [subject, pattern]}`
///
/// `true` when the subject is a string matched by the regular expression.
/// Non-string operands and invalid patterns are `false`. A literal pattern is
/// compiled once, when the rule is.
pub fn build_match(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let [subject, pattern, ..] = args else {
        return Ok(CompiledOp::constant(Value::Bool(false)));
    };

    let subject = build_arg(subject, ops)?;

    if let Argument::Literal(pattern) = pattern {
        let regex = pattern.as_str().and_then(compile_pattern);
        return Ok(CompiledOp::new(move |data| {
            let matched = match (&regex, subject.eval(data)) {
                (Some(regex), Value::String(s)) => regex.is_match(&s),
                _ => false,
            };
            Value::Bool(matched)
        }));
    }

    let pattern = build_arg(pattern, ops)?;
    Ok(CompiledOp::new(move |data| {
        let matched = match (subject.eval(data), pattern.eval(data)) {
            (Value::String(s), Value::String(p)) => {
                compile_pattern(&p).is_some_and(|regex| regex.is_match(&s))
            }
            _ => false,
        };
        Value::Bool(matched)
    }))
}

fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!(pattern, error = %e, "invalid regex in match");
            None
        }
    }
}
