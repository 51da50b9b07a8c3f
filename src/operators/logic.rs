//! Logic and equality: `if`/`?:`, `and`, `or`, `==`, `===`, `!=`, `!==`,
//! `!`, `!!`.
//!
//! `if`, `and` and `or` short-circuit: arguments past the one that decides
//! the result are never evaluated.

use crate::ast::Argument;
use crate::compiler::{CompileError, CompiledOp, Registry, build_arg, build_args};
use crate::value::{Value, is_truthy, soft_equal, strict_equal};

/// `{"if": [cond, then, cond, then, ..., else]}`
///
/// Conditions are tried left to right and the value paired with the first
/// truthy one is returned. A trailing unpaired argument is the else branch;
/// without one the result is `null`. A single argument is returned as is.
pub fn build_if(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    match args {
        [] => Ok(CompiledOp::constant(Value::Null)),
        [only] => build_arg(only, ops),
        _ => {
            let terms = build_args(args, ops)?;
            Ok(CompiledOp::new(move |data| {
                let mut pairs = terms.chunks_exact(2);
                for pair in &mut pairs {
                    if is_truthy(&pair[0].eval(data)) {
                        return pair[1].eval(data);
                    }
                }
                match pairs.remainder() {
                    [otherwise] => otherwise.eval(data),
                    _ => Value::Null,
                }
            }))
        }
    }
}

/// `{"and": [a, b, ...]}` returns the first falsy value, or the last value.
pub fn build_and(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_junction(args, ops, false)
}

/// `{"or": [a, b, ...]}` returns the first truthy value, or the last value.
pub fn build_or(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_junction(args, ops, true)
}

/// Shared by `and`/`or`: stop at the first value whose truthiness is `stop_on`.
fn build_junction(
    args: &[Argument],
    ops: &Registry,
    stop_on: bool,
) -> Result<CompiledOp, CompileError> {
    if args.is_empty() {
        return Ok(CompiledOp::constant(Value::Null));
    }

    let terms = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| {
        let mut last = Value::Null;
        for term in &terms {
            last = term.eval(data);
            if is_truthy(&last) == stop_on {
                return last;
            }
        }
        last
    }))
}

/// `{"==": [a, b]}` with coercion.
pub fn build_equal(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_equality(args, ops, soft_equal, false)
}

/// `{"===": [a, b]}` without coercion, composites by identity.
pub fn build_strict_equal(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_equality(args, ops, strict_equal, false)
}

pub fn build_not_equal(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_equality(args, ops, soft_equal, true)
}

pub fn build_strict_not_equal(
    args: &[Argument],
    ops: &Registry,
) -> Result<CompiledOp, CompileError> {
    build_equality(args, ops, strict_equal, true)
}

/// No arguments compare equal, a single argument compares unequal. Extra
/// arguments past the second are ignored.
fn build_equality(
    args: &[Argument],
    ops: &Registry,
    equal: fn(&Value, &Value) -> bool,
    negate: bool,
) -> Result<CompiledOp, CompileError> {
    let (l, r) = match args {
        [] => return Ok(CompiledOp::constant(Value::Bool(!negate))),
        [_] => return Ok(CompiledOp::constant(Value::Bool(negate))),
        [l, r, ..] => (build_arg(l, ops)?, build_arg(r, ops)?),
    };

    Ok(CompiledOp::new(move |data| {
        let l = l.eval(data);
        let r = r.eval(data);
        Value::Bool(equal(&l, &r) != negate)
    }))
}

/// `{"!": [a]}`; without arguments the result is `true`.
pub fn build_negate(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_truthiness(args, ops, true)
}

/// `{"!!": [a]}`; without arguments the result is `false`.
pub fn build_double_negate(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_truthiness(args, ops, false)
}

fn build_truthiness(
    args: &[Argument],
    ops: &Registry,
    negate: bool,
) -> Result<CompiledOp, CompileError> {
    let Some(first) = args.first() else {
        return Ok(CompiledOp::constant(Value::Bool(negate)));
    };

    let arg = build_arg(first, ops)?;
    Ok(CompiledOp::new(move |data| {
        Value::Bool(is_truthy(&arg.eval(data)) != negate)
    }))
}
