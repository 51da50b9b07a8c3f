//! Numeric comparison and arithmetic.
//!
//! Every operand goes through [`to_number`] first, so `"3"` compares and adds
//! like `3`, and anything unparseable becomes `NaN`. Unlike JavaScript, two
//! strings are also compared numerically rather than lexicographically.

use crate::ast::Argument;
use crate::compiler::{CompileError, CompiledOp, Registry, build_arg, build_args};
use crate::value::{Value, to_number};

type Compare = fn(f64, f64) -> bool;

pub fn build_greater(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_comparison(args, ops, |a, b| a > b, false)
}

pub fn build_greater_equal(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_comparison(args, ops, |a, b| a >= b, false)
}

/// `{"<": [a, b]}`, or with three arguments the exclusive range test
/// `a < b < c`.
pub fn build_less(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_comparison(args, ops, |a, b| a < b, true)
}

/// `{"<=": [a, b]}`, or with three arguments the inclusive range test
/// `a <= b <= c`.
pub fn build_less_equal(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_comparison(args, ops, |a, b| a <= b, true)
}

fn build_comparison(
    args: &[Argument],
    ops: &Registry,
    compare: Compare,
    allow_between: bool,
) -> Result<CompiledOp, CompileError> {
    match args {
        [] | [_] => Ok(CompiledOp::constant(Value::Bool(false))),
        [low, mid, high, ..] if allow_between => {
            let low = build_arg(low, ops)?;
            let mid = build_arg(mid, ops)?;
            let high = build_arg(high, ops)?;
            Ok(CompiledOp::new(move |data| {
                let low = to_number(&low.eval(data));
                let mid = to_number(&mid.eval(data));
                if !compare(low, mid) {
                    return Value::Bool(false);
                }
                let high = to_number(&high.eval(data));
                Value::Bool(compare(mid, high))
            }))
        }
        [l, r, ..] => {
            let l = build_arg(l, ops)?;
            let r = build_arg(r, ops)?;
            Ok(CompiledOp::new(move |data| {
                let l = to_number(&l.eval(data));
                let r = to_number(&r.eval(data));
                Value::Bool(compare(l, r))
            }))
        }
    }
}

/// `{"max": [...]}`; `null` without arguments, `NaN` if any operand is.
pub fn build_max(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_extreme(args, ops, f64::NEG_INFINITY, |candidate, best| candidate > best)
}

/// `{"min": [...]}`; `null` without arguments, `NaN` if any operand is.
pub fn build_min(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_extreme(args, ops, f64::INFINITY, |candidate, best| candidate < best)
}

fn build_extreme(
    args: &[Argument],
    ops: &Registry,
    start: f64,
    better: Compare,
) -> Result<CompiledOp, CompileError> {
    if args.is_empty() {
        return Ok(CompiledOp::constant(Value::Null));
    }

    let terms = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| {
        let mut best = start;
        for term in &terms {
            let n = to_number(&term.eval(data));
            if n.is_nan() {
                return Value::Number(n);
            }
            if better(n, best) {
                best = n;
            }
        }
        Value::Number(best)
    }))
}

/// `{"+": [...]}` sums its operands; `0` without arguments.
///
/// With one argument this is the rule language's number cast.
pub fn build_plus(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let terms = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| fold(&terms, data, 0.0, |acc, n| acc + n)))
}

/// `{"*": [...]}` multiplies its operands; `null` without arguments.
pub fn build_multiply(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    if args.is_empty() {
        return Ok(CompiledOp::constant(Value::Null));
    }

    let terms = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| fold(&terms, data, 1.0, |acc, n| acc * n)))
}

/// `{"-": [a]}` negates, `{"-": [a, b, ...]}` subtracts left to right;
/// `null` without arguments.
pub fn build_minus(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    match args {
        [] => Ok(CompiledOp::constant(Value::Null)),
        [only] => {
            let arg = build_arg(only, ops)?;
            Ok(CompiledOp::new(move |data| {
                Value::Number(-to_number(&arg.eval(data)))
            }))
        }
        [first, rest @ ..] => {
            let first = build_arg(first, ops)?;
            let rest = build_args(rest, ops)?;
            Ok(CompiledOp::new(move |data| {
                let start = to_number(&first.eval(data));
                if start.is_nan() {
                    return Value::Number(start);
                }
                fold(&rest, data, start, |acc, n| acc - n)
            }))
        }
    }
}

/// Folds the operands as numbers, stopping at the first `NaN`.
fn fold(terms: &[CompiledOp], data: &Value, start: f64, step: fn(f64, f64) -> f64) -> Value {
    let mut acc = start;
    for term in terms {
        let n = to_number(&term.eval(data));
        if n.is_nan() {
            return Value::Number(n);
        }
        acc = step(acc, n);
    }
    Value::Number(acc)
}

/// `{"/": [a, b]}`; `null` with fewer than two arguments.
pub fn build_divide(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_binary(args, ops, |a, b| a / b)
}

/// `{"%": [a, b]}`, the floating point remainder taking the sign of `a`;
/// `null` with fewer than two arguments.
pub fn build_modulo(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_binary(args, ops, |a, b| a % b)
}

fn build_binary(
    args: &[Argument],
    ops: &Registry,
    apply: fn(f64, f64) -> f64,
) -> Result<CompiledOp, CompileError> {
    let [l, r, ..] = args else {
        return Ok(CompiledOp::constant(Value::Null));
    };

    let l = build_arg(l, ops)?;
    let r = build_arg(r, ops)?;
    Ok(CompiledOp::new(move |data| {
        let l = to_number(&l.eval(data));
        let r = to_number(&r.eval(data));
        Value::Number(apply(l, r))
    }))
}
