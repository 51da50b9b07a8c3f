//! Array operators: `map`, `filter`, `reduce`, `all`, `some`, `none`,
//! `merge`.
//!
//! The iterating operators take the list as their first argument and a
//! clause as their second. The clause is evaluated once per element with the
//! element itself as the data, so `{"var": ""}` refers to the element.

use crate::ast::Argument;
use crate::compiler::{CompileError, CompiledOp, Registry, build_arg, build_args};
use crate::value::{Map, Value, is_truthy};

/// Compiles the `[list, clause]` pair shared by the iterating operators.
fn build_pair(
    args: &[Argument],
    ops: &Registry,
) -> Result<Option<(CompiledOp, CompiledOp)>, CompileError> {
    match args {
        [list, clause, ..] => Ok(Some((build_arg(list, ops)?, build_arg(clause, ops)?))),
        _ => Ok(None),
    }
}

/// `{"map": [list, clause]}`; a non-list source maps to an empty list.
pub fn build_map(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let Some((list, clause)) = build_pair(args, ops)? else {
        return Ok(CompiledOp::constant(Value::Null));
    };

    Ok(CompiledOp::new(move |data| match list.eval(data) {
        Value::List(items) => Value::list(items.iter().map(|item| clause.eval(item)).collect()),
        _ => Value::empty_list(),
    }))
}

/// `{"filter": [list, clause]}` keeps the elements the clause finds truthy.
pub fn build_filter(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let Some((list, clause)) = build_pair(args, ops)? else {
        return Ok(CompiledOp::constant(Value::Null));
    };

    Ok(CompiledOp::new(move |data| match list.eval(data) {
        Value::List(items) => Value::list(
            items
                .iter()
                .filter(|item| is_truthy(&clause.eval(item)))
                .cloned()
                .collect(),
        ),
        _ => Value::empty_list(),
    }))
}

/// `{"reduce": [list, clause, initial]}`
///
/// The clause sees `{"current": element, "accumulator": acc}` as its data.
/// A non-list source returns the initial accumulator untouched.
pub fn build_reduce(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let [list, clause, initial, ..] = args else {
        return Ok(CompiledOp::constant(Value::Null));
    };

    let list = build_arg(list, ops)?;
    let clause = build_arg(clause, ops)?;
    let initial = build_arg(initial, ops)?;

    Ok(CompiledOp::new(move |data| {
        let mut accumulator = initial.eval(data);
        let Value::List(items) = list.eval(data) else {
            return accumulator;
        };

        for item in items.iter() {
            let mut scope = Map::new();
            scope.insert("current".to_string(), item.clone());
            scope.insert("accumulator".to_string(), accumulator);
            accumulator = clause.eval(&Value::map(scope));
        }
        accumulator
    }))
}

/// `{"all": [list, clause]}`; `false` for an empty or non-list source.
pub fn build_all(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_quantifier(args, ops, || Value::Bool(false), |items, clause| {
        !items.is_empty() && items.iter().all(|item| is_truthy(&clause.eval(item)))
    })
}

/// `{"some": [list, clause]}`; `false` for an empty list, and like `map` an
/// empty list for a non-list source.
pub fn build_some(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_quantifier(args, ops, Value::empty_list, |items, clause| {
        items.iter().any(|item| is_truthy(&clause.eval(item)))
    })
}

/// `{"none": [list, clause]}`; `true` for an empty or non-list source.
pub fn build_none(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    build_quantifier(args, ops, || Value::Bool(true), |items, clause| {
        !items.iter().any(|item| is_truthy(&clause.eval(item)))
    })
}

fn build_quantifier(
    args: &[Argument],
    ops: &Registry,
    not_a_list: fn() -> Value,
    test: fn(&[Value], &CompiledOp) -> bool,
) -> Result<CompiledOp, CompileError> {
    let Some((list, clause)) = build_pair(args, ops)? else {
        return Ok(CompiledOp::constant(Value::Null));
    };

    Ok(CompiledOp::new(move |data| match list.eval(data) {
        Value::List(items) => Value::Bool(test(&items, &clause)),
        _ => not_a_list(),
    }))
}

/// `{"merge": [...]}` flattens list arguments one level into a new list.
pub fn build_merge(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let terms = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| {
        let mut merged = Vec::new();
        for term in &terms {
            match term.eval(data) {
                Value::List(items) => merged.extend(items.iter().cloned()),
                other => merged.push(other),
            }
        }
        Value::list(merged)
    }))
}
