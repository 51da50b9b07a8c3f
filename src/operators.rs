//! # Standard operator library
//!
//! Every operator is a builder function registered under its rule name by
//! [`register_standard`]. Operators are grouped by family:
//!
//! - **[data]** - `var`, `missing`, `missing_some`
//! - **[logic]** - `if`, `?:`, `and`, `or`, `==`, `===`, `!=`, `!==`, `!`, `!!`
//! - **[numeric]** - `>`, `>=`, `<`, `<=`, `max`, `min`, `+`, `-`, `*`, `/`, `%`
//! - **[string]** - `in`, `cat`, `substr`
//! - **[array]** - `map`, `filter`, `reduce`, `all`, `some`, `none`, `merge`
//!
//! plus the literal builder registered under the empty name.
//!
//! Operators never fail at evaluation time. Missing arguments, wrong types
//! and unusable numbers all produce a defined result (`null`, `false`, `NaN`
//! or an empty list).

pub mod array;
pub mod data;
pub mod logic;
pub mod numeric;
pub mod string;

use crate::ast::Argument;
use crate::compiler::{CompileError, CompiledOp, Registry, build_args};
use crate::value::Value;

/// Registers the whole standard library into `registry`.
pub fn register_standard(registry: &mut Registry) {
    registry
        .register("", build_literal)
        // data access
        .register("var", data::build_var)
        .register("missing", data::build_missing)
        .register("missing_some", data::build_missing_some)
        // logic
        .register("if", logic::build_if)
        .register("?:", logic::build_if)
        .register("and", logic::build_and)
        .register("or", logic::build_or)
        .register("==", logic::build_equal)
        .register("===", logic::build_strict_equal)
        .register("!=", logic::build_not_equal)
        .register("!==", logic::build_strict_not_equal)
        .register("!", logic::build_negate)
        .register("!!", logic::build_double_negate)
        // numeric
        .register(">", numeric::build_greater)
        .register(">=", numeric::build_greater_equal)
        .register("<", numeric::build_less)
        .register("<=", numeric::build_less_equal)
        .register("max", numeric::build_max)
        .register("min", numeric::build_min)
        .register("+", numeric::build_plus)
        .register("-", numeric::build_minus)
        .register("*", numeric::build_multiply)
        .register("/", numeric::build_divide)
        .register("%", numeric::build_modulo)
        // strings
        .register("in", string::build_in)
        .register("cat", string::build_cat)
        .register("substr", string::build_substr)
        // arrays
        .register("map", array::build_map)
        .register("filter", array::build_filter)
        .register("reduce", array::build_reduce)
        .register("all", array::build_all)
        .register("some", array::build_some)
        .register("none", array::build_none)
        .register("merge", array::build_merge);
}

/// Builds a degenerate clause.
///
/// A single literal evaluates to itself, ignoring the data. A naked argument
/// list evaluates each argument and collects the results in a new list.
pub fn build_literal(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    if let [Argument::Literal(value)] = args {
        return Ok(CompiledOp::constant(value.clone()));
    }

    let items = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| {
        Value::list(items.iter().map(|item| item.eval(data)).collect())
    }))
}
