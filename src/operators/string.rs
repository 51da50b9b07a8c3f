//! String operators: `in`, `cat`, `substr`.

use crate::ast::Argument;
use crate::compiler::{CompileError, CompiledOp, Registry, build_arg, build_args};
use crate::value::{Value, to_number, to_string};

/// `{"in": [needle, haystack]}`
///
/// - string haystack: substring test on the needle's string form
/// - list haystack: deep structural membership (looser than `==`, which
///   compares composites by identity)
/// - map haystack: key membership
///
/// Anything else, or fewer than two arguments, is `false`.
pub fn build_in(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let [needle, haystack, ..] = args else {
        return Ok(CompiledOp::constant(Value::Bool(false)));
    };

    let needle = build_arg(needle, ops)?;
    let haystack = build_arg(haystack, ops)?;

    Ok(CompiledOp::new(move |data| {
        let needle = needle.eval(data);
        let found = match haystack.eval(data) {
            Value::String(s) => s.contains(&to_string(&needle)),
            Value::List(items) => items.iter().any(|item| *item == needle),
            Value::Map(map) => needle.as_str().is_some_and(|key| map.contains_key(key)),
            _ => false,
        };
        Value::Bool(found)
    }))
}

/// `{"cat": [...]}` concatenates the string form of every argument.
pub fn build_cat(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let terms = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| {
        let mut result = String::new();
        for term in &terms {
            result.push_str(&to_string(&term.eval(data)));
        }
        Value::String(result)
    }))
}

/// `{"substr": [source, offset, length]}`
///
/// Counts Unicode code points. A negative offset counts back from the end,
/// a negative length stops that many characters before the end. Both are
/// clamped to the string, so out of range values never fail.
///
/// # Examples
///
/// ```text
/// {"substr": ["jsonlogic", 4]}      => "logic"
/// {"substr": ["jsonlogic", -5]}     => "logic"
/// {"substr": ["jsonlogic", 1, 3]}   => "son"
/// {"substr": ["jsonlogic", 4, -2]}  => "log"
/// ```
pub fn build_substr(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let Some((source, rest)) = args.split_first() else {
        return Ok(CompiledOp::constant(Value::from("undefined")));
    };

    let source = build_arg(source, ops)?;
    let offset = rest.first().map(|arg| build_arg(arg, ops)).transpose()?;
    let length = rest.get(1).map(|arg| build_arg(arg, ops)).transpose()?;

    Ok(CompiledOp::new(move |data| {
        let source = match source.eval(data) {
            Value::String(s) => s,
            other => to_string(&other),
        };
        let offset = offset.as_ref().map_or(0, |arg| to_integer(&arg.eval(data)));
        let length = length.as_ref().map(|arg| to_integer(&arg.eval(data)));
        Value::String(substr(&source, offset, length))
    }))
}

/// Truncates toward zero; `NaN` is `0`, infinities saturate.
fn to_integer(v: &Value) -> i64 {
    let n = to_number(v);
    if n.is_nan() { 0 } else { n.trunc() as i64 }
}

fn substr(source: &str, offset: i64, length: Option<i64>) -> String {
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len() as i64;

    let start = if offset < 0 {
        len.saturating_add(offset).max(0)
    } else {
        offset.min(len)
    };
    let end = match length {
        None => len,
        Some(length) if length < 0 => len.saturating_add(length).max(start),
        Some(length) => start.saturating_add(length).min(len),
    };

    chars[start as usize..end as usize].iter().collect()
}
