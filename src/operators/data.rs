//! Data access: `var`, `missing`, `missing_some`.

use crate::ast::Argument;
use crate::compiler::{CompileError, CompiledOp, Registry, build_arg, build_args};
use crate::path::{parse_path, resolve, resolve_segments};
use crate::value::Value;

/// `{"var": [path, default]}`
///
/// No arguments returns the whole data. The path is resolved with
/// [`resolve`]; when nothing is found the default (or `null`) is returned.
/// Literal paths are split once, at compile time.
pub fn build_var(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let (path_arg, default) = match args {
        [] => return Ok(CompiledOp::identity()),
        [path] => (path, None),
        [path, default, ..] => (path, Some(build_arg(default, ops)?)),
    };

    let fallback = move |data: &Value| match &default {
        Some(default) => default.eval(data),
        None => Value::Null,
    };

    if let Argument::Literal(path) = path_arg {
        let segments = parse_path(path);
        return Ok(CompiledOp::new(move |data| {
            match segments
                .as_deref()
                .and_then(|segments| resolve_segments(data, segments))
            {
                Some(found) => found.clone(),
                None => fallback(data),
            }
        }));
    }

    let path = build_arg(path_arg, ops)?;
    Ok(CompiledOp::new(move |data| {
        match resolve(data, &path.eval(data)) {
            Some(found) => found,
            None => fallback(data),
        }
    }))
}

/// `{"missing": [path, ...]}`
///
/// Returns the paths that cannot be resolved. Arguments evaluating to lists
/// contribute each of their elements as a path.
pub fn build_missing(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    if args.is_empty() {
        return Ok(CompiledOp::empty_list());
    }

    let terms = build_args(args, ops)?;
    Ok(CompiledOp::new(move |data| {
        let mut missing = Vec::new();
        for term in &terms {
            match term.eval(data) {
                Value::List(paths) => missing.extend(
                    paths
                        .iter()
                        .filter(|path| resolve(data, path).is_none())
                        .cloned(),
                ),
                path => {
                    if resolve(data, &path).is_none() {
                        missing.push(path);
                    }
                }
            }
        }
        Value::list(missing)
    }))
}

/// `{"missing_some": [required, [path, ...]]}`
///
/// Returns an empty list when at least `required` of the paths resolve,
/// otherwise the paths that do not. A non-numeric count or a non-list path
/// argument yields an empty list.
pub fn build_missing_some(args: &[Argument], ops: &Registry) -> Result<CompiledOp, CompileError> {
    let [required, paths, ..] = args else {
        return Ok(CompiledOp::empty_list());
    };

    let required = build_arg(required, ops)?;
    let paths = build_arg(paths, ops)?;

    Ok(CompiledOp::new(move |data| {
        let Value::Number(required) = required.eval(data) else {
            return Value::empty_list();
        };
        let Value::List(paths) = paths.eval(data) else {
            return Value::empty_list();
        };

        let mut found = 0usize;
        let mut missing = Vec::new();
        for path in paths.iter() {
            if resolve(data, path).is_some() {
                found += 1;
            } else {
                missing.push(path.clone());
            }
        }

        if found as f64 >= required {
            Value::empty_list()
        } else {
            Value::list(missing)
        }
    }))
}
