//! Dotted path lookup into nested data.
//!
//! Paths come from rule arguments, so they are themselves [`Value`]s:
//!
//! - `"user.address.city"` descends through maps by key
//! - `"items.0.price"` descends through lists by index
//! - `1` indexes a top level list directly
//! - `""` and `null` are the empty path and resolve to the data itself
//!
//! Anything that cannot be followed is *absent* (`None`), never an error.
//!
//! ```
//! use jsonlogic::{Value, path::resolve};
//!
//! let data: Value = serde_json::json!({"one": {"two": ["hello", 2]}}).into();
//!
//! assert_eq!(resolve(&data, &Value::from("one.two.0")), Some(Value::from("hello")));
//! assert_eq!(resolve(&data, &Value::from("one.two.3")), None);
//! ```

use crate::value::Value;

/// A single step of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Text segment from a dotted string.
    ///
    /// Looks up a key in a map, or an index in a list when the text is a
    /// canonical non-negative integer (`"0"`, `"12"`, but not `"01"`).
    Key(String),

    /// Numeric path, only meaningful against a list.
    Index(usize),
}

/// A sequence of path segments. Empty means "the data itself".
pub type Path = Vec<PathSegment>;

/// Splits a path argument into segments.
///
/// Returns `None` when the argument can never name anything: fractional or
/// negative numbers, booleans, lists and maps.
pub fn parse_path(path: &Value) -> Option<Path> {
    match path {
        Value::Null => Some(Vec::new()),
        Value::String(s) if s.is_empty() => Some(Vec::new()),
        Value::String(s) => Some(
            s.split('.')
                .map(|segment| PathSegment::Key(segment.to_string()))
                .collect(),
        ),
        Value::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= usize::MAX as f64 => {
            Some(vec![PathSegment::Index(*n as usize)])
        }
        _ => None,
    }
}

/// Resolves `path` against `data`, returning a copy of the value found.
///
/// Composite values are returned as the same instance held by `data`.
pub fn resolve(data: &Value, path: &Value) -> Option<Value> {
    let segments = parse_path(path)?;
    resolve_segments(data, &segments).cloned()
}

/// Follows already parsed segments through `data`.
pub fn resolve_segments<'a>(data: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let mut current = data;
    for segment in segments {
        current = step(current, segment)?;
    }
    Some(current)
}

fn step<'a>(current: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match (current, segment) {
        (Value::Map(map), PathSegment::Key(key)) => map.get(key),
        (Value::List(items), PathSegment::Key(key)) => items.get(list_index(key)?),
        (Value::List(items), PathSegment::Index(index)) => items.get(*index),
        _ => None,
    }
}

fn list_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse().ok()
}
