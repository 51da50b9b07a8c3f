use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The map type backing [`Value::Map`].
pub type Map = BTreeMap<String, Value>;

/// A dynamic JSON value, as seen by rules and by the data they run against.
///
/// Numbers are always double precision floats, mirroring JavaScript.
///
/// # Reference semantics
///
/// Lists and maps are reference types. Every composite carries its own
/// allocation and two composites are [`strict_equal`] only when they are the
/// *same* allocation, never because their contents match:
///
/// ```
/// use jsonlogic::Value;
/// use jsonlogic::value::strict_equal;
///
/// let a = Value::list(vec![Value::from(1.0)]);
/// let b = Value::list(vec![Value::from(1.0)]);
///
/// assert!(strict_equal(&a, &a.clone()));
/// assert!(!strict_equal(&a, &b));
///
/// // `==` on the Rust side is deep, structural equality.
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null
    #[default]
    Null,

    /// JSON boolean (true/false)
    Bool(bool),

    /// Double precision number
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Ordered list of values, identified by its allocation
    List(Arc<Vec<Value>>),

    /// String keyed map, identified by its allocation
    Map(Arc<Map>),
}

impl Value {
    /// Allocates a new list instance.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    /// Allocates a new, empty list instance.
    ///
    /// Each call yields a distinct instance; there is no shared empty list.
    pub fn empty_list() -> Self {
        Value::list(Vec::new())
    }

    /// Allocates a new map instance.
    pub fn map(entries: Map) -> Self {
        Value::Map(Arc::new(entries))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "array",
            Value::Map(_) => "object",
        }
    }

    /// Check if the value is truthy.
    ///
    /// Follows the rule language's truthiness table: `0`, `""`, `[]`, `null`
    /// and `false` are falsy. Maps are always truthy, even when empty, and any
    /// non-zero number (NaN included) is truthy.
    pub fn is_truthy(&self) -> bool {
        is_truthy(self)
    }
}

/// Truthiness of a value. See [`Value::is_truthy`].
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::List(items) => !items.is_empty(),
        Value::Map(_) => true,
    }
}

/// Coerces a value to a number the way JavaScript's `Number(x)` does for
/// JSON shaped input.
///
/// Strings are trimmed before parsing and the empty string is `0`. Only
/// decimal notation is understood: hexadecimal, octal and binary string
/// literals coerce to `NaN` rather than to their JavaScript values.
pub fn to_number(v: &Value) -> f64 {
    match v {
        Value::Null => 0.0,
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Number(n) => *n,
        Value::String(s) => parse_number(s),
        Value::List(items) => match items.as_slice() {
            [] => 0.0,
            [only] => to_number(only),
            _ => f64::NAN,
        },
        Value::Map(_) => f64::NAN,
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust also accepts "inf", "infinity" and "nan" in any case, JavaScript does not
    let lower = trimmed.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Coerces a value to a string.
///
/// Numbers use the shortest decimal form that round-trips, without an
/// exponent; lists are the comma-joined renderings of their elements; maps
/// render as `[object Object]`.
pub fn to_string(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::List(items) => items.iter().map(to_string).collect::<Vec<_>>().join(","),
        Value::Map(_) => "[object Object]".to_string(),
    }
}

/// Formats a number with the minimum digits needed to round-trip it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // also covers -0
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Strict equality, the rule language's `===`.
///
/// Primitives compare by value within the same type; lists and maps compare
/// by identity. Values of different types are never equal.
pub fn strict_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
        (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Coercing equality, the rule language's `==`.
///
/// `null` only equals `null`. Two composites compare by identity. When only
/// one side is a composite it is rendered with [`to_string`] and compared
/// again. Primitives of different types are compared as numbers.
pub fn soft_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
        (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
        (Value::List(_), Value::Map(_)) | (Value::Map(_), Value::List(_)) => false,
        (Value::List(_) | Value::Map(_), _) => soft_equal(&Value::String(to_string(l)), r),
        (_, Value::List(_) | Value::Map(_)) => soft_equal(l, &Value::String(to_string(r))),
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        _ => to_number(l) == to_number(r),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Map> for Value {
    fn from(entries: Map) -> Self {
        Value::map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_rejects_rust_only_spellings() {
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("-infinity").is_nan());
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_number("  42 "), 42.0);
        assert_eq!(parse_number(".5"), 0.5);
    }

    #[test]
    fn negative_zero_formats_as_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(100.0), "100");
    }
}
