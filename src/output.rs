//! JSON output for rules and values.
//!
//! This module provides serialization with support for both compact and
//! pretty-printed output formats. All output is deterministic (map keys are
//! sorted) and follows standard JSON formatting rules.
//!
//! # Features
//!
//! - **Rule rendering** via [`render()`] - the inverse of [`parse`](crate::parse)
//! - **Compact output** via [`to_json()`] - minimal whitespace
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation
//! - **Number formatting** - shortest round-trip digits, `NaN`/`Infinity` as `null`
//!
//! # Examples
//!
//! ```
//! use jsonlogic::{parse, render};
//!
//! // Sugared single arguments are rendered as arrays
//! let clause = parse(br#"{"var": "a"}"#).unwrap();
//! assert_eq!(render(&clause), br#"{"var":["a"]}"#);
//!
//! // Literals render bare
//! let clause = parse(b"true").unwrap();
//! assert_eq!(render(&clause), b"true");
//! ```

use crate::ast::{Argument, Clause};
use crate::convert::value_to_json;
use crate::value::{Value, format_number};

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    /// Prints a clause in rule form.
    pub fn print_clause(&self, clause: &Clause) -> String {
        self.print_clause_at(clause, 0)
    }

    fn print_clause_at(&self, clause: &Clause, indent: usize) -> String {
        if clause.operator.is_literal() {
            return match clause.arguments.as_slice() {
                [Argument::Literal(value)] => self.print_value(value, indent),
                arguments => self.print_arguments(arguments, indent),
            };
        }

        let args = self.print_arguments(&clause.arguments, indent + 1);
        let key = self.escape_string(clause.operator.as_str());
        if self.pretty {
            format!(
                "{{\n{}\"{}\": {}\n{}}}",
                self.indent(indent + 1),
                key,
                args,
                self.indent(indent)
            )
        } else {
            format!("{{\"{}\":{}}}", key, args)
        }
    }

    fn print_arguments(&self, arguments: &[Argument], indent: usize) -> String {
        let items: Vec<String> = arguments
            .iter()
            .map(|arg| match arg {
                Argument::Clause(clause) => self.print_clause_at(clause, indent + 1),
                Argument::Literal(value) => self.print_value(value, indent + 1),
            })
            .collect();
        self.wrap_array(items, indent)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) if n.is_finite() => format_number(*n),
            // JSON has no NaN or Infinity
            Value::Number(_) => "null".to_string(),
            Value::String(s) => format!("\"{}\"", self.escape_string(s)),
            Value::List(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|v| self.print_value(v, indent + 1))
                    .collect();
                self.wrap_array(items, indent)
            }
            Value::Map(map) => {
                if map.is_empty() {
                    return "{}".to_string();
                }
                let separator = if self.pretty { ": " } else { ":" };
                let items: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "\"{}\"{}{}",
                            self.escape_string(k),
                            separator,
                            self.print_value(v, indent + 1)
                        )
                    })
                    .collect();
                self.wrap(items, indent, '{', '}')
            }
        }
    }

    fn wrap_array(&self, items: Vec<String>, indent: usize) -> String {
        self.wrap(items, indent, '[', ']')
    }

    fn wrap(&self, items: Vec<String>, indent: usize, open: char, close: char) -> String {
        if items.is_empty() {
            return format!("{}{}", open, close);
        }

        if self.pretty {
            let mut result = format!("{}\n", open);
            let items: Vec<String> = items
                .into_iter()
                .map(|item| format!("{}{}", self.indent(indent + 1), item))
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push(close);
            result
        } else {
            format!("{}{}{}", open, items.join(","), close)
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c if c.is_control() => {
                    // Unicode escape for control chars
                    format!("\\u{:04x}", c as u32).chars().collect()
                }
                c => vec![c],
            })
            .collect()
    }
}

/// Renders a clause back to rule JSON.
///
/// Operator arguments are always rendered as an array, literal clauses as
/// their bare value and naked argument lists as a bare array.
pub fn render(clause: &Clause) -> Vec<u8> {
    JsonPrinter::new(false).print_clause(clause).into_bytes()
}

/// Renders a clause back to indented rule JSON.
pub fn render_pretty(clause: &Clause) -> Vec<u8> {
    JsonPrinter::new(true).print_clause(clause).into_bytes()
}

/// Converts a Value to compact JSON.
///
/// ```
/// use jsonlogic::Value;
/// use jsonlogic::output::to_json;
///
/// assert_eq!(to_json(&Value::from(42.0)), "42");
/// assert_eq!(to_json(&Value::from(f64::NAN)), "null");
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed JSON with 2-space indentation.
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}

/// Converts a clause to its rule form as a `serde_json::Value`.
pub fn clause_to_json(clause: &Clause) -> serde_json::Value {
    let arguments = |args: &[Argument]| {
        serde_json::Value::Array(
            args.iter()
                .map(|arg| match arg {
                    Argument::Clause(c) => clause_to_json(c),
                    Argument::Literal(v) => value_to_json(v),
                })
                .collect(),
        )
    };

    if clause.operator.is_literal() {
        return match clause.arguments.as_slice() {
            [Argument::Literal(value)] => value_to_json(value),
            args => arguments(args),
        };
    }

    let mut obj = serde_json::Map::new();
    obj.insert(clause.operator.name.clone(), arguments(&clause.arguments));
    serde_json::Value::Object(obj)
}

impl From<&Clause> for serde_json::Value {
    fn from(clause: &Clause) -> Self {
        clause_to_json(clause)
    }
}
