use std::fmt;

/// Name of an operator, e.g. `"=="` or `"var"`.
///
/// The empty name is reserved for degenerate clauses (literals and naked
/// argument lists); it is never dispatched by name lookup from rule text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Operator {
    pub name: String,
}

impl Operator {
    pub fn new(name: impl Into<String>) -> Self {
        Operator { name: name.into() }
    }

    /// The reserved empty operator.
    pub fn literal() -> Self {
        Operator::default()
    }

    pub fn is_literal(&self) -> bool {
        self.name.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Operator {
    fn from(name: &str) -> Self {
        Operator::new(name)
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Operator::new(name)
    }
}
