use crate::ast::Clause;
use crate::value::Value;

/// One operand of a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A nested clause, evaluated against the data
    ///
    /// # Example
    /// ```text
    /// {"var": "a"}
    /// ```
    Clause(Clause),

    /// A literal value, returned as-is
    ///
    /// # Example
    /// ```text
    /// 42
    /// "apple"
    /// ["a", "b"]
    /// ```
    Literal(Value),
}

/// Ordered operands of a clause.
pub type Arguments = Vec<Argument>;

impl Argument {
    pub fn as_clause(&self) -> Option<&Clause> {
        match self {
            Argument::Clause(c) => Some(c),
            Argument::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Argument::Literal(v) => Some(v),
            Argument::Clause(_) => None,
        }
    }
}

impl From<Clause> for Argument {
    /// Degenerate literal clauses collapse into plain literals.
    fn from(clause: Clause) -> Self {
        match clause.into_literal() {
            Ok(value) => Argument::Literal(value),
            Err(clause) => Argument::Clause(clause),
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Literal(value)
    }
}
