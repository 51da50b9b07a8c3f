use crate::ast::{Argument, Arguments, Operator};
use crate::value::Value;

/// A parsed rule node: an operator applied to an ordered argument list.
///
/// Clauses are immutable once parsed and can be compiled any number of times.
///
/// # Examples
///
/// ```
/// use jsonlogic::{Argument, Clause, Value};
///
/// let clause = Clause::new("var", vec![Argument::from(Value::from("a"))]);
/// assert_eq!(clause.operator.as_str(), "var");
///
/// let literal = Clause::literal(Value::from(42.0));
/// assert!(literal.is_literal());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub operator: Operator,
    pub arguments: Arguments,
}

impl Clause {
    pub fn new(operator: impl Into<Operator>, arguments: Arguments) -> Self {
        Clause {
            operator: operator.into(),
            arguments,
        }
    }

    /// A degenerate clause wrapping a single literal.
    pub fn literal(value: Value) -> Self {
        Clause {
            operator: Operator::literal(),
            arguments: vec![Argument::Literal(value)],
        }
    }

    /// A degenerate clause whose arguments evaluate into a fresh list.
    pub fn naked(arguments: Arguments) -> Self {
        Clause {
            operator: Operator::literal(),
            arguments,
        }
    }

    /// True for a degenerate clause carrying exactly one literal.
    pub fn is_literal(&self) -> bool {
        self.operator.is_literal()
            && matches!(self.arguments.as_slice(), [Argument::Literal(_)])
    }

    /// True for a degenerate clause that is a naked argument list.
    pub fn is_naked(&self) -> bool {
        self.operator.is_literal() && !self.is_literal()
    }

    /// Takes the literal out of a literal clause, or hands the clause back.
    pub fn into_literal(mut self) -> Result<Value, Clause> {
        if self.is_literal() {
            if let Some(Argument::Literal(value)) = self.arguments.pop() {
                return Ok(value);
            }
        }
        Err(self)
    }
}
