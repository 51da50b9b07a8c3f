//! # Rule Abstract Syntax Tree
//!
//! A rule is a JSON document. Parsing turns it into a tree of [`Clause`]s,
//! which the [compiler](crate::compiler) later turns into closures.
//!
//! ## Architecture Overview
//!
//! - **[operator]** - Operator names, including the reserved empty name
//! - **[argument]** - Operands: nested clauses or literal values
//! - **[clause]** - The tree node tying an operator to its arguments
//!
//! ## Shapes
//!
//! ```text
//! {"<op>": [arg, arg, ...]}   operator application
//! {"<op>": arg}               same, single argument sugar
//! 42, "s", true, {}, [1, 2]   literal (empty operator)
//! [1, {"var": "a"}]           naked argument list (empty operator)
//! ```
//!
//! A clause with the empty operator is *degenerate*: it either carries one
//! literal argument and evaluates to it, or it is a naked argument list whose
//! arguments are evaluated into a fresh list. The second form lets rules nest
//! clauses inside array literals, e.g. `{"in": [{"var": "x"}, [1, {"var": "y"}]]}`.
pub mod argument;
pub mod clause;
pub mod operator;

pub use argument::{Argument, Arguments};
pub use clause::Clause;
pub use operator::Operator;
