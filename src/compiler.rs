//! Clause to closure compilation.
//!
//! A [`Registry`] maps operator names to [`Builder`]s. Compiling a clause
//! looks up its operator and hands the arguments to the builder, which
//! compiles whatever nested clauses it needs (through [`build_arg`]) and
//! returns a [`CompiledOp`] closing over them. The AST is never walked again
//! at evaluation time.
//!
//! Builders run in two phases:
//!
//! - **compile time**: check the argument count, settle the degenerate cases
//!   (too few arguments usually means a constant result) and compile each
//!   argument into an "arg closure"
//! - **evaluation time**: the returned closure calls the arg closures against
//!   the live data and combines their results
//!
//! # Extending the registry
//!
//! ```
//! use jsonlogic::{Registry, CompiledOp, Value, build_arg, parse};
//!
//! let registry = Registry::standard().with("double", |args, ops| {
//!     let Some(first) = args.first() else {
//!         return Ok(CompiledOp::constant(Value::Null));
//!     };
//!     let arg = build_arg(first, ops)?;
//!     Ok(CompiledOp::new(move |data| {
//!         Value::from(jsonlogic::value::to_number(&arg.eval(data)) * 2.0)
//!     }))
//! });
//!
//! let rule = parse(br#"{"double": {"var": "n"}}"#).unwrap();
//! let program = registry.compile(&rule).unwrap();
//! let data: Value = serde_json::json!({"n": 21}).into();
//! assert_eq!(program.eval(&data), Value::from(42.0));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{Argument, Clause};
use crate::operators;
use crate::value::Value;

/// Errors that can occur while compiling a clause.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// The clause names an operator the registry does not know
    #[error("unrecognized operation `{0}`")]
    UnrecognizedOperation(String),

    /// A custom builder rejected its arguments
    #[error("{0}")]
    Custom(String),
}

/// A compiled clause: a pure function from data to result.
///
/// Cloning is cheap and shares the closure tree. A `CompiledOp` holds no
/// mutable state, so it can be evaluated from many threads at once.
#[derive(Clone)]
pub struct CompiledOp(Arc<dyn Fn(&Value) -> Value + Send + Sync>);

impl CompiledOp {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        CompiledOp(Arc::new(f))
    }

    /// Always evaluates to a clone of `value`.
    pub fn constant(value: Value) -> Self {
        CompiledOp::new(move |_| value.clone())
    }

    /// Evaluates to the data itself.
    pub fn identity() -> Self {
        CompiledOp::new(|data| data.clone())
    }

    /// Evaluates to a new empty list on every call.
    pub fn empty_list() -> Self {
        CompiledOp::new(|_| Value::empty_list())
    }

    /// Runs the compiled clause against `data`.
    pub fn eval(&self, data: &Value) -> Value {
        (self.0)(data)
    }
}

impl fmt::Debug for CompiledOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompiledOp(..)")
    }
}

/// Builds the compiled form of one operator from its arguments.
///
/// Implemented for every `Fn(&[Argument], &Registry) -> Result<CompiledOp,
/// CompileError>`, so plain functions and closures can be registered.
pub trait Builder: Send + Sync {
    fn build(&self, args: &[Argument], registry: &Registry) -> Result<CompiledOp, CompileError>;
}

impl<F> Builder for F
where
    F: Fn(&[Argument], &Registry) -> Result<CompiledOp, CompileError> + Send + Sync,
{
    fn build(&self, args: &[Argument], registry: &Registry) -> Result<CompiledOp, CompileError> {
        self(args, registry)
    }
}

/// Operator name to builder mapping.
///
/// A registry is filled first and read afterwards: [`Registry::register`]
/// needs `&mut self`, compilation borrows `&self`, so the borrow checker
/// keeps the two phases apart. To extend a registry that is already shared,
/// clone it (builders are reference counted) or use [`Registry::with`].
#[derive(Clone, Default)]
pub struct Registry {
    builders: HashMap<String, Arc<dyn Builder>>,
}

impl Registry {
    /// A registry with no operators at all, not even literals.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the standard operator library.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        operators::register_standard(&mut registry);
        registry
    }

    /// Adds or replaces an operator built by a function or closure.
    pub fn register<F>(&mut self, name: impl Into<String>, build: F) -> &mut Self
    where
        F: Fn(&[Argument], &Registry) -> Result<CompiledOp, CompileError> + Send + Sync + 'static,
    {
        self.register_builder(name, build)
    }

    /// Adds or replaces an operator.
    pub fn register_builder<B>(&mut self, name: impl Into<String>, builder: B) -> &mut Self
    where
        B: Builder + 'static,
    {
        let name = name.into();
        if self.builders.insert(name.clone(), Arc::new(builder)).is_some() {
            debug!(operator = %name, "replaced operator");
        } else {
            trace!(operator = %name, "registered operator");
        }
        self
    }

    /// Copy-on-extend: returns this registry plus one operator.
    pub fn with<F>(mut self, name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&[Argument], &Registry) -> Result<CompiledOp, CompileError> + Send + Sync + 'static,
    {
        self.register(name, build);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Registered operator names, sorted.
    pub fn operators(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Compiles a clause against this registry.
    pub fn compile(&self, clause: &Clause) -> Result<CompiledOp, CompileError> {
        let name = clause.operator.as_str();
        let Some(builder) = self.builders.get(name) else {
            debug!(operator = %name, "unrecognized operation");
            return Err(CompileError::UnrecognizedOperation(name.to_string()));
        };
        trace!(operator = %name, args = clause.arguments.len(), "compiling");
        builder.build(&clause.arguments, self)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("operators", &self.operators())
            .finish()
    }
}

/// Compiles one argument into an arg closure.
///
/// Literals become constants; nested clauses are compiled against `registry`.
/// Builders call this once per argument at compile time and invoke the
/// result at evaluation time.
pub fn build_arg(arg: &Argument, registry: &Registry) -> Result<CompiledOp, CompileError> {
    match arg {
        Argument::Literal(value) => Ok(CompiledOp::constant(value.clone())),
        Argument::Clause(clause) => registry.compile(clause),
    }
}

/// Compiles every argument, in order.
pub fn build_args(args: &[Argument], registry: &Registry) -> Result<Vec<CompiledOp>, CompileError> {
    args.iter().map(|arg| build_arg(arg, registry)).collect()
}

static STANDARD: LazyLock<Registry> = LazyLock::new(Registry::standard);

/// The process-wide standard registry.
pub fn standard_registry() -> &'static Registry {
    &STANDARD
}

/// Compiles a clause against the standard registry.
pub fn compile(clause: &Clause) -> Result<CompiledOp, CompileError> {
    STANDARD.compile(clause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_rejects_literals() {
        let clause = Clause::literal(Value::Bool(true));
        let err = Registry::empty().compile(&clause).unwrap_err();
        assert_eq!(err, CompileError::UnrecognizedOperation(String::new()));
    }

    #[test]
    fn register_replaces_existing_builder() {
        let mut registry = Registry::standard();
        registry.register("+", |_, _| {
            Ok(CompiledOp::constant(Value::from("replaced")))
        });
        let program = registry
            .compile(&Clause::new("+", vec![Argument::from(Value::from(1.0))]))
            .unwrap();
        assert_eq!(program.eval(&Value::Null), Value::from("replaced"));
    }
}
