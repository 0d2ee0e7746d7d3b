//! PAP Eval - tree-walking interpreter for PAP expressions.
//!
//! # Architecture
//!
//! - [`value`]: runtime values; decimals are exact ([`bigdecimal`])
//! - [`scope`]: the flat variable namespace of one run
//! - [`exec`]: evaluation rules per node kind
//! - [`interpreter`]: the [`Evaluator`] seam, the plain interpreter and the
//!   tracing interpreter
//! - [`trace`]: evaluation trace trees
//! - [`decimal`]: arithmetic context and decimal formatting
//!
//! ```text
//! let expr = pap_parse::parse("x = a + b - 2")?;
//! let mut scope: Scope = [("a", Value::decimal(3)), ("b", Value::decimal(6))].into_iter().collect();
//! let (result, trace) = evaluate_traced(&expr, &mut scope);
//! ```

pub mod decimal;
pub mod errors;
pub mod exec;
pub mod interpreter;
pub mod scope;
pub mod trace;
pub mod value;

pub use decimal::ArithmeticContext;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{evaluate, evaluate_traced, Evaluator, Interpreter, TracingInterpreter};
pub use scope::{Scope, ScopeSnapshot};
pub use trace::{Trace, TraceItem, TraceSlot, Tracer};
pub use value::{Function, MethodRef, NativeFn, Object, Record, Value};

#[cfg(test)]
mod tests;
