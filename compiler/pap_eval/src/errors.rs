//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured category, `EvalError` adds the rendered
//! message, the offending expression and a snapshot of the scope at the point
//! of failure. Factory functions below are the way errors get created; they
//! fill in both kind and message.
//!
//! As an error unwinds, enclosing operators and call sites prefix the message
//! with their own context, so the final message reads outside-in:
//!
//! ```text
//! + operation a+f(b) failed: f(b): `b` is undefined
//! ```

use std::fmt;

use pap_ir::{BinaryOp, Expr};
use pap_stack::DepthExceeded;
use thiserror::Error;

use crate::scope::{Scope, ScopeSnapshot};
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,

    #[error("`{text}` is not a valid decimal")]
    InvalidDecimal { text: String },

    // Type
    #[error("{expected} value required but `{expr}` returned {got}")]
    TypeMismatch {
        expr: String,
        expected: String,
        got: String,
    },

    // Access
    #[error("`{expr}` is undefined")]
    Undefined { expr: String },

    #[error("`{expr}` is not an object but {got}")]
    NotAnObject { expr: String, got: String },

    #[error("`{expr}` is not a list but {got}")]
    NotAList { expr: String, got: String },

    #[error("index `{expr}` must be a non-negative integer but is {got}")]
    InvalidIndex { expr: String, got: String },

    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot assign `{name}` on {type_name}")]
    NotAssignable { name: String, type_name: String },

    #[error("`{name}` is already defined")]
    DuplicateName { name: String },

    // Calls
    #[error("`{expr}` is not callable but {got}")]
    NotCallable { expr: String, got: String },

    #[error("`{expr}` cannot be constructed from {got}")]
    NotConstructible { expr: String, got: String },

    #[error("`{expr}` returned no value")]
    NoValue { expr: String },

    #[error("{name} expects {expected} argument(s) but received {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("{name} expects {expected} as argument {position} but received {got}")]
    InvalidArgument {
        name: String,
        position: usize,
        expected: String,
        got: String,
    },

    #[error("{0}")]
    RecursionLimit(#[from] DepthExceeded),

    #[error("internal evaluator error: {message}")]
    Internal { message: String },

    #[error("{message}")]
    Custom { message: String },
}

/// Evaluation error.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured category.
    pub kind: EvalErrorKind,
    /// Message including the context added while unwinding.
    pub message: String,
    /// Innermost expression the failure is attributed to.
    pub expression: Option<Expr>,
    /// Scope contents when the failure happened.
    pub scope: Option<ScopeSnapshot>,
    block_annotated: bool,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom { message })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            expression: None,
            scope: None,
            block_annotated: false,
        }
    }

    fn at(mut self, expr: &Expr) -> Self {
        self.expression = Some(expr.clone());
        self
    }

    /// Attach a snapshot of `scope` unless an inner frame already did.
    #[must_use]
    pub fn with_scope(mut self, scope: &Scope) -> Self {
        if self.scope.is_none() {
            self.scope = Some(scope.snapshot());
        }
        self
    }

    /// Prefix with the failing binary operation.
    #[must_use]
    pub fn in_operation(mut self, op: BinaryOp, expr: &Expr) -> Self {
        self.message = format!("{} operation {expr} failed: {}", op.as_symbol(), self.message);
        self.fill_expression(expr)
    }

    /// Prefix with the call site the failure propagated through.
    #[must_use]
    pub fn at_call(mut self, expr: &Expr) -> Self {
        self.message = format!("{expr}: {}", self.message);
        self.fill_expression(expr)
    }

    /// Append the text of the enclosing block; only the innermost block is
    /// recorded.
    #[must_use]
    pub fn in_block(mut self, block: &dyn fmt::Display) -> Self {
        if !self.block_annotated {
            self.block_annotated = true;
            self.message = format!("{}\n\nin block:\n{block}", self.message);
        }
        self
    }

    fn fill_expression(mut self, expr: &Expr) -> Self {
        if self.expression.is_none() {
            self.expression = Some(expr.clone());
        }
        self
    }
}

impl From<DepthExceeded> for EvalError {
    fn from(err: DepthExceeded) -> Self {
        EvalError::from_kind(err.into())
    }
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn invalid_decimal(text: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidDecimal {
        text: text.to_owned(),
    })
}

// Type

#[cold]
pub fn type_mismatch(expr: &Expr, expected: &str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expr: expr.to_string(),
        expected: expected.to_owned(),
        got: got.describe(),
    })
    .at(expr)
}

// Access

#[cold]
pub fn undefined(expr: &Expr) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Undefined {
        expr: expr.to_string(),
    })
    .at(expr)
}

#[cold]
pub fn not_an_object(expr: &Expr, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnObject {
        expr: expr.to_string(),
        got: got.describe(),
    })
    .at(expr)
}

#[cold]
pub fn not_a_list(expr: &Expr, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAList {
        expr: expr.to_string(),
        got: got.describe(),
    })
    .at(expr)
}

#[cold]
pub fn invalid_index(expr: &Expr, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndex {
        expr: expr.to_string(),
        got: got.describe(),
    })
    .at(expr)
}

#[cold]
pub fn index_out_of_bounds(expr: &Expr, index: usize, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len }).at(expr)
}

#[cold]
pub fn not_assignable(name: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAssignable {
        name: name.to_owned(),
        type_name: type_name.to_owned(),
    })
}

#[cold]
pub fn duplicate_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateName {
        name: name.to_owned(),
    })
}

// Calls

#[cold]
pub fn not_callable(expr: &Expr, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        expr: expr.to_string(),
        got: got.describe(),
    })
    .at(expr)
}

#[cold]
pub fn not_constructible(expr: &Expr, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotConstructible {
        expr: expr.to_string(),
        got: got.describe(),
    })
    .at(expr)
}

#[cold]
pub fn no_value(expr: &Expr) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoValue {
        expr: expr.to_string(),
    })
    .at(expr)
}

/// `expected` reads naturally after "expects", e.g. `"1"` or `"1 or 3"`.
#[cold]
pub fn wrong_arg_count(name: &str, expected: &str, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected: expected.to_owned(),
        got,
    })
}

/// `position` counts from 1.
#[cold]
pub fn wrong_arg_type(name: &str, position: usize, expected: &str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        name: name.to_owned(),
        position,
        expected: expected.to_owned(),
        got: got.describe(),
    })
}

#[cold]
pub fn internal(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Internal {
        message: message.into(),
    })
}
