//! Evaluators.
//!
//! [`Evaluator`] is the seam between the evaluation rules in [`crate::exec`]
//! and whoever drives them. The rules recurse through [`Evaluator::eval`], so
//! an evaluator that wraps that method sees every sub-evaluation. That is
//! how [`TracingInterpreter`] records traces and how the program layer adds
//! its own node kinds and method calls.

use pap_ir::Expr;
use pap_stack::ensure_sufficient_stack;

use crate::decimal::ArithmeticContext;
use crate::errors::{self, EvalResult};
use crate::exec;
use crate::scope::Scope;
use crate::trace::{Trace, Tracer};
use crate::value::MethodRef;

/// Drives evaluation of expressions borrowed for `'a`.
pub trait Evaluator<'a> {
    /// Evaluate `expr`. Implementations delegate to [`exec::eval_expr`],
    /// optionally doing work around it.
    fn eval(&mut self, expr: &'a Expr) -> EvalResult;

    fn scope(&self) -> &Scope;

    fn scope_mut(&mut self) -> &mut Scope;

    fn context(&self) -> ArithmeticContext;

    /// Invoke a method declared by the program.
    fn call_method(&mut self, method: &MethodRef) -> EvalResult {
        Err(errors::internal(format!(
            "method {} cannot be called outside a program",
            method.name()
        )))
    }
}

/// Plain tree-walking interpreter over a borrowed scope.
pub struct Interpreter<'s> {
    scope: &'s mut Scope,
    context: ArithmeticContext,
}

impl<'s> Interpreter<'s> {
    pub fn new(scope: &'s mut Scope) -> Self {
        Self::with_context(scope, ArithmeticContext::default())
    }

    pub fn with_context(scope: &'s mut Scope, context: ArithmeticContext) -> Self {
        Interpreter { scope, context }
    }
}

impl<'a> Evaluator<'a> for Interpreter<'_> {
    fn eval(&mut self, expr: &'a Expr) -> EvalResult {
        ensure_sufficient_stack(|| exec::eval_expr(self, expr))
    }

    fn scope(&self) -> &Scope {
        &*self.scope
    }

    fn scope_mut(&mut self) -> &mut Scope {
        &mut *self.scope
    }

    fn context(&self) -> ArithmeticContext {
        self.context
    }
}

/// Interpreter that records a trace item for every non-literal node.
///
/// Values and errors are exactly those of [`Interpreter`].
pub struct TracingInterpreter<'a, 's> {
    inner: Interpreter<'s>,
    tracer: Tracer<&'a Expr>,
}

impl<'a, 's> TracingInterpreter<'a, 's> {
    pub fn new(inner: Interpreter<'s>) -> Self {
        TracingInterpreter {
            inner,
            tracer: Tracer::new(),
        }
    }

    pub fn finish(self) -> Trace<&'a Expr> {
        self.tracer.finish()
    }
}

impl<'a> Evaluator<'a> for TracingInterpreter<'a, '_> {
    fn eval(&mut self, expr: &'a Expr) -> EvalResult {
        if expr.is_literal() {
            return exec::eval_expr(self, expr);
        }
        self.tracer.enter(expr);
        let result = ensure_sufficient_stack(|| exec::eval_expr(self, expr));
        self.tracer.exit(&result)?;
        result
    }

    fn scope(&self) -> &Scope {
        &*self.inner.scope
    }

    fn scope_mut(&mut self) -> &mut Scope {
        &mut *self.inner.scope
    }

    fn context(&self) -> ArithmeticContext {
        self.inner.context
    }
}

/// Evaluate `expr` against `scope`.
pub fn evaluate(expr: &Expr, scope: &mut Scope) -> EvalResult {
    Interpreter::new(scope).eval(expr)
}

/// Evaluate `expr` against `scope`, recording a trace. The trace is returned
/// whether or not evaluation succeeded.
pub fn evaluate_traced<'a>(expr: &'a Expr, scope: &mut Scope) -> (EvalResult, Trace<&'a Expr>) {
    let mut interpreter = TracingInterpreter::new(Interpreter::new(scope));
    let result = interpreter.eval(expr);
    (result, interpreter.finish())
}
