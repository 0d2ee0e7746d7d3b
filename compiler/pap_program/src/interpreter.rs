//! The program interpreter.
//!
//! Extends expression evaluation with program nodes (blocks, conditionals,
//! method declarations) and with calls of declared methods. Expressions are
//! still evaluated by [`pap_eval::exec`]; this interpreter plugs in through
//! the [`Evaluator`] seam, so a method call inside an expression comes back
//! here through [`Evaluator::call_method`].

use pap_eval::errors::{self, EvalResult};
use pap_eval::{
    exec, ArithmeticContext, Evaluator, Function, MethodRef, Scope, Trace, TraceSlot, Tracer, Value,
};
use pap_ir::Expr;
use pap_stack::{ensure_sufficient_stack, CallDepth};
use tracing::trace;

use crate::node::{Block, Conditional, MethodDecl, Node, NodeRef};
use crate::program::EvalOptions;

/// Interpreter for program nodes borrowed for `'a`, over a scope borrowed
/// for `'s`.
pub struct ProgramInterpreter<'a, 's> {
    scope: &'s mut Scope,
    context: ArithmeticContext,
    /// Declared methods; a method's id is its index here.
    methods: Vec<&'a MethodDecl>,
    calls: CallDepth,
    tracer: Option<Tracer<NodeRef<'a>>>,
}

impl<'a, 's> ProgramInterpreter<'a, 's> {
    pub fn new(scope: &'s mut Scope, options: &EvalOptions) -> Self {
        ProgramInterpreter {
            scope,
            context: options.context,
            methods: Vec::new(),
            calls: CallDepth::new(options.max_call_depth),
            tracer: None,
        }
    }

    /// Record a trace item for every non-literal node evaluated from now on.
    #[must_use]
    pub fn traced(mut self) -> Self {
        self.tracer = Some(Tracer::new());
        self
    }

    pub fn eval_node(&mut self, node: &'a Node) -> EvalResult {
        match node {
            Node::Expr(expr) => self.eval(expr),
            Node::Block(block) => self.eval_block(block),
            Node::Conditional(conditional) => {
                self.record(NodeRef::Conditional(conditional), None, |this| {
                    this.run_conditional(conditional)
                })
            }
            Node::Method(method) => {
                self.record(NodeRef::Method(method), None, |this| this.declare_method(method))
            }
        }
    }

    /// Run the statements of `block` in order. The value is that of the last
    /// statement, void for an empty block.
    pub fn eval_block(&mut self, block: &'a Block) -> EvalResult {
        self.record(NodeRef::Block(block), None, |this| {
            let mut last = Value::Void;
            for item in block.items() {
                last = this.eval_node(item).map_err(|err| err.in_block(block))?;
            }
            Ok(last)
        })
    }

    /// The trace recorded so far, if tracing.
    pub fn finish(self) -> Option<Trace<NodeRef<'a>>> {
        self.tracer.map(Tracer::finish)
    }

    fn run_conditional(&mut self, conditional: &'a Conditional) -> EvalResult {
        let condition = conditional.condition();
        let value = self.record(NodeRef::Expr(condition), Some(TraceSlot::Condition), |this| {
            exec::eval_expr(this, condition)
        })?;
        match value {
            Value::Bool(true) => self.eval_block(conditional.then_branch()),
            Value::Bool(false) => match conditional.else_branch() {
                Some(otherwise) => self.eval_block(otherwise),
                None => Ok(Value::Void),
            },
            other => {
                Err(errors::type_mismatch(condition, "boolean", &other).with_scope(&*self.scope))
            }
        }
    }

    /// Register `method` as a callable under its name.
    fn declare_method(&mut self, method: &'a MethodDecl) -> EvalResult {
        if self.scope.contains(method.name()) {
            return Err(errors::duplicate_name(method.name()).with_scope(&*self.scope));
        }
        let id = self.methods.len();
        let function = Value::Function(Function::Method(MethodRef::new(method.name(), id)));
        self.methods.push(method);
        self.scope.set(method.name(), function.clone());
        Ok(function)
    }

    /// Evaluate `f` as the evaluation of `node`, recording it when tracing.
    fn record(
        &mut self,
        node: NodeRef<'a>,
        slot: Option<TraceSlot>,
        f: impl FnOnce(&mut Self) -> EvalResult,
    ) -> EvalResult {
        if let Some(tracer) = &mut self.tracer {
            tracer.enter_slot(node, slot);
        }
        let result = ensure_sufficient_stack(|| f(self));
        if let Some(tracer) = &mut self.tracer {
            tracer.exit(&result)?;
        }
        result
    }
}

impl<'a> Evaluator<'a> for ProgramInterpreter<'a, '_> {
    fn eval(&mut self, expr: &'a Expr) -> EvalResult {
        if expr.is_literal() {
            return exec::eval_expr(self, expr);
        }
        self.record(NodeRef::Expr(expr), None, |this| exec::eval_expr(this, expr))
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

    /// Run the method's body against the shared scope. A completed method
    /// call evaluates to `true`.
    fn call_method(&mut self, method: &MethodRef) -> EvalResult {
        let Some(&declared) = self.methods.get(method.id()) else {
            return Err(errors::internal(format!("method {} is not declared", method.name())));
        };
        self.calls.enter(declared.name())?;
        trace!(method = declared.name(), depth = self.calls.depth(), "calling method");
        let result = self.eval_block(declared.body());
        self.calls.leave();
        result.map(|_| Value::Bool(true))
    }
}

#[cfg(test)]
mod tests;
