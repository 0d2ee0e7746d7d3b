//! Evaluation rules, one function per node kind.
//!
//! Every rule evaluates its sub-expressions through [`Evaluator::eval`] so
//! that wrapping evaluators observe them.

mod operators;

use std::cell::RefCell;
use std::rc::Rc;

use pap_ir::{Call, Construct, Expr, Index, NameRef};

use crate::decimal;
use crate::errors::{self, EvalError, EvalResult};
use crate::interpreter::Evaluator;
use crate::value::{Function, Object, Value};

/// Evaluate one node of the tree.
pub fn eval_expr<'a, E>(ev: &mut E, expr: &'a Expr) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    match expr {
        Expr::Number(number) => decimal::parse_decimal(number.text()).map(Value::Decimal),
        Expr::Bool(value) => Ok(Value::Bool(*value)),
        Expr::Name(name) => eval_name(ev, name, expr),
        Expr::List(items) => items
            .iter()
            .map(|item| ev.eval(item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list),
        Expr::Index(index) => eval_index(ev, index),
        Expr::Call(call) => eval_call(ev, call, expr),
        Expr::Construct(construct) => eval_construct(ev, construct, expr),
        Expr::Binary(binary) => operators::eval_binary(ev, binary, expr),
    }
}

/// Look `name` up in the scope, or in the object its target evaluates to.
fn eval_name<'a, E>(ev: &mut E, name: &'a NameRef, expr: &'a Expr) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    let found = match name.target() {
        None => ev.scope().get(name.name()).cloned(),
        Some(target) => eval_object(ev, target)?.get(name.name()),
    };
    match found {
        Some(value) if !value.is_void() => Ok(value),
        _ => Err(errors::undefined(expr).with_scope(ev.scope())),
    }
}

fn eval_object<'a, E>(ev: &mut E, target: &'a Expr) -> Result<Rc<dyn Object>, EvalError>
where
    E: Evaluator<'a> + ?Sized,
{
    match ev.eval(target)? {
        Value::Object(object) => Ok(object),
        other => Err(errors::not_an_object(target, &other).with_scope(ev.scope())),
    }
}

fn eval_index<'a, E>(ev: &mut E, index: &'a Index) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    let (items, position) = eval_list_position(ev, index)?;
    let value = items.borrow()[position].clone();
    Ok(value)
}

/// Evaluate target and key of an index access and check that they denote an
/// existing list element.
fn eval_list_position<'a, E>(
    ev: &mut E,
    index: &'a Index,
) -> Result<(Rc<RefCell<Vec<Value>>>, usize), EvalError>
where
    E: Evaluator<'a> + ?Sized,
{
    let target = ev.eval(index.target())?;
    let key = ev.eval(index.key())?;
    let items = match target {
        Value::List(items) => items,
        other => return Err(errors::not_a_list(index.target(), &other).with_scope(ev.scope())),
    };
    let Some(position) = key.as_decimal().and_then(decimal::to_index) else {
        return Err(errors::invalid_index(index.key(), &key).with_scope(ev.scope()));
    };
    let len = items.borrow().len();
    if position >= len {
        return Err(errors::index_out_of_bounds(index.key(), position, len).with_scope(ev.scope()));
    }
    Ok((items, position))
}

/// `new T` yields the `construct` member of `T`.
fn eval_construct<'a, E>(ev: &mut E, construct: &'a Construct, expr: &'a Expr) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    let type_value = ev.eval(construct.type_ref())?;
    if let Value::Object(object) = &type_value {
        if let Some(constructor @ Value::Function(_)) = object.get("construct") {
            return Ok(constructor);
        }
    }
    Err(errors::not_constructible(expr, &type_value).with_scope(ev.scope()))
}

fn eval_call<'a, E>(ev: &mut E, call: &'a Call, expr: &'a Expr) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    let callee = ev.eval(call.callee())?;
    let function = match callee {
        Value::Function(function) => function,
        other => return Err(errors::not_callable(call.callee(), &other).with_scope(ev.scope())),
    };
    let args = call
        .args()
        .iter()
        .map(|arg| ev.eval(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let result = match &function {
        Function::Native(native) => native.call(&args),
        Function::Method(method) if args.is_empty() => ev.call_method(method),
        Function::Method(method) => Err(errors::wrong_arg_count(method.name(), "0", args.len())),
    };
    match result {
        Ok(value) if value.is_void() => Err(errors::no_value(expr).with_scope(ev.scope())),
        Ok(value) => Ok(value),
        Err(err) => Err(err.with_scope(ev.scope()).at_call(expr)),
    }
}

/// `left = right`: the value is computed first, then stored into the name or
/// list element denoted by `left`.
fn eval_assign<'a, E>(ev: &mut E, left: &'a Expr, right: &'a Expr) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    let value = ev.eval(right)?;
    if value.is_void() {
        return Err(errors::no_value(right).with_scope(ev.scope()));
    }
    match left {
        Expr::Name(name) => match name.target() {
            None => ev.scope_mut().set(name.name(), value.clone()),
            Some(target) => eval_object(ev, target)?
                .set(name.name(), value.clone())
                .map_err(|err| err.with_scope(ev.scope()))?,
        },
        Expr::Index(index) => {
            let (items, position) = eval_list_position(ev, index)?;
            items.borrow_mut()[position] = value.clone();
        }
        // Rejected when the node was built.
        _ => return Err(errors::internal(format!("`{left}` is not assignable"))),
    }
    Ok(value)
}
