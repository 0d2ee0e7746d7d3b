//! Binary operator evaluation.
//!
//! Both operands are always evaluated, left first: `&&` and `||` do not
//! short-circuit, so a failing right operand fails the whole expression even
//! when the left one already decides the result.

use bigdecimal::BigDecimal;
use pap_ir::{Binary, BinaryOp, Expr};

use crate::decimal::ArithmeticContext;
use crate::errors::{self, EvalError, EvalResult};
use crate::interpreter::Evaluator;
use crate::value::Value;

use super::eval_assign;

pub(super) fn eval_binary<'a, E>(ev: &mut E, binary: &'a Binary, expr: &'a Expr) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    let op = binary.op();
    if op == BinaryOp::Assign {
        return eval_assign(ev, binary.left(), binary.right());
    }
    apply(ev, binary).map_err(|err| err.with_scope(ev.scope()).in_operation(op, expr))
}

fn apply<'a, E>(ev: &mut E, binary: &'a Binary) -> EvalResult
where
    E: Evaluator<'a> + ?Sized,
{
    let left = ev.eval(binary.left())?;
    let right = ev.eval(binary.right())?;
    match binary.op() {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Or => {
            let (l, r) = (require_bool(binary.left(), &left)?, require_bool(binary.right(), &right)?);
            Ok(Value::Bool(l || r))
        }
        BinaryOp::And => {
            let (l, r) = (require_bool(binary.left(), &left)?, require_bool(binary.right(), &right)?);
            Ok(Value::Bool(l && r))
        }
        op => {
            let l = require_decimal(binary.left(), &left)?;
            let r = require_decimal(binary.right(), &right)?;
            eval_decimal_op(op, l, r, ev.context())
        }
    }
}

/// Arithmetic and ordering on two decimals.
fn eval_decimal_op(
    op: BinaryOp,
    left: &BigDecimal,
    right: &BigDecimal,
    context: ArithmeticContext,
) -> EvalResult {
    Ok(match op {
        // Arithmetic
        BinaryOp::Add => Value::Decimal(context.add(left, right)),
        BinaryOp::Sub => Value::Decimal(context.sub(left, right)),
        BinaryOp::Mul => Value::Decimal(context.mul(left, right)),
        BinaryOp::Div => Value::Decimal(context.div(left, right)?),
        // Comparison
        BinaryOp::Lt => Value::Bool(left < right),
        BinaryOp::LtEq => Value::Bool(left <= right),
        BinaryOp::Gt => Value::Bool(left > right),
        BinaryOp::GtEq => Value::Bool(left >= right),
        BinaryOp::Assign | BinaryOp::Or | BinaryOp::And | BinaryOp::Eq | BinaryOp::NotEq => {
            return Err(errors::internal(format!("`{op}` is not a decimal operation")));
        }
    })
}

fn require_bool(expr: &Expr, value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(errors::type_mismatch(expr, "boolean", other)),
    }
}

fn require_decimal<'v>(expr: &Expr, value: &'v Value) -> Result<&'v BigDecimal, EvalError> {
    match value {
        Value::Decimal(d) => Ok(d),
        other => Err(errors::type_mismatch(expr, "numeric", other)),
    }
}
