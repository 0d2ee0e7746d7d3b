//! Interpreter behavior tests, driven through the parser.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]


use std::str::FromStr;

use bigdecimal::BigDecimal;
use pap_ir::Expr;

use crate::{evaluate, EvalResult, Scope, Value};

fn parse(source: &str) -> Expr {
    pap_parse::parse(source).unwrap_or_else(|err| panic!("{err}"))
}

fn eval_in(source: &str, scope: &mut Scope) -> EvalResult {
    evaluate(&parse(source), scope)
}

fn eval(source: &str) -> EvalResult {
    eval_in(source, &mut Scope::new())
}

fn dec(text: &str) -> Value {
    Value::Decimal(BigDecimal::from_str(text).unwrap())
}
