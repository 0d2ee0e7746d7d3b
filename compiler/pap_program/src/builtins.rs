//! Built-in objects every program sees in scope.
//!
//! PAP programs compute with a `BigDecimal` API shaped like Java's:
//!
//! ```text
//! ZRE4J = (RE4.divide(ZAHL100, 2, BigDecimal.ROUND_DOWN)).setScale(2, BigDecimal.ROUND_DOWN)
//! ```
//!
//! The type handle `BigDecimal` constructs instances and carries the
//! constants; instances expose bound arithmetic methods that return new
//! instances.

use std::cmp::Ordering;
use std::fmt;

use bigdecimal::{BigDecimal, RoundingMode};
use pap_eval::decimal::{self, ArithmeticContext};
use pap_eval::errors::{self, EvalError, EvalResult};
use pap_eval::{Object, Scope, Value};

const TYPE_NAME: &str = "BigDecimal";

/// `BigDecimal.ROUND_*` codes, as accepted by `divide` and `setScale`.
const ROUNDING_CONSTANTS: [(&str, i64); 7] = [
    ("ROUND_UP", 0),
    ("ROUND_DOWN", 1),
    ("ROUND_CEILING", 2),
    ("ROUND_FLOOR", 3),
    ("ROUND_HALF_UP", 4),
    ("ROUND_HALF_DOWN", 5),
    ("ROUND_HALF_EVEN", 6),
];

/// A scope holding only the built-ins.
pub fn scope(context: ArithmeticContext) -> Scope {
    let mut scope = Scope::new();
    install(&mut scope, context);
    scope
}

pub fn install(scope: &mut Scope, context: ArithmeticContext) {
    scope.set(TYPE_NAME, Value::object(BigDecimalType { context }));
}

/// A `BigDecimal` instance holding `value`.
pub fn big_decimal(value: BigDecimal, context: ArithmeticContext) -> Value {
    Value::object(DecimalObject { value, context })
}

/// The `BigDecimal` type handle.
#[derive(Debug)]
pub struct BigDecimalType {
    context: ArithmeticContext,
}

impl Object for BigDecimalType {
    fn type_name(&self) -> &str {
        "BigDecimal type"
    }

    fn get(&self, name: &str) -> Option<Value> {
        let context = self.context;
        let constant = |value: u32| Some(big_decimal(BigDecimal::from(value), context));
        match name {
            "construct" | "valueOf" => Some(method(name, move |name, args| {
                let [arg] = args else {
                    return Err(errors::wrong_arg_count(name, "1", args.len()));
                };
                let value = numeric_arg(name, 1, arg)?;
                Ok(big_decimal(value.clone(), context))
            })),
            "ZERO" => constant(0),
            "ONE" => constant(1),
            "TEN" => constant(10),
            _ => ROUNDING_CONSTANTS
                .iter()
                .find(|(label, _)| *label == name)
                .map(|&(_, code)| Value::decimal(code)),
        }
    }
}

impl fmt::Display for BigDecimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TYPE_NAME)
    }
}

/// A `BigDecimal` instance. Immutable: every operation returns a new one.
#[derive(Clone, Debug)]
pub struct DecimalObject {
    value: BigDecimal,
    context: ArithmeticContext,
}

type MethodBody = fn(&DecimalObject, &str, &[Value]) -> EvalResult;

impl DecimalObject {
    fn wrap(&self, value: BigDecimal) -> Value {
        big_decimal(value, self.context)
    }

    fn add(&self, name: &str, args: &[Value]) -> EvalResult {
        let other = single_operand(name, args)?;
        Ok(self.wrap(self.context.add(&self.value, other)))
    }

    fn subtract(&self, name: &str, args: &[Value]) -> EvalResult {
        let other = single_operand(name, args)?;
        Ok(self.wrap(self.context.sub(&self.value, other)))
    }

    fn multiply(&self, name: &str, args: &[Value]) -> EvalResult {
        let other = single_operand(name, args)?;
        Ok(self.wrap(self.context.mul(&self.value, other)))
    }

    /// `divide(n)` uses the arithmetic context, `divide(n, mode)` keeps this
    /// value's scale and `divide(n, scale, mode)` rounds to `scale`.
    ///
    /// With an explicit scale this is Java's `divide`: the operands are used
    /// as they are and only the quotient is rounded. Rounding both operands
    /// to `scale` before dividing at the context scale, as older PAP
    /// interpreters did, is not reproduced.
    fn divide(&self, name: &str, args: &[Value]) -> EvalResult {
        let quotient = match args {
            [divisor] => self.context.div(&self.value, big_decimal_arg(name, 1, divisor)?)?,
            [divisor, mode] => {
                let (_, scale) = self.value.as_bigint_and_exponent();
                decimal::divide(
                    &self.value,
                    big_decimal_arg(name, 1, divisor)?,
                    scale,
                    rounding_arg(name, 2, mode)?,
                )?
            }
            [divisor, scale, mode] => decimal::divide(
                &self.value,
                big_decimal_arg(name, 1, divisor)?,
                integer_arg(name, 2, scale)?,
                rounding_arg(name, 3, mode)?,
            )?,
            _ => return Err(errors::wrong_arg_count(name, "1 to 3", args.len())),
        };
        Ok(self.wrap(quotient))
    }

    fn set_scale(&self, name: &str, args: &[Value]) -> EvalResult {
        let [scale, mode] = args else {
            return Err(errors::wrong_arg_count(name, "2", args.len()));
        };
        let (scale, mode) = (integer_arg(name, 1, scale)?, rounding_arg(name, 2, mode)?);
        Ok(self.wrap(self.value.with_scale_round(scale, mode)))
    }

    fn compare_to(&self, name: &str, args: &[Value]) -> EvalResult {
        let other = single_operand(name, args)?;
        Ok(Value::decimal(match self.value.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }))
    }

    fn long_value(&self, name: &str, args: &[Value]) -> EvalResult {
        no_args(name, args)?;
        Ok(Value::Decimal(self.value.with_scale_round(0, RoundingMode::Down)))
    }

    fn to_text(&self, name: &str, args: &[Value]) -> EvalResult {
        no_args(name, args)?;
        Ok(Value::string(&decimal::plain_string(&self.value)))
    }
}

impl Object for DecimalObject {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn get(&self, name: &str) -> Option<Value> {
        let body: MethodBody = match name {
            "add" => Self::add,
            "subtract" => Self::subtract,
            "multiply" => Self::multiply,
            "divide" => Self::divide,
            "setScale" => Self::set_scale,
            "compareTo" => Self::compare_to,
            "longValue" => Self::long_value,
            "toString" => Self::to_text,
            _ => return None,
        };
        let receiver = self.clone();
        Some(method(name, move |name, args| body(&receiver, name, args)))
    }

    fn decimal(&self) -> Option<&BigDecimal> {
        Some(&self.value)
    }
}

/// Keeps the scale: `BigDecimal.valueOf(1.50)` prints as `1.50`.
impl fmt::Display for DecimalObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&decimal::plain_string(&self.value))
    }
}

/// A native function named `BigDecimal.<name>`; `body` receives that name
/// for its error messages.
fn method(name: &str, body: impl Fn(&str, &[Value]) -> EvalResult + 'static) -> Value {
    let qualified = format!("{TYPE_NAME}.{name}");
    Value::native(&qualified.clone(), move |args| body(&qualified, args))
}

// Argument checks. Positions count from 1.

fn no_args(name: &str, args: &[Value]) -> Result<(), EvalError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(errors::wrong_arg_count(name, "0", args.len()))
    }
}

fn single_operand<'v>(name: &str, args: &'v [Value]) -> Result<&'v BigDecimal, EvalError> {
    let [arg] = args else {
        return Err(errors::wrong_arg_count(name, "1", args.len()));
    };
    big_decimal_arg(name, 1, arg)
}

fn big_decimal_arg<'v>(name: &str, position: usize, value: &'v Value) -> Result<&'v BigDecimal, EvalError> {
    let found = match value {
        Value::Object(object) => object.decimal(),
        _ => None,
    };
    found.ok_or_else(|| errors::wrong_arg_type(name, position, "a BigDecimal", value))
}

fn numeric_arg<'v>(name: &str, position: usize, value: &'v Value) -> Result<&'v BigDecimal, EvalError> {
    value
        .as_decimal()
        .ok_or_else(|| errors::wrong_arg_type(name, position, "a number", value))
}

fn integer_arg(name: &str, position: usize, value: &Value) -> Result<i64, EvalError> {
    value
        .as_decimal()
        .and_then(decimal::to_integer)
        .ok_or_else(|| errors::wrong_arg_type(name, position, "an integer", value))
}

fn rounding_arg(name: &str, position: usize, value: &Value) -> Result<RoundingMode, EvalError> {
    value
        .as_decimal()
        .and_then(decimal::to_integer)
        .and_then(decimal::rounding_mode)
        .ok_or_else(|| errors::wrong_arg_type(name, position, "a rounding mode (0-6)", value))
}
