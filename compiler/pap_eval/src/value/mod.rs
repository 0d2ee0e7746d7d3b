//! Runtime values.
//!
//! Lists and objects are reference types: cloning a `Value` shares the
//! underlying storage, so `t[0] = x` is visible through every binding of
//! `t`. Everything else is a plain value.

mod function;
mod object;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bigdecimal::BigDecimal;

pub use function::{Function, MethodRef, NativeFn};
pub use object::{Object, Record};

use crate::decimal;
use crate::errors::EvalResult;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// Arbitrary precision decimal, the only numeric type.
    Decimal(BigDecimal),
    Bool(bool),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Function(Function),
    Object(Rc<dyn Object>),
    /// Result of a block or branch that produced nothing.
    Void,
}

impl Value {
    pub fn decimal(value: impl Into<BigDecimal>) -> Self {
        Value::Decimal(value.into())
    }

    pub fn string(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn object(object: impl Object + 'static) -> Self {
        Value::Object(Rc::new(object))
    }

    /// A callable backed by a Rust closure.
    pub fn native(name: &str, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        Value::Function(Function::Native(NativeFn::new(name, func)))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Decimal(_) => "decimal",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Object(object) => object.type_name(),
            Value::Void => "no value",
        }
    }

    /// Kind and value, as shown in error messages: `decimal 3`.
    pub fn describe(&self) -> String {
        match self {
            Value::Void => self.type_name().to_owned(),
            Value::Str(text) => format!("string \"{text}\""),
            _ => format!("{} {self}", self.type_name()),
        }
    }

    /// The numeric payload of decimals and decimal-backed objects.
    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Value::Decimal(value) => Some(value),
            Value::Object(object) => object.decimal(),
            _ => None,
        }
    }
}

/// Structural equality. Decimals compare by canonical form, so `1.50 == 1.5`;
/// functions and objects compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Decimal(a), Value::Decimal(b)) => {
                decimal::canonical_string(a) == decimal::canonical_string(b)
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Decimal(value) => f.write_str(&decimal::canonical_string(value)),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(text) => f.write_str(text),
            Value::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Value::Function(function) => write!(f, "{function}"),
            Value::Object(object) => write!(f, "{object}"),
            Value::Void => f.write_str("void"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Decimal(value) => write!(f, "Decimal({})", decimal::canonical_string(value)),
            Value::Bool(value) => write!(f, "Bool({value})"),
            Value::Str(text) => write!(f, "Str({text:?})"),
            Value::List(items) => f.debug_list().entries(items.borrow().iter()).finish(),
            Value::Function(function) => write!(f, "Function({function})"),
            Value::Object(object) => write!(f, "Object({object:?})"),
            Value::Void => f.write_str("Void"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Decimal(value)
    }
}

#[cfg(test)]
mod tests;
