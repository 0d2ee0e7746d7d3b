//! Conversion of raw input text into values, by declared type.

use bigdecimal::BigDecimal;
use pap_eval::decimal::{self, ArithmeticContext};
use pap_eval::Value;

use crate::builtins;

/// Turns the text of one input into a value, or explains why it cannot.
pub type Converter = fn(&str, ArithmeticContext) -> Result<Value, String>;

const CONVERTERS: [(&str, Converter); 5] = [
    ("BigDecimal", to_big_decimal),
    ("int", to_int),
    ("double", to_double),
    ("boolean", to_boolean),
    ("String", to_text),
];

/// The converter for a declared type name.
pub fn converter(value_type: &str) -> Option<Converter> {
    CONVERTERS
        .iter()
        .find(|(name, _)| *name == value_type)
        .map(|&(_, convert)| convert)
}

fn number(text: &str) -> Result<BigDecimal, String> {
    decimal::parse_decimal(text).map_err(|err| err.to_string())
}

fn to_big_decimal(text: &str, context: ArithmeticContext) -> Result<Value, String> {
    Ok(builtins::big_decimal(number(text)?, context))
}

fn to_int(text: &str, _: ArithmeticContext) -> Result<Value, String> {
    let value = number(text)?;
    if decimal::to_integer(&value).is_none() {
        return Err(format!("`{}` is not an integer", text.trim()));
    }
    Ok(Value::Decimal(value))
}

fn to_double(text: &str, _: ArithmeticContext) -> Result<Value, String> {
    number(text).map(Value::Decimal)
}

fn to_boolean(text: &str, _: ArithmeticContext) -> Result<Value, String> {
    match text.trim() {
        t if t.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        t if t.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        other => Err(format!("`{other}` is neither true nor false")),
    }
}

fn to_text(text: &str, _: ArithmeticContext) -> Result<Value, String> {
    Ok(Value::string(text))
}

#[cfg(test)]
mod tests;
