#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

fn convert(value_type: &str, text: &str) -> Result<Value, String> {
    converter(value_type).unwrap()(text, ArithmeticContext::default())
}

#[test]
fn known_types() {
    for value_type in ["BigDecimal", "int", "double", "boolean", "String"] {
        assert!(converter(value_type).is_some(), "{value_type}");
    }
    assert!(converter("BigDecimal[]").is_none());
    assert!(converter("bigdecimal").is_none());
}

#[test]
fn big_decimal_inputs_are_instances() {
    let value = convert("BigDecimal", " 2500000.50 ").unwrap();
    assert_eq!(value.type_name(), "BigDecimal");
    assert_eq!(value.to_string(), "2500000.50");
    assert!(convert("BigDecimal", "25,00").is_err());
}

#[test]
fn int_requires_integers() {
    assert_eq!(convert("int", "12").unwrap(), Value::decimal(12));
    assert_eq!(convert("int", "-1").unwrap(), Value::decimal(-1));
    assert_eq!(convert("int", "1.5").unwrap_err(), "`1.5` is not an integer");
    assert_eq!(convert("int", "x").unwrap_err(), "`x` is not a valid decimal");
}

#[test]
fn double_accepts_fractions() {
    let quarter = decimal::parse_decimal("0.25").unwrap();
    assert_eq!(convert("double", "0.25").unwrap(), Value::Decimal(quarter));
}

#[test]
fn boolean_is_case_insensitive() {
    assert_eq!(convert("boolean", "true").unwrap(), Value::Bool(true));
    assert_eq!(convert("boolean", "FALSE").unwrap(), Value::Bool(false));
    assert_eq!(convert("boolean", "1").unwrap_err(), "`1` is neither true nor false");
}

#[test]
fn strings_are_kept_verbatim() {
    assert_eq!(convert("String", " a b ").unwrap(), Value::string(" a b "));
}
