#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::str::FromStr;

use pretty_assertions::assert_eq;

use super::*;

fn dec(text: &str) -> Value {
    Value::Decimal(BigDecimal::from_str(text).unwrap())
}

#[test]
fn decimals_equal_by_canonical_form() {
    assert_eq!(dec("1.50"), dec("1.5"));
    assert_eq!(dec("100"), dec("1E+2"));
    assert_ne!(dec("1.5"), dec("1.05"));
}

#[test]
fn kinds_never_equal_each_other() {
    assert_ne!(dec("1"), Value::Bool(true));
    assert_ne!(Value::string("1"), dec("1"));
    assert_ne!(Value::Void, Value::Bool(false));
}

#[test]
fn lists_compare_structurally() {
    let a = Value::list(vec![dec("1"), Value::Bool(true)]);
    let b = Value::list(vec![dec("1.0"), Value::Bool(true)]);
    assert_eq!(a, b);
    assert_ne!(a, Value::list(vec![dec("1")]));
}

#[test]
fn lists_share_storage() {
    let a = Value::list(vec![dec("1")]);
    let b = a.clone();
    if let Value::List(items) = &a {
        items.borrow_mut()[0] = dec("2");
    }
    assert_eq!(b.to_string(), "{2}");
}

#[test]
fn objects_compare_by_identity() {
    let record = Value::object(Record::new().with("x", dec("1")));
    let same = record.clone();
    let other = Value::object(Record::new().with("x", dec("1")));
    assert_eq!(record, same);
    assert_ne!(record, other);
}

#[test]
fn functions_compare_by_identity() {
    let f = Value::native("f", |_| Ok(Value::Bool(true)));
    let g = Value::native("f", |_| Ok(Value::Bool(true)));
    assert_eq!(f, f.clone());
    assert_ne!(f, g);
    let m = Value::Function(Function::Method(MethodRef::new("MAIN", 0)));
    assert_eq!(m, Value::Function(Function::Method(MethodRef::new("MAIN", 0))));
    assert_ne!(m, Value::Function(Function::Method(MethodRef::new("MAIN", 1))));
}

#[test]
fn display_and_describe() {
    assert_eq!(dec("2.50").to_string(), "2.5");
    assert_eq!(Value::list(vec![dec("1"), Value::Bool(false)]).to_string(), "{1,false}");
    assert_eq!(dec("3").describe(), "decimal 3");
    assert_eq!(Value::string("a").describe(), "string \"a\"");
    assert_eq!(Value::Void.describe(), "no value");
    assert_eq!(
        Value::object(Record::new().with("b", dec("2")).with("a", dec("1"))).to_string(),
        "{a: 1, b: 2}"
    );
}

#[test]
fn record_members() {
    let record = Record::new();
    assert!(record.get("x").is_none());
    record.set("x", dec("4")).unwrap();
    assert_eq!(record.get("x"), Some(dec("4")));
}
