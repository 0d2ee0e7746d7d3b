#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

fn name(n: &str) -> Expr {
    Expr::name(n).unwrap()
}

fn num(n: &str) -> Expr {
    Expr::number(n).unwrap()
}

fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right).unwrap()
}

// Construction invariants

#[test]
fn number_literal_shapes() {
    for ok in ["0", "123", "-123", "123.5", "-0.25"] {
        assert!(Number::new(ok).is_ok(), "{ok} should be accepted");
    }
    for bad in ["", "-", ".", "1.", ".5", "0.0.0", "1e5", "+1", "12a"] {
        assert_eq!(
            Number::new(bad),
            Err(SemanticError::InvalidNumber(bad.to_owned())),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn empty_name_rejected() {
    assert_eq!(Expr::name(""), Err(SemanticError::EmptyName));
    assert_eq!(Expr::member(name("o"), ""), Err(SemanticError::EmptyName));
}

#[test]
fn literal_target_rejected() {
    assert_eq!(
        Expr::member(num("3"), "x"),
        Err(SemanticError::LiteralTarget {
            name: "x".to_owned(),
            target: "3".to_owned()
        })
    );
    assert!(Expr::member(Expr::Bool(true), "x").is_err());
    assert!(Expr::member(Expr::List(vec![]), "size").is_ok());
}

#[test]
fn literal_callee_and_constructor_rejected() {
    assert_eq!(
        Expr::call(num("3"), vec![]),
        Err(SemanticError::LiteralCallee("3".to_owned()))
    );
    assert_eq!(
        Expr::construct(Expr::Bool(false)),
        Err(SemanticError::LiteralConstructor("false".to_owned()))
    );
}

#[test]
fn assignment_target_restricted() {
    assert!(Expr::binary(BinaryOp::Assign, name("x"), num("1")).is_ok());
    assert!(Expr::binary(BinaryOp::Assign, Expr::index(name("t"), num("0")), num("1")).is_ok());

    let call = Expr::call(name("fn"), vec![]).unwrap();
    assert_eq!(
        Expr::binary(BinaryOp::Assign, call, name("x")),
        Err(SemanticError::InvalidAssignTarget("fn()".to_owned()))
    );
    assert!(Expr::binary(BinaryOp::Assign, num("3"), num("5")).is_err());
}

#[test]
fn literals() {
    assert!(num("1").is_literal());
    assert!(Expr::Bool(true).is_literal());
    assert!(!name("x").is_literal());
    assert!(!Expr::List(vec![]).is_literal());
}

// Canonical display

#[test]
fn display_postfix_chain() {
    let construct = Expr::construct(name("BigDecimal")).unwrap();
    let created = Expr::call(construct, vec![num("123.5")]).unwrap();
    let add = Expr::member(created, "add").unwrap();
    let expr = Expr::call(add, vec![num("7.1")]).unwrap();
    assert_eq!(expr.to_string(), "new BigDecimal(123.5).add(7.1)");

    let list = Expr::List(vec![name("x"), num("123.9"), num("3")]);
    assert_eq!(list.to_string(), "{x,123.9,3}");
    assert_eq!(Expr::index(name("TAB1"), name("J")).to_string(), "TAB1[J]");
}

#[test]
fn display_parenthesizes_compound_constructor_types() {
    let dotted = Expr::member(name("pap"), "BigDecimal").unwrap();
    assert_eq!(Expr::construct(dotted).unwrap().to_string(), "new (pap.BigDecimal)");
    let sum = bin(BinaryOp::Add, name("a"), name("b"));
    assert_eq!(Expr::construct(sum).unwrap().to_string(), "new (a+b)");
    assert_eq!(Expr::construct(name("T")).unwrap().to_string(), "new T");
}

#[test]
fn display_parenthesizes_right_operations() {
    // x + (y * 3)
    let expr = bin(BinaryOp::Add, name("x"), bin(BinaryOp::Mul, name("y"), num("3")));
    assert_eq!(expr.to_string(), "x+(y*3)");

    // (c + 3) - x keeps its left-associative shape without parentheses
    let sum = bin(BinaryOp::Sub, bin(BinaryOp::Add, name("c"), num("3")), name("x"));
    let eq = bin(BinaryOp::Eq, name("b"), sum);
    let or = bin(BinaryOp::Or, name("a"), eq);
    assert_eq!(or.to_string(), "a||(b==(c+3-x))");
}

#[test]
fn display_parenthesizes_weaker_left_operations() {
    let or = bin(BinaryOp::Or, name("a"), name("b"));
    let and = bin(BinaryOp::And, or, name("c"));
    assert_eq!(and.to_string(), "(a||b)&&c");

    let sum = bin(BinaryOp::Add, name("a"), name("b"));
    let member = Expr::member(sum, "c").unwrap();
    assert_eq!(member.to_string(), "(a+b).c");
}

#[test]
fn display_negative_right_operand() {
    let expr = bin(BinaryOp::Sub, num("3"), num("-7"));
    assert_eq!(expr.to_string(), "3--7");
}

#[test]
fn operator_strengths() {
    assert!(BinaryOp::Assign.precedence() < BinaryOp::Or.precedence());
    assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
    assert!(BinaryOp::And.precedence() < BinaryOp::Eq.precedence());
    assert_eq!(BinaryOp::Eq.precedence(), BinaryOp::GtEq.precedence());
    assert!(BinaryOp::Lt.precedence() < BinaryOp::Sub.precedence());
    assert!(BinaryOp::Add.precedence() < BinaryOp::Div.precedence());
    assert_eq!(BinaryOp::Assign.right_precedence(), BinaryOp::Assign.precedence());
    assert_eq!(BinaryOp::Add.right_precedence(), BinaryOp::Mul.precedence());
}
