#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pap_ir::{BinaryOp, Expr, SemanticError};
use pretty_assertions::assert_eq;

use super::parse;

fn canonical(source: &str) -> String {
    match parse(source) {
        Ok(expr) => expr.to_string(),
        Err(err) => panic!("`{source}` should parse: {err}"),
    }
}

#[test]
fn valid_expressions_round_trip() {
    let sources = [
        "123",
        "-123",
        "123.5",
        "-123.5",
        "my_var",
        "my_var1",
        "myvar.myval",
        "VAR=123",
        "VAR=x",
        "VAR=o.myfn()",
        "VAR={}",
        "{}",
        "{x,123.9,3}",
        "{123.9,BigDecimal.valueOf(0.1)}",
        "func()",
        "func(753.9)",
        "a(b(753))",
        "o.call(123)",
        "o.call(123)(x).sum",
        "{x}.sublist(1)",
        "new BigDecimal(123.5)",
        "new BigDecimal(123.5).add(7.1)",
        "x==y",
        "3==7",
        "x!=y",
        "x<y",
        "3>y",
        "x<=y",
        "x>=y",
        "x+y",
        "3-7",
        "3--7",
        "3+-7",
        "TAB1[J]",
        "a&&b",
        "a||b",
        "true",
        "false",
    ];
    for source in sources {
        assert_eq!(canonical(source), source);
    }
}

#[test]
fn canonical_forms() {
    assert_eq!(canonical("(3+7)"), "3+7");
    assert_eq!(canonical("x+y*3"), "x+(y*3)");
    assert_eq!(canonical("a||b==c+3-x"), "a||(b==(c+3-x))");
    assert_eq!(canonical("x = a + b - 2"), "x=(a+b-2)");
    assert_eq!(canonical("(a||b)&&c"), "(a||b)&&c");
    assert_eq!(canonical("(a+b).setScale(2)"), "(a+b).setScale(2)");
    assert_eq!(canonical("a=b=c"), "a=(b=c)");
}

#[test]
fn canonical_form_is_stable() {
    for source in ["x+y*3", "a||b==c+3-x", "(a||b)&&c", "a=b=c", "x*(y+z)/2"] {
        let once = canonical(source);
        assert_eq!(canonical(&once), once);
        assert_eq!(parse(&once).unwrap(), parse(source).unwrap());
    }
}

#[test]
fn whitespace_is_insignificant() {
    assert_eq!(canonical(" x == y "), "x==y");
    assert_eq!(canonical("\tVAR =\n123"), "VAR=123");
    assert_eq!(canonical("- 5"), "-5");
    assert_eq!(canonical("{ a , b }"), "{a,b}");
    assert_eq!(
        canonical("new   BigDecimal ( 1 ) . add ( 2 )"),
        "new BigDecimal(1).add(2)"
    );
    assert_eq!(canonical("TAB1 [ J ]"), "TAB1[J]");
}

#[test]
fn invalid_expressions_rejected() {
    let sources = [
        "", " ", "-", "+", "<", ">", "0.0.0", ".", ".key", "o.", "{", "{.}", "{,}", "}", "(", "()",
        "func(", "func(3", ")", "func)", "func()x", "o.myfn(", "fn()=x", "3()", "3=x", "3=5", "x=",
        "x==", "x!", "x!=", "x<=", "x>=", "x+", "x-", "new", "new 3", "-x", "a & b", "a | b",
    ];
    for source in sources {
        assert!(parse(source).is_err(), "`{source}` should not parse");
    }
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    let expr = parse("1+2*3").unwrap();
    let Expr::Binary(add) = &expr else {
        panic!("expected a binary operation, got {expr:?}");
    };
    assert_eq!(add.op(), BinaryOp::Add);
    assert_eq!(add.left(), &Expr::number("1").unwrap());
    assert!(matches!(add.right(), Expr::Binary(mul) if mul.op() == BinaryOp::Mul));
}

#[test]
fn arithmetic_is_left_associative() {
    let expr = parse("a-b-c").unwrap();
    let Expr::Binary(outer) = &expr else {
        panic!("expected a binary operation, got {expr:?}");
    };
    assert_eq!(outer.op(), BinaryOp::Sub);
    assert_eq!(outer.right(), &Expr::name("c").unwrap());
    assert_eq!(outer.left().to_string(), "a-b");
}

#[test]
fn assignment_is_right_associative() {
    let expr = parse("a=b=1").unwrap();
    let Expr::Binary(outer) = &expr else {
        panic!("expected a binary operation, got {expr:?}");
    };
    assert_eq!(outer.op(), BinaryOp::Assign);
    assert_eq!(outer.left(), &Expr::name("a").unwrap());
    assert_eq!(outer.right().to_string(), "b=1");
}

#[test]
fn constructor_reference_then_call() {
    let expr = parse("new BigDecimal(1)").unwrap();
    let Expr::Call(call) = &expr else {
        panic!("expected a call, got {expr:?}");
    };
    assert_eq!(
        call.callee(),
        &Expr::construct(Expr::name("BigDecimal").unwrap()).unwrap()
    );
    assert_eq!(call.args(), [Expr::number("1").unwrap()]);
}

#[test]
fn parenthesized_constructor_types() {
    let expr = parse("new ( pap.BigDecimal )(1)").unwrap();
    let Expr::Call(call) = &expr else {
        panic!("expected a call, got {expr:?}");
    };
    let dotted = Expr::member(Expr::name("pap").unwrap(), "BigDecimal").unwrap();
    assert_eq!(call.callee(), &Expr::construct(dotted).unwrap());
    assert_eq!(expr.to_string(), "new (pap.BigDecimal)(1)");

    // Without parentheses the member access applies to the constructor.
    let expr = parse("new pap.BigDecimal").unwrap();
    assert!(matches!(expr, Expr::Name(ref name) if name.name() == "BigDecimal"));
    assert_eq!(parse(&expr.to_string()).unwrap(), expr);
}

#[test]
fn error_reports_position_and_snippet() {
    let err = parse("func(3").unwrap_err();
    assert_eq!(err.position(), 6);
    assert_eq!(err.snippet(), "\tfunc(3\n\t      ^");
    assert_eq!(
        err.message(),
        "expected `,` or `)` but reached the end of input"
    );
    assert!(err
        .to_string()
        .starts_with("cannot parse expression: expected `,` or `)`"));
    assert!(err.to_string().contains("(position 6)"));
}

#[test]
fn trailing_input_reported_where_it_starts() {
    let err = parse("x!").unwrap_err();
    assert_eq!(err.position(), 1);
    assert!(err.message().contains("`!`"));
}

#[test]
fn semantic_errors_are_wrapped() {
    let err = parse("fn()=x").unwrap_err();
    assert_eq!(
        err.semantic_error(),
        Some(&SemanticError::InvalidAssignTarget("fn()".to_owned()))
    );

    let err = parse("0.0.0").unwrap_err();
    assert_eq!(
        err.semantic_error(),
        Some(&SemanticError::InvalidNumber("0.0.0".to_owned()))
    );

    let err = parse("o.").unwrap_err();
    assert_eq!(err.semantic_error(), Some(&SemanticError::EmptyName));
}

#[test]
fn deeply_nested_parentheses() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(canonical(&source), "1");
}
