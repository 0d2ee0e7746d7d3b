#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pap_eval::{EvalErrorKind, Record};
use pap_stack::DepthExceeded;
use pretty_assertions::assert_eq;

use super::*;

fn expr(source: &str) -> Expr {
    pap_parse::parse(source).unwrap()
}

fn stmt(source: &str) -> Node {
    Node::Expr(expr(source))
}

fn block(items: Vec<Node>) -> Block {
    Block::new(items)
}

fn method(name: &str, items: Vec<Node>) -> Node {
    Node::Method(MethodDecl::new(name, block(items)))
}

fn if_else(condition: &str, then_items: Vec<Node>, else_items: Option<Vec<Node>>) -> Node {
    Node::Conditional(Conditional::new(expr(condition), block(then_items), else_items.map(block)))
}

fn scope_with(bindings: &[(&str, i32)]) -> Scope {
    bindings
        .iter()
        .map(|&(name, value)| (name, Value::decimal(value)))
        .collect()
}

fn run(node: &Node, scope: &mut Scope) -> EvalResult {
    ProgramInterpreter::new(scope, &EvalOptions::default()).eval_node(node)
}

#[test]
fn blocks_yield_their_last_value() {
    let mut scope = Scope::new();
    let node = Node::Block(block(vec![stmt("x = 1"), stmt("x + 1")]));
    assert_eq!(run(&node, &mut scope).unwrap(), Value::decimal(2));
    assert_eq!(scope.get("x"), Some(&Value::decimal(1)));

    assert!(run(&Node::Block(Block::default()), &mut scope).unwrap().is_void());
}

#[test]
fn conditionals_take_one_branch() {
    let node = if_else("a > 1", vec![stmt("r = 1")], Some(vec![stmt("r = 2")]));

    let mut scope = scope_with(&[("a", 2)]);
    assert_eq!(run(&node, &mut scope).unwrap(), Value::decimal(1));
    assert_eq!(scope.get("r"), Some(&Value::decimal(1)));

    let mut scope = scope_with(&[("a", 0)]);
    assert_eq!(run(&node, &mut scope).unwrap(), Value::decimal(2));
    assert_eq!(scope.get("r"), Some(&Value::decimal(2)));
}

#[test]
fn conditional_without_else_is_void() {
    let node = if_else("false", vec![stmt("r = 1")], None);
    let mut scope = Scope::new();
    assert!(run(&node, &mut scope).unwrap().is_void());
    assert!(!scope.contains("r"));
}

#[test]
fn conditions_must_be_boolean() {
    let node = if_else("a", vec![stmt("r = 1")], None);
    let err = run(&node, &mut scope_with(&[("a", 1)])).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expr: "a".to_owned(),
            expected: "boolean".to_owned(),
            got: "decimal 1".to_owned(),
        }
    );
    assert_eq!(err.scope.unwrap().get("a").map(String::as_str), Some("1"));
}

#[test]
fn only_the_innermost_block_is_annotated() {
    let node = Node::Block(block(vec![
        stmt("x = 1"),
        Node::Block(block(vec![stmt("x = y")])),
    ]));
    let err = run(&node, &mut Scope::new()).unwrap_err();
    assert_eq!(err.message, "`y` is undefined\n\nin block:\n{\n  x=y;\n}");
    assert_eq!(err.message.matches("in block:").count(), 1);
}

#[test]
fn declared_methods_run_against_the_shared_scope() {
    let node = Node::Block(block(vec![
        method("INCREMENT", vec![stmt("r = r + 1")]),
        stmt("r = 0"),
        stmt("INCREMENT()"),
        stmt("INCREMENT()"),
    ]));
    let mut scope = Scope::new();
    assert_eq!(run(&node, &mut scope).unwrap(), Value::Bool(true));
    assert_eq!(scope.get("r"), Some(&Value::decimal(2)));
    assert_eq!(scope.get("INCREMENT").unwrap().type_name(), "function");
}

#[test]
fn methods_take_no_arguments() {
    let node = Node::Block(block(vec![method("M", vec![stmt("1")]), stmt("M(1)")]));
    let err = run(&node, &mut Scope::new()).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "M".to_owned(),
            expected: "0".to_owned(),
            got: 1,
        }
    );
}

#[test]
fn method_names_must_be_free() {
    let mut scope = Scope::new();
    scope.set("M", Value::object(Record::new()));
    let err = run(&method("M", vec![]), &mut scope).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DuplicateName { name: "M".to_owned() });
}

#[test]
fn runaway_recursion_hits_the_call_limit() {
    let node = Node::Block(block(vec![method("LOOP", vec![stmt("LOOP()")]), stmt("LOOP()")]));
    let options = EvalOptions {
        max_call_depth: Some(8),
        ..EvalOptions::default()
    };
    let mut scope = Scope::new();
    let err = ProgramInterpreter::new(&mut scope, &options)
        .eval_node(&node)
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::RecursionLimit(DepthExceeded {
            limit: 8,
            name: "LOOP".to_owned(),
        })
    );
}

#[test]
fn conditions_are_traced_in_their_slot() {
    let node = if_else("a > 1", vec![stmt("r = a * 2")], None);
    let mut scope = scope_with(&[("a", 3)]);
    let mut interpreter = ProgramInterpreter::new(&mut scope, &EvalOptions::default()).traced();
    let result = interpreter.eval_node(&node);
    let trace = interpreter.finish().unwrap();

    assert_eq!(result.unwrap(), Value::decimal(6));
    assert_eq!(
        trace.to_string(),
        "if (a>1) -> 6\n\
         \x20 condition: a>1 -> true\n\
         \x20   a -> 3\n\
         \x20 { 1 statement(s) } -> 6\n\
         \x20   r=(a*2) -> 6\n\
         \x20     a*2 -> 6\n\
         \x20       a -> 3\n"
    );
    let root = &trace.roots()[0];
    assert_eq!(root.condition().unwrap().node().as_expr(), Some(node_condition(&node)));
}

fn node_condition(node: &Node) -> &Expr {
    match node {
        Node::Conditional(conditional) => conditional.condition(),
        _ => panic!("not a conditional"),
    }
}

#[test]
fn untraced_runs_have_no_trace() {
    let mut scope = Scope::new();
    let interpreter = ProgramInterpreter::new(&mut scope, &EvalOptions::default());
    assert!(interpreter.finish().is_none());
}
