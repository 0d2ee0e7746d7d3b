//! End-to-end tests: source tree in, outputs and traces out.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]


use crate::{load, Program, SourceElement, Values};

fn element(tag: &str) -> SourceElement {
    SourceElement::new(tag)
}

fn var(tag: &str, name: &str, value_type: &str) -> SourceElement {
    element(tag).attr("name", name).attr("type", value_type)
}

fn eval(exec: &str) -> SourceElement {
    element("EVAL").attr("exec", exec)
}

fn if_then(expr: &str, then: SourceElement) -> SourceElement {
    element("IF")
        .attr("expr", expr)
        .child(element("THEN").child(then))
}

/// A small wage tax program: a flat rate on the annualized wage, paid per
/// period (`LZZ` 1 = year, 2 = month).
fn wage_tax_source() -> SourceElement {
    element("PAP")
        .attr("name", "WageTax")
        .child(
            element("VARIABLES")
                .child(
                    element("INPUTS")
                        .comment(" period: 1 = year, 2 = month ")
                        .child(var("INPUT", "LZZ", "int"))
                        .comment(" gross wage of the period ")
                        .child(var("INPUT", "RE4", "BigDecimal")),
                )
                .child(
                    element("OUTPUTS")
                        .attr("type", "STANDARD")
                        .child(var("OUTPUT", "LSTLZZ", "BigDecimal")),
                )
                .child(
                    element("INTERNALS")
                        .child(var("INTERNAL", "ZRE4", "BigDecimal"))
                        .child(
                            var("INTERNAL", "RATE", "BigDecimal")
                                .attr("default", "BigDecimal.valueOf(0.25)"),
                        ),
                )
                .child(
                    element("CONSTANTS")
                        .child(
                            var("CONSTANT", "ZAHL12", "BigDecimal")
                                .attr("value", "BigDecimal.valueOf(12)"),
                        ),
                ),
        )
        .child(
            element("METHODS")
                .child(
                    element("MAIN")
                        .child(
                            element("IF")
                                .attr("expr", "LZZ == 2")
                                .child(
                                    element("THEN")
                                        .child(element("EXECUTE").attr("method", "ANNUALIZE")),
                                )
                                .child(element("ELSE").child(eval("ZRE4 = RE4"))),
                        )
                        .child(eval(
                            "LSTLZZ = ZRE4.multiply(RATE).setScale(2, BigDecimal.ROUND_DOWN)",
                        ))
                        .child(if_then(
                            "LZZ == 2",
                            eval("LSTLZZ = LSTLZZ.divide(ZAHL12, 2, BigDecimal.ROUND_DOWN)"),
                        )),
                )
                .comment(" monthly wage to annual wage ")
                .child(
                    element("METHOD")
                        .attr("name", "ANNUALIZE")
                        .child(eval("ZRE4 = RE4.multiply(ZAHL12)")),
                ),
        )
}

fn wage_tax() -> Program {
    load(&wage_tax_source()).unwrap()
}

/// A program with a single output `X` computed by `statements`.
fn single_output(statements: &[&str]) -> Program {
    let main = statements
        .iter()
        .fold(element("MAIN"), |main, exec| main.child(eval(exec)));
    let root = element("PAP")
        .attr("name", "Single")
        .child(var("OUTPUT", "X", "BigDecimal"))
        .child(main);
    load(&root).unwrap()
}

fn inputs(program: &Program, raw: &[(&str, &str)]) -> Values {
    program.create_values(raw.iter().copied()).unwrap()
}
