//! Parser for the PAP calculation expression language.
//!
//! ```text
//! expr     := operand postfix* (binop expr)*
//! operand  := number | name | "new" (name | "(" expr ")") | "{" list "}" | "(" expr ")"
//! postfix  := "." name | "(" list ")" | "[" expr "]"
//! list     := (expr ("," expr)*)?
//! ```
//!
//! Binary operators are resolved by precedence climbing, weakest first:
//! `=` (right associative), `||`, `&&`, `== != < <= > >=`, `+ -`, `* /`.
//! Whitespace between tokens is insignificant.

mod cursor;
mod error;
mod matchers;
mod parser;

pub use error::ParseError;

use pap_ir::Expr;
use tracing::trace;

use crate::parser::Parser;

/// Parse `source` as a single expression.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    trace!(source, "parsing expression");
    Parser::new(source).parse_complete()
}

#[cfg(test)]
mod tests;
