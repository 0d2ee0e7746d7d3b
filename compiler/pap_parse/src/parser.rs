//! Recursive descent parser with precedence climbing for binary operators.

use pap_ir::{BinaryOp, Expr, SemanticError};
use pap_stack::ensure_sufficient_stack;

use crate::cursor::Cursor;
use crate::matchers::{
    Matcher, DIGIT, DOT, INDEX_END, INDEX_START, LIST_END, LIST_START, NAME, NAME_START, NUMBER,
    PAREN_END, PAREN_START, SEPARATOR, SIGN,
};
use crate::ParseError;

type ParseResult = Result<Expr, ParseError>;

pub(crate) struct Parser<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Parser {
            cursor: Cursor::new(source),
        }
    }

    /// Parse one expression spanning the whole input.
    pub fn parse_complete(mut self) -> ParseResult {
        let expr = self.parse_expr()?;
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => Ok(expr),
            Some(c) => Err(self.error(format!("unexpected `{c}` after complete expression"))),
        }
    }

    fn parse_expr(&mut self) -> ParseResult {
        self.parse_binary(BinaryOp::Assign.precedence())
    }

    /// Parse operators binding at least as strongly as `min_precedence`.
    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_postfix()?;
            loop {
                self.cursor.skip_whitespace();
                let Some(op) = self.peek_binary_op() else {
                    break;
                };
                if op.precedence() < min_precedence {
                    break;
                }
                self.cursor.eat_str(op.as_symbol());
                let right = self.parse_binary(op.right_precedence())?;
                left = Expr::binary(op, left, right).map_err(|e| self.semantic_error(e))?;
            }
            Ok(left)
        })
    }

    /// Longest operator symbol at the cursor, so `==` wins over `=`.
    fn peek_binary_op(&self) -> Option<BinaryOp> {
        let rest = self.cursor.rest();
        BinaryOp::ALL
            .into_iter()
            .filter(|op| rest.starts_with(op.as_symbol()))
            .max_by_key(|op| op.as_symbol().len())
    }

    /// An operand followed by any chain of `.name`, `(args)` and `[key]`.
    fn parse_postfix(&mut self) -> ParseResult {
        let mut expr = self.parse_operand()?;
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.eat(DOT) {
                self.cursor.skip_whitespace();
                let name = self.cursor.eat_while(NAME);
                expr = Expr::member(expr, name).map_err(|e| self.semantic_error(e))?;
            } else if self.cursor.eat(PAREN_START) {
                let args = self.parse_list(PAREN_END)?;
                expr = Expr::call(expr, args).map_err(|e| self.semantic_error(e))?;
            } else if self.cursor.eat(INDEX_START) {
                let key = self.parse_expr()?;
                self.expect(INDEX_END)?;
                expr = Expr::index(expr, key);
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_operand(&mut self) -> ParseResult {
        self.cursor.skip_whitespace();
        let Some(c) = self.cursor.peek() else {
            return Err(self.error("unexpected end of input, expected an operand"));
        };
        if DIGIT.matches(c) || SIGN.matches(c) {
            self.parse_number()
        } else if NAME_START.matches(c) {
            self.parse_name()
        } else if self.cursor.eat(LIST_START) {
            self.parse_list(LIST_END).map(Expr::List)
        } else if self.cursor.eat(PAREN_START) {
            let inner = self.parse_expr()?;
            self.expect(PAREN_END)?;
            Ok(inner)
        } else {
            Err(self.error(format!("unexpected `{c}`, expected an operand")))
        }
    }

    /// `-? digits`, whitespace allowed between sign and digits.
    fn parse_number(&mut self) -> ParseResult {
        let negative = self.cursor.eat(SIGN);
        if negative {
            self.cursor.skip_whitespace();
            if !self.cursor.check(DIGIT) {
                return Err(self.error("expected digits after `-`"));
            }
        }
        let digits = self.cursor.eat_while(NUMBER);
        let text = if negative {
            format!("-{digits}")
        } else {
            digits.to_owned()
        };
        Expr::number(text).map_err(|e| self.semantic_error(e))
    }

    /// Names, the `true`/`false` keywords, and `new Type` or `new (expr)`.
    fn parse_name(&mut self) -> ParseResult {
        let name = self.cursor.eat_while(NAME);
        match name {
            "true" => Ok(Expr::Bool(true)),
            "false" => Ok(Expr::Bool(false)),
            "new" => {
                self.cursor.skip_whitespace();
                let type_ref = if self.cursor.eat(PAREN_START) {
                    let inner = self.parse_expr()?;
                    self.expect(PAREN_END)?;
                    inner
                } else {
                    let type_name = self.cursor.eat_while(NAME);
                    Expr::name(type_name).map_err(|e| self.semantic_error(e))?
                };
                Expr::construct(type_ref).map_err(|e| self.semantic_error(e))
            }
            _ => Expr::name(name).map_err(|e| self.semantic_error(e)),
        }
    }

    /// Comma-separated, possibly empty expressions up to `terminator`.
    ///
    /// Shared by list literals and call arguments; the opening character has
    /// already been consumed.
    fn parse_list(&mut self, terminator: Matcher) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        self.cursor.skip_whitespace();
        if self.cursor.eat(terminator) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expr()?);
            self.cursor.skip_whitespace();
            if self.cursor.eat(terminator) {
                return Ok(items);
            }
            if !self.cursor.eat(SEPARATOR) {
                return Err(self.unexpected(&[SEPARATOR, terminator]));
            }
        }
    }

    fn expect(&mut self, matcher: Matcher) -> Result<(), ParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.eat(matcher) {
            Ok(())
        } else {
            Err(self.unexpected(&[matcher]))
        }
    }

    fn unexpected(&self, expected: &[Matcher]) -> ParseError {
        let expected = expected
            .iter()
            .map(|m| m.name)
            .collect::<Vec<_>>()
            .join(" or ");
        match self.cursor.peek() {
            Some(c) => self.error(format!("expected {expected} but found `{c}`")),
            None => self.error(format!("expected {expected} but reached the end of input")),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.cursor.source(), self.cursor.char_position())
    }

    fn semantic_error(&self, error: SemanticError) -> ParseError {
        ParseError::semantic(error, self.cursor.source(), self.cursor.char_position())
    }
}
