//! Expression nodes.
//!
//! Node fields are private and only reachable through validating
//! constructors, so the invariants checked here hold for every tree:
//!
//! - number literals match `-?[0-9]+(\.[0-9]+)?`
//! - names are non-empty and never dereference a literal
//! - literals are neither callable nor constructible
//! - assignments only target names and index accesses

mod operators;

use std::fmt;

pub use operators::BinaryOp;

use crate::SemanticError;

/// An expression of the PAP calculation language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Decimal literal, kept as written.
    Number(Number),
    /// `true` or `false`.
    Bool(bool),
    /// `name` or `target.name`.
    Name(NameRef),
    /// `{a, b, c}`
    List(Vec<Expr>),
    /// `target[key]`
    Index(Index),
    /// `callee(args...)`
    Call(Call),
    /// `new Type`, or `new (expr)` for any other type expression
    Construct(Construct),
    /// `left op right`
    Binary(Binary),
}

/// Decimal literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Number {
    text: String,
}

/// Reference to a name, optionally dereferenced from a target expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRef {
    name: String,
    target: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    target: Box<Expr>,
    key: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    callee: Box<Expr>,
    args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Construct {
    type_ref: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    op: BinaryOp,
    left: Box<Expr>,
    right: Box<Expr>,
}

impl Number {
    pub fn new(text: impl Into<String>) -> Result<Self, SemanticError> {
        let text = text.into();
        if is_number_text(&text) {
            Ok(Number { text })
        } else {
            Err(SemanticError::InvalidNumber(text))
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `-?[0-9]+(\.[0-9]+)?`
fn is_number_text(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(integer) && fraction.map_or(true, all_digits)
}

impl NameRef {
    pub fn new(name: impl Into<String>, target: Option<Expr>) -> Result<Self, SemanticError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SemanticError::EmptyName);
        }
        if let Some(target) = target.as_ref().filter(|t| t.is_literal()) {
            return Err(SemanticError::LiteralTarget {
                name,
                target: target.to_string(),
            });
        }
        Ok(NameRef {
            name,
            target: target.map(Box::new),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&Expr> {
        self.target.as_deref()
    }
}

impl Index {
    pub fn new(target: Expr, key: Expr) -> Self {
        Index {
            target: Box::new(target),
            key: Box::new(key),
        }
    }

    pub fn target(&self) -> &Expr {
        &self.target
    }

    pub fn key(&self) -> &Expr {
        &self.key
    }
}

impl Call {
    pub fn new(callee: Expr, args: Vec<Expr>) -> Result<Self, SemanticError> {
        if callee.is_literal() {
            return Err(SemanticError::LiteralCallee(callee.to_string()));
        }
        Ok(Call {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn callee(&self) -> &Expr {
        &self.callee
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

impl Construct {
    pub fn new(type_ref: Expr) -> Result<Self, SemanticError> {
        if type_ref.is_literal() {
            return Err(SemanticError::LiteralConstructor(type_ref.to_string()));
        }
        Ok(Construct {
            type_ref: Box::new(type_ref),
        })
    }

    pub fn type_ref(&self) -> &Expr {
        &self.type_ref
    }
}

impl Binary {
    pub fn new(op: BinaryOp, left: Expr, right: Expr) -> Result<Self, SemanticError> {
        if op == BinaryOp::Assign && !matches!(left, Expr::Name(_) | Expr::Index(_)) {
            return Err(SemanticError::InvalidAssignTarget(left.to_string()));
        }
        Ok(Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn op(&self) -> BinaryOp {
        self.op
    }

    pub fn left(&self) -> &Expr {
        &self.left
    }

    pub fn right(&self) -> &Expr {
        &self.right
    }
}

// Shorthand constructors, mostly for building trees by hand.
impl Expr {
    pub fn number(text: impl Into<String>) -> Result<Expr, SemanticError> {
        Number::new(text).map(Expr::Number)
    }

    pub fn name(name: impl Into<String>) -> Result<Expr, SemanticError> {
        NameRef::new(name, None).map(Expr::Name)
    }

    pub fn member(target: Expr, name: impl Into<String>) -> Result<Expr, SemanticError> {
        NameRef::new(name, Some(target)).map(Expr::Name)
    }

    pub fn index(target: Expr, key: Expr) -> Expr {
        Expr::Index(Index::new(target, key))
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Result<Expr, SemanticError> {
        Call::new(callee, args).map(Expr::Call)
    }

    pub fn construct(type_ref: Expr) -> Result<Expr, SemanticError> {
        Construct::new(type_ref).map(Expr::Construct)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Result<Expr, SemanticError> {
        Binary::new(op, left, right).map(Expr::Binary)
    }

    /// Literals evaluate to themselves and are not recorded in traces.
    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Number(_) | Expr::Bool(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(number) => f.write_str(number.text()),
            Expr::Bool(value) => write!(f, "{value}"),
            Expr::Name(name) => {
                if let Some(target) = name.target() {
                    fmt_postfix_target(f, target)?;
                    f.write_str(".")?;
                }
                f.write_str(name.name())
            }
            Expr::List(items) => {
                f.write_str("{")?;
                fmt_comma_separated(f, items)?;
                f.write_str("}")
            }
            Expr::Index(index) => {
                fmt_postfix_target(f, index.target())?;
                write!(f, "[{}]", index.key())
            }
            Expr::Call(call) => {
                fmt_postfix_target(f, call.callee())?;
                f.write_str("(")?;
                fmt_comma_separated(f, call.args())?;
                f.write_str(")")
            }
            Expr::Construct(construct) => match construct.type_ref() {
                Expr::Name(name) if name.target().is_none() => write!(f, "new {}", name.name()),
                type_ref => write!(f, "new ({type_ref})"),
            },
            Expr::Binary(binary) => fmt_binary(f, binary),
        }
    }
}

fn fmt_comma_separated(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Postfix operators bind tighter than any binary operator.
fn fmt_postfix_target(f: &mut fmt::Formatter<'_>, target: &Expr) -> fmt::Result {
    if matches!(target, Expr::Binary(_)) {
        write!(f, "({target})")
    } else {
        write!(f, "{target}")
    }
}

/// Right operands that are themselves operations are always parenthesized,
/// left operands only when they bind weaker than `binary`.
fn fmt_binary(f: &mut fmt::Formatter<'_>, binary: &Binary) -> fmt::Result {
    let op = binary.op();
    match binary.left() {
        Expr::Binary(left) if left.op().precedence() < op.precedence() => {
            write!(f, "({})", binary.left())?;
        }
        left => write!(f, "{left}")?,
    }
    f.write_str(op.as_symbol())?;
    match binary.right() {
        right @ Expr::Binary(_) => write!(f, "({right})"),
        right => write!(f, "{right}"),
    }
}

#[cfg(test)]
mod tests;
