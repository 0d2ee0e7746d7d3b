//! Variable declarations.

use std::fmt;

use pap_ir::Expr;

/// Role of a declared variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// Supplied by the caller.
    Input,
    /// Read back after the run.
    Output,
    /// Working variable of the calculation.
    Internal,
    /// Table or constant, always initialized by its value expression.
    Constant,
}

impl DeclarationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
            Self::Internal => "INTERNAL",
            Self::Constant => "CONSTANT",
        }
    }

    /// The kind named by a declaration tag (`INPUT`, `OUTPUT`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "INPUT" => Self::Input,
            "OUTPUT" => Self::Output,
            "INTERNAL" => Self::Internal,
            "CONSTANT" => Self::Constant,
            _ => return None,
        })
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    kind: DeclarationKind,
    subtype: Option<String>,
    value_type: String,
    value: Option<Expr>,
    comment: Option<String>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind, value_type: impl Into<String>) -> Self {
        Declaration {
            name: name.into(),
            kind,
            subtype: None,
            value_type: value_type.into(),
            value: None,
            comment: None,
        }
    }

    /// Initial value, evaluated when the program starts.
    #[must_use]
    pub fn with_value(mut self, value: Expr) -> Self {
        self.value = Some(value);
        self
    }

    /// Finer grouping within the kind, e.g. `STANDARD` or `DBA` outputs.
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    /// Declared type name as written in the program (`BigDecimal`, `int`, ...).
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn value(&self) -> Option<&Expr> {
        self.value.as_ref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// `KIND` or `KIND:subtype`.
    pub fn label(&self) -> String {
        match &self.subtype {
            Some(subtype) => format!("{}:{subtype}", self.kind),
            None => self.kind.to_string(),
        }
    }

    /// Whether `selector` names this declaration's kind (`OUTPUT`) or its
    /// kind and subtype (`OUTPUT:STANDARD`).
    pub fn matches(&self, selector: &str) -> bool {
        match selector.split_once(':') {
            Some((kind, subtype)) => {
                kind == self.kind.as_str() && self.subtype.as_deref() == Some(subtype)
            }
            None => selector == self.kind.as_str(),
        }
    }
}

/// `INPUT LZZ: int = 1;`
impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.label(), self.name, self.value_type)?;
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        f.write_str(";")
    }
}
