use pap_ir::SemanticError;
use thiserror::Error;

/// Failure to parse an expression.
///
/// Carries the character position at which parsing stopped and a snippet of
/// the source with a caret under that position:
///
/// ```text
/// cannot parse expression: expected `)` but reached the end of input (position 6)
///
///     func(3
///           ^
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot parse expression: {message} (position {position})\n\n{snippet}")]
pub struct ParseError {
    message: String,
    position: usize,
    snippet: String,
    #[source]
    semantic: Option<SemanticError>,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, source: &str, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
            snippet: snippet(source, position),
            semantic: None,
        }
    }

    /// A node refused to be built from otherwise well-formed input.
    pub(crate) fn semantic(error: SemanticError, source: &str, position: usize) -> Self {
        ParseError {
            semantic: Some(error.clone()),
            ..ParseError::new(error.to_string(), source, position)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Character offset into the source.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// The violated node invariant, when that is what stopped parsing.
    pub fn semantic_error(&self) -> Option<&SemanticError> {
        self.semantic.as_ref()
    }
}

fn snippet(source: &str, position: usize) -> String {
    format!("\t{source}\n\t{}^", " ".repeat(position))
}
