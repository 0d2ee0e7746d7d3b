//! Program errors.

use pap_eval::EvalError;
use pap_parse::ParseError;
use thiserror::Error;

use crate::declaration::DeclarationKind;

/// Errors from loading, preparing inputs for and evaluating a program.
#[derive(Clone, Debug, Error)]
pub enum ProgramError {
    // Loading
    #[error("expected a <PAP> root element but found <{0}>")]
    NotAPap(String),

    #[error("unexpected <{tag}> inside <{parent}>")]
    UnexpectedTag { tag: String, parent: String },

    #[error("<{tag}> is missing the required `{attribute}` attribute")]
    MissingAttribute { tag: String, attribute: String },

    #[error("<IF expr=\"{condition}\"> has no <THEN> branch")]
    MissingThen { condition: String },

    #[error("program has no MAIN method")]
    MissingMain,

    #[error("method {0} is declared more than once")]
    DuplicateMethod(String),

    #[error("variable {0} is declared more than once")]
    DuplicateVariable(String),

    #[error("in <{tag}> `{text}`: {source}")]
    Parse {
        tag: String,
        text: String,
        source: ParseError,
    },

    // Inputs and outputs
    #[error("program declares no {0} variables")]
    NoDeclarations(DeclarationKind),

    #[error("no converter registered for type `{value_type}` of input {name}")]
    NoConverter { name: String, value_type: String },

    #[error("cannot convert input {name}: {message}")]
    Conversion { name: String, message: String },

    #[error("output {0} was not set by the program")]
    MissingOutput(String),

    // Evaluation
    #[error("initializing {name} failed: {source}")]
    Declaration { name: String, source: EvalError },

    #[error(transparent)]
    Eval(#[from] EvalError),
}
