use thiserror::Error;

/// A structural invariant violated while building a syntax tree node.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),

    #[error("no name provided")]
    EmptyName,

    #[error("cannot access `{name}` on literal `{target}`")]
    LiteralTarget { name: String, target: String },

    #[error("literal `{0}` cannot be called")]
    LiteralCallee(String),

    #[error("literal `{0}` cannot be constructed")]
    LiteralConstructor(String),

    #[error("cannot assign to `{0}`, only names and index accesses are assignable")]
    InvalidAssignTarget(String),
}
