//! PAP IR - expression syntax tree.
//!
//! The expression language of PAP programs is small: decimal and boolean
//! literals, (dotted) names, list literals, index access, calls, `new`
//! constructor references and binary operators. Every node validates its
//! structural invariants on construction, so a tree that exists is a tree the
//! interpreter can walk without re-checking shape.
//!
//! Trees print in a canonical form (see [`Expr`]'s `Display`) that parses
//! back to an equivalent tree.

pub mod ast;
mod error;

pub use ast::{Binary, BinaryOp, Call, Construct, Expr, Index, NameRef, Number};
pub use error::SemanticError;
