//! PAP Program - loading and running PAP calculation programs.
//!
//! A PAP ("Programmablaufplan") program describes a payroll tax calculation
//! as declared variables plus methods made of expression statements and
//! conditionals. This crate turns a program's source tree into a
//! [`Program`] and runs it.
//!
//! # Architecture
//!
//! - [`source`]: the element tree a host hands over
//! - [`loader`]: tag dispatch from source tree to [`Program`]
//! - [`node`]: blocks, conditionals and method declarations
//! - [`interpreter`]: evaluation of program nodes on top of `pap_eval`
//! - [`builtins`]: the `BigDecimal` type every program uses
//! - [`convert`]: raw input text to values, by declared type
//! - [`program`]: the loaded program, its inputs, outputs and runs
//!
//! ```text
//! let program = pap_program::load(&root)?;
//! let inputs = program.create_values([("LZZ", "1"), ("RE4", "2500000")])?;
//! let outputs = program.evaluate(&inputs)?;
//! ```

pub mod builtins;
pub mod convert;
pub mod declaration;
pub mod error;
pub mod interpreter;
pub mod loader;
pub mod node;
pub mod program;
pub mod source;

pub use declaration::{Declaration, DeclarationKind};
pub use error::ProgramError;
pub use interpreter::ProgramInterpreter;
pub use loader::load;
pub use node::{Block, Conditional, MethodDecl, Node, NodeRef};
pub use program::{EvalOptions, Evaluation, Program, Values, MAIN};
pub use source::{SourceElement, SourceNode};

#[cfg(test)]
mod tests;
