use std::cell::RefCell;
use std::fmt;

use bigdecimal::BigDecimal;
use rustc_hash::FxHashMap;

use crate::errors::{self, EvalError};
use crate::value::Value;

/// A value with named members, reached through `target.name`.
///
/// Members that are callables should be returned already bound to the
/// receiver, so that `o.add` evaluated now and called later still acts on `o`.
pub trait Object: fmt::Debug + fmt::Display {
    fn type_name(&self) -> &str;

    /// Look up a member; `None` if it does not exist.
    fn get(&self, name: &str) -> Option<Value>;

    /// Assign a member. Read-only unless overridden.
    fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        let _ = value;
        Err(errors::not_assignable(name, self.type_name()))
    }

    /// Numeric payload for objects wrapping a decimal.
    fn decimal(&self) -> Option<&BigDecimal> {
        None
    }
}

/// A plain mutable bag of named fields.
#[derive(Debug, Default)]
pub struct Record {
    fields: RefCell<FxHashMap<String, Value>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, name: &str, value: Value) -> Self {
        self.fields.borrow_mut().insert(name.to_owned(), value);
        self
    }
}

impl Object for Record {
    fn type_name(&self) -> &str {
        "record"
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        self.fields.borrow_mut().insert(name.to_owned(), value);
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.borrow();
        let mut names: Vec<_> = fields.keys().collect();
        names.sort();
        f.write_str("{")?;
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {}", fields[name])?;
        }
        f.write_str("}")
    }
}
