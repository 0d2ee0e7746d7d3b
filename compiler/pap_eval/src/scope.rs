//! Variable scope.
//!
//! PAP programs have a single flat namespace: every variable, constant,
//! method and built-in lives in one scope that is shared by the whole run.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Rendered scope contents, sorted by name, for diagnostics.
pub type ScopeSnapshot = BTreeMap<String, String>;

/// Mutable name to value mapping for one evaluation run.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bind `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn snapshot(&self) -> ScopeSnapshot {
        self.iter()
            .map(|(name, value)| (name.to_owned(), value.to_string()))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Scope {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        Scope {
            bindings: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
