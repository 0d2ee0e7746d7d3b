//! Evaluation traces.
//!
//! A trace is the call tree of an evaluation: one item per evaluated node
//! holding the node, its result and the items of the nodes it evaluated in
//! turn. Tax calculations are audited by reading this tree, so it records
//! exactly what happened, including nodes that failed (they keep no value).
//!
//! [`Tracer`] builds the tree with a stack: the evaluator calls
//! [`Tracer::enter`] before evaluating a node and [`Tracer::exit`] after,
//! and each finished item is attached to the item below it on the stack.

use std::fmt;

use crate::errors::{self, EvalError, EvalResult};
use crate::value::Value;

/// Fixed roles a child item can take instead of being an ordinary child.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceSlot {
    /// The condition of a branch.
    Condition,
}

impl fmt::Display for TraceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceSlot::Condition => f.write_str("condition"),
        }
    }
}

/// One evaluated node.
#[derive(Clone, Debug)]
pub struct TraceItem<N> {
    node: N,
    value: Option<Value>,
    children: Vec<TraceItem<N>>,
    condition: Option<Box<TraceItem<N>>>,
}

impl<N> TraceItem<N> {
    fn new(node: N) -> Self {
        TraceItem {
            node,
            value: None,
            children: Vec::new(),
            condition: None,
        }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    /// The node's result, `None` if its evaluation failed.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Items of the nodes evaluated on behalf of this one, in order.
    pub fn children(&self) -> &[TraceItem<N>] {
        &self.children
    }

    pub fn condition(&self) -> Option<&TraceItem<N>> {
        self.condition.as_deref()
    }
}

impl<N: fmt::Display> TraceItem<N> {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        write!(f, "{:indent$}{label}{}", "", self.node, indent = depth * 2)?;
        match &self.value {
            Some(value) => writeln!(f, " -> {value}")?,
            None => writeln!(f, " -> failed")?,
        }
        if let Some(condition) = &self.condition {
            condition.fmt_indented(f, depth + 1, "condition: ")?;
        }
        for child in &self.children {
            child.fmt_indented(f, depth + 1, "")?;
        }
        Ok(())
    }
}

/// Indented `node -> value` listing of the item and its descendants.
impl<N: fmt::Display> fmt::Display for TraceItem<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0, "")
    }
}

/// A finished trace: the items of the top-level evaluations.
#[derive(Clone, Debug)]
pub struct Trace<N> {
    roots: Vec<TraceItem<N>>,
}

impl<N> Trace<N> {
    pub fn roots(&self) -> &[TraceItem<N>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first, pre-order walk over every item, conditions before
    /// children.
    pub fn items(&self) -> impl Iterator<Item = &TraceItem<N>> {
        let mut pending: Vec<&TraceItem<N>> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let item = pending.pop()?;
            pending.extend(item.children.iter().rev());
            pending.extend(item.condition.as_deref());
            Some(item)
        })
    }
}

impl<N: fmt::Display> fmt::Display for Trace<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in &self.roots {
            write!(f, "{root}")?;
        }
        Ok(())
    }
}

struct Frame<N> {
    item: TraceItem<N>,
    slot: Option<TraceSlot>,
}

/// Stack-based trace recorder.
pub struct Tracer<N> {
    stack: Vec<Frame<N>>,
    roots: Vec<TraceItem<N>>,
}

impl<N> Default for Tracer<N> {
    fn default() -> Self {
        Tracer {
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl<N> Tracer<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording `node` as an ordinary child of the current item.
    pub fn enter(&mut self, node: N) {
        self.enter_slot(node, None);
    }

    /// Start recording `node`, attaching it to `slot` of the current item
    /// when it finishes.
    pub fn enter_slot(&mut self, node: N, slot: Option<TraceSlot>) {
        self.stack.push(Frame {
            item: TraceItem::new(node),
            slot,
        });
    }

    /// Finish the innermost item with the outcome of its evaluation.
    ///
    /// Fails if there is no open item or the item's slot on its parent is
    /// already taken; both mean enter/exit calls went out of step.
    pub fn exit(&mut self, result: &EvalResult) -> Result<(), EvalError> {
        let Some(Frame { mut item, slot }) = self.stack.pop() else {
            return Err(errors::internal("trace exit without a matching enter"));
        };
        item.value = result.as_ref().ok().cloned();
        let Some(parent) = self.stack.last_mut() else {
            self.roots.push(item);
            return Ok(());
        };
        match slot {
            None => parent.item.children.push(item),
            Some(TraceSlot::Condition) => {
                if parent.item.condition.is_some() {
                    return Err(errors::internal(format!(
                        "trace slot `{}` is already set",
                        TraceSlot::Condition
                    )));
                }
                parent.item.condition = Some(Box::new(item));
            }
        }
        Ok(())
    }

    /// Number of items still open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Close any items left open and return the trace.
    pub fn finish(mut self) -> Trace<N> {
        while let Some(Frame { item, .. }) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.item.children.push(item),
                None => self.roots.push(item),
            }
        }
        Trace { roots: self.roots }
    }
}
