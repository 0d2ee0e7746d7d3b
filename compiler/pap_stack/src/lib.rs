//! Recursion safety for the PAP parser and interpreters.
//!
//! Two independent guards live here:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand so that
//!   deeply nested expressions (`((((...))))`, long operator chains) never
//!   overflow it while being parsed or evaluated.
//! - [`CallDepth`] bounds the number of nested method invocations. PAP
//!   methods can call each other (and themselves); without a bound a
//!   self-recursive program would only stop once memory runs out.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack.
//! - **WASM targets**: passthrough, the runtime manages its own stack.

use thiserror::Error;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Default bound for nested method invocations.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Raised when entering one more call would exceed the configured limit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("recursion limit of {limit} nested calls exceeded while calling {name}")]
pub struct DepthExceeded {
    pub limit: usize,
    pub name: String,
}

/// Live stack of the method names currently being executed.
///
/// `None` as limit means unbounded (only the native stack guard applies).
#[derive(Clone, Debug, Default)]
pub struct CallDepth {
    frames: Vec<String>,
    limit: Option<usize>,
}

impl CallDepth {
    pub fn new(limit: Option<usize>) -> Self {
        CallDepth {
            frames: Vec::new(),
            limit,
        }
    }

    /// Enter a call to `name`. The frame is not recorded when the limit is hit.
    pub fn enter(&mut self, name: &str) -> Result<(), DepthExceeded> {
        if let Some(limit) = self.limit {
            if self.frames.len() >= limit {
                return Err(DepthExceeded {
                    limit,
                    name: name.to_owned(),
                });
            }
        }
        self.frames.push(name.to_owned());
        Ok(())
    }

    /// Leave the most recent call.
    pub fn leave(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallDepth::leave() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Names of the active calls, outermost first.
    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(String::as_str)
    }
}
