use std::fmt;
use std::rc::Rc;

use crate::errors::EvalResult;
use crate::value::Value;

type NativeBody = dyn Fn(&[Value]) -> EvalResult;

/// Something a call expression can invoke.
#[derive(Clone)]
pub enum Function {
    /// Built-in implemented in Rust. Members of built-in objects arrive here
    /// already bound to their receiver.
    Native(NativeFn),
    /// A method declared by the program, run by the program interpreter.
    Method(MethodRef),
}

/// A named Rust closure.
#[derive(Clone)]
pub struct NativeFn {
    name: Rc<str>,
    body: Rc<NativeBody>,
}

impl NativeFn {
    pub fn new(name: &str, body: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        NativeFn {
            name: Rc::from(name),
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.body)(args)
    }
}

/// Handle to a declared method.
///
/// `id` is assigned by the interpreter that registered the method and is only
/// meaningful to that interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodRef {
    name: Rc<str>,
    id: usize,
}

impl MethodRef {
    pub fn new(name: &str, id: usize) -> Self {
        MethodRef {
            name: Rc::from(name),
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Native(a), Function::Native(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(&a.body), Rc::as_ptr(&b.body))
            }
            (Function::Method(a), Function::Method(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Native(native) => write!(f, "native {}()", native.name()),
            Function::Method(method) => write!(f, "method {}()", method.name()),
        }
    }
}
