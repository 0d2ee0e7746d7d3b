//! Loaded programs and their evaluation.

use std::fmt;

use pap_eval::{ArithmeticContext, Evaluator, Scope, Trace, Tracer, Value};
use pap_stack::DEFAULT_MAX_CALL_DEPTH;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::builtins;
use crate::convert;
use crate::declaration::{Declaration, DeclarationKind};
use crate::error::ProgramError;
use crate::interpreter::ProgramInterpreter;
use crate::loader::parse_in;
use crate::node::{Block, MethodDecl, Node, NodeRef};

/// Name of the method a run starts with.
pub const MAIN: &str = "MAIN";

/// Variable values by name, for inputs, outputs and defaults.
pub type Values = FxHashMap<String, Value>;

/// Settings for one evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    /// Scale and rounding of plain `/` division.
    pub context: ArithmeticContext,
    /// Bound on nested method calls, `None` for no bound.
    pub max_call_depth: Option<usize>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            context: ArithmeticContext::default(),
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }
}

/// Outcome of a traced run. The trace covers everything evaluated up to the
/// point of failure when the run fails.
#[derive(Debug)]
pub struct Evaluation<'p> {
    pub outputs: Result<Values, ProgramError>,
    pub trace: Trace<NodeRef<'p>>,
}

/// A PAP program: variable declarations and methods, one of them `MAIN`.
///
/// Immutable once built; every run gets a fresh scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    name: String,
    declarations: Vec<Declaration>,
    /// The method declarations followed by `MAIN()`.
    body: Block,
}

impl Program {
    /// Fails on duplicate variable or method names and when there is no
    /// `MAIN` method.
    pub fn new(
        name: impl Into<String>,
        declarations: Vec<Declaration>,
        methods: Vec<MethodDecl>,
    ) -> Result<Self, ProgramError> {
        let mut seen = FxHashSet::default();
        if let Some(duplicate) = declarations.iter().find(|d| !seen.insert(d.name())) {
            return Err(ProgramError::DuplicateVariable(duplicate.name().to_owned()));
        }
        let mut seen = FxHashSet::default();
        if let Some(duplicate) = methods.iter().find(|m| !seen.insert(m.name())) {
            return Err(ProgramError::DuplicateMethod(duplicate.name().to_owned()));
        }
        if !seen.contains(MAIN) {
            return Err(ProgramError::MissingMain);
        }
        let main_call = parse_in(MAIN, &format!("{MAIN}()"))?;
        let mut items: Vec<Node> = methods.into_iter().map(Node::Method).collect();
        items.push(Node::Expr(main_call));
        Ok(Program {
            name: name.into(),
            declarations,
            body: Block::new(items),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declarations, in declared order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.body.items().iter().filter_map(|node| match node {
            Node::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn inputs(&self) -> Result<Vec<&Declaration>, ProgramError> {
        self.declarations_of(DeclarationKind::Input)
    }

    pub fn outputs(&self) -> Result<Vec<&Declaration>, ProgramError> {
        self.declarations_of(DeclarationKind::Output)
    }

    /// Declarations matching `selector`: a kind (`OUTPUT`) or a kind and
    /// subtype (`OUTPUT:STANDARD`).
    pub fn select(&self, selector: &str) -> Vec<&Declaration> {
        self.declarations.iter().filter(|d| d.matches(selector)).collect()
    }

    fn declarations_of(&self, kind: DeclarationKind) -> Result<Vec<&Declaration>, ProgramError> {
        let found = self.select(kind.as_str());
        if found.is_empty() {
            return Err(ProgramError::NoDeclarations(kind));
        }
        Ok(found)
    }

    /// Initial values of all declarations that have one. Declarations are
    /// evaluated in order, so later ones see earlier ones.
    pub fn defaults(&self) -> Result<Values, ProgramError> {
        let options = EvalOptions::default();
        let mut scope = builtins::scope(options.context);
        let mut interpreter = ProgramInterpreter::new(&mut scope, &options);
        let mut values = Values::default();
        for declaration in &self.declarations {
            if declaration.value().is_some() {
                let value = initialize(&mut interpreter, declaration)?;
                values.insert(declaration.name().to_owned(), value);
            }
        }
        Ok(values)
    }

    /// Convert raw input text by each input's declared type. Inputs without
    /// text, or with blank text, are left out.
    pub fn create_values<'r>(
        &self,
        raw: impl IntoIterator<Item = (&'r str, &'r str)>,
    ) -> Result<Values, ProgramError> {
        let raw: FxHashMap<&str, &str> = raw.into_iter().collect();
        let context = ArithmeticContext::default();
        let mut values = Values::default();
        for input in self.inputs()? {
            let name = input.name();
            let Some(text) = raw.get(name).filter(|text| !text.trim().is_empty()) else {
                debug!(input = name, "no value given, skipping");
                continue;
            };
            let Some(to_value) = convert::converter(input.value_type()) else {
                return Err(ProgramError::NoConverter {
                    name: name.to_owned(),
                    value_type: input.value_type().to_owned(),
                });
            };
            let value = to_value(text, context).map_err(|message| ProgramError::Conversion {
                name: name.to_owned(),
                message,
            })?;
            values.insert(name.to_owned(), value);
        }
        Ok(values)
    }

    /// Run the program with `inputs` and return its outputs.
    pub fn evaluate(&self, inputs: &Values) -> Result<Values, ProgramError> {
        self.evaluate_with(inputs, &EvalOptions::default())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(program = %self.name))]
    pub fn evaluate_with(
        &self,
        inputs: &Values,
        options: &EvalOptions,
    ) -> Result<Values, ProgramError> {
        let mut scope = builtins::scope(options.context);
        let mut interpreter = ProgramInterpreter::new(&mut scope, options);
        self.run(&mut interpreter, inputs)
    }

    /// Like [`Program::evaluate`], also recording what was evaluated.
    pub fn evaluate_traced(&self, inputs: &Values) -> Evaluation<'_> {
        self.evaluate_traced_with(inputs, &EvalOptions::default())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(program = %self.name))]
    pub fn evaluate_traced_with(&self, inputs: &Values, options: &EvalOptions) -> Evaluation<'_> {
        let mut scope = builtins::scope(options.context);
        let mut interpreter = ProgramInterpreter::new(&mut scope, options).traced();
        let outputs = self.run(&mut interpreter, inputs);
        let trace = interpreter
            .finish()
            .unwrap_or_else(|| Tracer::new().finish());
        Evaluation { outputs, trace }
    }

    fn run<'p>(
        &'p self,
        interpreter: &mut ProgramInterpreter<'p, '_>,
        inputs: &Values,
    ) -> Result<Values, ProgramError> {
        for declaration in &self.declarations {
            if interpreter.scope().contains(declaration.name()) {
                return Err(ProgramError::DuplicateVariable(declaration.name().to_owned()));
            }
            initialize(interpreter, declaration)?;
        }
        for (name, value) in inputs {
            interpreter.scope_mut().set(name.as_str(), value.clone());
        }
        interpreter.eval_block(&self.body)?;
        self.collect_outputs(interpreter.scope())
    }

    fn collect_outputs(&self, scope: &Scope) -> Result<Values, ProgramError> {
        self.select(DeclarationKind::Output.as_str())
            .into_iter()
            .map(|output| match scope.get(output.name()) {
                Some(value) if !value.is_void() => Ok((output.name().to_owned(), value.clone())),
                _ => Err(ProgramError::MissingOutput(output.name().to_owned())),
            })
            .collect()
    }
}

/// Evaluate a declaration's initial value into scope. Declarations without
/// one start out void.
fn initialize<'p>(
    interpreter: &mut ProgramInterpreter<'p, '_>,
    declaration: &'p Declaration,
) -> Result<Value, ProgramError> {
    let value = match declaration.value() {
        Some(expr) => {
            trace!(variable = declaration.name(), "initializing");
            interpreter
                .eval(expr)
                .map_err(|source| ProgramError::Declaration {
                    name: declaration.name().to_owned(),
                    source,
                })?
        }
        None => Value::Void,
    };
    interpreter.scope_mut().set(declaration.name(), value.clone());
    Ok(value)
}

/// Pseudocode: the declarations, then the body.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// PAP {}", self.name)?;
        for declaration in &self.declarations {
            writeln!(f, "{declaration}")?;
        }
        write!(f, "{}", self.body)
    }
}
