//! Building a [`Program`] from its source tree.
//!
//! Dispatch is by tag. Document level:
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `VARIABLES` `INPUTS` `OUTPUTS` `INTERNALS` `CONSTANTS` `METHODS` | grouping, may nest |
//! | `INPUT` `OUTPUT` `INTERNAL` `CONSTANT` | declaration: `name`, `type`, `value` or `default` |
//! | `METHOD` `MAIN` | method: `name` (default `MAIN`) |
//!
//! Method bodies hold `EVAL exec="..."`, `EXECUTE method="..."` and
//! `IF expr="..."` with a `THEN` and an optional `ELSE` child.
//!
//! A grouping element's `type` attribute becomes the subtype of the
//! declarations directly inside it (`<OUTPUTS type="STANDARD">`).

use pap_ir::Expr;
use tracing::debug;

use crate::declaration::{Declaration, DeclarationKind};
use crate::error::ProgramError;
use crate::node::{Block, Conditional, MethodDecl, Node};
use crate::program::{Program, MAIN};
use crate::source::SourceElement;

/// Load the program rooted at a `PAP` element.
pub fn load(root: &SourceElement) -> Result<Program, ProgramError> {
    if root.tag != "PAP" {
        return Err(ProgramError::NotAPap(root.tag.clone()));
    }
    let name = required(root, "name")?;
    let mut loader = Loader::default();
    loader.group(root)?;
    let program = Program::new(name, loader.declarations, loader.methods)?;
    debug!(
        program = name,
        declarations = program.declarations().len(),
        methods = program.methods().count(),
        "loaded PAP program"
    );
    Ok(program)
}

/// Parse the expression `text` found in a `tag` element.
pub(crate) fn parse_in(tag: &str, text: &str) -> Result<Expr, ProgramError> {
    pap_parse::parse(text).map_err(|source| ProgramError::Parse {
        tag: tag.to_owned(),
        text: text.to_owned(),
        source,
    })
}

fn required<'e>(element: &'e SourceElement, attribute: &str) -> Result<&'e str, ProgramError> {
    element
        .attribute(attribute)
        .ok_or_else(|| ProgramError::MissingAttribute {
            tag: element.tag.clone(),
            attribute: attribute.to_owned(),
        })
}

fn unexpected(element: &SourceElement, parent: &SourceElement) -> ProgramError {
    ProgramError::UnexpectedTag {
        tag: element.tag.clone(),
        parent: parent.tag.clone(),
    }
}

#[derive(Default)]
struct Loader {
    declarations: Vec<Declaration>,
    methods: Vec<MethodDecl>,
}

impl Loader {
    /// The document-level children of `parent`.
    fn group(&mut self, parent: &SourceElement) -> Result<(), ProgramError> {
        for (comment, element) in parent.documented_elements() {
            match element.tag.as_str() {
                "VARIABLES" | "INPUTS" | "OUTPUTS" | "INTERNALS" | "CONSTANTS" | "METHODS" => {
                    self.group(element)?;
                }
                "METHOD" | "MAIN" => {
                    let name = element.attribute("name").unwrap_or(MAIN);
                    let method = MethodDecl::new(name, statements(element)?)
                        .with_comment(comment.map(str::to_owned));
                    self.methods.push(method);
                }
                tag => match DeclarationKind::from_tag(tag) {
                    Some(kind) => {
                        let declaration = declaration(element, kind, parent.attribute("type"))?
                            .with_comment(comment.map(str::to_owned));
                        self.declarations.push(declaration);
                    }
                    None => return Err(unexpected(element, parent)),
                },
            }
        }
        Ok(())
    }
}

fn declaration(
    element: &SourceElement,
    kind: DeclarationKind,
    subtype: Option<&str>,
) -> Result<Declaration, ProgramError> {
    let mut declaration = Declaration::new(
        required(element, "name")?,
        kind,
        required(element, "type")?,
    );
    if let Some(subtype) = subtype {
        declaration = declaration.with_subtype(subtype);
    }
    // A blank attribute declares no initial value.
    let value = element
        .attribute("value")
        .or_else(|| element.attribute("default"))
        .filter(|text| !text.trim().is_empty());
    if let Some(text) = value {
        declaration = declaration.with_value(parse_in(&element.tag, text)?);
    }
    Ok(declaration)
}

/// The statements inside a method, `THEN` or `ELSE` element.
fn statements(parent: &SourceElement) -> Result<Block, ProgramError> {
    parent
        .elements()
        .map(|element| statement(element, parent))
        .collect::<Result<Vec<_>, _>>()
        .map(Block::new)
}

fn statement(element: &SourceElement, parent: &SourceElement) -> Result<Node, ProgramError> {
    match element.tag.as_str() {
        "EVAL" => parse_in(&element.tag, required(element, "exec")?).map(Node::Expr),
        "EXECUTE" => {
            let method = required(element, "method")?;
            parse_in(&element.tag, &format!("{method}()")).map(Node::Expr)
        }
        "IF" => conditional(element).map(Node::Conditional),
        _ => Err(unexpected(element, parent)),
    }
}

fn conditional(element: &SourceElement) -> Result<Conditional, ProgramError> {
    let text = required(element, "expr")?;
    let condition = parse_in(&element.tag, text)?;
    let mut then_branch = None;
    let mut else_branch = None;
    for branch in element.elements() {
        let slot = match branch.tag.as_str() {
            "THEN" => &mut then_branch,
            "ELSE" => &mut else_branch,
            _ => return Err(unexpected(branch, element)),
        };
        if slot.is_some() {
            return Err(unexpected(branch, element));
        }
        *slot = Some(statements(branch)?);
    }
    let Some(then_branch) = then_branch else {
        return Err(ProgramError::MissingThen {
            condition: text.to_owned(),
        });
    };
    Ok(Conditional::new(condition, then_branch, else_branch))
}
