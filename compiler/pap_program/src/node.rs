//! Structured program nodes.
//!
//! A PAP method body is a tree of blocks, conditionals and expression
//! statements. Method declarations are nodes too: evaluating one registers
//! the method in scope.

use std::fmt;

use pap_ir::Expr;

/// One statement of a program body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Expr(Expr),
    Block(Block),
    Conditional(Conditional),
    Method(MethodDecl),
}

/// Statements run in order; the value of the last one is the block's value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    items: Vec<Node>,
}

/// `if (condition) { then } else { otherwise }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conditional {
    condition: Expr,
    then_branch: Block,
    else_branch: Option<Block>,
}

/// A named, parameterless method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    name: String,
    body: Block,
    comment: Option<String>,
}

impl Block {
    pub fn new(items: Vec<Node>) -> Self {
        Block { items }
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Conditional {
    pub fn new(condition: Expr, then_branch: Block, else_branch: Option<Block>) -> Self {
        Conditional {
            condition,
            then_branch,
            else_branch,
        }
    }

    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    pub fn then_branch(&self) -> &Block {
        &self.then_branch
    }

    pub fn else_branch(&self) -> Option<&Block> {
        self.else_branch.as_ref()
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, body: Block) -> Self {
        MethodDecl {
            name: name.into(),
            body,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Block {
        &self.body
    }

    /// Documentation comment from the program source.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Borrowed reference to any node, as recorded in traces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Expr(&'a Expr),
    Block(&'a Block),
    Conditional(&'a Conditional),
    Method(&'a MethodDecl),
}

impl<'a> NodeRef<'a> {
    pub fn as_expr(self) -> Option<&'a Expr> {
        match self {
            NodeRef::Expr(expr) => Some(expr),
            _ => None,
        }
    }
}

/// One-line label; full bodies are left out so traces stay readable.
impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Expr(expr) => write!(f, "{expr}"),
            NodeRef::Block(block) => write!(f, "{{ {} statement(s) }}", block.items.len()),
            NodeRef::Conditional(conditional) => write!(f, "if ({})", conditional.condition),
            NodeRef::Method(method) => write!(f, "function {}()", method.name),
        }
    }
}

// Pseudocode rendering

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    match node {
        Node::Expr(expr) => write!(f, "{expr};"),
        Node::Block(block) => write_block(f, block, depth),
        Node::Conditional(conditional) => {
            write!(f, "if ({}) ", conditional.condition)?;
            write_block(f, &conditional.then_branch, depth)?;
            if let Some(otherwise) = &conditional.else_branch {
                f.write_str(" else ")?;
                write_block(f, otherwise, depth)?;
            }
            Ok(())
        }
        Node::Method(method) => {
            write!(f, "function {}() ", method.name)?;
            write_block(f, &method.body, depth)
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
    if block.items.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{\n")?;
    for item in &block.items {
        write!(f, "{:indent$}", "", indent = (depth + 1) * 2)?;
        write_node(f, item, depth + 1)?;
        f.write_str("\n")?;
    }
    write!(f, "{:indent$}}}", "", indent = depth * 2)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

impl fmt::Display for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ({}) ", self.condition)?;
        write_block(f, &self.then_branch, 0)?;
        if let Some(otherwise) = &self.else_branch {
            f.write_str(" else ")?;
            write_block(f, otherwise, 0)?;
        }
        Ok(())
    }
}

impl fmt::Display for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}() ", self.name)?;
        write_block(f, &self.body, 0)
    }
}
