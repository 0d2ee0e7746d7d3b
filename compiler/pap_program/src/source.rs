//! Program source trees.
//!
//! PAP programs are published as XML. Reading XML is left to the host: it
//! hands over the document as a [`SourceElement`] tree, keeping comments
//! (they document declarations and methods) and text nodes.

use std::collections::BTreeMap;

/// An element with its attributes and children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceElement {
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<SourceNode>,
}

/// A child of an element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SourceNode {
    Element(SourceElement),
    Comment(String),
    Text(String),
}

impl SourceElement {
    pub fn new(tag: impl Into<String>) -> Self {
        SourceElement {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn child(mut self, element: SourceElement) -> Self {
        self.children.push(SourceNode::Element(element));
        self
    }

    #[must_use]
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.children.push(SourceNode::Comment(text.into()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(SourceNode::Text(text.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &SourceElement> {
        self.children.iter().filter_map(|node| match node {
            SourceNode::Element(element) => Some(element),
            SourceNode::Comment(_) | SourceNode::Text(_) => None,
        })
    }

    /// Child elements paired with the comment directly before them. Text
    /// between the comment and the element is skipped; another element is
    /// not.
    pub fn documented_elements(&self) -> impl Iterator<Item = (Option<&str>, &SourceElement)> {
        let mut comment = None;
        self.children.iter().filter_map(move |node| match node {
            SourceNode::Element(element) => Some((comment.take(), element)),
            SourceNode::Comment(text) => {
                comment = Some(text.trim());
                None
            }
            SourceNode::Text(_) => None,
        })
    }
}
