//! Detached, identity-free element trees.
//!
//! Builders assemble an `Element` first and only graft it into a document
//! once assembly succeeded, so a failed build never touches the document.
//! The same shape is used to compare subtrees by value.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub content: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Leaf element holding text.
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.content = Some(content.into());
        element
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Appends a text leaf only when `value` is non-empty.
    pub fn push_text(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = non_empty(value) {
            self.children.push(Self::text(name, value));
        }
    }

    /// Appends a wrapper only when it ended up with children or content.
    pub fn push_block(&mut self, block: Element) {
        if !block.is_empty() {
            self.children.push(block);
        }
    }

    /// True when there is neither content nor children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && non_empty(self.content.as_deref()).is_none()
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Descends through `path`, taking the first match at each level.
    pub fn descendant(&self, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |current, name| current.child(name))
    }
}

/// Treats `None`, `""` and whitespace-only values as absent.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
