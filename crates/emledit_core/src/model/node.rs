//! Tree node and node reference types.
//!
//! # Responsibility
//! - Define the node record stored in a document arena.
//! - Separate "create new" requests from references to stored nodes.
//!
//! # Invariants
//! - A `NodeId` is assigned once and never reused inside a document.
//! - The creation sentinel `"1"` never parses into `NodeRef::Existing`.

use super::scale::MeasurementScale;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identity of one node within a document.
pub type NodeId = Uuid;

/// Row key that requests creation of a new entity instead of an edit.
pub const CREATE_SENTINEL: &str = "1";

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) content: Option<String>,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Element name, e.g. `dataTable`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Ordered child identities.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Owning parent. `None` for the root and for detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Direction for sibling reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// One slot earlier.
    Left,
    /// One slot later.
    Right,
}

/// Reference carried between list and detail pages.
///
/// `New` may carry the measurement scale chosen by an "Add Attribute" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    New(Option<MeasurementScale>),
    Existing(NodeId),
}

impl NodeRef {
    /// Parses a row key or page parameter.
    ///
    /// # Errors
    /// - Returns `NodeRefError` when the value is neither the sentinel nor a
    ///   node identity.
    pub fn parse(raw: &str) -> Result<Self, NodeRefError> {
        let trimmed = raw.trim();
        if trimmed == CREATE_SENTINEL {
            return Ok(Self::New(None));
        }
        Uuid::parse_str(trimmed)
            .map(Self::Existing)
            .map_err(|_| NodeRefError(trimmed.to_string()))
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }

    /// Stored identity, `None` for the sentinel.
    pub fn existing(&self) -> Option<NodeId> {
        match self {
            Self::Existing(id) => Some(*id),
            Self::New(_) => None,
        }
    }

    /// Scale requested by an "Add" action, if any.
    pub fn requested_scale(&self) -> Option<MeasurementScale> {
        match self {
            Self::New(scale) => *scale,
            Self::Existing(_) => None,
        }
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New(_) => write!(f, "{CREATE_SENTINEL}"),
            Self::Existing(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for NodeRef {
    type Err = NodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A row key that is neither the sentinel nor a node identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRefError(pub String);

impl Display for NodeRefError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid node reference `{}`", self.0)
    }
}

impl Error for NodeRefError {}

#[cfg(test)]
mod tests {
    use super::{NodeRef, CREATE_SENTINEL};
    use uuid::Uuid;

    #[test]
    fn sentinel_parses_as_new() {
        assert_eq!(NodeRef::parse(CREATE_SENTINEL).unwrap(), NodeRef::New(None));
        assert_eq!(NodeRef::parse(" 1 ").unwrap(), NodeRef::New(None));
    }

    #[test]
    fn uuid_parses_as_existing_and_displays_back() {
        let id = Uuid::new_v4();
        let parsed: NodeRef = id.to_string().parse().unwrap();
        assert_eq!(parsed, NodeRef::Existing(id));
        assert_eq!(parsed.to_string(), id.to_string());
    }

    #[test]
    fn garbage_is_rejected() {
        let err = NodeRef::parse("12").unwrap_err();
        assert!(err.to_string().contains("12"));
    }
}
