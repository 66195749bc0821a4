//! Arena-backed document tree with an owned identity registry.
//!
//! # Responsibility
//! - Own every node of one document and resolve identities to nodes.
//! - Provide the structural edits used by list and detail flows: schema
//!   ordered insertion, removal, replacement and sibling reordering.
//!
//! # Invariants
//! - Each attached node has exactly one parent, and that parent lists it once.
//! - The root never has a parent and cannot be detached or replaced.
//! - Detached subtrees stay in the registry until discarded.
//! - Identities are unique within one document.

use super::element::Element;
use super::node::{Node, NodeId, NodeRef, Shift};
use super::rule::child_insert_index;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Result type used by tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from structural tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Identity is not in this document's registry.
    NodeNotFound(NodeId),
    /// `child` is not a direct child of `parent`.
    NotAChild { parent: NodeId, child: NodeId },
    /// Node must be detached before it can be attached elsewhere.
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    CycleDetected { node: NodeId, parent: NodeId },
    /// The document root cannot be moved, replaced or removed.
    RootImmutable(NodeId),
    /// Two nodes claim the same identity while loading.
    DuplicateId(NodeId),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
            Self::NotAChild { parent, child } => {
                write!(f, "node {child} is not a child of {parent}")
            }
            Self::AlreadyAttached(id) => write!(f, "node is already attached: {id}"),
            Self::CycleDetected { node, parent } => {
                write!(f, "attaching {node} under {parent} would create a cycle")
            }
            Self::RootImmutable(id) => write!(f, "document root cannot be detached: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate node identity: {id}"),
        }
    }
}

impl Error for TreeError {}

/// One loaded EML document.
#[derive(Debug, Clone)]
pub struct Document {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
}

impl Document {
    /// Creates a document holding only a root element.
    pub fn new(root_name: &str) -> Self {
        let root = Uuid::new_v4();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root, root_name));
        Self { root, nodes }
    }

    /// Builds a document from an element tree, assigning fresh identities.
    pub fn from_element(element: &Element) -> Self {
        let mut doc = Self {
            root: Uuid::nil(),
            nodes: HashMap::new(),
        };
        doc.root = doc.graft(element);
        doc
    }

    /// Rebuilds a document from pre-identified nodes.
    ///
    /// Callers pass nodes with `children` filled in; parents are derived.
    pub(crate) fn from_nodes(root: NodeId, nodes: Vec<Node>) -> TreeResult<Self> {
        let mut registry = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id;
            if registry.insert(id, node).is_some() {
                return Err(TreeError::DuplicateId(id));
            }
        }
        if !registry.contains_key(&root) {
            return Err(TreeError::NodeNotFound(root));
        }
        let links: Vec<(NodeId, NodeId)> = registry
            .values()
            .flat_map(|node| node.children.iter().map(move |child| (node.id, *child)))
            .collect();
        for (parent, child) in links {
            let node = registry
                .get_mut(&child)
                .ok_or(TreeError::NodeNotFound(child))?;
            if node.parent.is_some() || child == root {
                return Err(TreeError::AlreadyAttached(child));
            }
            node.parent = Some(parent);
        }
        Ok(Self {
            root,
            nodes: registry,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the registry, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolves an identity through the registry.
    pub fn resolve(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Resolves a page reference. The creation sentinel never resolves.
    pub fn resolve_ref(&self, node_ref: NodeRef) -> Option<&Node> {
        node_ref.existing().and_then(|id| self.resolve(id))
    }

    pub(crate) fn node(&self, id: NodeId) -> TreeResult<&Node> {
        self.nodes.get(&id).ok_or(TreeError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(TreeError::NodeNotFound(id))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.resolve(id).map(Node::name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.resolve(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.resolve(id).map(Node::children).unwrap_or(&[])
    }

    /// Creates a node, attaching it under `parent` at the schema position.
    pub fn create_node(&mut self, name: &str, parent: Option<NodeId>) -> TreeResult<NodeId> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        let id = Uuid::new_v4();
        self.nodes.insert(id, Node::new(id, name));
        if let Some(parent) = parent {
            self.add_child(parent, id)?;
        }
        Ok(id)
    }

    pub fn set_content(&mut self, id: NodeId, content: Option<String>) -> TreeResult<()> {
        self.node_mut(id)?.content = content;
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> TreeResult<()> {
        self.node_mut(id)?.attributes.insert(key.into(), value.into());
        Ok(())
    }

    /// Renames a node in place, keeping its identity and children.
    pub fn rename(&mut self, id: NodeId, name: &str) -> TreeResult<()> {
        self.node_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// First child named `name`.
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.name(*child) == Some(name))
    }

    /// All children named `name`, in document order.
    pub fn find_all_children(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.name(*child) == Some(name))
            .collect()
    }

    /// Follows `path` from `id`, taking the first matching child per step.
    pub fn find_descendant(&self, id: NodeId, path: &[&str]) -> Option<NodeId> {
        path.iter()
            .try_fold(id, |current, name| self.find_child(current, name))
    }

    /// Text content of the node at `path` below `id`.
    pub fn descendant_text(&self, id: NodeId, path: &[&str]) -> Option<&str> {
        self.find_descendant(id, path)
            .and_then(|node| self.resolve(node))
            .and_then(Node::content)
    }

    /// True when `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Attaches a detached node at the schema-ordered index.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let index = self.insert_index(parent, child)?;
        self.insert_child_at(parent, child, index)
    }

    fn insert_index(&self, parent: NodeId, child: NodeId) -> TreeResult<usize> {
        let parent_node = self.node(parent)?;
        let child_name = self.node(child)?.name.as_str();
        let siblings = parent_node
            .children
            .iter()
            .filter_map(|sibling| self.name(*sibling));
        Ok(child_insert_index(&parent_node.name, child_name, siblings)
            .unwrap_or(parent_node.children.len()))
    }

    fn insert_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> TreeResult<()> {
        if child == self.root {
            return Err(TreeError::RootImmutable(child));
        }
        if self.node(child)?.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::CycleDetected {
                node: child,
                parent,
            });
        }
        let parent_node = self.node_mut(parent)?;
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detaches `child` from `parent`. The subtree stays in the registry.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let index = self.child_index(parent, child)?;
        self.node_mut(parent)?.children.remove(index);
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    /// Detaches a node from whatever parent owns it.
    pub fn detach(&mut self, id: NodeId) -> TreeResult<()> {
        if id == self.root {
            return Err(TreeError::RootImmutable(id));
        }
        match self.node(id)?.parent {
            Some(parent) => self.remove_child(parent, id),
            None => Ok(()),
        }
    }

    /// Detaches a subtree and drops every node in it from the registry.
    ///
    /// Returns the number of nodes discarded.
    pub fn discard(&mut self, id: NodeId) -> TreeResult<usize> {
        self.detach(id)?;
        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Puts detached `new` at `old`'s position and detaches `old`.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> TreeResult<()> {
        let index = self.child_index(parent, old)?;
        self.remove_child(parent, old)?;
        if let Err(err) = self.insert_child_at(parent, new, index) {
            // Put the old node back so a failed replace leaves the tree as it was.
            self.insert_child_at(parent, old, index)?;
            return Err(err);
        }
        Ok(())
    }

    /// Moves `child` one slot among siblings sharing its name.
    ///
    /// Returns `false` when the node is already first (left) or last (right).
    pub fn shift(&mut self, parent: NodeId, child: NodeId, direction: Shift) -> TreeResult<bool> {
        let index = self.child_index(parent, child)?;
        let name = self.node(child)?.name.clone();
        let siblings = &self.node(parent)?.children;
        let target = match direction {
            Shift::Left => siblings[..index]
                .iter()
                .rposition(|sibling| self.name(*sibling) == Some(name.as_str())),
            Shift::Right => siblings[index + 1..]
                .iter()
                .position(|sibling| self.name(*sibling) == Some(name.as_str()))
                .map(|offset| index + 1 + offset),
        };
        match target {
            Some(target) => {
                self.node_mut(parent)?.children.swap(index, target);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Detaches `child` and reattaches it under `new_parent` at the schema
    /// position.
    pub fn move_to(&mut self, child: NodeId, new_parent: NodeId) -> TreeResult<()> {
        if self.is_ancestor_or_self(child, new_parent) {
            return Err(TreeError::CycleDetected {
                node: child,
                parent: new_parent,
            });
        }
        self.detach(child)?;
        self.add_child(new_parent, child)
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> TreeResult<usize> {
        self.node(child)?;
        self.node(parent)?
            .children
            .iter()
            .position(|candidate| *candidate == child)
            .ok_or(TreeError::NotAChild { parent, child })
    }

    /// Materializes a detached element tree with fresh identities.
    pub fn graft(&mut self, element: &Element) -> NodeId {
        let id = Uuid::new_v4();
        let mut node = Node::new(id, element.name.clone());
        node.content = element.content.clone();
        node.attributes = element.attributes.clone();
        self.nodes.insert(id, node);
        for child in &element.children {
            let child_id = self.graft(child);
            if let Some(child_node) = self.nodes.get_mut(&child_id) {
                child_node.parent = Some(id);
            }
            if let Some(parent_node) = self.nodes.get_mut(&id) {
                parent_node.children.push(child_id);
            }
        }
        id
    }

    /// Copies a subtree out as a value, dropping identities.
    pub fn to_element(&self, id: NodeId) -> Option<Element> {
        let node = self.resolve(id)?;
        Some(Element {
            name: node.name.clone(),
            content: node.content.clone(),
            attributes: node.attributes.clone(),
            children: node
                .children
                .iter()
                .filter_map(|child| self.to_element(*child))
                .collect(),
        })
    }

    /// Identities of `id` and all of its descendants, in document order.
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut ordered = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.resolve(current) {
                ordered.push(current);
                stack.extend(node.children.iter().rev());
            }
        }
        ordered
    }
}
