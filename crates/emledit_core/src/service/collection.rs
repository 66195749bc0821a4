//! Where each list lives in the document.
//!
//! # Responsibility
//! - Name a list page as `(entity kind, scope)`.
//! - Resolve the list's container node, and create it (with any missing
//!   ancestors) when the first entity is inserted.
//!
//! # Invariants
//! - Document-level access containers are created with the configured
//!   `access` attributes.
//! - A collection scoped to a not-yet-created data entity has no rows; the
//!   first insertion creates a blank entity of that kind under `dataset`.
//! - Singleton kinds (`project`, `publisher`) never gain a second node: a
//!   new-node request resolves to the existing one.
//! - Personnel are only inserted under an existing `project`.

use super::{SessionError, SessionResult};
use crate::builder::access::apply_access_defaults;
use crate::builder::attribute::scale_of;
use crate::builder::{EntityKind, PartyRole};
use crate::config::AccessDefaults;
use crate::model::document::Document;
use crate::model::names;
use crate::model::node::{NodeId, NodeRef};
use crate::model::path::{ensure_path, find_path, Step};

const DATASET_PATH: &[Step] = &[Step::Named(names::DATASET)];
const PERSONNEL_PATH: &[Step] = &[Step::Named(names::DATASET), Step::Named(names::PROJECT)];
const DATASET_COVERAGE_PATH: &[Step] =
    &[Step::Named(names::DATASET), Step::Named(names::COVERAGE)];
const DATASET_METHODS_PATH: &[Step] = &[Step::Named(names::DATASET), Step::Named(names::METHODS)];
const KEYWORD_SET_PATH: &[Step] = &[Step::Named(names::DATASET), Step::Named(names::KEYWORD_SET)];
const DOCUMENT_ACCESS_PATH: &[Step] = &[Step::Named(names::ACCESS)];

const ENTITY_COVERAGE_PATH: &[Step] = &[Step::Named(names::COVERAGE)];
const ENTITY_METHODS_PATH: &[Step] = &[Step::Named(names::METHODS)];
const ENTITY_ACCESS_PATH: &[Step] = &[
    Step::Named(names::PHYSICAL),
    Step::Named(names::DISTRIBUTION),
    Step::Named(names::ACCESS),
];
const ATTRIBUTE_LIST_PATH: &[Step] = &[Step::Named(names::ATTRIBUTE_LIST)];

const ENUMERATED_DOMAIN_PATH: &[Step] = &[
    Step::Named(names::MEASUREMENT_SCALE),
    Step::AnyOf(&[names::NOMINAL, names::ORDINAL]),
    Step::Named(names::NON_NUMERIC_DOMAIN),
    Step::Named(names::ENUMERATED_DOMAIN),
];

/// Data table or other entity that owns a nested list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityContext {
    /// `DataTable` or `OtherEntity`.
    pub kind: EntityKind,
    pub node: NodeRef,
}

/// Subtree a list is rooted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Dataset,
    Entity(EntityContext),
    Attribute {
        entity: EntityContext,
        attribute: NodeId,
    },
}

/// One list page: an entity kind within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub kind: EntityKind,
    pub scope: Scope,
}

impl Collection {
    /// Dataset-level collection of `kind`.
    pub fn dataset(kind: EntityKind) -> Self {
        Self {
            kind,
            scope: Scope::Dataset,
        }
    }

    /// Collection of `kind` nested in a data entity.
    pub fn in_entity(kind: EntityKind, entity: EntityContext) -> Self {
        Self {
            kind,
            scope: Scope::Entity(entity),
        }
    }

    /// Code definitions of one attribute.
    pub fn codes(entity: EntityContext, attribute: NodeId) -> Self {
        Self {
            kind: EntityKind::CodeDefinition,
            scope: Scope::Attribute { entity, attribute },
        }
    }

    /// Owning data entity, for nested collections.
    pub fn entity(&self) -> Option<EntityContext> {
        match self.scope {
            Scope::Dataset => None,
            Scope::Entity(entity) | Scope::Attribute { entity, .. } => Some(entity),
        }
    }

    /// Container path below the scope's anchor node.
    ///
    /// # Errors
    /// - `InvalidRequest` when `kind` has no list in this scope.
    pub fn container_path(&self) -> SessionResult<&'static [Step]> {
        use EntityKind::*;
        let path = match (self.kind, self.scope) {
            (DataTable | OtherEntity | Project, Scope::Dataset) => DATASET_PATH,
            (Party(PartyRole::Personnel), Scope::Dataset) => PERSONNEL_PATH,
            (Party(_), Scope::Dataset) => DATASET_PATH,
            (GeographicCoverage | TemporalCoverage | TaxonomicCoverage, Scope::Dataset) => {
                DATASET_COVERAGE_PATH
            }
            (MethodStep, Scope::Dataset) => DATASET_METHODS_PATH,
            (Keyword, Scope::Dataset) => KEYWORD_SET_PATH,
            (AccessRule, Scope::Dataset) => DOCUMENT_ACCESS_PATH,
            (GeographicCoverage | TemporalCoverage | TaxonomicCoverage, Scope::Entity(_)) => {
                ENTITY_COVERAGE_PATH
            }
            (MethodStep, Scope::Entity(_)) => ENTITY_METHODS_PATH,
            (AccessRule, Scope::Entity(_)) => ENTITY_ACCESS_PATH,
            (Attribute, Scope::Entity(_)) => ATTRIBUTE_LIST_PATH,
            (CodeDefinition, Scope::Attribute { .. }) => ENUMERATED_DOMAIN_PATH,
            (kind, scope) => {
                return Err(SessionError::InvalidRequest(format!(
                    "no `{}` list in scope {scope:?}",
                    kind.element_name()
                )))
            }
        };
        Ok(path)
    }

    /// Node the container path starts from; `None` while the owning entity
    /// does not exist yet.
    ///
    /// # Errors
    /// - `NotFound` when an existing scope node is missing or of another
    ///   kind.
    /// - `InvalidRequest` when a code list is requested for an attribute
    ///   that is not nominal or ordinal.
    pub fn anchor(&self, doc: &Document) -> SessionResult<Option<NodeId>> {
        match self.scope {
            Scope::Dataset => Ok(Some(doc.root())),
            Scope::Entity(entity) => entity_anchor(doc, entity),
            Scope::Attribute { attribute, .. } => {
                expect_node(doc, attribute, names::ATTRIBUTE)?;
                match scale_of(doc, attribute) {
                    Some(scale) if scale.is_categorical() => Ok(Some(attribute)),
                    _ => Err(SessionError::InvalidRequest(format!(
                        "attribute {attribute} has no nominal or ordinal scale"
                    ))),
                }
            }
        }
    }

    /// Existing container node, if any.
    pub fn find_container(&self, doc: &Document) -> SessionResult<Option<NodeId>> {
        let path = self.container_path()?;
        Ok(self
            .anchor(doc)?
            .and_then(|anchor| find_path(doc, anchor, path)))
    }

    /// Existing node of a singleton kind, if any.
    pub fn singleton_node(&self, doc: &Document) -> SessionResult<Option<NodeId>> {
        if !self.kind.is_singleton() {
            return Ok(None);
        }
        Ok(self
            .find_container(doc)?
            .and_then(|container| doc.find_child(container, self.kind.element_name())))
    }

    /// `Existing(id)` when `node` asks for a new singleton that already
    /// exists; `node` unchanged otherwise.
    pub fn resolve_singleton(&self, doc: &Document, node: NodeRef) -> SessionResult<NodeRef> {
        match node {
            NodeRef::New(_) => Ok(self
                .singleton_node(doc)?
                .map(NodeRef::Existing)
                .unwrap_or(node)),
            NodeRef::Existing(_) => Ok(node),
        }
    }

    /// Whether rows can be inserted yet. Personnel need their `project`.
    pub fn accepts_insert(&self, doc: &Document) -> SessionResult<bool> {
        if self.kind == EntityKind::Party(PartyRole::Personnel) {
            let project = Collection::dataset(EntityKind::Project);
            return Ok(project.singleton_node(doc)?.is_some());
        }
        Ok(true)
    }

    /// Container node, creating the owning entity and any missing
    /// containers. Returns the container and the collection with its entity
    /// anchor resolved.
    ///
    /// # Errors
    /// - `InvalidRequest` for personnel while the dataset has no `project`.
    pub fn ensure_container(
        &self,
        doc: &mut Document,
        access: &AccessDefaults,
    ) -> SessionResult<(NodeId, Collection)> {
        let path = self.container_path()?;
        if !self.accepts_insert(doc)? {
            return Err(SessionError::InvalidRequest(
                "personnel need a saved project first".to_string(),
            ));
        }
        let mut resolved = *self;
        let anchor = match self.anchor(doc)? {
            Some(anchor) => anchor,
            None => {
                let entity = self.entity().ok_or_else(|| {
                    SessionError::InvalidRequest("collection has no anchor".to_string())
                })?;
                let created = create_blank_entity(doc, entity.kind)?;
                resolved.scope = Scope::Entity(EntityContext {
                    kind: entity.kind,
                    node: NodeRef::Existing(created),
                });
                created
            }
        };
        let (container, created) = ensure_path(doc, anchor, path)?;
        if created > 0 && doc.name(container) == Some(names::ACCESS) {
            apply_access_defaults(doc, container, access)?;
        }
        Ok((container, resolved))
    }
}

fn entity_anchor(doc: &Document, entity: EntityContext) -> SessionResult<Option<NodeId>> {
    match entity.node {
        NodeRef::New(_) => Ok(None),
        NodeRef::Existing(id) => expect_node(doc, id, entity.kind.element_name()).map(Some),
    }
}

/// Resolves `id` and checks that it carries `name`.
///
/// # Errors
/// - `NotFound` when the node is missing or named differently.
pub fn expect_node(doc: &Document, id: NodeId, name: &str) -> SessionResult<NodeId> {
    match doc.name(id) {
        Some(found) if found == name => Ok(id),
        _ => Err(SessionError::NotFound(format!("{name} {id}"))),
    }
}

fn create_blank_entity(doc: &mut Document, kind: EntityKind) -> SessionResult<NodeId> {
    if !kind.is_data_entity() {
        return Err(SessionError::InvalidRequest(format!(
            "`{}` does not own nested lists",
            kind.element_name()
        )));
    }
    let root = doc.root();
    let (dataset, _) = ensure_path(doc, root, DATASET_PATH)?;
    Ok(doc.create_node(kind.element_name(), Some(dataset))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_lists_resolve_under_dataset() {
        let mut doc = Document::new(names::EML);
        let collection = Collection::dataset(EntityKind::GeographicCoverage);
        assert_eq!(collection.find_container(&doc).unwrap(), None);

        let (coverage, resolved) = collection
            .ensure_container(&mut doc, &AccessDefaults::default())
            .unwrap();
        assert_eq!(resolved, collection);
        assert_eq!(doc.name(coverage), Some(names::COVERAGE));
        assert_eq!(collection.find_container(&doc).unwrap(), Some(coverage));
    }

    #[test]
    fn new_entity_anchor_creates_a_blank_entity() {
        let mut doc = Document::new(names::EML);
        let entity = EntityContext {
            kind: EntityKind::DataTable,
            node: NodeRef::New(None),
        };
        let collection = Collection::in_entity(EntityKind::Attribute, entity);
        assert_eq!(collection.find_container(&doc).unwrap(), None);

        let (list, resolved) = collection
            .ensure_container(&mut doc, &AccessDefaults::default())
            .unwrap();
        let table = doc.parent(list).unwrap();
        assert_eq!(doc.name(table), Some(names::DATA_TABLE));
        assert_eq!(resolved.entity().unwrap().node, NodeRef::Existing(table));
    }

    #[test]
    fn created_access_container_carries_defaults() {
        let mut doc = Document::new(names::EML);
        let (access, _) = Collection::dataset(EntityKind::AccessRule)
            .ensure_container(&mut doc, &AccessDefaults::default())
            .unwrap();
        let node = doc.resolve(access).unwrap();
        assert_eq!(node.attribute(names::ORDER_ATTR), Some("allowFirst"));
    }

    #[test]
    fn new_singleton_resolves_to_the_existing_node() {
        let mut doc = Document::new(names::EML);
        let publisher = Collection::dataset(EntityKind::Party(PartyRole::Publisher));
        assert_eq!(
            publisher.resolve_singleton(&doc, NodeRef::New(None)).unwrap(),
            NodeRef::New(None)
        );

        let dataset = doc.create_node(names::DATASET, Some(doc.root())).unwrap();
        let existing = doc.create_node(names::PUBLISHER, Some(dataset)).unwrap();
        assert_eq!(
            publisher.resolve_singleton(&doc, NodeRef::New(None)).unwrap(),
            NodeRef::Existing(existing)
        );

        doc.create_node(names::CREATOR, Some(dataset)).unwrap();
        let creators = Collection::dataset(EntityKind::Party(PartyRole::Creator));
        assert_eq!(
            creators.resolve_singleton(&doc, NodeRef::New(None)).unwrap(),
            NodeRef::New(None)
        );
    }

    #[test]
    fn personnel_container_needs_a_project() {
        let mut doc = Document::new(names::EML);
        let personnel = Collection::dataset(EntityKind::Party(PartyRole::Personnel));
        assert!(matches!(
            personnel.ensure_container(&mut doc, &AccessDefaults::default()),
            Err(SessionError::InvalidRequest(_))
        ));
        assert_eq!(doc.find_child(doc.root(), names::DATASET), None);

        let dataset = doc.create_node(names::DATASET, Some(doc.root())).unwrap();
        let project = doc.create_node(names::PROJECT, Some(dataset)).unwrap();
        let (container, _) = personnel
            .ensure_container(&mut doc, &AccessDefaults::default())
            .unwrap();
        assert_eq!(container, project);
    }

    #[test]
    fn kinds_outside_their_scope_are_rejected() {
        let collection = Collection::dataset(EntityKind::Attribute);
        assert!(matches!(
            collection.container_path(),
            Err(SessionError::InvalidRequest(_))
        ));
    }

    #[test]
    fn wrong_kind_anchor_is_not_found() {
        let mut doc = Document::new(names::EML);
        let dataset = doc.create_node(names::DATASET, Some(doc.root())).unwrap();
        let other = doc.create_node(names::OTHER_ENTITY, Some(dataset)).unwrap();
        let entity = EntityContext {
            kind: EntityKind::DataTable,
            node: NodeRef::Existing(other),
        };
        let collection = Collection::in_entity(EntityKind::MethodStep, entity);
        assert!(matches!(
            collection.find_container(&doc),
            Err(SessionError::NotFound(_))
        ));
    }
}
