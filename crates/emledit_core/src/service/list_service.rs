//! List page controller.
//!
//! # Responsibility
//! - Render the rows of one collection with reorder markers and the "Add"
//!   choices of its page.
//! - Dispatch a pressed list button: navigate, remove, reorder or open a
//!   detail page.
//!
//! # Invariants
//! - Remove and reorder save both artifacts before returning; navigation
//!   buttons never touch the document.
//! - A row key must name a node of the collection's kind inside the
//!   collection's container, otherwise the request is `NotFound`.
//! - Singleton kinds have no list page.
//! - Adding personnel before the dataset has a project opens the project
//!   page instead.

use super::collection::{expect_node, Collection};
use super::navigation::{list_back, list_next, Destination};
use super::{SessionError, SessionResult};
use crate::builder::access::list_access_rules;
use crate::builder::attribute::list_attributes;
use crate::builder::code_definition::list_code_definitions;
use crate::builder::coverage::{
    list_geographic_coverages, list_taxonomic_coverages, list_temporal_coverages,
};
use crate::builder::entity::list_entities;
use crate::builder::keyword::list_keywords;
use crate::builder::method::list_method_steps;
use crate::builder::party::list_parties;
use crate::builder::{EntityKind, Entry, PartyRole, DOWN_TOKEN, PLACEHOLDER_TOKEN, UP_TOKEN};
use crate::model::document::Document;
use crate::model::node::{NodeId, NodeRef, Shift};
use crate::model::scale::MeasurementScale;
use crate::repo::document_repo::DocumentRepository;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;

static ADD_SCALE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(nominal|ordinal|interval|ratio|date\s*-?\s*time)\b")
        .expect("valid add scale regex")
});

const ATTRIBUTE_CHOICES: &[&str] = &[
    "Add Attribute: Nominal",
    "Add Attribute: Ordinal",
    "Add Attribute: Interval",
    "Add Attribute: Ratio",
    "Add Attribute: Date Time",
];

/// Button pressed on a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Back,
    Next,
    Edit,
    Remove,
    MoveUp,
    MoveDown,
    /// Inactive reorder marker at either end of the list.
    Placeholder,
    /// Open a blank detail page, optionally for a measurement scale.
    Add(Option<MeasurementScale>),
    LoadData,
}

impl ListAction {
    /// Parses a button label.
    ///
    /// # Errors
    /// - `InvalidRequest` for labels no list page shows.
    pub fn parse(token: &str) -> SessionResult<Self> {
        let token = token.trim();
        let action = match token {
            "Back" => Self::Back,
            "Next" => Self::Next,
            "Remove" => Self::Remove,
            UP_TOKEN => Self::MoveUp,
            DOWN_TOKEN => Self::MoveDown,
            PLACEHOLDER_TOKEN => Self::Placeholder,
            _ if token.starts_with("Edit") => Self::Edit,
            _ if token.starts_with("Add") => Self::Add(
                ADD_SCALE_RE
                    .captures(token)
                    .and_then(|captures| captures.get(1))
                    .and_then(|word| MeasurementScale::from_label(word.as_str())),
            ),
            _ if token.starts_with("Load") => Self::LoadData,
            _ => {
                return Err(SessionError::InvalidRequest(format!(
                    "unknown list action `{token}`"
                )))
            }
        };
        Ok(action)
    }

    fn needs_row(self) -> bool {
        matches!(self, Self::Edit | Self::Remove | Self::MoveUp | Self::MoveDown)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Next => "next",
            Self::Edit => "edit",
            Self::Remove => "remove",
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::Placeholder => "placeholder",
            Self::Add(_) => "add",
            Self::LoadData => "load_data",
        }
    }
}

/// A pressed list button and the row it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSubmission {
    pub action: ListAction,
    pub row: Option<NodeRef>,
}

impl ListSubmission {
    pub fn new(action: ListAction, row: Option<NodeRef>) -> Self {
        Self { action, row }
    }

    /// Picks the pressed button out of posted `(key, value)` pairs.
    ///
    /// Row buttons post the row key as their name; other pairs whose value
    /// is not a button label are ignored.
    ///
    /// # Errors
    /// - `InvalidRequest` when no button was pressed or a row button's key
    ///   is not a row key.
    pub fn from_pairs<'a, I>(pairs: I) -> SessionResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            let Ok(action) = ListAction::parse(value) else {
                continue;
            };
            if !action.needs_row() {
                return Ok(Self::new(action, None));
            }
            let row = NodeRef::parse(key)
                .map_err(|err| SessionError::InvalidRequest(err.to_string()))?;
            return Ok(Self::new(action, Some(row)));
        }
        Err(SessionError::InvalidRequest(
            "no list action in submission".to_string(),
        ))
    }
}

/// Rows and "Add" choices of one list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<Entry>,
    pub choices: Vec<String>,
}

/// Result of one list button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOutcome {
    pub destination: Destination,
    /// Whether the document was written.
    pub saved: bool,
}

/// List controller over a document repository.
pub struct ListService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> ListService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Rows of `collection` in document order.
    pub fn entries(&self, package_id: &str, collection: &Collection) -> SessionResult<Vec<Entry>> {
        let doc = self.repo.load(package_id)?;
        collection_rows(&doc, collection)
    }

    /// Rows plus the add choices of the page.
    pub fn view(&self, package_id: &str, collection: &Collection) -> SessionResult<ListView> {
        Ok(ListView {
            rows: self.entries(package_id, collection)?,
            choices: add_choices(collection.kind),
        })
    }

    /// Applies one pressed list button.
    ///
    /// # Errors
    /// - `NotFound` when the row does not belong to the collection.
    /// - `InvalidRequest` for a row button without a row key, or for a
    ///   singleton kind.
    /// - `Persistence` when saving after a remove or reorder fails.
    pub fn handle(
        &self,
        package_id: &str,
        collection: &Collection,
        submission: &ListSubmission,
    ) -> SessionResult<ListOutcome> {
        let started_at = Instant::now();
        reject_singleton(collection)?;
        let action = submission.action;
        let stay = Destination::List(*collection);
        let outcome = match action {
            ListAction::Back => navigate(list_back(collection)?),
            ListAction::Next => navigate(list_next(collection)?),
            ListAction::Placeholder => navigate(stay),
            ListAction::Add(scale) => navigate(self.blank_detail(package_id, collection, scale)?),
            ListAction::LoadData => {
                if !collection.kind.is_data_entity() {
                    return Err(SessionError::InvalidRequest(format!(
                        "`{}` list has no data loading page",
                        collection.kind.element_name()
                    )));
                }
                navigate(Destination::LoadData(*collection))
            }
            ListAction::Edit => match row_of(submission)? {
                NodeRef::New(scale) => navigate(self.blank_detail(package_id, collection, scale)?),
                NodeRef::Existing(id) => {
                    let doc = self.repo.load(package_id)?;
                    member(&doc, collection, id)?;
                    navigate(Destination::Detail {
                        collection: *collection,
                        node: NodeRef::Existing(id),
                    })
                }
            },
            ListAction::Remove => {
                let id = existing_row(submission)?;
                let mut doc = self.repo.load(package_id)?;
                member(&doc, collection, id)?;
                doc.discard(id)?;
                self.repo.save(package_id, &doc)?;
                ListOutcome {
                    destination: stay,
                    saved: true,
                }
            }
            ListAction::MoveUp | ListAction::MoveDown => {
                let id = existing_row(submission)?;
                let direction = if action == ListAction::MoveUp {
                    Shift::Left
                } else {
                    Shift::Right
                };
                let mut doc = self.repo.load(package_id)?;
                let container = member(&doc, collection, id)?;
                let moved = doc.shift(container, id, direction)?;
                if moved {
                    self.repo.save(package_id, &doc)?;
                }
                ListOutcome {
                    destination: stay,
                    saved: moved,
                }
            }
        };
        info!(
            "event=list_action module=service status=ok package_id={} kind={} action={} saved={} duration_ms={}",
            package_id,
            collection.kind.element_name(),
            action.name(),
            outcome.saved,
            started_at.elapsed().as_millis()
        );
        Ok(outcome)
    }

    /// Blank detail page for a new row, or the project page while personnel
    /// have no project to live in.
    fn blank_detail(
        &self,
        package_id: &str,
        collection: &Collection,
        scale: Option<MeasurementScale>,
    ) -> SessionResult<Destination> {
        if collection.kind == EntityKind::Party(PartyRole::Personnel) {
            let doc = self.repo.load(package_id)?;
            if !collection.accepts_insert(&doc)? {
                return Ok(Destination::Detail {
                    collection: Collection::dataset(EntityKind::Project),
                    node: NodeRef::New(None),
                });
            }
        }
        Ok(Destination::Detail {
            collection: *collection,
            node: NodeRef::New(scale),
        })
    }
}

fn navigate(destination: Destination) -> ListOutcome {
    ListOutcome {
        destination,
        saved: false,
    }
}

fn row_of(submission: &ListSubmission) -> SessionResult<NodeRef> {
    submission.row.ok_or_else(|| {
        SessionError::InvalidRequest(format!(
            "list action `{}` needs a row key",
            submission.action.name()
        ))
    })
}

fn existing_row(submission: &ListSubmission) -> SessionResult<NodeId> {
    match row_of(submission)? {
        NodeRef::Existing(id) => Ok(id),
        NodeRef::New(_) => Err(SessionError::NotFound(
            "the create sentinel names no stored node".to_string(),
        )),
    }
}

/// Checks that `id` is a row of `collection`; returns its container.
fn member(doc: &Document, collection: &Collection, id: NodeId) -> SessionResult<NodeId> {
    let container = collection
        .find_container(doc)?
        .ok_or_else(|| SessionError::NotFound(format!("row {id}")))?;
    expect_node(doc, id, collection.kind.element_name())?;
    if doc.parent(id) != Some(container) {
        return Err(SessionError::NotFound(format!("row {id}")));
    }
    Ok(container)
}

/// Rows of `collection` in a loaded document.
///
/// # Errors
/// - `InvalidRequest` for singleton kinds.
pub fn collection_rows(doc: &Document, collection: &Collection) -> SessionResult<Vec<Entry>> {
    reject_singleton(collection)?;
    let Some(container) = collection.find_container(doc)? else {
        return Ok(Vec::new());
    };
    let rows = match collection.kind {
        EntityKind::DataTable | EntityKind::OtherEntity => {
            list_entities(doc, container, collection.kind)
        }
        EntityKind::Attribute => list_attributes(doc, container),
        EntityKind::CodeDefinition => list_code_definitions(doc, container),
        EntityKind::Party(role) => list_parties(doc, container, role),
        EntityKind::GeographicCoverage => list_geographic_coverages(doc, container),
        EntityKind::TemporalCoverage => list_temporal_coverages(doc, container),
        EntityKind::TaxonomicCoverage => list_taxonomic_coverages(doc, container),
        EntityKind::MethodStep => list_method_steps(doc, container),
        EntityKind::Keyword => list_keywords(doc, container),
        EntityKind::AccessRule => list_access_rules(doc, container),
        EntityKind::Project => Vec::new(),
    };
    Ok(rows)
}

fn reject_singleton(collection: &Collection) -> SessionResult<()> {
    if collection.kind.is_singleton() {
        return Err(SessionError::InvalidRequest(format!(
            "`{}` is edited on its detail page, not a list",
            collection.kind.element_name()
        )));
    }
    Ok(())
}

fn add_label(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::DataTable => "Data Table",
        EntityKind::OtherEntity => "Other Entity",
        EntityKind::Attribute => "Attribute",
        EntityKind::CodeDefinition => "Code",
        EntityKind::Party(PartyRole::Creator) => "Creator",
        EntityKind::Party(PartyRole::MetadataProvider) => "Metadata Provider",
        EntityKind::Party(PartyRole::AssociatedParty) => "Associated Party",
        EntityKind::Party(PartyRole::Contact) => "Contact",
        EntityKind::Party(PartyRole::Publisher) => "Publisher",
        EntityKind::Party(PartyRole::Personnel) => "Project Personnel",
        EntityKind::GeographicCoverage => "Geographic Coverage",
        EntityKind::TemporalCoverage => "Temporal Coverage",
        EntityKind::TaxonomicCoverage => "Taxonomic Coverage",
        EntityKind::MethodStep => "Method Step",
        EntityKind::Keyword => "Keyword",
        EntityKind::AccessRule => "Access Rule",
        EntityKind::Project => "Project",
    }
}

/// "Add" (and "Load") button labels offered on a list page.
pub fn add_choices(kind: EntityKind) -> Vec<String> {
    if kind.is_singleton() {
        return Vec::new();
    }
    if kind == EntityKind::Attribute {
        return ATTRIBUTE_CHOICES.iter().map(|label| label.to_string()).collect();
    }
    let label = add_label(kind);
    let mut choices = vec![format!("Add {label}")];
    if kind.is_data_entity() {
        choices.push(format!("Load {label}"));
    }
    choices
}
