//! Entity builders.
//!
//! # Responsibility
//! - Assemble one schema-shaped subtree per entity kind from an options
//!   struct (`build`), and project a stored subtree back into that struct
//!   (`populate`).
//! - Compute list rows (`list_*`) with labels and reorder markers.
//!
//! # Invariants
//! - `build` is pure: it returns a detached `Element` and never touches a
//!   document, so a failed build cannot leave partial state.
//! - Optional wrappers are emitted only when they end up non-empty.
//! - `populate` never fails; missing descendants yield default values.
//! - `populate(build(fields)) == fields` for every kind.

pub mod access;
pub mod attribute;
pub mod code_definition;
pub mod coverage;
pub mod entity;
pub mod keyword;
pub mod method;
pub mod party;
pub mod project;

use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::{NodeId, NodeRef};
use crate::model::path::Branch;
use crate::model::scale::MeasurementScale;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row marker shown when a row cannot move further.
pub const PLACEHOLDER_TOKEN: &str = "[  ]";
/// Row marker that moves a row one slot earlier.
pub const UP_TOKEN: &str = "\u{25B2}";
/// Row marker that moves a row one slot later.
pub const DOWN_TOKEN: &str = "\u{25BC}";

/// Characters kept when a long text is shown in a list row.
pub const LIST_TEXT_LIMIT: usize = 40;

/// Result type used by builders.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while assembling or converting a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A value the schema requires is empty.
    MissingField(&'static str),
    /// The builder has no handler for this measurement scale.
    UnsupportedScale {
        builder: &'static str,
        scale: MeasurementScale,
    },
    /// A conversion was applied to a node of another kind.
    WrongElement {
        expected: &'static str,
        found: String,
    },
    /// A field combination the schema cannot express.
    InvalidValue { field: &'static str, reason: String },
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::UnsupportedScale { builder, scale } => {
                write!(f, "{builder} cannot build a `{scale}` measurement scale")
            }
            Self::WrongElement { expected, found } => {
                write!(f, "expected a `{expected}` node, found `{found}`")
            }
            Self::InvalidValue { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl Error for BuildError {}

/// Responsible-party flavours; each is a distinct element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
    Creator,
    MetadataProvider,
    AssociatedParty,
    Contact,
    Publisher,
    Personnel,
}

impl PartyRole {
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Creator => names::CREATOR,
            Self::MetadataProvider => names::METADATA_PROVIDER,
            Self::AssociatedParty => names::ASSOCIATED_PARTY,
            Self::Contact => names::CONTACT,
            Self::Publisher => names::PUBLISHER,
            Self::Personnel => names::PERSONNEL,
        }
    }
}

/// Every entity family edited through list/detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    DataTable,
    OtherEntity,
    Attribute,
    CodeDefinition,
    Party(PartyRole),
    GeographicCoverage,
    TemporalCoverage,
    TaxonomicCoverage,
    MethodStep,
    Keyword,
    AccessRule,
    Project,
}

impl EntityKind {
    /// Element name of one entity of this kind.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::DataTable => names::DATA_TABLE,
            Self::OtherEntity => names::OTHER_ENTITY,
            Self::Attribute => names::ATTRIBUTE,
            Self::CodeDefinition => names::CODE_DEFINITION,
            Self::Party(role) => role.element_name(),
            Self::GeographicCoverage => names::GEOGRAPHIC_COVERAGE,
            Self::TemporalCoverage => names::TEMPORAL_COVERAGE,
            Self::TaxonomicCoverage => names::TAXONOMIC_COVERAGE,
            Self::MethodStep => names::METHOD_STEP,
            Self::Keyword => names::KEYWORD,
            Self::AccessRule => names::ALLOW,
            Self::Project => names::PROJECT,
        }
    }

    /// Data tables and other entities own nested collections.
    pub fn is_data_entity(self) -> bool {
        matches!(self, Self::DataTable | Self::OtherEntity)
    }

    /// At most one per dataset; edited in place on a single detail page.
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Project | Self::Party(PartyRole::Publisher))
    }
}

/// Builder/projection pair for one entity kind.
pub trait EntityBuilder {
    /// Options struct holding every form field of this kind.
    type Fields: Clone + Default + PartialEq + Serialize;

    fn kind(&self) -> EntityKind;

    /// Assembles a fresh, detached subtree from `fields`.
    fn build(&self, fields: &Self::Fields) -> BuildResult<Element>;

    /// Reads the form fields back out of a stored subtree.
    fn populate(&self, doc: &Document, node: NodeId) -> Self::Fields;

    /// Blank form for a create request.
    fn blank(&self, _node: NodeRef) -> Self::Fields {
        Self::Fields::default()
    }

    /// Descendant branches not covered by this form, carried over on replace.
    fn preserved_branches(&self) -> &'static [Branch] {
        &[]
    }

    /// Non-blocking sanity warnings about submitted values.
    fn advisories(&self, _fields: &Self::Fields) -> Vec<String> {
        Vec::new()
    }
}

/// Reorder affordance of one list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    Placeholder,
    Up,
    Down,
}

impl RowMarker {
    /// Button text posted back when the marker is pressed.
    pub fn token(self) -> &'static str {
        match self {
            Self::Placeholder => PLACEHOLDER_TOKEN,
            Self::Up => UP_TOKEN,
            Self::Down => DOWN_TOKEN,
        }
    }

    pub fn is_active(self) -> bool {
        !matches!(self, Self::Placeholder)
    }
}

/// Up marker for the row at `index`.
pub fn up_marker(index: usize) -> RowMarker {
    if index == 0 {
        RowMarker::Placeholder
    } else {
        RowMarker::Up
    }
}

/// Down marker for the row at `index` in a list of `count` rows.
pub fn down_marker(index: usize, count: usize) -> RowMarker {
    if index + 1 >= count {
        RowMarker::Placeholder
    } else {
        RowMarker::Down
    }
}

/// Kind-specific columns of a list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDetail {
    None,
    Attribute {
        column_number: usize,
        scale: Option<MeasurementScale>,
    },
    CodeDefinition {
        code: String,
        definition: String,
    },
    Geographic {
        description: String,
    },
    Temporal {
        begin_date: String,
        end_date: String,
    },
    MethodStep {
        description: String,
        instrumentation: String,
    },
    Keyword {
        keyword_type: String,
    },
    AccessRule {
        principal: String,
        permission: String,
    },
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: NodeId,
    pub label: String,
    pub up: RowMarker,
    pub down: RowMarker,
    pub detail: EntryDetail,
}

/// Builds rows with markers for `ids`, in order.
pub(crate) fn entries_for<F>(ids: &[NodeId], mut describe: F) -> Vec<Entry>
where
    F: FnMut(usize, NodeId) -> (String, EntryDetail),
{
    let count = ids.len();
    ids.iter()
        .enumerate()
        .map(|(index, id)| {
            let (label, detail) = describe(index, *id);
            Entry {
                id: *id,
                label,
                up: up_marker(index),
                down: down_marker(index, count),
                detail,
            }
        })
        .collect()
}

/// Cuts `value` to at most `limit` characters for list display.
pub fn truncate_for_list(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

/// Owned text at `path` below `id`, `None` when absent.
pub(crate) fn text_at(doc: &Document, id: NodeId, path: &[&str]) -> Option<String> {
    doc.descendant_text(id, path).map(str::to_string)
}

/// Owned text at `path` below `id`, empty when absent.
pub(crate) fn string_at(doc: &Document, id: NodeId, path: &[&str]) -> String {
    text_at(doc, id, path).unwrap_or_default()
}

/// Text leaf for a required value; an empty value keeps the element empty.
pub(crate) fn required_leaf(name: &str, value: &str) -> Element {
    match non_empty(Some(value)) {
        Some(value) => Element::text(name, value),
        None => Element::new(name),
    }
}

/// Text of a `para`/`section` block, or of the element itself.
pub(crate) fn text_block(doc: &Document, id: NodeId) -> Option<String> {
    let node = doc.resolve(id)?;
    if let Some(content) = non_empty(node.content()) {
        return Some(content.to_string());
    }
    text_at(doc, id, &[names::PARA]).or_else(|| text_at(doc, id, &[names::SECTION]))
}
