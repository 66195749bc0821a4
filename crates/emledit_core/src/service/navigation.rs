//! Page-to-page routing.
//!
//! # Responsibility
//! - Order the dataset wizard steps.
//! - Decide where list buttons (Back/Next) and detail submit controls lead.
//!
//! # Invariants
//! - Nested lists return to the detail page of their owner; wizard lists
//!   move along the step chain.
//! - Sub-page controls always carry the identity of the saved owner.

use super::collection::{Collection, EntityContext, Scope};
use super::document_service::Singleton;
use super::{SessionError, SessionResult};
use crate::builder::{EntityKind, PartyRole};
use crate::model::node::{NodeId, NodeRef};

/// Dataset pages in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Title,
    Access,
    Creators,
    MetadataProviders,
    AssociatedParties,
    PubDate,
    Abstract,
    Keywords,
    IntellectualRights,
    GeographicCoverage,
    TemporalCoverage,
    TaxonomicCoverage,
    Contacts,
    Publisher,
    PubPlace,
    Methods,
    Project,
    DataTables,
    OtherEntities,
}

impl WizardStep {
    pub const ALL: [WizardStep; 19] = [
        Self::Title,
        Self::Access,
        Self::Creators,
        Self::MetadataProviders,
        Self::AssociatedParties,
        Self::PubDate,
        Self::Abstract,
        Self::Keywords,
        Self::IntellectualRights,
        Self::GeographicCoverage,
        Self::TemporalCoverage,
        Self::TaxonomicCoverage,
        Self::Contacts,
        Self::Publisher,
        Self::PubPlace,
        Self::Methods,
        Self::Project,
        Self::DataTables,
        Self::OtherEntities,
    ];

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
    }

    pub fn previous(self) -> Option<Self> {
        self.position()
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.position() + 1).copied()
    }

    /// List shown on this step, if it is a list page.
    pub fn collection(self) -> Option<Collection> {
        let kind = match self {
            Self::Access => EntityKind::AccessRule,
            Self::Creators => EntityKind::Party(PartyRole::Creator),
            Self::MetadataProviders => EntityKind::Party(PartyRole::MetadataProvider),
            Self::AssociatedParties => EntityKind::Party(PartyRole::AssociatedParty),
            Self::Keywords => EntityKind::Keyword,
            Self::GeographicCoverage => EntityKind::GeographicCoverage,
            Self::TemporalCoverage => EntityKind::TemporalCoverage,
            Self::TaxonomicCoverage => EntityKind::TaxonomicCoverage,
            Self::Contacts => EntityKind::Party(PartyRole::Contact),
            Self::Methods => EntityKind::MethodStep,
            Self::DataTables => EntityKind::DataTable,
            Self::OtherEntities => EntityKind::OtherEntity,
            Self::Title
            | Self::PubDate
            | Self::Abstract
            | Self::IntellectualRights
            | Self::PubPlace
            | Self::Publisher
            | Self::Project => return None,
        };
        Some(Collection::dataset(kind))
    }

    /// Single-entity detail page shown on this step, if any.
    pub fn detail(self) -> Option<Collection> {
        match self {
            Self::Publisher => Some(Collection::dataset(EntityKind::Party(PartyRole::Publisher))),
            Self::Project => Some(Collection::dataset(EntityKind::Project)),
            _ => None,
        }
    }

    /// Single-value field edited on this step, if any.
    pub fn singleton(self) -> Option<Singleton> {
        match self {
            Self::Title => Some(Singleton::Title),
            Self::PubDate => Some(Singleton::PubDate),
            Self::Abstract => Some(Singleton::Abstract),
            Self::IntellectualRights => Some(Singleton::IntellectualRights),
            Self::PubPlace => Some(Singleton::PubPlace),
            _ => None,
        }
    }

    /// Step hosting a dataset-level list.
    pub fn for_collection(collection: &Collection) -> Option<Self> {
        Self::ALL.into_iter().find(|step| {
            step.collection().as_ref() == Some(collection)
                || step.detail().as_ref() == Some(collection)
        })
    }
}

/// Where the page layer goes after a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Step(WizardStep),
    List(Collection),
    Detail { collection: Collection, node: NodeRef },
    /// Data loading page for a data entity list.
    LoadData(Collection),
    /// Past the last wizard step.
    Finished,
}

/// Button pressed on a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitControl {
    Save,
    Back,
    Attributes,
    Methods,
    Access,
    Geographic,
    Temporal,
    Taxonomic,
    Codes,
    Personnel,
}

impl SubmitControl {
    /// Parses a submit button label; the first word decides.
    pub fn parse(token: &str) -> SessionResult<Self> {
        let word = token
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let control = match word.as_str() {
            "save" | "ok" => Self::Save,
            "back" | "cancel" => Self::Back,
            "attributes" => Self::Attributes,
            "methods" => Self::Methods,
            "access" => Self::Access,
            "geographic" => Self::Geographic,
            "temporal" => Self::Temporal,
            "taxonomic" => Self::Taxonomic,
            "codes" => Self::Codes,
            "personnel" => Self::Personnel,
            _ => {
                return Err(SessionError::InvalidRequest(format!(
                    "unknown submit control `{token}`"
                )))
            }
        };
        Ok(control)
    }

    /// Whether the control opens a page owned by the saved entity.
    pub fn opens_sub_page(self) -> bool {
        !matches!(self, Self::Save | Self::Back)
    }

    fn nested_kind(self) -> Option<EntityKind> {
        match self {
            Self::Attributes => Some(EntityKind::Attribute),
            Self::Methods => Some(EntityKind::MethodStep),
            Self::Access => Some(EntityKind::AccessRule),
            Self::Geographic => Some(EntityKind::GeographicCoverage),
            Self::Temporal => Some(EntityKind::TemporalCoverage),
            Self::Taxonomic => Some(EntityKind::TaxonomicCoverage),
            _ => None,
        }
    }

    /// Whether the control exists on the detail page of `collection`.
    pub fn applies_to(self, collection: &Collection) -> bool {
        match self {
            Self::Save | Self::Back => true,
            Self::Codes => {
                collection.kind == EntityKind::Attribute
                    && matches!(collection.scope, Scope::Entity(_))
            }
            Self::Personnel => collection.kind == EntityKind::Project,
            _ => collection.kind.is_data_entity(),
        }
    }
}

fn outer_step(step: Option<WizardStep>) -> Destination {
    step.map(Destination::Step).unwrap_or(Destination::Finished)
}

fn owner_detail(collection: &Collection) -> Option<Destination> {
    match collection.scope {
        Scope::Dataset => None,
        Scope::Entity(entity) => Some(Destination::Detail {
            collection: Collection::dataset(entity.kind),
            node: entity.node,
        }),
        Scope::Attribute { entity, attribute } => Some(Destination::Detail {
            collection: Collection::in_entity(EntityKind::Attribute, entity),
            node: NodeRef::Existing(attribute),
        }),
    }
}

fn list_step(collection: &Collection) -> SessionResult<WizardStep> {
    if collection.kind == EntityKind::Party(PartyRole::Personnel) {
        return Ok(WizardStep::Project);
    }
    WizardStep::for_collection(collection).ok_or_else(|| {
        SessionError::InvalidRequest(format!(
            "`{}` list has no wizard step",
            collection.kind.element_name()
        ))
    })
}

/// Destination of a list page's Back button.
pub fn list_back(collection: &Collection) -> SessionResult<Destination> {
    if let Some(owner) = owner_detail(collection) {
        return Ok(owner);
    }
    let step = list_step(collection)?;
    if step == WizardStep::Project {
        return Ok(Destination::Step(step));
    }
    Ok(outer_step(step.previous()))
}

/// Destination of a list page's Next button.
pub fn list_next(collection: &Collection) -> SessionResult<Destination> {
    if let Some(owner) = owner_detail(collection) {
        return Ok(owner);
    }
    let step = list_step(collection)?;
    if step == WizardStep::Project {
        return Ok(Destination::Step(step));
    }
    Ok(outer_step(step.next()))
}

/// Destination of a detail submit.
///
/// # Errors
/// - `InvalidRequest` when the control does not exist on this page, or when
///   a sub-page control is used without a saved node.
pub fn route_submit(
    collection: &Collection,
    control: SubmitControl,
    node: Option<NodeId>,
) -> SessionResult<Destination> {
    if !control.applies_to(collection) {
        return Err(SessionError::InvalidRequest(format!(
            "control {control:?} is not available for `{}`",
            collection.kind.element_name()
        )));
    }
    if !control.opens_sub_page() {
        if let Some(step) = WizardStep::for_collection(collection)
            .filter(|_| collection.kind.is_singleton())
        {
            let step = match control {
                SubmitControl::Back => step.previous(),
                _ => step.next(),
            };
            return Ok(outer_step(step));
        }
        return Ok(Destination::List(*collection));
    }

    let node = node.ok_or_else(|| {
        SessionError::InvalidRequest("sub-page control needs a saved entity".to_string())
    })?;
    let target = match (control, collection.scope) {
        (SubmitControl::Personnel, _) => {
            Collection::dataset(EntityKind::Party(PartyRole::Personnel))
        }
        (SubmitControl::Codes, Scope::Entity(entity)) => Collection::codes(entity, node),
        (other, _) => {
            let kind = other.nested_kind().ok_or_else(|| {
                SessionError::InvalidRequest(format!("control {other:?} has no target list"))
            })?;
            Collection::in_entity(
                kind,
                EntityContext {
                    kind: collection.kind,
                    node: NodeRef::Existing(node),
                },
            )
        }
    };
    Ok(Destination::List(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn wizard_chain_is_linear() {
        assert_eq!(WizardStep::Title.previous(), None);
        assert_eq!(WizardStep::Title.next(), Some(WizardStep::Access));
        assert_eq!(WizardStep::Methods.next(), Some(WizardStep::Project));
        assert_eq!(WizardStep::OtherEntities.next(), None);
    }

    #[test]
    fn dataset_lists_walk_the_chain() {
        let creators = Collection::dataset(EntityKind::Party(PartyRole::Creator));
        assert_eq!(
            list_back(&creators).unwrap(),
            Destination::Step(WizardStep::Access)
        );
        assert_eq!(
            list_next(&creators).unwrap(),
            Destination::Step(WizardStep::MetadataProviders)
        );
        let other = Collection::dataset(EntityKind::OtherEntity);
        assert_eq!(list_next(&other).unwrap(), Destination::Finished);
    }

    #[test]
    fn nested_lists_return_to_their_owner() {
        let table = Uuid::new_v4();
        let entity = EntityContext {
            kind: EntityKind::DataTable,
            node: NodeRef::Existing(table),
        };
        let attributes = Collection::in_entity(EntityKind::Attribute, entity);
        assert_eq!(
            list_back(&attributes).unwrap(),
            Destination::Detail {
                collection: Collection::dataset(EntityKind::DataTable),
                node: NodeRef::Existing(table),
            }
        );

        let attribute = Uuid::new_v4();
        let codes = Collection::codes(entity, attribute);
        assert_eq!(
            list_next(&codes).unwrap(),
            Destination::Detail {
                collection: attributes,
                node: NodeRef::Existing(attribute),
            }
        );
    }

    #[test]
    fn submit_controls_route_to_sub_pages() {
        let tables = Collection::dataset(EntityKind::DataTable);
        let table = Uuid::new_v4();
        let destination = route_submit(&tables, SubmitControl::Methods, Some(table)).unwrap();
        assert_eq!(
            destination,
            Destination::List(Collection::in_entity(
                EntityKind::MethodStep,
                EntityContext {
                    kind: EntityKind::DataTable,
                    node: NodeRef::Existing(table),
                }
            ))
        );
        assert_eq!(
            route_submit(&tables, SubmitControl::Save, Some(table)).unwrap(),
            Destination::List(tables)
        );
        assert!(matches!(
            route_submit(&tables, SubmitControl::Personnel, Some(table)),
            Err(SessionError::InvalidRequest(_))
        ));
    }

    #[test]
    fn project_page_sits_between_methods_and_data_tables() {
        let project = Collection::dataset(EntityKind::Project);
        assert_eq!(
            route_submit(&project, SubmitControl::Back, None).unwrap(),
            Destination::Step(WizardStep::Methods)
        );
        assert_eq!(
            route_submit(&project, SubmitControl::Save, None).unwrap(),
            Destination::Step(WizardStep::DataTables)
        );
        let personnel = Collection::dataset(EntityKind::Party(PartyRole::Personnel));
        assert_eq!(
            list_back(&personnel).unwrap(),
            Destination::Step(WizardStep::Project)
        );
    }

    #[test]
    fn publisher_is_a_detail_step_between_contacts_and_pub_place() {
        let publisher = Collection::dataset(EntityKind::Party(PartyRole::Publisher));
        assert_eq!(WizardStep::Publisher.collection(), None);
        assert_eq!(WizardStep::Publisher.detail(), Some(publisher));
        assert_eq!(
            route_submit(&publisher, SubmitControl::Save, Some(Uuid::new_v4())).unwrap(),
            Destination::Step(WizardStep::PubPlace)
        );
        assert_eq!(
            route_submit(&publisher, SubmitControl::Back, None).unwrap(),
            Destination::Step(WizardStep::Contacts)
        );
    }

    #[test]
    fn control_labels_parse_by_first_word() {
        assert_eq!(SubmitControl::parse("Save Changes").unwrap(), SubmitControl::Save);
        assert_eq!(
            SubmitControl::parse("Access Rules").unwrap(),
            SubmitControl::Access
        );
        assert!(SubmitControl::parse("Explode").is_err());
    }
}
