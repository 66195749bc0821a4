use emledit_core::builder::party::{PartyBuilder, PartyFields};
use emledit_core::builder::project::{ProjectBuilder, ProjectFields};
use emledit_core::builder::{EntityKind, PartyRole, PLACEHOLDER_TOKEN};
use emledit_core::service::collection::{Collection, EntityContext};
use emledit_core::service::detail_service::Submission;
use emledit_core::service::list_service::{ListAction, ListSubmission};
use emledit_core::service::navigation::{Destination, SubmitControl, WizardStep};
use emledit_core::{
    DetailService, DocumentService, EngineConfig, MeasurementScale, MemoryDocumentRepository,
    ListService, NodeId, NodeRef, SessionError,
};
use uuid::Uuid;

const PACKAGE: &str = "edi.100.1";

fn creators() -> Collection {
    Collection::dataset(EntityKind::Party(PartyRole::Creator))
}

fn add_party(repo: &MemoryDocumentRepository, role: PartyRole, sur_name: &str) -> NodeId {
    let details = DetailService::new(repo, EngineConfig::default());
    let fields = PartyFields {
        given_name: Some("Test".to_string()),
        sur_name: Some(sur_name.to_string()),
        ..PartyFields::default()
    };
    let outcome = details
        .submit(
            PACKAGE,
            &PartyBuilder::new(role),
            &Collection::dataset(EntityKind::Party(role)),
            NodeRef::New(None),
            &Submission {
                fields,
                fingerprint: None,
                control: SubmitControl::Save,
            },
        )
        .unwrap();
    outcome.node.unwrap()
}

fn seeded() -> (MemoryDocumentRepository, Vec<NodeId>) {
    let repo = MemoryDocumentRepository::new();
    DocumentService::new(&repo, EngineConfig::default())
        .create(PACKAGE, Some("Lake chemistry"), "alice")
        .unwrap();
    let ids = ["Alpha", "Beta", "Gamma"]
        .into_iter()
        .map(|name| add_party(&repo, PartyRole::Creator, name))
        .collect();
    (repo, ids)
}

fn row_ids(lists: &ListService<&MemoryDocumentRepository>) -> Vec<NodeId> {
    lists
        .entries(PACKAGE, &creators())
        .unwrap()
        .into_iter()
        .map(|entry| entry.id)
        .collect()
}

#[test]
fn rows_follow_document_order_with_markers_at_the_ends() {
    let (repo, ids) = seeded();
    let lists = ListService::new(&repo);

    let rows = lists.entries(PACKAGE, &creators()).unwrap();
    assert_eq!(rows.iter().map(|row| row.id).collect::<Vec<_>>(), ids);
    assert!(!rows[0].up.is_active());
    assert!(rows[0].down.is_active());
    assert!(rows[2].up.is_active());
    assert!(!rows[2].down.is_active());
}

#[test]
fn move_up_swaps_with_previous_sibling_and_saves() {
    let (repo, ids) = seeded();
    let lists = ListService::new(&repo);

    let outcome = lists
        .handle(
            PACKAGE,
            &creators(),
            &ListSubmission::new(ListAction::MoveUp, Some(NodeRef::Existing(ids[2]))),
        )
        .unwrap();
    assert!(outcome.saved);
    assert_eq!(outcome.destination, Destination::List(creators()));
    assert_eq!(row_ids(&lists), vec![ids[0], ids[2], ids[1]]);
}

#[test]
fn move_down_then_up_restores_order() {
    let (repo, ids) = seeded();
    let lists = ListService::new(&repo);
    let row = Some(NodeRef::Existing(ids[0]));

    lists
        .handle(PACKAGE, &creators(), &ListSubmission::new(ListAction::MoveDown, row))
        .unwrap();
    assert_eq!(row_ids(&lists), vec![ids[1], ids[0], ids[2]]);
    lists
        .handle(PACKAGE, &creators(), &ListSubmission::new(ListAction::MoveUp, row))
        .unwrap();
    assert_eq!(row_ids(&lists), ids);
}

#[test]
fn move_past_the_end_is_a_no_op() {
    let (repo, ids) = seeded();
    let lists = ListService::new(&repo);
    let before = repo.artifacts(PACKAGE).unwrap();

    let outcome = lists
        .handle(
            PACKAGE,
            &creators(),
            &ListSubmission::new(ListAction::MoveDown, Some(NodeRef::Existing(ids[2]))),
        )
        .unwrap();
    assert!(!outcome.saved);
    assert_eq!(repo.artifacts(PACKAGE).unwrap(), before);
}

#[test]
fn remove_drops_row_from_both_artifacts() {
    let (repo, ids) = seeded();
    let lists = ListService::new(&repo);

    let submission =
        ListSubmission::from_pairs([(ids[1].to_string().as_str(), "Remove")]).unwrap();
    let outcome = lists.handle(PACKAGE, &creators(), &submission).unwrap();
    assert!(outcome.saved);
    assert_eq!(row_ids(&lists), vec![ids[0], ids[2]]);

    let artifacts = repo.artifacts(PACKAGE).unwrap();
    assert!(!artifacts.derived.contains("Beta"));
    assert!(!artifacts.canonical.contains("Beta"));
}

#[test]
fn unknown_or_foreign_rows_are_not_found() {
    let (repo, _) = seeded();
    let contact = add_party(&repo, PartyRole::Contact, "Delta");
    let lists = ListService::new(&repo);

    let unknown = lists.handle(
        PACKAGE,
        &creators(),
        &ListSubmission::new(ListAction::Remove, Some(NodeRef::Existing(Uuid::new_v4()))),
    );
    assert!(matches!(unknown, Err(SessionError::NotFound(_))));

    let foreign = lists.handle(
        PACKAGE,
        &creators(),
        &ListSubmission::new(ListAction::Edit, Some(NodeRef::Existing(contact))),
    );
    assert!(matches!(foreign, Err(SessionError::NotFound(_))));
}

#[test]
fn add_attribute_variant_carries_scale_to_detail_page() {
    let (repo, _) = seeded();
    let lists = ListService::new(&repo);
    let attributes = Collection::in_entity(
        EntityKind::Attribute,
        EntityContext {
            kind: EntityKind::DataTable,
            node: NodeRef::New(None),
        },
    );

    let view = lists.view(PACKAGE, &attributes).unwrap();
    assert!(view.rows.is_empty());
    assert_eq!(view.choices.len(), 5);

    let action = ListAction::parse("Add Attribute: Ordinal").unwrap();
    let outcome = lists
        .handle(PACKAGE, &attributes, &ListSubmission::new(action, None))
        .unwrap();
    assert_eq!(
        outcome.destination,
        Destination::Detail {
            collection: attributes,
            node: NodeRef::New(Some(MeasurementScale::Ordinal)),
        }
    );
    assert!(!outcome.saved);
}

#[test]
fn placeholder_and_navigation_buttons_never_write() {
    let (repo, _) = seeded();
    let lists = ListService::new(&repo);
    let before = repo.artifacts(PACKAGE).unwrap();

    let placeholder = ListAction::parse(PLACEHOLDER_TOKEN).unwrap();
    let stay = lists
        .handle(PACKAGE, &creators(), &ListSubmission::new(placeholder, None))
        .unwrap();
    assert_eq!(stay.destination, Destination::List(creators()));

    let back = lists
        .handle(PACKAGE, &creators(), &ListSubmission::new(ListAction::Back, None))
        .unwrap();
    assert_eq!(back.destination, Destination::Step(WizardStep::Access));

    assert_eq!(repo.artifacts(PACKAGE).unwrap(), before);
}

#[test]
fn adding_personnel_opens_the_project_page_until_a_project_exists() {
    let (repo, _) = seeded();
    let lists = ListService::new(&repo);
    let personnel = Collection::dataset(EntityKind::Party(PartyRole::Personnel));
    let add = ListAction::parse("Add Project Personnel").unwrap();
    let project_page = Destination::Detail {
        collection: Collection::dataset(EntityKind::Project),
        node: NodeRef::New(None),
    };

    let outcome = lists
        .handle(PACKAGE, &personnel, &ListSubmission::new(add, None))
        .unwrap();
    assert_eq!(outcome.destination, project_page);
    assert!(!outcome.saved);

    DetailService::new(&repo, EngineConfig::default())
        .submit(
            PACKAGE,
            &ProjectBuilder,
            &Collection::dataset(EntityKind::Project),
            NodeRef::New(None),
            &Submission {
                fields: ProjectFields {
                    title: "Long-term lake survey".to_string(),
                    ..ProjectFields::default()
                },
                fingerprint: None,
                control: SubmitControl::Save,
            },
        )
        .unwrap();

    let outcome = lists
        .handle(PACKAGE, &personnel, &ListSubmission::new(add, None))
        .unwrap();
    assert_eq!(
        outcome.destination,
        Destination::Detail {
            collection: personnel,
            node: NodeRef::New(None),
        }
    );
}

#[test]
fn singleton_kinds_have_no_list_page() {
    let (repo, _) = seeded();
    let lists = ListService::new(&repo);
    for kind in [EntityKind::Project, EntityKind::Party(PartyRole::Publisher)] {
        let collection = Collection::dataset(kind);
        assert!(matches!(
            lists.entries(PACKAGE, &collection),
            Err(SessionError::InvalidRequest(_))
        ));
        assert!(matches!(
            lists.handle(PACKAGE, &collection, &ListSubmission::new(ListAction::Next, None)),
            Err(SessionError::InvalidRequest(_))
        ));
    }
}
