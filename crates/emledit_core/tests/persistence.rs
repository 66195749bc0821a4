use emledit_core::builder::keyword::{KeywordBuilder, KeywordFields};
use emledit_core::builder::EntityKind;
use emledit_core::codec::json::from_canonical;
use emledit_core::codec::xml::{from_derived, to_derived};
use emledit_core::model::names;
use emledit_core::service::collection::Collection;
use emledit_core::service::detail_service::Submission;
use emledit_core::service::navigation::SubmitControl;
use emledit_core::{
    DetailService, DocumentRepository, DocumentService, EngineConfig, FileDocumentRepository,
    NodeRef, RepoError, SessionError,
};
use tempfile::TempDir;

fn repo_in(dir: &TempDir) -> (EngineConfig, FileDocumentRepository) {
    let config = EngineConfig::with_data_root(dir.path());
    let repo = FileDocumentRepository::open(&config, "alice").unwrap();
    (config, repo)
}

#[test]
fn save_writes_both_artifacts_into_the_user_folder() {
    let dir = TempDir::new().unwrap();
    let (config, repo) = repo_in(&dir);
    DocumentService::new(&repo, config.clone())
        .create("knb.1.1", Some("Stream flow"), "alice")
        .unwrap();

    assert_eq!(repo.folder(), dir.path().join("alice"));
    let canonical = std::fs::read_to_string(repo.artifact_path("knb.1.1", "json")).unwrap();
    let derived = std::fs::read_to_string(repo.artifact_path("knb.1.1", "xml")).unwrap();

    let from_json = from_canonical(&canonical).unwrap();
    let from_xml = from_derived(&derived).unwrap();
    assert_eq!(from_json.len(), from_xml.len());
    assert!(derived.starts_with("<?xml"));
    assert!(derived.contains("Stream flow"));
}

#[test]
fn canonical_artifact_keeps_node_identities() {
    let dir = TempDir::new().unwrap();
    let (config, repo) = repo_in(&dir);
    DocumentService::new(&repo, config.clone())
        .create("knb.2.1", None, "alice")
        .unwrap();

    let outcome = DetailService::new(&repo, config)
        .submit(
            "knb.2.1",
            &KeywordBuilder,
            &Collection::dataset(EntityKind::Keyword),
            NodeRef::New(None),
            &Submission {
                fields: KeywordFields {
                    keyword: "hydrology".to_string(),
                    keyword_type: Some("theme".to_string()),
                },
                fingerprint: None,
                control: SubmitControl::Save,
            },
        )
        .unwrap();
    let keyword = outcome.node.unwrap();

    let doc = repo.load("knb.2.1").unwrap();
    assert_eq!(doc.name(keyword), Some(names::KEYWORD));
    assert_eq!(
        doc.resolve(keyword).unwrap().attribute(names::KEYWORD_TYPE_ATTR),
        Some("theme")
    );
}

#[test]
fn documents_are_listed_sorted_and_deleted_as_a_pair() {
    let dir = TempDir::new().unwrap();
    let (config, repo) = repo_in(&dir);
    let documents = DocumentService::new(&repo, config);
    documents.create("knb.9.1", None, "alice").unwrap();
    documents.create("knb.3.1", None, "alice").unwrap();

    assert_eq!(documents.documents().unwrap(), vec!["knb.3.1", "knb.9.1"]);

    documents.delete("knb.9.1").unwrap();
    assert!(!repo.artifact_path("knb.9.1", "json").exists());
    assert!(!repo.artifact_path("knb.9.1", "xml").exists());
    assert!(matches!(
        documents.open("knb.9.1"),
        Err(SessionError::NotFound(_))
    ));
}

#[test]
fn unsafe_ids_never_reach_the_filesystem() {
    let dir = TempDir::new().unwrap();
    let (config, repo) = repo_in(&dir);

    assert!(matches!(
        repo.exists("../escape"),
        Err(RepoError::InvalidPackageId(_))
    ));
    assert!(matches!(
        FileDocumentRepository::open(&config, "../bob"),
        Err(RepoError::InvalidUserId(_))
    ));
    assert!(matches!(
        DocumentService::new(&repo, config.clone()).create("a/b", None, "alice"),
        Err(SessionError::Persistence(RepoError::InvalidPackageId(_)))
    ));
}

#[test]
fn reloaded_canonical_rederives_the_same_export() {
    let dir = TempDir::new().unwrap();
    let (config, repo) = repo_in(&dir);
    let documents = DocumentService::new(&repo, config);
    documents.create("knb.4.1", Some("Ice & snow <cover>"), "alice").unwrap();

    let written = repo.load_derived("knb.4.1").unwrap();
    let reloaded = repo.load("knb.4.1").unwrap();
    assert_eq!(to_derived(&reloaded).unwrap(), written);
}
