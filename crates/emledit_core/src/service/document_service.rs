//! Document lifecycle and single-value dataset fields.
//!
//! # Responsibility
//! - Create, open, copy, import, export and delete whole documents.
//! - Read and write the dataset's single-value fields (title, publication
//!   date and place, abstract, intellectual rights).
//!
//! # Invariants
//! - A new document has an access block granting its owner and the public
//!   principal, and an empty dataset.
//! - The root `packageId` always matches the id the document is stored
//!   under.
//! - Writing an empty single-value field removes it.

use super::{SessionError, SessionResult};
use crate::builder::access::apply_access_defaults;
use crate::builder::text_block;
use crate::codec::xml::from_derived;
use crate::config::EngineConfig;
use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::path::{ensure_path, named};
use crate::repo::document_repo::{validate_package_id, DocumentRepository};
use log::info;
use std::time::Instant;

/// Dataset fields edited as one plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singleton {
    Title,
    PubDate,
    Abstract,
    IntellectualRights,
    PubPlace,
}

impl Singleton {
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Title => names::TITLE,
            Self::PubDate => names::PUB_DATE,
            Self::Abstract => names::ABSTRACT,
            Self::IntellectualRights => names::INTELLECTUAL_RIGHTS,
            Self::PubPlace => names::PUB_PLACE,
        }
    }
}

/// Document lifecycle service.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
    config: EngineConfig,
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repo: R, config: EngineConfig) -> Self {
        Self { repo, config }
    }

    /// Creates and saves a new document owned by `owner`.
    ///
    /// # Errors
    /// - `InvalidRequest` when a document with this id already exists.
    /// - `Persistence` for an unusable package id or a failed save.
    pub fn create(
        &self,
        package_id: &str,
        title: Option<&str>,
        owner: &str,
    ) -> SessionResult<Document> {
        let started_at = Instant::now();
        self.ensure_absent(package_id)?;

        let rule = |principal: &str, permission: &str| {
            Element::new(names::ALLOW)
                .with_child(Element::text(names::PRINCIPAL, principal))
                .with_child(Element::text(names::PERMISSION, permission))
        };
        let mut dataset = Element::new(names::DATASET);
        dataset.push_text(names::TITLE, title);
        let eml = Element::new(names::EML)
            .with_attribute(names::PACKAGE_ID_ATTR, package_id)
            .with_attribute(names::SYSTEM_ATTR, self.config.system.as_str())
            .with_child(
                Element::new(names::ACCESS)
                    .with_child(rule(owner, &self.config.owner_permission))
                    .with_child(rule(
                        &self.config.public_principal,
                        &self.config.public_permission,
                    )),
            )
            .with_child(dataset);

        let mut doc = Document::from_element(&eml);
        let root = doc.root();
        if let Some(access) = doc.find_child(root, names::ACCESS) {
            apply_access_defaults(&mut doc, access, &self.config.access)?;
        }
        self.repo.save(package_id, &doc)?;
        info!(
            "event=document_create module=service status=ok package_id={} duration_ms={}",
            package_id,
            started_at.elapsed().as_millis()
        );
        Ok(doc)
    }

    pub fn open(&self, package_id: &str) -> SessionResult<Document> {
        Ok(self.repo.load(package_id)?)
    }

    /// Copies a document under a new id, rewriting its `packageId`.
    pub fn save_as(&self, package_id: &str, new_package_id: &str) -> SessionResult<Document> {
        self.ensure_absent(new_package_id)?;
        let mut doc = self.repo.load(package_id)?;
        let root = doc.root();
        doc.set_attribute(root, names::PACKAGE_ID_ATTR, new_package_id)?;
        self.repo.save(new_package_id, &doc)?;
        info!(
            "event=document_save_as module=service status=ok package_id={} new_package_id={}",
            package_id, new_package_id
        );
        Ok(doc)
    }

    pub fn delete(&self, package_id: &str) -> SessionResult<()> {
        Ok(self.repo.delete(package_id)?)
    }

    /// Package ids stored for the current user.
    pub fn documents(&self) -> SessionResult<Vec<String>> {
        Ok(self.repo.list()?)
    }

    /// Stores an EML XML file as a new document with fresh identities.
    ///
    /// # Errors
    /// - `InvalidRequest` when the id is taken or the root is not `eml`.
    pub fn import_xml(&self, package_id: &str, xml: &str) -> SessionResult<Document> {
        self.ensure_absent(package_id)?;
        let mut doc = from_derived(xml).map_err(|err| SessionError::Persistence(err.into()))?;
        let root = doc.root();
        if doc.name(root) != Some(names::EML) {
            return Err(SessionError::InvalidRequest(format!(
                "root element is `{}`, expected `{}`",
                doc.name(root).unwrap_or_default(),
                names::EML
            )));
        }
        doc.set_attribute(root, names::PACKAGE_ID_ATTR, package_id)?;
        self.repo.save(package_id, &doc)?;
        info!(
            "event=document_import module=service status=ok package_id={} nodes={}",
            package_id,
            doc.len()
        );
        Ok(doc)
    }

    /// The EML XML export written by the last save.
    pub fn export_xml(&self, package_id: &str) -> SessionResult<String> {
        Ok(self.repo.load_derived(package_id)?)
    }

    pub fn read_singleton(&self, package_id: &str, field: Singleton) -> SessionResult<Option<String>> {
        let doc = self.repo.load(package_id)?;
        Ok(singleton_value(&doc, field))
    }

    /// Replaces a single-value field; `None` or blank removes it.
    pub fn write_singleton(
        &self,
        package_id: &str,
        field: Singleton,
        value: Option<&str>,
    ) -> SessionResult<()> {
        let mut doc = self.repo.load(package_id)?;
        set_singleton(&mut doc, field, value)?;
        self.repo.save(package_id, &doc)?;
        info!(
            "event=singleton_write module=service status=ok package_id={} field={} cleared={}",
            package_id,
            field.element_name(),
            non_empty(value).is_none()
        );
        Ok(())
    }

    fn ensure_absent(&self, package_id: &str) -> SessionResult<()> {
        validate_package_id(package_id)?;
        if self.repo.exists(package_id)? {
            return Err(SessionError::InvalidRequest(format!(
                "document {package_id} already exists"
            )));
        }
        Ok(())
    }
}

/// Current value of a single-value field.
pub fn singleton_value(doc: &Document, field: Singleton) -> Option<String> {
    let dataset = doc.find_child(doc.root(), names::DATASET)?;
    let node = doc.find_child(dataset, field.element_name())?;
    text_block(doc, node)
}

/// Replaces a single-value field in a loaded document.
pub fn set_singleton(doc: &mut Document, field: Singleton, value: Option<&str>) -> SessionResult<()> {
    let root = doc.root();
    let (dataset, _) = ensure_path(doc, root, &named(&[names::DATASET]))?;
    for existing in doc.find_all_children(dataset, field.element_name()) {
        doc.discard(existing)?;
    }
    if let Some(value) = non_empty(value) {
        let node = doc.create_node(field.element_name(), Some(dataset))?;
        doc.set_content(node, Some(value.to_string()))?;
    }
    Ok(())
}
