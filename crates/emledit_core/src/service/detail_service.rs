//! Detail page controller: rebuild-and-replace editing of one entity.
//!
//! # Responsibility
//! - Project a stored entity into its form (or a blank form for the create
//!   sentinel), stamped with a content fingerprint.
//! - On submit, rebuild the whole entity from the form, carry over the
//!   branches other pages own, swap it in at the old position and save.
//!
//! # Invariants
//! - Unchanged forms are not rebuilt and nothing is written.
//! - The new subtree is built before the document is loaded; a build error
//!   leaves the stored document untouched.
//! - Fields the form does not expose are dropped on rebuild unless they sit
//!   in a preserved branch.
//! - Advisories are returned and logged but never block the save.
//! - The create sentinel on a singleton page edits the stored singleton.

use super::collection::{expect_node, Collection};
use super::fingerprint::{fingerprint, is_dirty};
use super::migration::migrate_branches;
use super::navigation::{route_submit, Destination, SubmitControl};
use super::{SessionError, SessionResult};
use crate::builder::attribute::{convert_scale, scale_node, scale_of, ScaleConversion};
use crate::builder::EntityBuilder;
use crate::config::EngineConfig;
use crate::model::document::Document;
use crate::model::element::Element;
use crate::model::names;
use crate::model::node::{NodeId, NodeRef};
use crate::model::scale::MeasurementScale;
use crate::repo::document_repo::DocumentRepository;
use log::{info, warn};
use std::time::Instant;

/// Form contents shown on a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailForm<F> {
    pub fields: F,
    /// Fingerprint of `fields` as loaded; posted back with the form.
    pub fingerprint: String,
}

/// A posted detail form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<F> {
    pub fields: F,
    /// Fingerprint issued by `load`; `None` forces a rebuild.
    pub fingerprint: Option<String>,
    pub control: SubmitControl,
}

/// Result of a detail submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailOutcome {
    pub destination: Destination,
    /// Identity of the entity after the submit (the new subtree on rebuild).
    pub node: Option<NodeId>,
    /// Whether the document was written.
    pub saved: bool,
    pub advisories: Vec<String>,
}

/// Detail controller over a document repository.
pub struct DetailService<R: DocumentRepository> {
    repo: R,
    config: EngineConfig,
}

impl<R: DocumentRepository> DetailService<R> {
    pub fn new(repo: R, config: EngineConfig) -> Self {
        Self { repo, config }
    }

    /// Loads the form for `node`. A create sentinel for a singleton kind
    /// loads the stored singleton when there is one.
    ///
    /// # Errors
    /// - `NotFound` when an existing reference does not resolve to a node
    ///   of the builder's kind.
    pub fn load<B: EntityBuilder>(
        &self,
        package_id: &str,
        builder: &B,
        node: NodeRef,
    ) -> SessionResult<DetailForm<B::Fields>> {
        let node = if node.is_new() && builder.kind().is_singleton() {
            self.resolve_singleton(package_id, &Collection::dataset(builder.kind()), node)?
        } else {
            node
        };
        let fields = match node {
            NodeRef::New(_) => builder.blank(node),
            NodeRef::Existing(id) => {
                let doc = self.repo.load(package_id)?;
                expect_node(&doc, id, builder.kind().element_name())?;
                builder.populate(&doc, id)
            }
        };
        Ok(DetailForm {
            fingerprint: fingerprint(&fields)?,
            fields,
        })
    }

    /// Node a detail page edits: the stored singleton for a create sentinel
    /// on a singleton page, `node` otherwise.
    pub fn resolve_singleton(
        &self,
        package_id: &str,
        collection: &Collection,
        node: NodeRef,
    ) -> SessionResult<NodeRef> {
        if !node.is_new() || !collection.kind.is_singleton() {
            return Ok(node);
        }
        let doc = self.repo.load(package_id)?;
        collection.resolve_singleton(&doc, node)
    }

    /// Applies a posted form.
    ///
    /// # Errors
    /// - `InvalidRequest` when the builder does not match the collection or
    ///   the control is not on this page.
    /// - `Build` when the form cannot be assembled; nothing is written.
    /// - `NotFound` when the edited node vanished.
    /// - `Persistence` when the save fails.
    pub fn submit<B: EntityBuilder>(
        &self,
        package_id: &str,
        builder: &B,
        collection: &Collection,
        node: NodeRef,
        submission: &Submission<B::Fields>,
    ) -> SessionResult<DetailOutcome> {
        let started_at = Instant::now();
        let kind = builder.kind();
        if kind != collection.kind {
            return Err(SessionError::InvalidRequest(format!(
                "builder for `{}` used on a `{}` page",
                kind.element_name(),
                collection.kind.element_name()
            )));
        }
        if !submission.control.applies_to(collection) {
            return Err(SessionError::InvalidRequest(format!(
                "control {:?} is not available for `{}`",
                submission.control,
                kind.element_name()
            )));
        }

        let advisories = builder.advisories(&submission.fields);
        if !advisories.is_empty() {
            warn!(
                "event=detail_advisory module=service status=warn package_id={} kind={} advisories={}",
                package_id,
                kind.element_name(),
                advisories.len()
            );
        }

        let forced = node.is_new() && submission.control.opens_sub_page();
        let dirty = forced || is_dirty(&submission.fields, submission.fingerprint.as_deref())?;
        if !dirty {
            let destination = route_submit(collection, submission.control, node.existing())?;
            info!(
                "event=detail_submit module=service status=ok package_id={} kind={} rebuilt=false duration_ms={}",
                package_id,
                kind.element_name(),
                started_at.elapsed().as_millis()
            );
            return Ok(DetailOutcome {
                destination,
                node: node.existing(),
                saved: false,
                advisories,
            });
        }

        let element = match builder.build(&submission.fields) {
            Ok(element) => element,
            Err(err) => {
                warn!(
                    "event=detail_submit module=service status=error package_id={} kind={} error_code=build_failed error={}",
                    package_id,
                    kind.element_name(),
                    err
                );
                return Err(err.into());
            }
        };

        let mut doc = self.repo.load(package_id)?;
        let node = collection.resolve_singleton(&doc, node)?;
        let (saved_node, collection) = match node {
            NodeRef::New(_) => {
                let (container, resolved) =
                    collection.ensure_container(&mut doc, &self.config.access)?;
                let new = doc.graft(&element);
                doc.add_child(container, new)?;
                (new, resolved)
            }
            NodeRef::Existing(old) => {
                let new = replace_entity(&mut doc, builder, old, &element)?;
                (new, *collection)
            }
        };

        if submission.control == SubmitControl::Codes
            && !scale_of(&doc, saved_node).is_some_and(MeasurementScale::is_categorical)
        {
            return Err(SessionError::InvalidRequest(
                "codes exist only for nominal or ordinal attributes".to_string(),
            ));
        }
        let destination = route_submit(&collection, submission.control, Some(saved_node))?;

        self.repo.save(package_id, &doc)?;
        info!(
            "event=detail_submit module=service status=ok package_id={} kind={} node={} rebuilt=true duration_ms={}",
            package_id,
            kind.element_name(),
            saved_node,
            started_at.elapsed().as_millis()
        );
        Ok(DetailOutcome {
            destination,
            node: Some(saved_node),
            saved: true,
            advisories,
        })
    }

    /// Measurement scale of a stored attribute, used to pick its page.
    pub fn attribute_scale(
        &self,
        package_id: &str,
        attribute: NodeId,
    ) -> SessionResult<Option<MeasurementScale>> {
        let doc = self.repo.load(package_id)?;
        expect_node(&doc, attribute, names::ATTRIBUTE)?;
        Ok(scale_of(&doc, attribute))
    }

    /// Renames an attribute's scale in place and saves.
    ///
    /// # Errors
    /// - `NotFound` when the attribute or its scale node is missing.
    /// - `Build` when the attribute is not on the conversion's source scale;
    ///   nothing is written.
    pub fn change_scale(
        &self,
        package_id: &str,
        attribute: NodeId,
        conversion: ScaleConversion,
    ) -> SessionResult<()> {
        let mut doc = self.repo.load(package_id)?;
        expect_node(&doc, attribute, names::ATTRIBUTE)?;
        let scale = scale_node(&doc, attribute)
            .ok_or_else(|| SessionError::NotFound(format!("measurement scale of {attribute}")))?;
        convert_scale(&mut doc, scale, conversion)?;
        self.repo.save(package_id, &doc)?;
        info!(
            "event=scale_change module=service status=ok package_id={} node={} from={} to={}",
            package_id,
            attribute,
            conversion.source(),
            conversion.target()
        );
        Ok(())
    }
}

/// Swaps `old` for a fresh subtree built from `element`, migrating the
/// builder's preserved branches. Returns the new identity.
fn replace_entity<B: EntityBuilder>(
    doc: &mut Document,
    builder: &B,
    old: NodeId,
    element: &Element,
) -> SessionResult<NodeId> {
    expect_node(doc, old, builder.kind().element_name())?;
    let parent = doc
        .parent(old)
        .ok_or_else(|| SessionError::NotFound(format!("parent of {old}")))?;
    let new = doc.graft(element);
    migrate_branches(doc, old, new, builder.preserved_branches())?;
    doc.replace_child(parent, old, new)?;
    doc.discard(old)?;
    Ok(new)
}
