//! Access rule builder and the `access` container defaults.
//!
//! Rules are `allow` elements under either the document-level `access` or an
//! entity's `physical/distribution/access`.

use super::{
    entries_for, string_at, BuildError, BuildResult, EntityBuilder, EntityKind, Entry,
    EntryDetail,
};
use crate::config::AccessDefaults;
use crate::model::document::{Document, TreeResult};
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

/// Permissions an `allow` rule may grant.
pub const PERMISSIONS: &[&str] = &["read", "write", "changePermission", "all"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRuleFields {
    pub principal: String,
    pub permission: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessRuleBuilder;

impl EntityBuilder for AccessRuleBuilder {
    type Fields = AccessRuleFields;

    fn kind(&self) -> EntityKind {
        EntityKind::AccessRule
    }

    fn build(&self, fields: &AccessRuleFields) -> BuildResult<Element> {
        let principal =
            non_empty(Some(&fields.principal)).ok_or(BuildError::MissingField("principal"))?;
        let permission = fields.permission.trim();
        if !PERMISSIONS.contains(&permission) {
            return Err(BuildError::InvalidValue {
                field: "permission",
                reason: format!("expected one of {}", PERMISSIONS.join(", ")),
            });
        }
        Ok(Element::new(names::ALLOW)
            .with_child(Element::text(names::PRINCIPAL, principal))
            .with_child(Element::text(names::PERMISSION, permission)))
    }

    fn populate(&self, doc: &Document, node: NodeId) -> AccessRuleFields {
        AccessRuleFields {
            principal: string_at(doc, node, &[names::PRINCIPAL]),
            permission: string_at(doc, node, &[names::PERMISSION]),
        }
    }
}

/// Stamps the configured `access` attributes onto `access`.
pub fn apply_access_defaults(
    doc: &mut Document,
    access: NodeId,
    defaults: &AccessDefaults,
) -> TreeResult<()> {
    for (key, value) in [
        (names::AUTH_SYSTEM_ATTR, &defaults.auth_system),
        (names::ORDER_ATTR, &defaults.order),
        (names::SCOPE_ATTR, &defaults.scope),
        (names::SYSTEM_ATTR, &defaults.system),
    ] {
        doc.set_attribute(access, key, value)?;
    }
    Ok(())
}

pub fn list_access_rules(doc: &Document, access: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(access, names::ALLOW);
    entries_for(&ids, |_, id| {
        let fields = AccessRuleBuilder.populate(doc, id);
        (
            fields.principal.clone(),
            EntryDetail::AccessRule {
                principal: fields.principal,
                permission: fields.permission,
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_rule_round_trips() {
        let fields = AccessRuleFields {
            principal: "uid=EDI,o=LTER,dc=ecoinformatics,dc=org".to_string(),
            permission: "all".to_string(),
        };
        let mut doc = Document::new(names::ACCESS);
        let id = doc.graft(&AccessRuleBuilder.build(&fields).unwrap());
        doc.add_child(doc.root(), id).unwrap();
        assert_eq!(AccessRuleBuilder.populate(&doc, id), fields);
        assert_eq!(list_access_rules(&doc, doc.root()).len(), 1);
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let fields = AccessRuleFields {
            principal: "public".to_string(),
            permission: "delete".to_string(),
        };
        assert!(matches!(
            AccessRuleBuilder.build(&fields),
            Err(BuildError::InvalidValue { field: "permission", .. })
        ));
    }

    #[test]
    fn defaults_are_stamped_on_the_container() {
        let mut doc = Document::new(names::ACCESS);
        let access = doc.root();
        apply_access_defaults(&mut doc, access, &AccessDefaults::default()).unwrap();
        let node = doc.resolve(access).unwrap();
        assert_eq!(node.attribute(names::SCOPE_ATTR), Some("document"));
        assert_eq!(node.attribute(names::ORDER_ATTR), Some("allowFirst"));
    }
}
