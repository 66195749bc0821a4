//! Code definitions of a nominal/ordinal attribute's enumerated domain.

use super::{
    entries_for, required_leaf, string_at, BuildResult, EntityBuilder, EntityKind, Entry,
    EntryDetail,
};
use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDefinitionFields {
    pub code: String,
    pub definition: String,
    /// Sort position for ordinal scales.
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CodeDefinitionBuilder;

impl EntityBuilder for CodeDefinitionBuilder {
    type Fields = CodeDefinitionFields;

    fn kind(&self) -> EntityKind {
        EntityKind::CodeDefinition
    }

    fn build(&self, fields: &CodeDefinitionFields) -> BuildResult<Element> {
        let mut code_definition = Element::new(names::CODE_DEFINITION);
        if let Some(order) = non_empty(fields.order.as_deref()) {
            code_definition = code_definition.with_attribute(names::ORDER_ATTR, order);
        }
        code_definition.push(required_leaf(names::CODE, &fields.code));
        code_definition.push(required_leaf(names::DEFINITION, &fields.definition));
        Ok(code_definition)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> CodeDefinitionFields {
        CodeDefinitionFields {
            code: string_at(doc, node, &[names::CODE]),
            definition: string_at(doc, node, &[names::DEFINITION]),
            order: doc
                .resolve(node)
                .and_then(|node| node.attribute(names::ORDER_ATTR))
                .map(str::to_string),
        }
    }
}

/// Rows for the code definitions under one `enumeratedDomain`.
pub fn list_code_definitions(doc: &Document, enumerated_domain: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(enumerated_domain, names::CODE_DEFINITION);
    entries_for(&ids, |_, id| {
        let code = string_at(doc, id, &[names::CODE]);
        let definition = string_at(doc, id, &[names::DEFINITION]);
        (
            code.clone(),
            EntryDetail::CodeDefinition { code, definition },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_definition_round_trips_with_order() {
        let fields = CodeDefinitionFields {
            code: "L".to_string(),
            definition: "Low".to_string(),
            order: Some("1".to_string()),
        };
        let element = CodeDefinitionBuilder.build(&fields).unwrap();
        assert_eq!(element.attributes.get(names::ORDER_ATTR).map(String::as_str), Some("1"));

        let mut doc = Document::new(names::ENUMERATED_DOMAIN);
        let id = doc.graft(&element);
        assert_eq!(CodeDefinitionBuilder.populate(&doc, id), fields);
    }

    #[test]
    fn rows_show_code_and_definition() {
        let mut doc = Document::new(names::ENUMERATED_DOMAIN);
        let domain = doc.root();
        for (code, definition) in [("L", "Low"), ("H", "High")] {
            let fields = CodeDefinitionFields {
                code: code.to_string(),
                definition: definition.to_string(),
                order: None,
            };
            let id = doc.graft(&CodeDefinitionBuilder.build(&fields).unwrap());
            doc.add_child(domain, id).unwrap();
        }
        let rows = list_code_definitions(&doc, domain);
        assert_eq!(rows[0].label, "L");
        assert_eq!(
            rows[1].detail,
            EntryDetail::CodeDefinition {
                code: "H".to_string(),
                definition: "High".to_string()
            }
        );
    }
}
