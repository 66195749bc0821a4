//! Method step builder.

use super::{
    entries_for, text_at, text_block, truncate_for_list, BuildResult, EntityBuilder, EntityKind,
    Entry, EntryDetail, LIST_TEXT_LIMIT,
};
use crate::model::document::Document;
use crate::model::element::Element;
use crate::model::names;
use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodStepFields {
    pub description: Option<String>,
    pub instrumentation: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MethodStepBuilder;

impl EntityBuilder for MethodStepBuilder {
    type Fields = MethodStepFields;

    fn kind(&self) -> EntityKind {
        EntityKind::MethodStep
    }

    fn build(&self, fields: &MethodStepFields) -> BuildResult<Element> {
        // `description` is mandatory in a method step even when blank.
        let mut description = Element::new(names::DESCRIPTION);
        description.push_text(names::PARA, fields.description.as_deref());

        let mut step = Element::new(names::METHOD_STEP).with_child(description);
        step.push_text(names::INSTRUMENTATION, fields.instrumentation.as_deref());
        Ok(step)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> MethodStepFields {
        MethodStepFields {
            description: doc
                .find_child(node, names::DESCRIPTION)
                .and_then(|id| text_block(doc, id)),
            instrumentation: text_at(doc, node, &[names::INSTRUMENTATION]),
        }
    }
}

/// Section text if present, else para text.
fn step_description(doc: &Document, step: NodeId) -> String {
    let Some(description) = doc.find_child(step, names::DESCRIPTION) else {
        return String::new();
    };
    text_at(doc, description, &[names::SECTION])
        .or_else(|| text_at(doc, description, &[names::PARA]))
        .unwrap_or_default()
}

pub fn list_method_steps(doc: &Document, methods: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(methods, names::METHOD_STEP);
    entries_for(&ids, |_, id| {
        let description = truncate_for_list(&step_description(doc, id), LIST_TEXT_LIMIT);
        let instrumentation = text_at(doc, id, &[names::INSTRUMENTATION]).unwrap_or_default();
        (
            description.clone(),
            EntryDetail::MethodStep {
                description,
                instrumentation: truncate_for_list(&instrumentation, LIST_TEXT_LIMIT),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_step_round_trips() {
        let fields = MethodStepFields {
            description: Some("Collected cores weekly".to_string()),
            instrumentation: Some("Soil auger".to_string()),
        };
        let mut doc = Document::new(names::METHODS);
        let id = doc.graft(&MethodStepBuilder.build(&fields).unwrap());
        assert_eq!(MethodStepBuilder.populate(&doc, id), fields);
    }

    #[test]
    fn blank_step_keeps_only_description() {
        let element = MethodStepBuilder.build(&MethodStepFields::default()).unwrap();
        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].name, names::DESCRIPTION);
    }

    #[test]
    fn list_prefers_section_and_truncates() {
        let mut doc = Document::new(names::METHODS);
        let methods = doc.root();
        let step = doc.create_node(names::METHOD_STEP, Some(methods)).unwrap();
        let description = doc.create_node(names::DESCRIPTION, Some(step)).unwrap();
        let para = doc.create_node(names::PARA, Some(description)).unwrap();
        doc.set_content(para, Some("para text".to_string())).unwrap();
        let section = doc.create_node(names::SECTION, Some(description)).unwrap();
        doc.set_content(section, Some("s".repeat(60))).unwrap();
        let instrumentation = doc.create_node(names::INSTRUMENTATION, Some(step)).unwrap();
        doc.set_content(instrumentation, Some("i".repeat(45))).unwrap();

        let rows = list_method_steps(&doc, methods);
        assert_eq!(rows[0].label, "s".repeat(40));
        assert_eq!(
            rows[0].detail,
            EntryDetail::MethodStep {
                description: "s".repeat(40),
                instrumentation: "i".repeat(40),
            }
        );
    }
}
