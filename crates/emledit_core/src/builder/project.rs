//! Project builder. Personnel are edited on their own list page and carried
//! over when the project is rebuilt.

use super::{required_leaf, string_at, text_at, BuildResult, EntityBuilder, EntityKind};
use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::NodeId;
use crate::model::path::Branch;
use serde::{Deserialize, Serialize};

const PROJECT_BRANCHES: &[Branch] = &[Branch {
    container: &[],
    name: names::PERSONNEL,
}];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    pub title: String,
    pub abstract_text: Option<String>,
    pub funding: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectBuilder;

fn para_block(name: &str, text: Option<&str>) -> Option<Element> {
    non_empty(text).map(|text| Element::new(name).with_child(Element::text(names::PARA, text)))
}

impl EntityBuilder for ProjectBuilder {
    type Fields = ProjectFields;

    fn kind(&self) -> EntityKind {
        EntityKind::Project
    }

    fn build(&self, fields: &ProjectFields) -> BuildResult<Element> {
        let mut project = Element::new(names::PROJECT);
        project.push(required_leaf(names::TITLE, &fields.title));
        if let Some(block) = para_block(names::ABSTRACT, fields.abstract_text.as_deref()) {
            project.push(block);
        }
        if let Some(block) = para_block(names::FUNDING, fields.funding.as_deref()) {
            project.push(block);
        }
        Ok(project)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> ProjectFields {
        ProjectFields {
            title: string_at(doc, node, &[names::TITLE]),
            abstract_text: text_at(doc, node, &[names::ABSTRACT, names::PARA]),
            funding: text_at(doc, node, &[names::FUNDING, names::PARA]),
        }
    }

    fn preserved_branches(&self) -> &'static [Branch] {
        PROJECT_BRANCHES
    }
}
