//! Keyword builder; keywords live in the dataset's `keywordSet`.

use super::{entries_for, BuildError, BuildResult, EntityBuilder, EntityKind, Entry, EntryDetail};
use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFields {
    pub keyword: String,
    /// `place`, `stratum`, `temporal`, `theme` or `taxonomic`.
    pub keyword_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordBuilder;

impl EntityBuilder for KeywordBuilder {
    type Fields = KeywordFields;

    fn kind(&self) -> EntityKind {
        EntityKind::Keyword
    }

    fn build(&self, fields: &KeywordFields) -> BuildResult<Element> {
        let keyword = non_empty(Some(&fields.keyword)).ok_or(BuildError::MissingField("keyword"))?;
        let mut element = Element::text(names::KEYWORD, keyword);
        if let Some(keyword_type) = non_empty(fields.keyword_type.as_deref()) {
            element = element.with_attribute(names::KEYWORD_TYPE_ATTR, keyword_type);
        }
        Ok(element)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> KeywordFields {
        let Some(keyword) = doc.resolve(node) else {
            return KeywordFields::default();
        };
        KeywordFields {
            keyword: keyword.content().unwrap_or_default().to_string(),
            keyword_type: keyword
                .attribute(names::KEYWORD_TYPE_ATTR)
                .map(str::to_string),
        }
    }
}

pub fn list_keywords(doc: &Document, keyword_set: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(keyword_set, names::KEYWORD);
    entries_for(&ids, |_, id| {
        let fields = KeywordBuilder.populate(doc, id);
        (
            fields.keyword,
            EntryDetail::Keyword {
                keyword_type: fields.keyword_type.unwrap_or_default(),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_round_trips_with_type() {
        let fields = KeywordFields {
            keyword: "drought".to_string(),
            keyword_type: Some("theme".to_string()),
        };
        let mut doc = Document::new(names::KEYWORD_SET);
        let id = doc.graft(&KeywordBuilder.build(&fields).unwrap());
        doc.add_child(doc.root(), id).unwrap();
        assert_eq!(KeywordBuilder.populate(&doc, id), fields);

        let rows = list_keywords(&doc, doc.root());
        assert_eq!(rows[0].label, "drought");
        assert_eq!(
            rows[0].detail,
            EntryDetail::Keyword {
                keyword_type: "theme".to_string()
            }
        );
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let fields = KeywordFields {
            keyword: "  ".to_string(),
            keyword_type: None,
        };
        assert_eq!(
            KeywordBuilder.build(&fields),
            Err(BuildError::MissingField("keyword"))
        );
    }
}
