//! Data table and other entity builders.
//!
//! Both share the physical block (object name, size, text format, online
//! distribution). Nested collections (attributes, methods, coverage and the
//! distribution access rules) are edited on their own pages and are carried
//! over on replace.

use super::{
    entries_for, required_leaf, string_at, text_at, BuildResult, EntityBuilder, EntityKind,
    Entry, EntryDetail,
};
use crate::model::document::Document;
use crate::model::element::Element;
use crate::model::names;
use crate::model::node::NodeId;
use crate::model::path::{Branch, Step};
use serde::{Deserialize, Serialize};

const ENTITY_BRANCHES: &[Branch] = &[
    Branch {
        container: &[],
        name: names::ATTRIBUTE_LIST,
    },
    Branch {
        container: &[],
        name: names::METHODS,
    },
    Branch {
        container: &[],
        name: names::COVERAGE,
    },
    Branch {
        container: &[Step::Named(names::PHYSICAL), Step::Named(names::DISTRIBUTION)],
        name: names::ACCESS,
    },
];

const TEXT_FORMAT_PATH: &[&str] = &[names::PHYSICAL, names::DATA_FORMAT, names::TEXT_FORMAT];

/// Physical description shared by data tables and other entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalFields {
    pub object_name: Option<String>,
    pub size: Option<String>,
    pub num_header_lines: Option<String>,
    pub record_delimiter: Option<String>,
    pub attribute_orientation: Option<String>,
    pub field_delimiter: Option<String>,
    pub online_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableFields {
    pub entity_name: String,
    pub entity_description: Option<String>,
    pub physical: PhysicalFields,
    pub case_sensitive: Option<String>,
    pub number_of_records: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherEntityFields {
    pub entity_name: String,
    pub entity_type: String,
    pub entity_description: Option<String>,
    pub physical: PhysicalFields,
}

fn build_physical(fields: &PhysicalFields) -> Element {
    let mut physical = Element::new(names::PHYSICAL);
    physical.push_text(names::OBJECT_NAME, fields.object_name.as_deref());
    physical.push_text(names::SIZE, fields.size.as_deref());

    let mut simple_delimited = Element::new(names::SIMPLE_DELIMITED);
    simple_delimited.push_text(names::FIELD_DELIMITER, fields.field_delimiter.as_deref());

    let mut text_format = Element::new(names::TEXT_FORMAT);
    text_format.push_text(names::NUM_HEADER_LINES, fields.num_header_lines.as_deref());
    text_format.push_text(names::RECORD_DELIMITER, fields.record_delimiter.as_deref());
    text_format.push_text(
        names::ATTRIBUTE_ORIENTATION,
        fields.attribute_orientation.as_deref(),
    );
    text_format.push_block(simple_delimited);

    let mut data_format = Element::new(names::DATA_FORMAT);
    data_format.push_block(text_format);
    physical.push_block(data_format);

    let mut online = Element::new(names::ONLINE);
    online.push_text(names::URL, fields.online_url.as_deref());
    let mut distribution = Element::new(names::DISTRIBUTION);
    distribution.push_block(online);
    physical.push_block(distribution);

    physical
}

fn populate_physical(doc: &Document, entity: NodeId) -> PhysicalFields {
    let text_format = |leaf: &str| {
        let mut path = TEXT_FORMAT_PATH.to_vec();
        path.push(leaf);
        text_at(doc, entity, &path)
    };
    PhysicalFields {
        object_name: text_at(doc, entity, &[names::PHYSICAL, names::OBJECT_NAME]),
        size: text_at(doc, entity, &[names::PHYSICAL, names::SIZE]),
        num_header_lines: text_format(names::NUM_HEADER_LINES),
        record_delimiter: text_format(names::RECORD_DELIMITER),
        attribute_orientation: text_format(names::ATTRIBUTE_ORIENTATION),
        field_delimiter: text_at(
            doc,
            entity,
            &[
                names::PHYSICAL,
                names::DATA_FORMAT,
                names::TEXT_FORMAT,
                names::SIMPLE_DELIMITED,
                names::FIELD_DELIMITER,
            ],
        ),
        online_url: text_at(
            doc,
            entity,
            &[names::PHYSICAL, names::DISTRIBUTION, names::ONLINE, names::URL],
        ),
    }
}

/// Builder for `dataTable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTableBuilder;

impl EntityBuilder for DataTableBuilder {
    type Fields = DataTableFields;

    fn kind(&self) -> EntityKind {
        EntityKind::DataTable
    }

    fn build(&self, fields: &DataTableFields) -> BuildResult<Element> {
        let mut table = Element::new(names::DATA_TABLE);
        table.push(required_leaf(names::ENTITY_NAME, &fields.entity_name));
        table.push_text(names::ENTITY_DESCRIPTION, fields.entity_description.as_deref());
        table.push_block(build_physical(&fields.physical));
        table.push_text(names::CASE_SENSITIVE, fields.case_sensitive.as_deref());
        table.push_text(names::NUMBER_OF_RECORDS, fields.number_of_records.as_deref());
        Ok(table)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> DataTableFields {
        DataTableFields {
            entity_name: string_at(doc, node, &[names::ENTITY_NAME]),
            entity_description: text_at(doc, node, &[names::ENTITY_DESCRIPTION]),
            physical: populate_physical(doc, node),
            case_sensitive: text_at(doc, node, &[names::CASE_SENSITIVE]),
            number_of_records: text_at(doc, node, &[names::NUMBER_OF_RECORDS]),
        }
    }

    fn preserved_branches(&self) -> &'static [Branch] {
        ENTITY_BRANCHES
    }
}

/// Builder for `otherEntity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtherEntityBuilder;

impl EntityBuilder for OtherEntityBuilder {
    type Fields = OtherEntityFields;

    fn kind(&self) -> EntityKind {
        EntityKind::OtherEntity
    }

    fn build(&self, fields: &OtherEntityFields) -> BuildResult<Element> {
        let mut entity = Element::new(names::OTHER_ENTITY);
        entity.push(required_leaf(names::ENTITY_NAME, &fields.entity_name));
        entity.push_text(names::ENTITY_DESCRIPTION, fields.entity_description.as_deref());
        entity.push_block(build_physical(&fields.physical));
        entity.push(required_leaf(names::ENTITY_TYPE, &fields.entity_type));
        Ok(entity)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> OtherEntityFields {
        OtherEntityFields {
            entity_name: string_at(doc, node, &[names::ENTITY_NAME]),
            entity_type: string_at(doc, node, &[names::ENTITY_TYPE]),
            entity_description: text_at(doc, node, &[names::ENTITY_DESCRIPTION]),
            physical: populate_physical(doc, node),
        }
    }

    fn preserved_branches(&self) -> &'static [Branch] {
        ENTITY_BRANCHES
    }
}

/// Rows for the entities of one kind under `dataset`.
pub fn list_entities(doc: &Document, dataset: NodeId, kind: EntityKind) -> Vec<Entry> {
    let ids = doc.find_all_children(dataset, kind.element_name());
    entries_for(&ids, |_, id| {
        (string_at(doc, id, &[names::ENTITY_NAME]), EntryDetail::None)
    })
}

#[cfg(test)]
mod tests {
    use super::{DataTableBuilder, DataTableFields, OtherEntityBuilder, OtherEntityFields, PhysicalFields};
    use crate::builder::EntityBuilder;
    use crate::model::document::Document;
    use crate::model::names;

    fn full_physical() -> PhysicalFields {
        PhysicalFields {
            object_name: Some("lakes.csv".to_string()),
            size: Some("2048".to_string()),
            num_header_lines: Some("1".to_string()),
            record_delimiter: Some("\\r\\n".to_string()),
            attribute_orientation: Some("column".to_string()),
            field_delimiter: Some(",".to_string()),
            online_url: Some("https://example.org/lakes.csv".to_string()),
        }
    }

    #[test]
    fn data_table_round_trips() {
        let fields = DataTableFields {
            entity_name: "Lakes".to_string(),
            entity_description: Some("Lake chemistry".to_string()),
            physical: full_physical(),
            case_sensitive: Some("no".to_string()),
            number_of_records: Some("120".to_string()),
        };
        let element = DataTableBuilder.build(&fields).unwrap();
        let mut doc = Document::new(names::EML);
        let id = doc.graft(&element);
        assert_eq!(DataTableBuilder.populate(&doc, id), fields);
    }

    #[test]
    fn other_entity_round_trips() {
        let fields = OtherEntityFields {
            entity_name: "Photos".to_string(),
            entity_type: "image archive".to_string(),
            entity_description: None,
            physical: full_physical(),
        };
        let element = OtherEntityBuilder.build(&fields).unwrap();
        let mut doc = Document::new(names::EML);
        let id = doc.graft(&element);
        assert_eq!(OtherEntityBuilder.populate(&doc, id), fields);
    }

    #[test]
    fn physical_is_omitted_when_every_field_is_blank() {
        let fields = DataTableFields {
            entity_name: "Only a name".to_string(),
            ..DataTableFields::default()
        };
        let element = DataTableBuilder.build(&fields).unwrap();
        assert!(element.child(names::PHYSICAL).is_none());
    }

    #[test]
    fn online_url_alone_emits_only_distribution() {
        let fields = DataTableFields {
            entity_name: "t".to_string(),
            physical: PhysicalFields {
                online_url: Some("https://example.org/t.csv".to_string()),
                ..PhysicalFields::default()
            },
            ..DataTableFields::default()
        };
        let element = DataTableBuilder.build(&fields).unwrap();
        let physical = element.child(names::PHYSICAL).unwrap();
        assert!(physical.child(names::DATA_FORMAT).is_none());
        assert_eq!(
            physical
                .descendant(&[names::DISTRIBUTION, names::ONLINE, names::URL])
                .and_then(|url| url.content.as_deref()),
            Some("https://example.org/t.csv")
        );
    }
}
