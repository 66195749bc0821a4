//! Canonical JSON form.

use super::CodecResult;
use crate::model::document::Document;
use crate::model::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
struct JsonNode {
    id: NodeId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode>,
}

fn encode(doc: &Document, id: NodeId) -> Option<JsonNode> {
    let node = doc.resolve(id)?;
    Some(JsonNode {
        id,
        name: node.name().to_string(),
        content: node.content().map(str::to_string),
        attributes: node.attributes().clone(),
        children: node
            .children()
            .iter()
            .filter_map(|child| encode(doc, *child))
            .collect(),
    })
}

fn flatten(json: JsonNode, out: &mut Vec<Node>) -> NodeId {
    let id = json.id;
    let mut node = Node::new(id, json.name);
    node.content = json.content;
    node.attributes = json.attributes;
    node.children = json
        .children
        .into_iter()
        .map(|child| flatten(child, out))
        .collect();
    out.push(node);
    id
}

/// Serializes the attached tree. Detached nodes are not persisted.
pub fn to_canonical(doc: &Document) -> CodecResult<String> {
    let root = encode(doc, doc.root()).ok_or(super::CodecError::EmptyDocument)?;
    Ok(serde_json::to_string_pretty(&root)?)
}

/// Parses the canonical form, keeping every stored identity.
pub fn from_canonical(raw: &str) -> CodecResult<Document> {
    let root: JsonNode = serde_json::from_str(raw)?;
    let mut nodes = Vec::new();
    let root_id = flatten(root, &mut nodes);
    Ok(Document::from_nodes(root_id, nodes)?)
}

#[cfg(test)]
mod tests {
    use super::{from_canonical, to_canonical};
    use crate::codec::CodecError;
    use crate::model::document::Document;
    use crate::model::names;

    #[test]
    fn canonical_round_trip_keeps_identities() {
        let mut doc = Document::new(names::EML);
        doc.set_attribute(doc.root(), names::PACKAGE_ID_ATTR, "edi.1.1")
            .unwrap();
        let dataset = doc.create_node(names::DATASET, Some(doc.root())).unwrap();
        let title = doc.create_node(names::TITLE, Some(dataset)).unwrap();
        doc.set_content(title, Some("Lake data".to_string())).unwrap();

        let raw = to_canonical(&doc).unwrap();
        let loaded = from_canonical(&raw).unwrap();

        assert_eq!(loaded.root(), doc.root());
        assert_eq!(loaded.parent(title), Some(dataset));
        assert_eq!(loaded.resolve(title).unwrap().content(), Some("Lake data"));
        assert_eq!(to_canonical(&loaded).unwrap(), raw);
    }

    #[test]
    fn duplicate_identities_are_rejected() {
        let id = uuid::Uuid::new_v4();
        let raw = format!(
            r#"{{"id":"{id}","name":"eml","children":[{{"id":"{id}","name":"dataset"}}]}}"#
        );
        let err = from_canonical(&raw).unwrap_err();
        assert!(matches!(err, CodecError::Tree(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            from_canonical("{not json").unwrap_err(),
            CodecError::Json(_)
        ));
    }
}
