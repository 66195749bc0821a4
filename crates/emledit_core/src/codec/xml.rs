//! Derived EML XML export and import.

use super::{CodecError, CodecResult};
use crate::model::document::Document;
use crate::model::element::Element;
use crate::model::names;
use crate::model::node::NodeId;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

const EML_NAMESPACES: &[(&str, &str)] = &[
    ("xmlns:eml", "eml://ecoinformatics.org/eml-2.1.1"),
    ("xmlns:stmml", "http://www.xml-cml.org/schema/stmml-1.1"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    (
        "xsi:schemaLocation",
        "eml://ecoinformatics.org/eml-2.1.1 http://nis.lternet.edu/schemas/EML/eml-2.1.1/eml.xsd",
    ),
];

/// Renders the attached tree as an EML XML document with declaration.
pub fn to_derived(doc: &Document) -> CodecResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_node(&mut writer, doc, doc.root(), true)?;
    let mut rendered =
        String::from_utf8(writer.into_inner()).map_err(|err| CodecError::Xml(err.to_string()))?;
    rendered.push('\n');
    Ok(rendered)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    doc: &Document,
    id: NodeId,
    is_root: bool,
) -> CodecResult<()> {
    let Some(node) = doc.resolve(id) else {
        return Ok(());
    };
    let tag = if is_root && node.name() == names::EML {
        "eml:eml".to_string()
    } else {
        node.name().to_string()
    };

    let mut start = BytesStart::new(tag.as_str());
    if is_root && node.name() == names::EML {
        for (key, value) in EML_NAMESPACES {
            start.push_attribute((*key, *value));
        }
    }
    for (key, value) in node.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children().is_empty() && node.content().is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(content) = node.content() {
        writer.write_event(Event::Text(BytesText::new(content)))?;
    }
    for child in node.children() {
        write_node(writer, doc, *child, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
    Ok(())
}

/// Parses an EML XML file into a new document with fresh identities.
///
/// Namespace prefixes are dropped from element names, and namespace
/// declarations on elements are not kept since export re-adds them.
pub fn from_derived(raw: &str) -> CodecResult<Document> {
    let root = parse_elements(raw)?;
    Ok(Document::from_element(&root))
}

fn parse_elements(raw: &str) -> CodecResult<Element> {
    let mut reader = Reader::from_str(raw);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                let value = text.unescape()?.into_owned();
                append_text(&mut stack, &value);
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                append_text(&mut stack, &value);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| CodecError::Xml("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(CodecError::Xml("unclosed element at end of input".to_string()));
    }
    root.ok_or(CodecError::EmptyDocument)
}

fn element_from(start: &BytesStart<'_>) -> CodecResult<Element> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| CodecError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        if key.starts_with("xmlns") || key.starts_with("xsi:") {
            continue;
        }
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn append_text(stack: &mut [Element], value: &str) {
    if let Some(top) = stack.last_mut() {
        match top.content.as_mut() {
            Some(content) => content.push_str(value),
            None => top.content = Some(value.to_string()),
        }
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
