//! Responsible-party builder shared by every party flavour.
//!
//! # Invariants
//! - The element name follows the builder's `PartyRole`; the body layout is
//!   identical across roles.
//! - A party carries at least one of individual name, organization name or
//!   position name.

use super::{
    entries_for, text_at, BuildError, BuildResult, EntityBuilder, EntityKind, Entry, EntryDetail,
    PartyRole,
};
use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

const VOICE: &str = "voice";
const FACSIMILE: &str = "facsimile";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyFields {
    pub salutation: Option<String>,
    pub given_name: Option<String>,
    pub sur_name: Option<String>,
    pub organization: Option<String>,
    pub position_name: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub online_url: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PartyBuilder {
    role: PartyRole,
}

impl PartyBuilder {
    pub fn new(role: PartyRole) -> Self {
        Self { role }
    }

    pub fn role(&self) -> PartyRole {
        self.role
    }
}

fn phone(number: &str, phone_type: &str) -> Element {
    Element::text(names::PHONE, number).with_attribute(names::PHONE_TYPE_ATTR, phone_type)
}

impl EntityBuilder for PartyBuilder {
    type Fields = PartyFields;

    fn kind(&self) -> EntityKind {
        EntityKind::Party(self.role)
    }

    fn build(&self, fields: &PartyFields) -> BuildResult<Element> {
        let mut party = Element::new(self.role.element_name());

        let mut individual_name = Element::new(names::INDIVIDUAL_NAME);
        individual_name.push_text(names::SALUTATION, fields.salutation.as_deref());
        individual_name.push_text(names::GIVEN_NAME, fields.given_name.as_deref());
        individual_name.push_text(names::SUR_NAME, fields.sur_name.as_deref());
        party.push_block(individual_name);
        party.push_text(names::ORGANIZATION_NAME, fields.organization.as_deref());
        party.push_text(names::POSITION_NAME, fields.position_name.as_deref());
        if party.is_empty() {
            return Err(BuildError::MissingField(
                "individualName, organizationName or positionName",
            ));
        }

        let mut address = Element::new(names::ADDRESS);
        address.push_text(names::DELIVERY_POINT, fields.address_1.as_deref());
        address.push_text(names::DELIVERY_POINT, fields.address_2.as_deref());
        address.push_text(names::CITY, fields.city.as_deref());
        address.push_text(names::ADMINISTRATIVE_AREA, fields.state.as_deref());
        address.push_text(names::POSTAL_CODE, fields.postal_code.as_deref());
        address.push_text(names::COUNTRY, fields.country.as_deref());
        party.push_block(address);

        if let Some(number) = non_empty(fields.phone.as_deref()) {
            party.push(phone(number, VOICE));
        }
        if let Some(number) = non_empty(fields.fax.as_deref()) {
            party.push(phone(number, FACSIMILE));
        }
        party.push_text(names::ELECTRONIC_MAIL_ADDRESS, fields.email.as_deref());
        party.push_text(names::ONLINE_URL, fields.online_url.as_deref());
        party.push_text(names::ROLE, fields.role.as_deref());
        Ok(party)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> PartyFields {
        let delivery_points: Vec<String> = doc
            .find_descendant(node, &[names::ADDRESS])
            .map(|address| {
                doc.find_all_children(address, names::DELIVERY_POINT)
                    .into_iter()
                    .filter_map(|id| doc.resolve(id).and_then(|n| n.content()).map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        let phone_of = |phone_type: &str| {
            doc.find_all_children(node, names::PHONE)
                .into_iter()
                .filter_map(|id| doc.resolve(id))
                .find(|phone| phone.attribute(names::PHONE_TYPE_ATTR) == Some(phone_type))
                .and_then(|phone| phone.content())
                .map(str::to_string)
        };
        PartyFields {
            salutation: text_at(doc, node, &[names::INDIVIDUAL_NAME, names::SALUTATION]),
            given_name: text_at(doc, node, &[names::INDIVIDUAL_NAME, names::GIVEN_NAME]),
            sur_name: text_at(doc, node, &[names::INDIVIDUAL_NAME, names::SUR_NAME]),
            organization: text_at(doc, node, &[names::ORGANIZATION_NAME]),
            position_name: text_at(doc, node, &[names::POSITION_NAME]),
            address_1: delivery_points.first().cloned(),
            address_2: delivery_points.get(1).cloned(),
            city: text_at(doc, node, &[names::ADDRESS, names::CITY]),
            state: text_at(doc, node, &[names::ADDRESS, names::ADMINISTRATIVE_AREA]),
            postal_code: text_at(doc, node, &[names::ADDRESS, names::POSTAL_CODE]),
            country: text_at(doc, node, &[names::ADDRESS, names::COUNTRY]),
            phone: phone_of(VOICE),
            fax: phone_of(FACSIMILE),
            email: text_at(doc, node, &[names::ELECTRONIC_MAIL_ADDRESS]),
            online_url: text_at(doc, node, &[names::ONLINE_URL]),
            role: text_at(doc, node, &[names::ROLE]),
        }
    }
}

fn individual_name_label(doc: &Document, individual_name: NodeId) -> String {
    let mut parts = Vec::new();
    for name in [names::SALUTATION, names::GIVEN_NAME, names::SUR_NAME] {
        for id in doc.find_all_children(individual_name, name) {
            if let Some(content) = doc.resolve(id).and_then(|node| non_empty(node.content())) {
                parts.push(content);
            }
        }
    }
    parts.join(" ")
}

/// Display label of one party: name, then position, then organization.
pub fn party_label(doc: &Document, party: NodeId) -> String {
    let individual = doc
        .find_child(party, names::INDIVIDUAL_NAME)
        .map(|id| individual_name_label(doc, id))
        .unwrap_or_default();
    let position = text_at(doc, party, &[names::POSITION_NAME]).unwrap_or_default();
    let organization = text_at(doc, party, &[names::ORGANIZATION_NAME]).unwrap_or_default();
    [individual, position, organization]
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rows for the parties of one role directly under `parent`.
pub fn list_parties(doc: &Document, parent: NodeId, role: PartyRole) -> Vec<Entry> {
    let ids = doc.find_all_children(parent, role.element_name());
    entries_for(&ids, |_, id| (party_label(doc, id), EntryDetail::None))
}
