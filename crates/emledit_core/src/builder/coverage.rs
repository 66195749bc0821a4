//! Geographic, temporal and taxonomic coverage builders.
//!
//! # Responsibility
//! - Build one coverage element per submission; all three kinds live side
//!   by side under a `coverage` container.
//! - Flag implausible values (inverted boxes, reversed ranges) as
//!   advisories without blocking the save.
//!
//! # Invariants
//! - A temporal coverage holds `rangeOfDates` when both dates are given and
//!   `singleDateTime` when only the begin date is given.
//! - Taxonomic levels are emitted only for non-empty rank values; each level
//!   nests under the previously emitted one.

use super::{
    entries_for, required_leaf, string_at, text_at, truncate_for_list, BuildError, BuildResult,
    EntityBuilder, EntityKind, Entry, EntryDetail, LIST_TEXT_LIMIT,
};
use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

const BOUNDING_PATHS: [&str; 4] = [
    names::WEST_BOUNDING_COORDINATE,
    names::EAST_BOUNDING_COORDINATE,
    names::NORTH_BOUNDING_COORDINATE,
    names::SOUTH_BOUNDING_COORDINATE,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographicCoverageFields {
    pub description: String,
    pub west: String,
    pub east: String,
    pub north: String,
    pub south: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeographicCoverageBuilder;

impl EntityBuilder for GeographicCoverageBuilder {
    type Fields = GeographicCoverageFields;

    fn kind(&self) -> EntityKind {
        EntityKind::GeographicCoverage
    }

    fn build(&self, fields: &GeographicCoverageFields) -> BuildResult<Element> {
        let mut coordinates = Element::new(names::BOUNDING_COORDINATES);
        for (name, value) in BOUNDING_PATHS
            .into_iter()
            .zip([&fields.west, &fields.east, &fields.north, &fields.south])
        {
            coordinates.push(required_leaf(name, value));
        }
        Ok(Element::new(names::GEOGRAPHIC_COVERAGE)
            .with_child(required_leaf(names::GEOGRAPHIC_DESCRIPTION, &fields.description))
            .with_child(coordinates))
    }

    fn populate(&self, doc: &Document, node: NodeId) -> GeographicCoverageFields {
        let coordinate = |name: &str| string_at(doc, node, &[names::BOUNDING_COORDINATES, name]);
        GeographicCoverageFields {
            description: string_at(doc, node, &[names::GEOGRAPHIC_DESCRIPTION]),
            west: coordinate(names::WEST_BOUNDING_COORDINATE),
            east: coordinate(names::EAST_BOUNDING_COORDINATE),
            north: coordinate(names::NORTH_BOUNDING_COORDINATE),
            south: coordinate(names::SOUTH_BOUNDING_COORDINATE),
        }
    }

    fn advisories(&self, fields: &GeographicCoverageFields) -> Vec<String> {
        let parse = |value: &str| value.trim().parse::<f64>().ok();
        let mut advisories = Vec::new();
        for (label, value, limit) in [
            ("west", &fields.west, 180.0),
            ("east", &fields.east, 180.0),
            ("north", &fields.north, 90.0),
            ("south", &fields.south, 90.0),
        ] {
            if let Some(value) = parse(value).filter(|value| value.abs() > limit) {
                advisories.push(format!("{label} bounding coordinate {value} is out of range"));
            }
        }
        if let (Some(north), Some(south)) = (parse(&fields.north), parse(&fields.south)) {
            if north < south {
                advisories.push(format!(
                    "north bounding coordinate {north} is less than south bounding coordinate {south}"
                ));
            }
        }
        if let (Some(east), Some(west)) = (parse(&fields.east), parse(&fields.west)) {
            if east < west {
                advisories.push(format!(
                    "east bounding coordinate {east} is less than west bounding coordinate {west}"
                ));
            }
        }
        advisories
    }
}

/// "west, east, north, south" when all four coordinates are present.
pub fn geographic_label(doc: &Document, coverage: NodeId) -> String {
    let values: Vec<String> = BOUNDING_PATHS
        .iter()
        .filter_map(|name| text_at(doc, coverage, &[names::BOUNDING_COORDINATES, *name]))
        .collect();
    if values.len() == BOUNDING_PATHS.len() {
        values.join(", ")
    } else {
        String::new()
    }
}

pub fn list_geographic_coverages(doc: &Document, coverage: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(coverage, names::GEOGRAPHIC_COVERAGE);
    entries_for(&ids, |_, id| {
        let description = string_at(doc, id, &[names::GEOGRAPHIC_DESCRIPTION]);
        (
            geographic_label(doc, id),
            EntryDetail::Geographic {
                description: truncate_for_list(&description, LIST_TEXT_LIMIT),
            },
        )
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalCoverageFields {
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalCoverageBuilder;

fn calendar_date(wrapper: &str, date: &str) -> Element {
    Element::new(wrapper).with_child(Element::text(names::CALENDAR_DATE, date))
}

/// Numeric date components, so `2020-3-1` and `2020-03-01` compare equal.
fn date_key(value: &str) -> Option<Vec<u32>> {
    value
        .trim()
        .split(['-', 'T', ':'])
        .map(|part| part.parse::<u32>().ok())
        .collect()
}

impl EntityBuilder for TemporalCoverageBuilder {
    type Fields = TemporalCoverageFields;

    fn kind(&self) -> EntityKind {
        EntityKind::TemporalCoverage
    }

    fn build(&self, fields: &TemporalCoverageFields) -> BuildResult<Element> {
        let mut coverage = Element::new(names::TEMPORAL_COVERAGE);
        match (
            non_empty(fields.begin_date.as_deref()),
            non_empty(fields.end_date.as_deref()),
        ) {
            (Some(begin), Some(end)) => coverage.push(
                Element::new(names::RANGE_OF_DATES)
                    .with_child(calendar_date(names::BEGIN_DATE, begin))
                    .with_child(calendar_date(names::END_DATE, end)),
            ),
            (Some(begin), None) => coverage.push(
                Element::new(names::SINGLE_DATE_TIME)
                    .with_child(Element::text(names::CALENDAR_DATE, begin)),
            ),
            (None, Some(_)) => {
                return Err(BuildError::InvalidValue {
                    field: "end_date",
                    reason: "an end date needs a begin date".to_string(),
                })
            }
            (None, None) => return Err(BuildError::MissingField("begin_date")),
        }
        Ok(coverage)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> TemporalCoverageFields {
        if let Some(range) = doc.find_child(node, names::RANGE_OF_DATES) {
            return TemporalCoverageFields {
                begin_date: text_at(doc, range, &[names::BEGIN_DATE, names::CALENDAR_DATE]),
                end_date: text_at(doc, range, &[names::END_DATE, names::CALENDAR_DATE]),
            };
        }
        TemporalCoverageFields {
            begin_date: text_at(doc, node, &[names::SINGLE_DATE_TIME, names::CALENDAR_DATE]),
            end_date: None,
        }
    }

    fn advisories(&self, fields: &TemporalCoverageFields) -> Vec<String> {
        let begin = fields.begin_date.as_deref().and_then(date_key);
        let end = fields.end_date.as_deref().and_then(date_key);
        match (begin, end) {
            (Some(begin), Some(end)) if begin > end => {
                vec!["begin date is later than end date".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

pub fn list_temporal_coverages(doc: &Document, coverage: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(coverage, names::TEMPORAL_COVERAGE);
    entries_for(&ids, |_, id| {
        let fields = TemporalCoverageBuilder.populate(doc, id);
        let begin_date = fields.begin_date.unwrap_or_default();
        let end_date = fields.end_date.unwrap_or_default();
        let label = if end_date.is_empty() {
            begin_date.clone()
        } else {
            format!("{begin_date} to {end_date}")
        };
        (
            label,
            EntryDetail::Temporal {
                begin_date,
                end_date,
            },
        )
    })
}

/// Rank value and optional common name of one classification level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonFields {
    pub value: Option<String>,
    pub common_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomicCoverageFields {
    pub general_coverage: Option<String>,
    pub kingdom: TaxonFields,
    pub phylum: TaxonFields,
    pub class: TaxonFields,
    pub order: TaxonFields,
    pub family: TaxonFields,
    pub genus: TaxonFields,
    pub species: TaxonFields,
}

impl TaxonomicCoverageFields {
    /// Levels from kingdom down to species, with their rank names.
    pub fn levels(&self) -> [(&'static str, &TaxonFields); 7] {
        [
            ("Kingdom", &self.kingdom),
            ("Phylum", &self.phylum),
            ("Class", &self.class),
            ("Order", &self.order),
            ("Family", &self.family),
            ("Genus", &self.genus),
            ("Species", &self.species),
        ]
    }

    fn level_mut(&mut self, rank: &str) -> Option<&mut TaxonFields> {
        match rank.trim().to_ascii_lowercase().as_str() {
            "kingdom" => Some(&mut self.kingdom),
            "phylum" => Some(&mut self.phylum),
            "class" => Some(&mut self.class),
            "order" => Some(&mut self.order),
            "family" => Some(&mut self.family),
            "genus" => Some(&mut self.genus),
            "species" => Some(&mut self.species),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TaxonomicCoverageBuilder;

impl EntityBuilder for TaxonomicCoverageBuilder {
    type Fields = TaxonomicCoverageFields;

    fn kind(&self) -> EntityKind {
        EntityKind::TaxonomicCoverage
    }

    fn build(&self, fields: &TaxonomicCoverageFields) -> BuildResult<Element> {
        let mut levels = Vec::new();
        for (rank, taxon) in fields.levels() {
            let Some(value) = non_empty(taxon.value.as_deref()) else {
                continue;
            };
            let mut level = Element::new(names::TAXONOMIC_CLASSIFICATION);
            level.push(Element::text(names::TAXON_RANK_NAME, rank));
            level.push(Element::text(names::TAXON_RANK_VALUE, value));
            level.push_text(names::COMMON_NAME, taxon.common_name.as_deref());
            levels.push(level);
        }
        // Nest bottom-up so each level ends up inside its predecessor.
        let chain = levels.into_iter().rev().reduce(|child, mut parent| {
            parent.push(child);
            parent
        });

        let mut coverage = Element::new(names::TAXONOMIC_COVERAGE);
        coverage.push_text(
            names::GENERAL_TAXONOMIC_COVERAGE,
            fields.general_coverage.as_deref(),
        );
        if let Some(chain) = chain {
            coverage.push(chain);
        }
        if coverage.is_empty() {
            return Err(BuildError::MissingField("taxonomicClassification"));
        }
        Ok(coverage)
    }

    fn populate(&self, doc: &Document, node: NodeId) -> TaxonomicCoverageFields {
        let mut fields = TaxonomicCoverageFields {
            general_coverage: text_at(doc, node, &[names::GENERAL_TAXONOMIC_COVERAGE]),
            ..TaxonomicCoverageFields::default()
        };
        let mut cursor = doc.find_child(node, names::TAXONOMIC_CLASSIFICATION);
        while let Some(level) = cursor {
            let rank = string_at(doc, level, &[names::TAXON_RANK_NAME]);
            if let Some(taxon) = fields.level_mut(&rank) {
                taxon.value = text_at(doc, level, &[names::TAXON_RANK_VALUE]);
                taxon.common_name = text_at(doc, level, &[names::COMMON_NAME]);
            }
            cursor = doc.find_child(level, names::TAXONOMIC_CLASSIFICATION);
        }
        fields
    }
}

/// Rank values along the classification chain, space-joined.
pub fn taxonomic_label(doc: &Document, coverage: NodeId) -> String {
    let mut values = Vec::new();
    let mut cursor = doc.find_child(coverage, names::TAXONOMIC_CLASSIFICATION);
    while let Some(level) = cursor {
        if let Some(value) = text_at(doc, level, &[names::TAXON_RANK_VALUE]) {
            values.push(value);
        }
        cursor = doc.find_child(level, names::TAXONOMIC_CLASSIFICATION);
    }
    values.join(" ")
}

pub fn list_taxonomic_coverages(doc: &Document, coverage: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(coverage, names::TAXONOMIC_COVERAGE);
    entries_for(&ids, |_, id| (taxonomic_label(doc, id), EntryDetail::None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graft(element: &Element) -> (Document, NodeId) {
        let mut doc = Document::new(names::COVERAGE);
        let id = doc.graft(element);
        doc.add_child(doc.root(), id).unwrap();
        (doc, id)
    }

    fn box_fields(description: &str) -> GeographicCoverageFields {
        GeographicCoverageFields {
            description: description.to_string(),
            west: "-107.5".to_string(),
            east: "-106.0".to_string(),
            north: "35.2".to_string(),
            south: "34.1".to_string(),
        }
    }

    #[test]
    fn geographic_round_trips_and_labels() {
        let fields = box_fields("Sevilleta");
        let (doc, id) = graft(&GeographicCoverageBuilder.build(&fields).unwrap());
        assert_eq!(GeographicCoverageBuilder.populate(&doc, id), fields);
        assert_eq!(geographic_label(&doc, id), "-107.5, -106.0, 35.2, 34.1");
        assert!(GeographicCoverageBuilder.advisories(&fields).is_empty());
    }

    #[test]
    fn long_description_is_truncated_only_for_display() {
        let description = "x".repeat(50);
        let (doc, id) = graft(&GeographicCoverageBuilder.build(&box_fields(&description)).unwrap());
        let rows = list_geographic_coverages(&doc, doc.root());
        assert_eq!(
            rows[0].detail,
            EntryDetail::Geographic {
                description: "x".repeat(40)
            }
        );
        assert_eq!(
            doc.descendant_text(id, &[names::GEOGRAPHIC_DESCRIPTION]).map(str::len),
            Some(50)
        );
    }

    #[test]
    fn label_is_empty_without_all_four_coordinates() {
        let fields = GeographicCoverageFields {
            description: "somewhere".to_string(),
            west: "1".to_string(),
            ..GeographicCoverageFields::default()
        };
        let (doc, id) = graft(&GeographicCoverageBuilder.build(&fields).unwrap());
        assert_eq!(geographic_label(&doc, id), "");
    }

    #[test]
    fn inverted_box_produces_advisories() {
        let fields = GeographicCoverageFields {
            north: "10".to_string(),
            south: "20".to_string(),
            east: "-50".to_string(),
            west: "200".to_string(),
            ..GeographicCoverageFields::default()
        };
        let advisories = GeographicCoverageBuilder.advisories(&fields);
        assert_eq!(advisories.len(), 3);
    }

    #[test]
    fn temporal_shapes_follow_given_dates() {
        let range = TemporalCoverageFields {
            begin_date: Some("2001-01-01".to_string()),
            end_date: Some("2002-12-31".to_string()),
        };
        let element = TemporalCoverageBuilder.build(&range).unwrap();
        assert!(element.child(names::RANGE_OF_DATES).is_some());
        let (doc, id) = graft(&element);
        assert_eq!(TemporalCoverageBuilder.populate(&doc, id), range);

        let single = TemporalCoverageFields {
            begin_date: Some("2001-01-01".to_string()),
            end_date: None,
        };
        let element = TemporalCoverageBuilder.build(&single).unwrap();
        assert!(element.child(names::SINGLE_DATE_TIME).is_some());
        let (doc, id) = graft(&element);
        assert_eq!(TemporalCoverageBuilder.populate(&doc, id), single);
    }

    #[test]
    fn end_date_without_begin_is_rejected() {
        let fields = TemporalCoverageFields {
            begin_date: None,
            end_date: Some("2002-12-31".to_string()),
        };
        assert!(matches!(
            TemporalCoverageBuilder.build(&fields),
            Err(BuildError::InvalidValue { field: "end_date", .. })
        ));
    }

    #[test]
    fn reversed_range_is_advisory() {
        let fields = TemporalCoverageFields {
            begin_date: Some("2010-06-01".to_string()),
            end_date: Some("2009-6-1".to_string()),
        };
        assert_eq!(TemporalCoverageBuilder.advisories(&fields).len(), 1);
    }

    #[test]
    fn taxonomic_levels_nest_and_skip_blanks() {
        let fields = TaxonomicCoverageFields {
            general_coverage: Some("Grasses".to_string()),
            kingdom: TaxonFields {
                value: Some("Plantae".to_string()),
                common_name: Some("plants".to_string()),
            },
            family: TaxonFields {
                value: Some("Poaceae".to_string()),
                common_name: None,
            },
            species: TaxonFields {
                value: Some("gracilis".to_string()),
                common_name: None,
            },
            ..TaxonomicCoverageFields::default()
        };
        let element = TaxonomicCoverageBuilder.build(&fields).unwrap();
        let family = element
            .descendant(&[names::TAXONOMIC_CLASSIFICATION, names::TAXONOMIC_CLASSIFICATION])
            .unwrap();
        assert_eq!(
            family.child(names::TAXON_RANK_NAME).unwrap().content.as_deref(),
            Some("Family")
        );

        let (doc, id) = graft(&element);
        assert_eq!(TaxonomicCoverageBuilder.populate(&doc, id), fields);
        assert_eq!(taxonomic_label(&doc, id), "Plantae Poaceae gracilis");
    }
}
