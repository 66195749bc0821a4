//! Attribute builders for the three measurement-scale families.
//!
//! # Responsibility
//! - Build `attribute` subtrees for datetime, interval/ratio and
//!   nominal/ordinal scales.
//! - Rename a scale node in place (nominal/ordinal, interval/ratio) without
//!   rebuilding what lies below it.
//!
//! # Invariants
//! - Exactly one scale node sits under `measurementScale`.
//! - A bound is present when its text is non-empty; `0` and `0.0` count as
//!   present values.
//! - Code definitions are owned by their own page and survive a rebuild of
//!   a nominal/ordinal attribute.

use super::{
    entries_for, required_leaf, string_at, text_at, BuildError, BuildResult, EntityBuilder,
    EntityKind, Entry, EntryDetail,
};
use crate::model::document::Document;
use crate::model::element::{non_empty, Element};
use crate::model::names;
use crate::model::node::{NodeId, NodeRef};
use crate::model::path::{Branch, Step};
use crate::model::scale::MeasurementScale;
use serde::{Deserialize, Serialize};

const CODE_BRANCHES: &[Branch] = &[Branch {
    container: &[
        Step::Named(names::MEASUREMENT_SCALE),
        Step::AnyOf(&[names::NOMINAL, names::ORDINAL]),
        Step::Named(names::NON_NUMERIC_DOMAIN),
        Step::Named(names::ENUMERATED_DOMAIN),
    ],
    name: names::CODE_DEFINITION,
}];

/// One `missingValueCode` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValue {
    pub code: String,
    pub explanation: Option<String>,
}

/// Fields every attribute variant carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCommon {
    pub name: String,
    pub label: Option<String>,
    pub definition: String,
    pub storage_type: Option<String>,
    pub storage_type_system: Option<String>,
    pub missing_values: Vec<MissingValue>,
}

/// One `bounds` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsFields {
    pub minimum: Option<String>,
    pub minimum_exclusive: bool,
    pub maximum: Option<String>,
    pub maximum_exclusive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeAttributeFields {
    pub common: AttributeCommon,
    pub format_string: String,
    pub precision: Option<String>,
    pub bounds: BoundsFields,
}

/// Unit of an interval or ratio attribute; the schema allows exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Standard(String),
    Custom(String),
}

impl Unit {
    fn element(&self) -> Option<Element> {
        let (name, value) = match self {
            Self::Standard(value) => (names::STANDARD_UNIT, value),
            Self::Custom(value) => (names::CUSTOM_UNIT, value),
        };
        non_empty(Some(value.as_str())).map(|value| Element::text(name, value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericAttributeFields {
    pub common: AttributeCommon,
    /// `Interval` or `Ratio`.
    pub scale: MeasurementScale,
    pub unit: Option<Unit>,
    pub precision: Option<String>,
    pub number_type: String,
    pub bounds: BoundsFields,
}

impl Default for NumericAttributeFields {
    fn default() -> Self {
        Self {
            common: AttributeCommon::default(),
            scale: MeasurementScale::Ratio,
            unit: None,
            precision: None,
            number_type: String::new(),
            bounds: BoundsFields::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalAttributeFields {
    pub common: AttributeCommon,
    /// `Nominal` or `Ordinal`.
    pub scale: MeasurementScale,
    pub enforced: bool,
}

impl Default for CategoricalAttributeFields {
    fn default() -> Self {
        Self {
            common: AttributeCommon::default(),
            scale: MeasurementScale::Nominal,
            enforced: true,
        }
    }
}

/// Whether a bound value should be stored.
pub fn bound_present(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some("0") | Some("0.0") => true,
        other => non_empty(other).is_some(),
    }
}

fn exclusive_flag(exclusive: bool) -> &'static str {
    if exclusive {
        "true"
    } else {
        "false"
    }
}

fn build_bounds(fields: &BoundsFields) -> Element {
    let mut bounds = Element::new(names::BOUNDS);
    for (name, value, exclusive) in [
        (names::MINIMUM, &fields.minimum, fields.minimum_exclusive),
        (names::MAXIMUM, &fields.maximum, fields.maximum_exclusive),
    ] {
        if let Some(value) = value.as_deref().filter(|value| bound_present(Some(*value))) {
            bounds.push(
                Element::text(name, value)
                    .with_attribute(names::EXCLUSIVE_ATTR, exclusive_flag(exclusive)),
            );
        }
    }
    bounds
}

fn populate_bounds(doc: &Document, bounds: Option<NodeId>) -> BoundsFields {
    let Some(bounds) = bounds else {
        return BoundsFields::default();
    };
    let read = |name: &str| {
        doc.find_child(bounds, name)
            .and_then(|id| doc.resolve(id))
            .map(|node| {
                (
                    node.content().map(str::to_string),
                    node.attribute(names::EXCLUSIVE_ATTR) == Some("true"),
                )
            })
            .unwrap_or((None, false))
    };
    let (minimum, minimum_exclusive) = read(names::MINIMUM);
    let (maximum, maximum_exclusive) = read(names::MAXIMUM);
    BoundsFields {
        minimum,
        minimum_exclusive,
        maximum,
        maximum_exclusive,
    }
}

fn start_attribute(common: &AttributeCommon) -> Element {
    let mut attribute = Element::new(names::ATTRIBUTE);
    attribute.push(required_leaf(names::ATTRIBUTE_NAME, &common.name));
    attribute.push_text(names::ATTRIBUTE_LABEL, common.label.as_deref());
    attribute.push(required_leaf(names::ATTRIBUTE_DEFINITION, &common.definition));
    if let Some(storage_type) = non_empty(common.storage_type.as_deref()) {
        let mut storage = Element::text(names::STORAGE_TYPE, storage_type);
        if let Some(system) = non_empty(common.storage_type_system.as_deref()) {
            storage = storage.with_attribute(names::TYPE_SYSTEM_ATTR, system);
        }
        attribute.push(storage);
    }
    attribute
}

fn finish_attribute(mut attribute: Element, scale: Element, common: &AttributeCommon) -> Element {
    attribute.push(Element::new(names::MEASUREMENT_SCALE).with_child(scale));
    for missing in &common.missing_values {
        if non_empty(Some(&missing.code)).is_none() {
            continue;
        }
        let mut code = Element::new(names::MISSING_VALUE_CODE);
        code.push(Element::text(names::CODE, missing.code.as_str()));
        code.push_text(names::CODE_EXPLANATION, missing.explanation.as_deref());
        attribute.push(code);
    }
    attribute
}

fn populate_common(doc: &Document, attribute: NodeId) -> AttributeCommon {
    let storage = doc
        .find_child(attribute, names::STORAGE_TYPE)
        .and_then(|id| doc.resolve(id));
    AttributeCommon {
        name: string_at(doc, attribute, &[names::ATTRIBUTE_NAME]),
        label: text_at(doc, attribute, &[names::ATTRIBUTE_LABEL]),
        definition: string_at(doc, attribute, &[names::ATTRIBUTE_DEFINITION]),
        storage_type: storage.and_then(|node| node.content()).map(str::to_string),
        storage_type_system: storage
            .and_then(|node| node.attribute(names::TYPE_SYSTEM_ATTR))
            .map(str::to_string),
        missing_values: doc
            .find_all_children(attribute, names::MISSING_VALUE_CODE)
            .into_iter()
            .map(|id| MissingValue {
                code: string_at(doc, id, &[names::CODE]),
                explanation: text_at(doc, id, &[names::CODE_EXPLANATION]),
            })
            .collect(),
    }
}

/// Scale node (`nominal`, `ratio`, ...) of an attribute.
pub fn scale_node(doc: &Document, attribute: NodeId) -> Option<NodeId> {
    let measurement = doc.find_child(attribute, names::MEASUREMENT_SCALE)?;
    doc.children(measurement).first().copied()
}

/// Measurement scale of an attribute, if it has a known one.
pub fn scale_of(doc: &Document, attribute: NodeId) -> Option<MeasurementScale> {
    scale_node(doc, attribute)
        .and_then(|id| doc.name(id))
        .and_then(MeasurementScale::from_element_name)
}

/// Builder for datetime attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeAttributeBuilder;

impl EntityBuilder for DateTimeAttributeBuilder {
    type Fields = DateTimeAttributeFields;

    fn kind(&self) -> EntityKind {
        EntityKind::Attribute
    }

    fn build(&self, fields: &DateTimeAttributeFields) -> BuildResult<Element> {
        let attribute = start_attribute(&fields.common);

        let mut date_time = Element::new(names::DATE_TIME);
        date_time.push(required_leaf(names::FORMAT_STRING, &fields.format_string));
        date_time.push_text(names::DATE_TIME_PRECISION, fields.precision.as_deref());
        let mut domain = Element::new(names::DATE_TIME_DOMAIN);
        domain.push_block(build_bounds(&fields.bounds));
        date_time.push_block(domain);

        Ok(finish_attribute(attribute, date_time, &fields.common))
    }

    fn populate(&self, doc: &Document, node: NodeId) -> DateTimeAttributeFields {
        let date_time = doc.find_descendant(node, &[names::MEASUREMENT_SCALE, names::DATE_TIME]);
        let bounds =
            date_time.and_then(|id| doc.find_descendant(id, &[names::DATE_TIME_DOMAIN, names::BOUNDS]));
        let leaf = |name: &str| date_time.and_then(|id| text_at(doc, id, &[name]));
        DateTimeAttributeFields {
            common: populate_common(doc, node),
            format_string: leaf(names::FORMAT_STRING).unwrap_or_default(),
            precision: leaf(names::DATE_TIME_PRECISION),
            bounds: populate_bounds(doc, bounds),
        }
    }

    fn blank(&self, _node: NodeRef) -> DateTimeAttributeFields {
        DateTimeAttributeFields::default()
    }
}

/// Builder for interval and ratio attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericAttributeBuilder;

impl EntityBuilder for NumericAttributeBuilder {
    type Fields = NumericAttributeFields;

    fn kind(&self) -> EntityKind {
        EntityKind::Attribute
    }

    fn build(&self, fields: &NumericAttributeFields) -> BuildResult<Element> {
        if !fields.scale.is_numeric() {
            return Err(BuildError::UnsupportedScale {
                builder: "interval/ratio attribute builder",
                scale: fields.scale,
            });
        }
        let attribute = start_attribute(&fields.common);

        let mut scale = Element::new(fields.scale.element_name());
        let mut unit = Element::new(names::UNIT);
        if let Some(element) = fields.unit.as_ref().and_then(Unit::element) {
            unit.push(element);
        }
        scale.push_block(unit);
        scale.push_text(names::PRECISION, fields.precision.as_deref());

        let mut domain = Element::new(names::NUMERIC_DOMAIN);
        domain.push(required_leaf(names::NUMBER_TYPE, &fields.number_type));
        domain.push_block(build_bounds(&fields.bounds));
        scale.push(domain);

        Ok(finish_attribute(attribute, scale, &fields.common))
    }

    fn populate(&self, doc: &Document, node: NodeId) -> NumericAttributeFields {
        let scale_id = scale_node(doc, node);
        let scale = scale_of(doc, node)
            .filter(|scale| scale.is_numeric())
            .unwrap_or(MeasurementScale::Ratio);
        let Some(scale_id) = scale_id else {
            return NumericAttributeFields {
                common: populate_common(doc, node),
                scale,
                ..NumericAttributeFields::default()
            };
        };
        NumericAttributeFields {
            common: populate_common(doc, node),
            scale,
            unit: text_at(doc, scale_id, &[names::UNIT, names::CUSTOM_UNIT])
                .map(Unit::Custom)
                .or_else(|| {
                    text_at(doc, scale_id, &[names::UNIT, names::STANDARD_UNIT]).map(Unit::Standard)
                }),
            precision: text_at(doc, scale_id, &[names::PRECISION]),
            number_type: string_at(doc, scale_id, &[names::NUMERIC_DOMAIN, names::NUMBER_TYPE]),
            bounds: populate_bounds(
                doc,
                doc.find_descendant(scale_id, &[names::NUMERIC_DOMAIN, names::BOUNDS]),
            ),
        }
    }

    fn blank(&self, node: NodeRef) -> NumericAttributeFields {
        NumericAttributeFields {
            scale: node
                .requested_scale()
                .filter(|scale| scale.is_numeric())
                .unwrap_or(MeasurementScale::Ratio),
            ..NumericAttributeFields::default()
        }
    }

    fn advisories(&self, fields: &NumericAttributeFields) -> Vec<String> {
        let parse = |value: &Option<String>| value.as_deref().and_then(|v| v.trim().parse::<f64>().ok());
        match (parse(&fields.bounds.minimum), parse(&fields.bounds.maximum)) {
            (Some(minimum), Some(maximum)) if minimum > maximum => vec![format!(
                "minimum bound {minimum} is greater than maximum bound {maximum}"
            )],
            _ => Vec::new(),
        }
    }
}

/// Builder for nominal and ordinal attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalAttributeBuilder;

impl EntityBuilder for CategoricalAttributeBuilder {
    type Fields = CategoricalAttributeFields;

    fn kind(&self) -> EntityKind {
        EntityKind::Attribute
    }

    fn build(&self, fields: &CategoricalAttributeFields) -> BuildResult<Element> {
        if !fields.scale.is_categorical() {
            return Err(BuildError::UnsupportedScale {
                builder: "nominal/ordinal attribute builder",
                scale: fields.scale,
            });
        }
        let attribute = start_attribute(&fields.common);
        let enforced = if fields.enforced { "yes" } else { "no" };
        let scale = Element::new(fields.scale.element_name()).with_child(
            Element::new(names::NON_NUMERIC_DOMAIN).with_child(
                Element::new(names::ENUMERATED_DOMAIN).with_attribute(names::ENFORCED_ATTR, enforced),
            ),
        );
        Ok(finish_attribute(attribute, scale, &fields.common))
    }

    fn populate(&self, doc: &Document, node: NodeId) -> CategoricalAttributeFields {
        let scale = scale_of(doc, node)
            .filter(|scale| scale.is_categorical())
            .unwrap_or(MeasurementScale::Nominal);
        let enforced = scale_node(doc, node)
            .and_then(|id| doc.find_descendant(id, &[names::NON_NUMERIC_DOMAIN, names::ENUMERATED_DOMAIN]))
            .and_then(|id| doc.resolve(id))
            .and_then(|domain| domain.attribute(names::ENFORCED_ATTR))
            .map(|value| value != "no")
            .unwrap_or(true);
        CategoricalAttributeFields {
            common: populate_common(doc, node),
            scale,
            enforced,
        }
    }

    fn blank(&self, node: NodeRef) -> CategoricalAttributeFields {
        CategoricalAttributeFields {
            scale: node
                .requested_scale()
                .filter(|scale| scale.is_categorical())
                .unwrap_or(MeasurementScale::Nominal),
            ..CategoricalAttributeFields::default()
        }
    }

    fn preserved_branches(&self) -> &'static [Branch] {
        CODE_BRANCHES
    }
}

/// In-place scale renames that keep the subtree below the scale node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleConversion {
    NominalToOrdinal,
    OrdinalToNominal,
    IntervalToRatio,
    RatioToInterval,
}

impl ScaleConversion {
    pub fn source(self) -> MeasurementScale {
        match self {
            Self::NominalToOrdinal => MeasurementScale::Nominal,
            Self::OrdinalToNominal => MeasurementScale::Ordinal,
            Self::IntervalToRatio => MeasurementScale::Interval,
            Self::RatioToInterval => MeasurementScale::Ratio,
        }
    }

    pub fn target(self) -> MeasurementScale {
        match self {
            Self::NominalToOrdinal => MeasurementScale::Ordinal,
            Self::OrdinalToNominal => MeasurementScale::Nominal,
            Self::IntervalToRatio => MeasurementScale::Ratio,
            Self::RatioToInterval => MeasurementScale::Interval,
        }
    }

    /// Conversion between two scales, if one exists.
    pub fn between(from: MeasurementScale, to: MeasurementScale) -> Option<Self> {
        [
            Self::NominalToOrdinal,
            Self::OrdinalToNominal,
            Self::IntervalToRatio,
            Self::RatioToInterval,
        ]
        .into_iter()
        .find(|conversion| conversion.source() == from && conversion.target() == to)
    }
}

/// Renames the scale node `node` according to `conversion`.
///
/// # Errors
/// - `BuildError::WrongElement` when `node` is not the conversion's source
///   scale; the tree is left unchanged.
pub fn convert_scale(
    doc: &mut Document,
    node: NodeId,
    conversion: ScaleConversion,
) -> BuildResult<()> {
    let expected = conversion.source().element_name();
    let found = doc.name(node).unwrap_or("nothing").to_string();
    if found != expected {
        return Err(BuildError::WrongElement { expected, found });
    }
    doc.rename(node, conversion.target().element_name())
        .map_err(|err| BuildError::InvalidValue {
            field: "measurementScale",
            reason: err.to_string(),
        })
}

pub fn nominal_to_ordinal(doc: &mut Document, node: NodeId) -> BuildResult<()> {
    convert_scale(doc, node, ScaleConversion::NominalToOrdinal)
}

pub fn ordinal_to_nominal(doc: &mut Document, node: NodeId) -> BuildResult<()> {
    convert_scale(doc, node, ScaleConversion::OrdinalToNominal)
}

pub fn interval_to_ratio(doc: &mut Document, node: NodeId) -> BuildResult<()> {
    convert_scale(doc, node, ScaleConversion::IntervalToRatio)
}

pub fn ratio_to_interval(doc: &mut Document, node: NodeId) -> BuildResult<()> {
    convert_scale(doc, node, ScaleConversion::RatioToInterval)
}

/// Rows for the attributes of one `attributeList`.
pub fn list_attributes(doc: &Document, attribute_list: NodeId) -> Vec<Entry> {
    let ids = doc.find_all_children(attribute_list, names::ATTRIBUTE);
    entries_for(&ids, |index, id| {
        (
            string_at(doc, id, &[names::ATTRIBUTE_NAME]),
            EntryDetail::Attribute {
                column_number: index + 1,
                scale: scale_of(doc, id),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common() -> AttributeCommon {
        AttributeCommon {
            name: "depth".to_string(),
            label: Some("Depth".to_string()),
            definition: "Sample depth".to_string(),
            storage_type: Some("float".to_string()),
            storage_type_system: Some("XML Schema Datatypes".to_string()),
            missing_values: vec![
                MissingValue {
                    code: "-999".to_string(),
                    explanation: Some("not measured".to_string()),
                },
                MissingValue {
                    code: "NA".to_string(),
                    explanation: None,
                },
            ],
        }
    }

    fn graft(element: &Element) -> (Document, NodeId) {
        let mut doc = Document::new(names::EML);
        let id = doc.graft(element);
        (doc, id)
    }

    #[test]
    fn datetime_round_trips() {
        let fields = DateTimeAttributeFields {
            common: common(),
            format_string: "YYYY-MM-DD".to_string(),
            precision: Some("1 day".to_string()),
            bounds: BoundsFields {
                minimum: Some("2001-01-01".to_string()),
                minimum_exclusive: false,
                maximum: Some("2020-12-31".to_string()),
                maximum_exclusive: true,
            },
        };
        let (doc, id) = graft(&DateTimeAttributeBuilder.build(&fields).unwrap());
        assert_eq!(DateTimeAttributeBuilder.populate(&doc, id), fields);
    }

    #[test]
    fn numeric_round_trips_for_both_scales() {
        for scale in [MeasurementScale::Interval, MeasurementScale::Ratio] {
            let fields = NumericAttributeFields {
                common: common(),
                scale,
                unit: Some(Unit::Standard("meter".to_string())),
                precision: Some("0.01".to_string()),
                number_type: "real".to_string(),
                bounds: BoundsFields {
                    minimum: Some("0".to_string()),
                    minimum_exclusive: false,
                    maximum: Some("100".to_string()),
                    maximum_exclusive: false,
                },
            };
            let (doc, id) = graft(&NumericAttributeBuilder.build(&fields).unwrap());
            assert_eq!(NumericAttributeBuilder.populate(&doc, id), fields);
        }
    }

    #[test]
    fn categorical_round_trips() {
        let fields = CategoricalAttributeFields {
            common: common(),
            scale: MeasurementScale::Ordinal,
            enforced: false,
        };
        let (doc, id) = graft(&CategoricalAttributeBuilder.build(&fields).unwrap());
        assert_eq!(CategoricalAttributeBuilder.populate(&doc, id), fields);
    }

    #[test]
    fn zero_bound_is_stored() {
        let fields = NumericAttributeFields {
            number_type: "integer".to_string(),
            bounds: BoundsFields {
                minimum: Some("0".to_string()),
                maximum: Some("0.0".to_string()),
                ..BoundsFields::default()
            },
            ..NumericAttributeFields::default()
        };
        let element = NumericAttributeBuilder.build(&fields).unwrap();
        let bounds = element
            .descendant(&[names::MEASUREMENT_SCALE, names::RATIO, names::NUMERIC_DOMAIN, names::BOUNDS])
            .unwrap();
        assert_eq!(bounds.child(names::MINIMUM).unwrap().content.as_deref(), Some("0"));
        assert_eq!(bounds.child(names::MAXIMUM).unwrap().content.as_deref(), Some("0.0"));
        assert!(bound_present(Some("0")));
        assert!(!bound_present(Some(" ")));
    }

    #[test]
    fn custom_unit_round_trips_as_the_only_unit() {
        let fields = NumericAttributeFields {
            unit: Some(Unit::Custom("furlong".to_string())),
            number_type: "real".to_string(),
            ..NumericAttributeFields::default()
        };
        let element = NumericAttributeBuilder.build(&fields).unwrap();
        let unit = element
            .descendant(&[names::MEASUREMENT_SCALE, names::RATIO, names::UNIT])
            .unwrap();
        assert_eq!(unit.children.len(), 1);
        assert_eq!(unit.children[0].name, names::CUSTOM_UNIT);

        let (doc, id) = graft(&element);
        assert_eq!(NumericAttributeBuilder.populate(&doc, id), fields);
    }

    #[test]
    fn blank_unit_leaves_no_unit_element() {
        let fields = NumericAttributeFields {
            unit: Some(Unit::Standard("  ".to_string())),
            number_type: "real".to_string(),
            ..NumericAttributeFields::default()
        };
        let element = NumericAttributeBuilder.build(&fields).unwrap();
        assert!(element
            .descendant(&[names::MEASUREMENT_SCALE, names::RATIO, names::UNIT])
            .is_none());
    }

    #[test]
    fn mismatched_scale_is_a_build_error() {
        let fields = NumericAttributeFields {
            scale: MeasurementScale::Nominal,
            ..NumericAttributeFields::default()
        };
        assert!(matches!(
            NumericAttributeBuilder.build(&fields),
            Err(BuildError::UnsupportedScale { .. })
        ));
    }

    #[test]
    fn nominal_to_ordinal_keeps_codes_and_wrong_node_fails() {
        let fields = CategoricalAttributeFields {
            common: common(),
            ..CategoricalAttributeFields::default()
        };
        let (mut doc, id) = graft(&CategoricalAttributeBuilder.build(&fields).unwrap());
        let scale = scale_node(&doc, id).unwrap();
        let domain = doc
            .find_descendant(scale, &[names::NON_NUMERIC_DOMAIN, names::ENUMERATED_DOMAIN])
            .unwrap();
        let code = doc.create_node(names::CODE_DEFINITION, Some(domain)).unwrap();

        let before = doc.to_element(id).unwrap();
        let err = ordinal_to_nominal(&mut doc, scale).unwrap_err();
        assert!(err.to_string().contains("ordinal"));
        assert_eq!(doc.to_element(id).unwrap(), before);

        nominal_to_ordinal(&mut doc, scale).unwrap();
        assert_eq!(scale_of(&doc, id), Some(MeasurementScale::Ordinal));
        assert_eq!(doc.parent(code), Some(domain));
    }

    #[test]
    fn conversion_lookup_pairs_scales() {
        assert_eq!(
            ScaleConversion::between(MeasurementScale::Ratio, MeasurementScale::Interval),
            Some(ScaleConversion::RatioToInterval)
        );
        assert_eq!(
            ScaleConversion::between(MeasurementScale::Ratio, MeasurementScale::Nominal),
            None
        );
    }

    #[test]
    fn list_numbers_columns_from_one() {
        let mut doc = Document::new(names::ATTRIBUTE_LIST);
        let list = doc.root();
        for name in ["a", "b"] {
            let fields = CategoricalAttributeFields {
                common: AttributeCommon {
                    name: name.to_string(),
                    ..AttributeCommon::default()
                },
                ..CategoricalAttributeFields::default()
            };
            let id = doc.graft(&CategoricalAttributeBuilder.build(&fields).unwrap());
            doc.add_child(list, id).unwrap();
        }
        let rows = list_attributes(&doc, list);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label, "b");
        assert_eq!(
            rows[1].detail,
            EntryDetail::Attribute {
                column_number: 2,
                scale: Some(MeasurementScale::Nominal)
            }
        );
    }
}
