//! Schema child-ordering rules.
//!
//! # Responsibility
//! - Give the permitted child order for every parent element the editor
//!   creates, following EML 2.1.1.
//! - Compute the index a new child must take among existing siblings.
//!
//! # Invariants
//! - A new child lands after every sibling whose rank is lower or equal, so
//!   repeated elements keep insertion order.
//! - Unknown parents or children are appended.

use super::names::*;

const EML_ORDER: &[&str] = &[ACCESS, DATASET, ADDITIONAL_METADATA];
const ACCESS_ORDER: &[&[&str]] = &[&[ALLOW, DENY]];
const RULE_ORDER: &[&str] = &[PRINCIPAL, PERMISSION];

const DATASET_ORDER: &[&str] = &[
    ALTERNATE_IDENTIFIER,
    SHORT_NAME,
    TITLE,
    CREATOR,
    METADATA_PROVIDER,
    ASSOCIATED_PARTY,
    PUB_DATE,
    LANGUAGE,
    SERIES,
    ABSTRACT,
    KEYWORD_SET,
    ADDITIONAL_INFO,
    INTELLECTUAL_RIGHTS,
    DISTRIBUTION,
    COVERAGE,
    PURPOSE,
    MAINTENANCE,
    CONTACT,
    PUBLISHER,
    PUB_PLACE,
    METHODS,
    PROJECT,
    DATA_TABLE,
    SPATIAL_RASTER,
    SPATIAL_VECTOR,
    STORED_PROCEDURE,
    VIEW,
    OTHER_ENTITY,
];

const PARTY_ORDER: &[&str] = &[
    INDIVIDUAL_NAME,
    ORGANIZATION_NAME,
    POSITION_NAME,
    ADDRESS,
    PHONE,
    ELECTRONIC_MAIL_ADDRESS,
    ONLINE_URL,
    USER_ID,
    ROLE,
];
const INDIVIDUAL_NAME_ORDER: &[&str] = &[SALUTATION, GIVEN_NAME, SUR_NAME];
const ADDRESS_ORDER: &[&str] = &[
    DELIVERY_POINT,
    CITY,
    ADMINISTRATIVE_AREA,
    POSTAL_CODE,
    COUNTRY,
];

const PROJECT_ORDER: &[&str] = &[
    TITLE,
    PERSONNEL,
    ABSTRACT,
    FUNDING,
    STUDY_AREA_DESCRIPTION,
    DESIGN_DESCRIPTION,
    RELATED_PROJECT,
];
const KEYWORD_SET_ORDER: &[&str] = &[KEYWORD, KEYWORD_THESAURUS];

const COVERAGE_ORDER: &[&str] = &[GEOGRAPHIC_COVERAGE, TEMPORAL_COVERAGE, TAXONOMIC_COVERAGE];
const GEOGRAPHIC_ORDER: &[&str] = &[GEOGRAPHIC_DESCRIPTION, BOUNDING_COORDINATES];
const BOUNDING_ORDER: &[&str] = &[
    WEST_BOUNDING_COORDINATE,
    EAST_BOUNDING_COORDINATE,
    NORTH_BOUNDING_COORDINATE,
    SOUTH_BOUNDING_COORDINATE,
];
const TEMPORAL_ORDER: &[&str] = &[SINGLE_DATE_TIME, RANGE_OF_DATES];
const RANGE_ORDER: &[&str] = &[BEGIN_DATE, END_DATE];
const DATE_ORDER: &[&str] = &[CALENDAR_DATE, TIME];
const TAXONOMIC_ORDER: &[&str] = &[
    TAXONOMIC_SYSTEM,
    GENERAL_TAXONOMIC_COVERAGE,
    TAXONOMIC_CLASSIFICATION,
];
const CLASSIFICATION_ORDER: &[&str] = &[
    TAXON_RANK_NAME,
    TAXON_RANK_VALUE,
    COMMON_NAME,
    TAXONOMIC_CLASSIFICATION,
];

const METHODS_ORDER: &[&str] = &[METHOD_STEP, SAMPLING, QUALITY_CONTROL];
const METHOD_STEP_ORDER: &[&str] = &[
    DESCRIPTION,
    CITATION,
    PROTOCOL,
    INSTRUMENTATION,
    SOFTWARE,
    SUB_STEP,
    DATA_SOURCE,
];
const TEXT_ORDER: &[&[&str]] = &[&[SECTION, PARA]];

const DATA_TABLE_ORDER: &[&str] = &[
    ALTERNATE_IDENTIFIER,
    ENTITY_NAME,
    ENTITY_DESCRIPTION,
    PHYSICAL,
    COVERAGE,
    METHODS,
    ADDITIONAL_INFO,
    ATTRIBUTE_LIST,
    CONSTRAINT,
    CASE_SENSITIVE,
    NUMBER_OF_RECORDS,
];
const OTHER_ENTITY_ORDER: &[&str] = &[
    ALTERNATE_IDENTIFIER,
    ENTITY_NAME,
    ENTITY_DESCRIPTION,
    PHYSICAL,
    COVERAGE,
    METHODS,
    ADDITIONAL_INFO,
    ATTRIBUTE_LIST,
    CONSTRAINT,
    ENTITY_TYPE,
];
const PHYSICAL_ORDER: &[&str] = &[
    OBJECT_NAME,
    SIZE,
    AUTHENTICATION,
    COMPRESSION,
    ENCODING_METHOD,
    CHARACTER_ENCODING,
    DATA_FORMAT,
    DISTRIBUTION,
];
const DATA_FORMAT_ORDER: &[&[&str]] = &[&[
    TEXT_FORMAT,
    EXTERNALLY_DEFINED_FORMAT,
    BINARY_RASTER_FORMAT,
]];
const TEXT_FORMAT_ORDER: &[&str] = &[
    NUM_HEADER_LINES,
    NUM_FOOTER_LINES,
    RECORD_DELIMITER,
    PHYSICAL_LINE_DELIMITER,
    NUM_PHYSICAL_LINES_PER_RECORD,
    MAX_RECORD_LENGTH,
    ATTRIBUTE_ORIENTATION,
    SIMPLE_DELIMITED,
    COMPLEX,
];
const SIMPLE_DELIMITED_ORDER: &[&str] = &[
    FIELD_DELIMITER,
    COLLAPSE_DELIMITERS,
    QUOTE_CHARACTER,
    LITERAL_CHARACTER,
];
const DISTRIBUTION_ORDER: &[&[&str]] = &[&[ONLINE, OFFLINE, INLINE], &[ACCESS]];
const ONLINE_ORDER: &[&str] = &[ONLINE_DESCRIPTION, URL, CONNECTION, CONNECTION_DEFINITION];

const ATTRIBUTE_ORDER: &[&str] = &[
    ATTRIBUTE_NAME,
    ATTRIBUTE_LABEL,
    ATTRIBUTE_DEFINITION,
    STORAGE_TYPE,
    MEASUREMENT_SCALE,
    MISSING_VALUE_CODE,
    ACCURACY,
    COVERAGE,
    METHODS,
];
const MISSING_VALUE_ORDER: &[&str] = &[CODE, CODE_EXPLANATION];
const CATEGORICAL_ORDER: &[&str] = &[NON_NUMERIC_DOMAIN];
const NON_NUMERIC_ORDER: &[&[&str]] = &[&[ENUMERATED_DOMAIN, TEXT_DOMAIN]];
const ENUMERATED_ORDER: &[&[&str]] = &[&[CODE_DEFINITION, EXTERNAL_CODE_SET, ENTITY_CODE_LIST]];
const CODE_DEFINITION_ORDER: &[&str] = &[CODE, DEFINITION, SOURCE];
const NUMERIC_ORDER: &[&str] = &[UNIT, PRECISION, NUMERIC_DOMAIN];
const UNIT_ORDER: &[&[&str]] = &[&[STANDARD_UNIT, CUSTOM_UNIT]];
const NUMERIC_DOMAIN_ORDER: &[&str] = &[NUMBER_TYPE, BOUNDS];
const BOUNDS_ORDER: &[&str] = &[MINIMUM, MAXIMUM];
const DATE_TIME_ORDER: &[&str] = &[FORMAT_STRING, DATE_TIME_PRECISION, DATE_TIME_DOMAIN];
const DATE_TIME_DOMAIN_ORDER: &[&str] = &[BOUNDS];

/// Ranking table for one parent element.
///
/// Names sharing a group have equal rank (a schema choice or interleave).
#[derive(Debug, Clone, Copy)]
enum Order {
    Sequence(&'static [&'static str]),
    Groups(&'static [&'static [&'static str]]),
}

impl Order {
    fn rank(self, name: &str) -> Option<usize> {
        match self {
            Self::Sequence(names) => names.iter().position(|candidate| *candidate == name),
            Self::Groups(groups) => groups.iter().position(|group| group.contains(&name)),
        }
    }
}

fn order_for(parent: &str) -> Option<Order> {
    let order = match parent {
        EML => Order::Sequence(EML_ORDER),
        ACCESS => Order::Groups(ACCESS_ORDER),
        ALLOW | DENY => Order::Sequence(RULE_ORDER),
        DATASET => Order::Sequence(DATASET_ORDER),
        CREATOR | METADATA_PROVIDER | ASSOCIATED_PARTY | CONTACT | PUBLISHER | PERSONNEL => {
            Order::Sequence(PARTY_ORDER)
        }
        INDIVIDUAL_NAME => Order::Sequence(INDIVIDUAL_NAME_ORDER),
        ADDRESS => Order::Sequence(ADDRESS_ORDER),
        PROJECT => Order::Sequence(PROJECT_ORDER),
        KEYWORD_SET => Order::Sequence(KEYWORD_SET_ORDER),
        COVERAGE => Order::Sequence(COVERAGE_ORDER),
        GEOGRAPHIC_COVERAGE => Order::Sequence(GEOGRAPHIC_ORDER),
        BOUNDING_COORDINATES => Order::Sequence(BOUNDING_ORDER),
        TEMPORAL_COVERAGE => Order::Sequence(TEMPORAL_ORDER),
        RANGE_OF_DATES => Order::Sequence(RANGE_ORDER),
        SINGLE_DATE_TIME | BEGIN_DATE | END_DATE => Order::Sequence(DATE_ORDER),
        TAXONOMIC_COVERAGE => Order::Sequence(TAXONOMIC_ORDER),
        TAXONOMIC_CLASSIFICATION => Order::Sequence(CLASSIFICATION_ORDER),
        METHODS => Order::Sequence(METHODS_ORDER),
        METHOD_STEP => Order::Sequence(METHOD_STEP_ORDER),
        DESCRIPTION | ABSTRACT | FUNDING | INTELLECTUAL_RIGHTS => Order::Groups(TEXT_ORDER),
        DATA_TABLE => Order::Sequence(DATA_TABLE_ORDER),
        OTHER_ENTITY => Order::Sequence(OTHER_ENTITY_ORDER),
        PHYSICAL => Order::Sequence(PHYSICAL_ORDER),
        DATA_FORMAT => Order::Groups(DATA_FORMAT_ORDER),
        TEXT_FORMAT => Order::Sequence(TEXT_FORMAT_ORDER),
        SIMPLE_DELIMITED => Order::Sequence(SIMPLE_DELIMITED_ORDER),
        DISTRIBUTION => Order::Groups(DISTRIBUTION_ORDER),
        ONLINE => Order::Sequence(ONLINE_ORDER),
        ATTRIBUTE => Order::Sequence(ATTRIBUTE_ORDER),
        MISSING_VALUE_CODE => Order::Sequence(MISSING_VALUE_ORDER),
        NOMINAL | ORDINAL => Order::Sequence(CATEGORICAL_ORDER),
        NON_NUMERIC_DOMAIN => Order::Groups(NON_NUMERIC_ORDER),
        ENUMERATED_DOMAIN => Order::Groups(ENUMERATED_ORDER),
        CODE_DEFINITION => Order::Sequence(CODE_DEFINITION_ORDER),
        INTERVAL | RATIO => Order::Sequence(NUMERIC_ORDER),
        UNIT => Order::Groups(UNIT_ORDER),
        NUMERIC_DOMAIN => Order::Sequence(NUMERIC_DOMAIN_ORDER),
        BOUNDS => Order::Sequence(BOUNDS_ORDER),
        DATE_TIME => Order::Sequence(DATE_TIME_ORDER),
        DATE_TIME_DOMAIN => Order::Sequence(DATE_TIME_DOMAIN_ORDER),
        _ => return None,
    };
    Some(order)
}

/// Index at which a child named `child` must be inserted under `parent`,
/// given the names of the parent's current children in order.
pub fn child_insert_index<'a>(
    parent: &str,
    child: &str,
    siblings: impl IntoIterator<Item = &'a str>,
) -> Option<usize> {
    let order = order_for(parent)?;
    let rank = order.rank(child)?;
    let mut index = 0;
    for (position, sibling) in siblings.into_iter().enumerate() {
        match order.rank(sibling) {
            Some(sibling_rank) if sibling_rank <= rank => index = position + 1,
            Some(_) => {}
            // Unranked siblings stay glued to whatever precedes them.
            None if index == position => index = position + 1,
            None => {}
        }
    }
    Some(index)
}
