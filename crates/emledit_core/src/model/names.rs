//! EML element and attribute names used by the editor.

pub const EML: &str = "eml";
pub const ACCESS: &str = "access";
pub const ALLOW: &str = "allow";
pub const DENY: &str = "deny";
pub const PRINCIPAL: &str = "principal";
pub const PERMISSION: &str = "permission";

pub const DATASET: &str = "dataset";
pub const ALTERNATE_IDENTIFIER: &str = "alternateIdentifier";
pub const SHORT_NAME: &str = "shortName";
pub const TITLE: &str = "title";
pub const CREATOR: &str = "creator";
pub const METADATA_PROVIDER: &str = "metadataProvider";
pub const ASSOCIATED_PARTY: &str = "associatedParty";
pub const PUB_DATE: &str = "pubDate";
pub const LANGUAGE: &str = "language";
pub const SERIES: &str = "series";
pub const ABSTRACT: &str = "abstract";
pub const KEYWORD_SET: &str = "keywordSet";
pub const KEYWORD: &str = "keyword";
pub const KEYWORD_THESAURUS: &str = "keywordThesaurus";
pub const ADDITIONAL_INFO: &str = "additionalInfo";
pub const INTELLECTUAL_RIGHTS: &str = "intellectualRights";
pub const DISTRIBUTION: &str = "distribution";
pub const COVERAGE: &str = "coverage";
pub const PURPOSE: &str = "purpose";
pub const MAINTENANCE: &str = "maintenance";
pub const CONTACT: &str = "contact";
pub const PUBLISHER: &str = "publisher";
pub const PUB_PLACE: &str = "pubPlace";
pub const METHODS: &str = "methods";
pub const PROJECT: &str = "project";
pub const DATA_TABLE: &str = "dataTable";
pub const SPATIAL_RASTER: &str = "spatialRaster";
pub const SPATIAL_VECTOR: &str = "spatialVector";
pub const STORED_PROCEDURE: &str = "storedProcedure";
pub const VIEW: &str = "view";
pub const OTHER_ENTITY: &str = "otherEntity";
pub const ADDITIONAL_METADATA: &str = "additionalMetadata";

pub const PARA: &str = "para";
pub const SECTION: &str = "section";

pub const PERSONNEL: &str = "personnel";
pub const FUNDING: &str = "funding";
pub const STUDY_AREA_DESCRIPTION: &str = "studyAreaDescription";
pub const DESIGN_DESCRIPTION: &str = "designDescription";
pub const RELATED_PROJECT: &str = "relatedProject";

pub const INDIVIDUAL_NAME: &str = "individualName";
pub const SALUTATION: &str = "salutation";
pub const GIVEN_NAME: &str = "givenName";
pub const SUR_NAME: &str = "surName";
pub const ORGANIZATION_NAME: &str = "organizationName";
pub const POSITION_NAME: &str = "positionName";
pub const ADDRESS: &str = "address";
pub const DELIVERY_POINT: &str = "deliveryPoint";
pub const CITY: &str = "city";
pub const ADMINISTRATIVE_AREA: &str = "administrativeArea";
pub const POSTAL_CODE: &str = "postalCode";
pub const COUNTRY: &str = "country";
pub const PHONE: &str = "phone";
pub const ELECTRONIC_MAIL_ADDRESS: &str = "electronicMailAddress";
pub const ONLINE_URL: &str = "onlineUrl";
pub const USER_ID: &str = "userId";
pub const ROLE: &str = "role";

pub const GEOGRAPHIC_COVERAGE: &str = "geographicCoverage";
pub const GEOGRAPHIC_DESCRIPTION: &str = "geographicDescription";
pub const BOUNDING_COORDINATES: &str = "boundingCoordinates";
pub const WEST_BOUNDING_COORDINATE: &str = "westBoundingCoordinate";
pub const EAST_BOUNDING_COORDINATE: &str = "eastBoundingCoordinate";
pub const NORTH_BOUNDING_COORDINATE: &str = "northBoundingCoordinate";
pub const SOUTH_BOUNDING_COORDINATE: &str = "southBoundingCoordinate";
pub const TEMPORAL_COVERAGE: &str = "temporalCoverage";
pub const SINGLE_DATE_TIME: &str = "singleDateTime";
pub const RANGE_OF_DATES: &str = "rangeOfDates";
pub const BEGIN_DATE: &str = "beginDate";
pub const END_DATE: &str = "endDate";
pub const CALENDAR_DATE: &str = "calendarDate";
pub const TIME: &str = "time";
pub const TAXONOMIC_COVERAGE: &str = "taxonomicCoverage";
pub const TAXONOMIC_SYSTEM: &str = "taxonomicSystem";
pub const GENERAL_TAXONOMIC_COVERAGE: &str = "generalTaxonomicCoverage";
pub const TAXONOMIC_CLASSIFICATION: &str = "taxonomicClassification";
pub const TAXON_RANK_NAME: &str = "taxonRankName";
pub const TAXON_RANK_VALUE: &str = "taxonRankValue";
pub const COMMON_NAME: &str = "commonName";

pub const METHOD_STEP: &str = "methodStep";
pub const SAMPLING: &str = "sampling";
pub const QUALITY_CONTROL: &str = "qualityControl";
pub const DESCRIPTION: &str = "description";
pub const CITATION: &str = "citation";
pub const PROTOCOL: &str = "protocol";
pub const INSTRUMENTATION: &str = "instrumentation";
pub const SOFTWARE: &str = "software";
pub const SUB_STEP: &str = "subStep";
pub const DATA_SOURCE: &str = "dataSource";

pub const ENTITY_NAME: &str = "entityName";
pub const ENTITY_DESCRIPTION: &str = "entityDescription";
pub const ENTITY_TYPE: &str = "entityType";
pub const PHYSICAL: &str = "physical";
pub const OBJECT_NAME: &str = "objectName";
pub const SIZE: &str = "size";
pub const AUTHENTICATION: &str = "authentication";
pub const COMPRESSION: &str = "compression";
pub const ENCODING_METHOD: &str = "encodingMethod";
pub const CHARACTER_ENCODING: &str = "characterEncoding";
pub const DATA_FORMAT: &str = "dataFormat";
pub const TEXT_FORMAT: &str = "textFormat";
pub const EXTERNALLY_DEFINED_FORMAT: &str = "externallyDefinedFormat";
pub const BINARY_RASTER_FORMAT: &str = "binaryRasterFormat";
pub const NUM_HEADER_LINES: &str = "numHeaderLines";
pub const NUM_FOOTER_LINES: &str = "numFooterLines";
pub const RECORD_DELIMITER: &str = "recordDelimiter";
pub const PHYSICAL_LINE_DELIMITER: &str = "physicalLineDelimiter";
pub const NUM_PHYSICAL_LINES_PER_RECORD: &str = "numPhysicalLinesPerRecord";
pub const MAX_RECORD_LENGTH: &str = "maxRecordLength";
pub const ATTRIBUTE_ORIENTATION: &str = "attributeOrientation";
pub const SIMPLE_DELIMITED: &str = "simpleDelimited";
pub const COMPLEX: &str = "complex";
pub const FIELD_DELIMITER: &str = "fieldDelimiter";
pub const COLLAPSE_DELIMITERS: &str = "collapseDelimiters";
pub const QUOTE_CHARACTER: &str = "quoteCharacter";
pub const LITERAL_CHARACTER: &str = "literalCharacter";
pub const ONLINE: &str = "online";
pub const OFFLINE: &str = "offline";
pub const INLINE: &str = "inline";
pub const ONLINE_DESCRIPTION: &str = "onlineDescription";
pub const URL: &str = "url";
pub const CONNECTION: &str = "connection";
pub const CONNECTION_DEFINITION: &str = "connectionDefinition";
pub const CONSTRAINT: &str = "constraint";
pub const CASE_SENSITIVE: &str = "caseSensitive";
pub const NUMBER_OF_RECORDS: &str = "numberOfRecords";

pub const ATTRIBUTE_LIST: &str = "attributeList";
pub const ATTRIBUTE: &str = "attribute";
pub const ATTRIBUTE_NAME: &str = "attributeName";
pub const ATTRIBUTE_LABEL: &str = "attributeLabel";
pub const ATTRIBUTE_DEFINITION: &str = "attributeDefinition";
pub const STORAGE_TYPE: &str = "storageType";
pub const MEASUREMENT_SCALE: &str = "measurementScale";
pub const MISSING_VALUE_CODE: &str = "missingValueCode";
pub const CODE: &str = "code";
pub const CODE_EXPLANATION: &str = "codeExplanation";
pub const ACCURACY: &str = "accuracy";
pub const NOMINAL: &str = "nominal";
pub const ORDINAL: &str = "ordinal";
pub const INTERVAL: &str = "interval";
pub const RATIO: &str = "ratio";
pub const DATE_TIME: &str = "dateTime";
pub const NON_NUMERIC_DOMAIN: &str = "nonNumericDomain";
pub const ENUMERATED_DOMAIN: &str = "enumeratedDomain";
pub const TEXT_DOMAIN: &str = "textDomain";
pub const CODE_DEFINITION: &str = "codeDefinition";
pub const EXTERNAL_CODE_SET: &str = "externalCodeSet";
pub const ENTITY_CODE_LIST: &str = "entityCodeList";
pub const DEFINITION: &str = "definition";
pub const SOURCE: &str = "source";
pub const UNIT: &str = "unit";
pub const STANDARD_UNIT: &str = "standardUnit";
pub const CUSTOM_UNIT: &str = "customUnit";
pub const PRECISION: &str = "precision";
pub const NUMERIC_DOMAIN: &str = "numericDomain";
pub const NUMBER_TYPE: &str = "numberType";
pub const BOUNDS: &str = "bounds";
pub const MINIMUM: &str = "minimum";
pub const MAXIMUM: &str = "maximum";
pub const FORMAT_STRING: &str = "formatString";
pub const DATE_TIME_PRECISION: &str = "dateTimePrecision";
pub const DATE_TIME_DOMAIN: &str = "dateTimeDomain";

// Attribute (XML attribute) names.
pub const PACKAGE_ID_ATTR: &str = "packageId";
pub const SYSTEM_ATTR: &str = "system";
pub const SCOPE_ATTR: &str = "scope";
pub const ORDER_ATTR: &str = "order";
pub const AUTH_SYSTEM_ATTR: &str = "authSystem";
pub const KEYWORD_TYPE_ATTR: &str = "keywordType";
pub const TYPE_SYSTEM_ATTR: &str = "typeSystem";
pub const EXCLUSIVE_ATTR: &str = "exclusive";
pub const ENFORCED_ATTR: &str = "enforced";
pub const PHONE_TYPE_ATTR: &str = "phonetype";
