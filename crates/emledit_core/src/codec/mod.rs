//! Document serialization.
//!
//! # Responsibility
//! - `json`: canonical, lossless form that keeps node identities.
//! - `xml`: derived EML export (and import of foreign EML files).
//!
//! # Invariants
//! - Canonical load followed by canonical save is identity preserving.
//! - Derived output is a pure function of the tree, so re-deriving from a
//!   reloaded canonical artifact reproduces the same bytes.

pub mod json;
pub mod xml;

use crate::model::document::TreeError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from serializing or parsing a document.
#[derive(Debug)]
pub enum CodecError {
    /// Canonical JSON encode/decode failure.
    Json(serde_json::Error),
    /// Derived XML encode/decode failure.
    Xml(String),
    /// Parsed data does not form a valid tree.
    Tree(TreeError),
    /// Input contains no root element.
    EmptyDocument,
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "canonical json error: {err}"),
            Self::Xml(message) => write!(f, "xml error: {message}"),
            Self::Tree(err) => write!(f, "invalid document tree: {err}"),
            Self::EmptyDocument => write!(f, "document has no root element"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Tree(err) => Some(err),
            Self::Xml(_) | Self::EmptyDocument => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<TreeError> for CodecError {
    fn from(value: TreeError) -> Self {
        Self::Tree(value)
    }
}

impl From<quick_xml::Error> for CodecError {
    fn from(value: quick_xml::Error) -> Self {
        Self::Xml(value.to_string())
    }
}
