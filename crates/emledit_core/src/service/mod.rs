//! Edit-session services.
//!
//! # Responsibility
//! - Run each page request as one load -> mutate -> save round trip over a
//!   `DocumentRepository`.
//! - Translate builder, tree and persistence failures into `SessionError`.
//!
//! # Invariants
//! - A request that fails before its save leaves the stored document as it
//!   was.
//! - Nothing is cached between requests; each call loads a fresh tree.

pub mod collection;
pub mod detail_service;
pub mod document_service;
pub mod fingerprint;
pub mod list_service;
pub mod migration;
pub mod navigation;

use crate::builder::BuildError;
use crate::model::document::TreeError;
use crate::repo::document_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by session services.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced to the page layer.
#[derive(Debug)]
pub enum SessionError {
    /// A document or node identity did not resolve.
    NotFound(String),
    /// The builder could not assemble the submitted entity.
    Build(BuildError),
    /// Serialization or storage failure.
    Persistence(RepoError),
    /// A structural edit was rejected by the tree.
    Tree(TreeError),
    /// Unparseable action token, row key or control.
    InvalidRequest(String),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::Build(err) => write!(f, "cannot build entity: {err}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::Tree(err) => write!(f, "{err}"),
            Self::InvalidRequest(details) => write!(f, "invalid request: {details}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Build(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::Tree(err) => Some(err),
            Self::NotFound(_) | Self::InvalidRequest(_) => None,
        }
    }
}

impl From<BuildError> for SessionError {
    fn from(value: BuildError) -> Self {
        Self::Build(value)
    }
}

impl From<TreeError> for SessionError {
    fn from(value: TreeError) -> Self {
        match value {
            TreeError::NodeNotFound(id) => Self::NotFound(format!("node {id}")),
            other => Self::Tree(other),
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(package_id) => Self::NotFound(format!("document {package_id}")),
            other => Self::Persistence(other),
        }
    }
}
