//! Core engine for editing EML metadata documents.
//! Holds the document tree, entity builders, session controllers and the
//! dual-format persistence gateway.

pub mod builder;
pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use builder::{BuildError, BuildResult, EntityBuilder, EntityKind, Entry, PartyRole};
pub use config::{AccessDefaults, ConfigError, EngineConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_for, logging_status, LoggingError,
};
pub use model::document::{Document, TreeError, TreeResult};
pub use model::element::Element;
pub use model::node::{NodeId, NodeRef};
pub use model::scale::MeasurementScale;
pub use repo::document_repo::{
    DocumentRepository, FileDocumentRepository, MemoryDocumentRepository, RepoError, RepoResult,
};
pub use service::detail_service::DetailService;
pub use service::document_service::DocumentService;
pub use service::list_service::ListService;
pub use service::{SessionError, SessionResult};
