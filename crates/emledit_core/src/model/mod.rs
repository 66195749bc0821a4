//! EML document model.
//!
//! # Responsibility
//! - Hold one document as an arena of identified nodes.
//! - Apply the schema child order on every insertion.
//! - Model create-vs-edit references explicitly.
//!
//! # Invariants
//! - Node identities are only meaningful inside the document that owns them.
//! - The creation sentinel never resolves to a node.

pub mod document;
pub mod element;
pub mod names;
pub mod node;
pub mod path;
pub mod rule;
pub mod scale;
