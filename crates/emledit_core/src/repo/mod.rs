//! Persistence gateway.
//!
//! # Responsibility
//! - Store each document as a canonical and a derived artifact.
//! - Keep file layout and serialization details out of the services.
//!
//! # Invariants
//! - Both artifacts are serialized before either is written.
//! - `load` reads the canonical artifact only.

pub mod document_repo;
