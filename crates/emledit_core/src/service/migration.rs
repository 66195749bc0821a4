//! Carries descendant branches from a replaced subtree into its successor.
//!
//! # Invariants
//! - Branch nodes keep their identities; only their parent changes.
//! - Missing containers on the new subtree are created in schema order.

use crate::model::document::{Document, TreeResult};
use crate::model::node::NodeId;
use crate::model::path::{ensure_path, find_path, Branch};

/// Moves every branch found under `old` to the same place under `new`.
///
/// Returns the number of moved branch roots.
pub fn migrate_branches(
    doc: &mut Document,
    old: NodeId,
    new: NodeId,
    branches: &[Branch],
) -> TreeResult<usize> {
    let mut moved = 0;
    for branch in branches {
        let Some(source) = find_path(doc, old, branch.container) else {
            continue;
        };
        let nodes = doc.find_all_children(source, branch.name);
        if nodes.is_empty() {
            continue;
        }
        let (target, _) = ensure_path(doc, new, branch.container)?;
        for node in nodes {
            doc.move_to(node, target)?;
            moved += 1;
        }
    }
    Ok(moved)
}
