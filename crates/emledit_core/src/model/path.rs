//! Relative element paths used to locate and create containers.

use super::document::{Document, TreeResult};
use super::node::NodeId;

/// One step of a container path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Child with exactly this name.
    Named(&'static str),
    /// First child carrying any of these names; created with the first name.
    AnyOf(&'static [&'static str]),
}

impl Step {
    fn matches(self, name: &str) -> bool {
        match self {
            Self::Named(expected) => expected == name,
            Self::AnyOf(candidates) => candidates.contains(&name),
        }
    }

    fn create_name(self) -> &'static str {
        match self {
            Self::Named(name) => name,
            Self::AnyOf(candidates) => candidates.first().copied().unwrap_or_default(),
        }
    }
}

/// A descendant branch owned by another page: every `name` child found at
/// `container` below an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub container: &'static [Step],
    pub name: &'static str,
}

/// Builds a path of exact names.
pub fn named(path: &[&'static str]) -> Vec<Step> {
    path.iter().copied().map(Step::Named).collect()
}

fn find_step(doc: &Document, parent: NodeId, step: Step) -> Option<NodeId> {
    doc.children(parent)
        .iter()
        .copied()
        .find(|child| doc.name(*child).is_some_and(|name| step.matches(name)))
}

/// Resolves `path` below `start` without creating anything.
pub fn find_path(doc: &Document, start: NodeId, path: &[Step]) -> Option<NodeId> {
    path.iter()
        .try_fold(start, |current, step| find_step(doc, current, *step))
}

/// Resolves `path` below `start`, creating missing containers in schema
/// order. Returns the final container and how many nodes were created.
pub fn ensure_path(doc: &mut Document, start: NodeId, path: &[Step]) -> TreeResult<(NodeId, usize)> {
    let mut current = start;
    let mut created = 0;
    for step in path {
        current = match find_step(doc, current, *step) {
            Some(existing) => existing,
            None => {
                created += 1;
                doc.create_node(step.create_name(), Some(current))?
            }
        };
    }
    Ok((current, created))
}

#[cfg(test)]
mod tests {
    use super::{ensure_path, find_path, named, Step};
    use crate::model::document::Document;
    use crate::model::names;

    #[test]
    fn ensure_path_creates_only_missing_steps() {
        let mut doc = Document::new(names::EML);
        let root = doc.root();
        let path = named(&[names::DATASET, names::COVERAGE]);
        assert!(find_path(&doc, root, &path).is_none());

        let (coverage, created) = ensure_path(&mut doc, root, &path).unwrap();
        assert_eq!(created, 2);
        let (again, created) = ensure_path(&mut doc, root, &path).unwrap();
        assert_eq!(again, coverage);
        assert_eq!(created, 0);
    }

    #[test]
    fn any_of_matches_existing_alternative() {
        let mut doc = Document::new(names::MEASUREMENT_SCALE);
        let root = doc.root();
        let ordinal = doc.create_node(names::ORDINAL, Some(root)).unwrap();
        let step = Step::AnyOf(&[names::NOMINAL, names::ORDINAL]);
        assert_eq!(find_path(&doc, root, &[step]), Some(ordinal));
    }
}
