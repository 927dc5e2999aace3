use std::collections::BTreeMap;

use crate::{MoleculeGraph, ReactionError};

/// Reaction-center label to atom index.
///
/// Labels name chemical roles, so the map is built once from the reactant and
/// then used unchanged for the whole recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap(BTreeMap<String, u32>);

impl LabelMap {
    pub fn get(&self, label: &str) -> Option<u32> {
        self.0.get(label).copied()
    }

    /// Like `get`, but a missing label is a `LabelNotFound` error.
    pub fn index_of(&self, label: &str) -> Result<u32, ReactionError> {
        self.get(label).ok_or_else(|| ReactionError::LabelNotFound {
            label: label.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(label, &index)| (label.as_str(), index))
    }
}

/// Collect every labeled atom of `graph`.
pub fn resolve_labels(graph: &MoleculeGraph) -> Result<LabelMap, ReactionError> {
    let mut labels = BTreeMap::new();
    for atom in graph.atoms() {
        let Some(label) = &atom.label else {
            continue;
        };
        if let Some(&first) = labels.get(label) {
            return Err(ReactionError::DuplicateLabel {
                label: label.clone(),
                first,
                second: atom.index,
            });
        }
        labels.insert(label.clone(), atom.index);
    }
    Ok(LabelMap(labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_adjacency_list;

    #[test]
    fn test_resolve_labels() {
        let graph = parse_adjacency_list(
            "1  *2 C 0 {2,S} {3,S}\n2  *1 C 1 {1,S}\n3     H 0 {1,S}\n",
        )
        .unwrap();
        let labels = resolve_labels(&graph).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("*1"), Some(2));
        assert_eq!(labels.get("*2"), Some(1));
        assert_eq!(labels.get("*3"), None);
        assert_eq!(
            labels.iter().collect::<Vec<_>>(),
            vec![("*1", 2), ("*2", 1)]
        );
    }

    #[test]
    fn test_duplicate_label() {
        let graph = parse_adjacency_list("1 *1 C 0 {2,S}\n2 *1 C 0 {1,S}\n").unwrap();
        assert_eq!(
            resolve_labels(&graph),
            Err(ReactionError::DuplicateLabel {
                label: "*1".to_string(),
                first: 1,
                second: 2,
            })
        );
    }

    #[test]
    fn test_missing_label() {
        let graph = parse_adjacency_list("1 C 0\n").unwrap();
        let labels = resolve_labels(&graph).unwrap();
        assert!(labels.is_empty());
        assert_eq!(
            labels.index_of("*4"),
            Err(ReactionError::LabelNotFound {
                label: "*4".to_string()
            })
        );
    }
}
