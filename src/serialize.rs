use std::fmt::Write;

use crate::MoleculeGraph;

/// Renders a MoleculeGraph as adjacency-list text.
///
/// One line per atom, in insertion order:
///
/// ```text
/// 3  *1 C 1 {2,S} {8,S} {9,S}
/// 4     C 0 {2,S} {10,S} {11,S} {12,S}
/// ```
///
/// The index column is as wide as the largest index plus one space, an
/// unlabeled atom gets two blanks in the label column, and bonds are listed
/// by ascending neighbor index. The result always ends in a single newline.
pub fn serialize(graph: &MoleculeGraph) -> String {
    let width = graph.max_index().unwrap_or(0).to_string().len() + 1;

    let mut lines = Vec::with_capacity(graph.atom_count());
    for atom in graph.atoms() {
        let mut line = String::new();
        let label = atom.label.as_deref().unwrap_or("  ");
        // Writing into a String cannot fail.
        let _ = write!(
            line,
            "{:<width$}{} {} {}",
            atom.index,
            label,
            atom.element,
            atom.radical_count,
            width = width
        );
        for (neighbor, order) in graph.bonds(atom.index).unwrap_or_default() {
            let _ = write!(line, " {{{},{}}}", neighbor, order);
        }
        lines.push(line);
    }

    let mut text = lines.join("\n").trim().to_string();
    text.push('\n');
    text
}

impl MoleculeGraph {
    pub fn to_adjacency_list(&self) -> String {
        serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_adjacency_list, AtomRecord, BondOrder};

    const PROPENE_RADICAL: &str = "1     C 0 {2,D} {6,S} {7,S}
2     C 0 {1,D} {3,S} {4,S}
3  *1 C 1 {2,S} {8,S} {9,S}
4     C 0 {2,S} {10,S} {11,S} {12,S}
5  *2 H 0 {13,S}
6     H 0 {1,S}
7     H 0 {1,S}
8     H 0 {3,S}
9     H 0 {3,S}
10    H 0 {4,S}
11    H 0 {4,S}
12    H 0 {4,S}
13 *3 H 0 {5,S}
";

    #[test]
    fn test_round_trip_canonical_text() {
        let graph = parse_adjacency_list(PROPENE_RADICAL).unwrap();
        assert_eq!(serialize(&graph), PROPENE_RADICAL);
    }

    #[test]
    fn test_single_digit_width() {
        let text = "1 *1 O 2 {2,S}\n2    H 0 {1,S}\n";
        let graph = parse_adjacency_list(text).unwrap();
        assert_eq!(graph.to_adjacency_list(), text);
    }

    #[test]
    fn test_neighbors_sorted_and_normalized() {
        let graph = parse_adjacency_list(
            "\n  1 C 0   {12,S} {2,D}\n2 C 0 {1,D}\n12 H 0 {1,S}   \n\n",
        )
        .unwrap();
        assert_eq!(
            serialize(&graph),
            "1     C 0 {2,D} {12,S}\n2     C 0 {1,D}\n12    H 0 {1,S}\n"
        );
    }

    #[test]
    fn test_built_graph() {
        let mut graph = MoleculeGraph::new();
        graph.add_atom(AtomRecord::new(1, Some("*1".to_string()), "C", 0));
        graph.add_atom(AtomRecord::new(2, None, "Cl", 0));
        graph.add_bond(2, 1, BondOrder::Single);
        assert_eq!(serialize(&graph), "1 *1 C 0 {2,S}\n2    Cl 0 {1,S}\n");
    }

    #[test]
    fn test_deterministic() {
        let first = serialize(&parse_adjacency_list(PROPENE_RADICAL).unwrap());
        let second = serialize(&parse_adjacency_list(PROPENE_RADICAL).unwrap());
        assert_eq!(first, second);
    }
}
