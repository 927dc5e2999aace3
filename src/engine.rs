use tracing::info;

use crate::{
    apply_actions, parse_adjacency_list, parse_recipe, resolve_labels, serialize, Action,
    MoleculeGraph, ReactionError,
};

/// Run `actions` against a freshly parsed reactant and return the product
/// graph.
pub fn transform_graph(reactant: &str, actions: &[Action]) -> Result<MoleculeGraph, ReactionError> {
    let mut graph = parse_adjacency_list(reactant)?;
    let labels = resolve_labels(&graph)?;
    apply_actions(&mut graph, actions, &labels)?;
    Ok(graph)
}

/// Reactant adjacency list in, product adjacency list out.
///
/// Either the whole recipe applies and the product text is returned, or the
/// first error is.
pub fn transform(reactant: &str, actions: &[Action]) -> Result<String, ReactionError> {
    transform_graph(reactant, actions).map(|product| serialize(&product))
}

/// A reaction family and the recipe that turns its reactant into its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionTemplate {
    pub family: String,
    pub actions: Vec<Action>,
}

impl ReactionTemplate {
    pub fn new(family: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            family: family.into(),
            actions,
        }
    }

    /// Build a template from the textual recipe form.
    pub fn parse(family: impl Into<String>, recipe: &str) -> Result<Self, ReactionError> {
        Ok(Self::new(family, parse_recipe(recipe)?))
    }

    pub fn apply_to_graph(&self, reactant: &str) -> Result<MoleculeGraph, ReactionError> {
        let product = transform_graph(reactant, &self.actions)?;
        info!(
            "Applied {} ({} actions) to a {} atom reactant, product multiplicity {}",
            self.family,
            self.actions.len(),
            product.atom_count(),
            product.spin_multiplicity()
        );
        Ok(product)
    }

    pub fn apply(&self, reactant: &str) -> Result<String, ReactionError> {
        self.apply_to_graph(reactant).map(|product| serialize(&product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BondOrder;

    const H_ABSTRACTION_REACTANT: &str = "
1     C 0 {2,D} {6,S} {7,S}
2     C 0 {1,D} {3,S} {4,S}
3  *1 C 0 {2,S} {5,S} {8,S} {9,S}
4     C 0 {2,S} {10,S} {11,S} {12,S}
5  *2 H 0 {3,S}
6     H 0 {1,S}
7     H 0 {1,S}
8     H 0 {3,S}
9     H 0 {3,S}
10    H 0 {4,S}
11    H 0 {4,S}
12    H 0 {4,S}
13 *3 C 1 {14,S} {18,S} {19,S}
14    C 0 {13,S} {15,S} {17,S} {20,S}
15    C 0 {14,S} {16,S} {21,S} {22,S}
16    O 0 {15,S} {23,S}
17    C 0 {14,S} {24,S} {25,S} {26,S}
18    H 0 {13,S}
19    H 0 {13,S}
20    H 0 {14,S}
21    H 0 {15,S}
22    H 0 {15,S}
23    H 0 {16,S}
24    H 0 {17,S}
25    H 0 {17,S}
26    H 0 {17,S}
";

    const H_ABSTRACTION_PRODUCT: &str = "1     C 0 {2,D} {6,S} {7,S}
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
13 *3 C 0 {5,S} {14,S} {18,S} {19,S}
14    C 0 {13,S} {15,S} {17,S} {20,S}
15    C 0 {14,S} {16,S} {21,S} {22,S}
16    O 0 {15,S} {23,S}
17    C 0 {14,S} {24,S} {25,S} {26,S}
18    H 0 {13,S}
19    H 0 {13,S}
20    H 0 {14,S}
21    H 0 {15,S}
22    H 0 {15,S}
23    H 0 {16,S}
24    H 0 {17,S}
25    H 0 {17,S}
26    H 0 {17,S}
";

    const H_ABSTRACTION_RECIPE: &str = "[
            ['BREAK_BOND', '*1', 'S', '*2'],
            ['FORM_BOND', '*2', 'S', '*3'],
            ['GAIN_RADICAL', '*1', '1'],
            ['LOSE_RADICAL', '*3', '1']
            ]";

    const INTRA_H_MIGRATION_REACTANT: &str = "
1  *2 C 0 {2,S} {6,S} {7,S} {8,S}
2  *5 C 0 {1,S} {3,D} {9,S}
3  *4 C 0 {2,D} {5,S} {10,S}
4     C 0 {5,D} {11,S} {12,S}
5  *1 C 1 {3,S} {4,D}
6  *3 H 0 {1,S}
7     H 0 {1,S}
8     H 0 {1,S}
9     H 0 {2,S}
10    H 0 {3,S}
11    H 0 {4,S}
12    H 0 {4,S}
";

    const INTRA_H_MIGRATION_PRODUCT: &str = "1  *2 C 1 {2,S} {7,S} {8,S}
2  *5 C 0 {1,S} {3,D} {9,S}
3  *4 C 0 {2,D} {5,S} {10,S}
4     C 0 {5,D} {11,S} {12,S}
5  *1 C 0 {3,S} {4,D} {6,S}
6  *3 H 0 {5,S}
7     H 0 {1,S}
8     H 0 {1,S}
9     H 0 {2,S}
10    H 0 {3,S}
11    H 0 {4,S}
12    H 0 {4,S}
";

    #[test]
    fn test_h_abstraction() {
        let template = ReactionTemplate::parse("H_Abstraction", H_ABSTRACTION_RECIPE).unwrap();
        assert_eq!(template.apply(H_ABSTRACTION_REACTANT).unwrap(), H_ABSTRACTION_PRODUCT);
    }

    #[test]
    fn test_h_abstraction_product_graph() {
        let actions = vec![
            Action::break_bond("*1", "*2"),
            Action::form_bond("*2", "*3", BondOrder::Single),
            Action::gain_radical("*1", 1),
            Action::lose_radical("*3", 1),
        ];
        let reactant = parse_adjacency_list(H_ABSTRACTION_REACTANT).unwrap();
        let product = transform_graph(H_ABSTRACTION_REACTANT, &actions).unwrap();
        assert_eq!(product.bond(3, 5), None);
        assert_eq!(product.bond(5, 13), Some(BondOrder::Single));
        assert_eq!(product.labeled_atom("*1").unwrap().radical_count, 1);
        assert_eq!(product.labeled_atom("*3").unwrap().radical_count, 0);
        assert_eq!(product.spin_multiplicity(), reactant.spin_multiplicity());
        assert_eq!(resolve_labels(&product).unwrap(), resolve_labels(&reactant).unwrap());
    }

    #[test]
    fn test_intra_h_migration() {
        let template = ReactionTemplate::parse(
            "intra_H_migration",
            "[['BREAK_BOND', '*2', 'S', '*3'], ['FORM_BOND', '*1', 'S', '*3'],
              ['GAIN_RADICAL', '*2', '1'], ['LOSE_RADICAL', '*1', '1']]",
        )
        .unwrap();
        assert_eq!(
            template.apply(INTRA_H_MIGRATION_REACTANT).unwrap(),
            INTRA_H_MIGRATION_PRODUCT
        );
    }

    #[test]
    fn test_product_round_trips() {
        let template = ReactionTemplate::parse("H_Abstraction", H_ABSTRACTION_RECIPE).unwrap();
        let product = template.apply(H_ABSTRACTION_REACTANT).unwrap();
        assert_eq!(transform(&product, &[]).unwrap(), product);
    }

    #[test]
    fn test_deterministic() {
        let actions = parse_recipe(H_ABSTRACTION_RECIPE).unwrap();
        let first = transform(H_ABSTRACTION_REACTANT, &actions).unwrap();
        let second = transform(H_ABSTRACTION_REACTANT, &actions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unbonded_break_fails() {
        let err = transform(H_ABSTRACTION_REACTANT, &[Action::break_bond("*1", "*3")]).unwrap_err();
        assert!(matches!(err, ReactionError::BondNotFound { first_index: 3, second_index: 13, .. }));
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(
            transform("1 C 0 {2,S}\n", &[]),
            Err(ReactionError::MalformedRecord { .. })
        ));
        assert!(matches!(
            transform("1 *1 C 0\n2 *1 C 0\n", &[]),
            Err(ReactionError::DuplicateLabel { .. })
        ));
        assert!(matches!(
            transform(H_ABSTRACTION_REACTANT, &[Action::gain_radical("*9", 1)]),
            Err(ReactionError::LabelNotFound { .. })
        ));
        assert!(matches!(
            transform(H_ABSTRACTION_REACTANT, &[Action::lose_radical("*1", 1)]),
            Err(ReactionError::NegativeRadicalCount { .. })
        ));
        assert!(matches!(
            transform(
                H_ABSTRACTION_REACTANT,
                &[Action::form_bond("*1", "*2", BondOrder::Single)]
            ),
            Err(ReactionError::BondAlreadyExists { .. })
        ));
    }
}
