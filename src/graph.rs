use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::Symbol;

/// The bond-order tags of the adjacency-list vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    /// Aromatic (benzene) bond, written `B`.
    Benzene,
}

impl BondOrder {
    pub fn tag(&self) -> &'static str {
        match self {
            BondOrder::Single => "S",
            BondOrder::Double => "D",
            BondOrder::Triple => "T",
            BondOrder::Quadruple => "Q",
            BondOrder::Benzene => "B",
        }
    }

    /// Position on the S/D/T/Q ladder. Aromatic bonds are not on it.
    fn multiplicity(&self) -> Option<i32> {
        match self {
            BondOrder::Single => Some(1),
            BondOrder::Double => Some(2),
            BondOrder::Triple => Some(3),
            BondOrder::Quadruple => Some(4),
            BondOrder::Benzene => None,
        }
    }

    /// Step the bond order by `delta` along the S/D/T/Q ladder.
    pub fn shifted(&self, delta: i32) -> Option<BondOrder> {
        match self.multiplicity()?.checked_add(delta)? {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            4 => Some(BondOrder::Quadruple),
            _ => None,
        }
    }
}

impl FromStr for BondOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(BondOrder::Single),
            "D" => Ok(BondOrder::Double),
            "T" => Ok(BondOrder::Triple),
            "Q" => Ok(BondOrder::Quadruple),
            "B" => Ok(BondOrder::Benzene),
            _ => Err(format!("Unknown bond order '{}'", s)),
        }
    }
}

impl Display for BondOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.tag())
    }
}

/// One atom of an adjacency list. Its bonds live on the graph edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord {
    pub index: u32,
    pub label: Option<String>,
    pub element: Symbol,
    pub radical_count: u32,
}

impl AtomRecord {
    pub fn new(index: u32, label: Option<String>, element: impl Into<Symbol>, radical_count: u32) -> Self {
        Self {
            index,
            label,
            element: element.into(),
            radical_count,
        }
    }
}

/// A labeled molecular graph keyed by adjacency-list index.
///
/// Atoms are petgraph nodes, added in source order and never removed, so node
/// order is the serialization order. Each bond is a single undirected edge,
/// which keeps "a is bonded to b" and "b is bonded to a" the same fact.
#[derive(Debug, Clone, Default)]
pub struct MoleculeGraph {
    graph: UnGraph<AtomRecord, BondOrder>,
    nodes: HashMap<u32, NodeIndex>,
}

impl MoleculeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom. Returns `false` (and leaves the graph alone) if the index
    /// is already taken.
    pub fn add_atom(&mut self, atom: AtomRecord) -> bool {
        if self.nodes.contains_key(&atom.index) {
            return false;
        }
        let index = atom.index;
        let node = self.graph.add_node(atom);
        self.nodes.insert(index, node);
        true
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, index: u32) -> bool {
        self.nodes.contains_key(&index)
    }

    pub fn atom(&self, index: u32) -> Option<&AtomRecord> {
        self.nodes.get(&index).map(|&node| &self.graph[node])
    }

    pub fn atom_mut(&mut self, index: u32) -> Option<&mut AtomRecord> {
        let node = *self.nodes.get(&index)?;
        Some(&mut self.graph[node])
    }

    /// Atoms in insertion order.
    pub fn atoms(&self) -> impl Iterator<Item = &AtomRecord> + '_ {
        self.graph.node_indices().map(move |node| &self.graph[node])
    }

    /// The atom carrying `label`, if any.
    pub fn labeled_atom(&self, label: &str) -> Option<&AtomRecord> {
        self.atoms().find(|atom| atom.label.as_deref() == Some(label))
    }

    /// Largest atom index, which fixes the width of the index column.
    pub fn max_index(&self) -> Option<u32> {
        self.atoms().map(|atom| atom.index).max()
    }

    pub fn bond(&self, first: u32, second: u32) -> Option<BondOrder> {
        let a = *self.nodes.get(&first)?;
        let b = *self.nodes.get(&second)?;
        self.graph.find_edge(a, b).map(|edge| self.graph[edge])
    }

    /// The bond mapping of one atom: neighbor index to bond order, ascending.
    pub fn bonds(&self, index: u32) -> Option<BTreeMap<u32, BondOrder>> {
        let node = *self.nodes.get(&index)?;
        Some(
            self.graph
                .edges(node)
                .map(|edge| {
                    let other = if edge.source() == node {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    (self.graph[other].index, *edge.weight())
                })
                .collect(),
        )
    }

    /// Insert a bond. Returns `false` if either atom is missing, the atoms are
    /// the same, or they are already bonded.
    pub fn add_bond(&mut self, first: u32, second: u32, order: BondOrder) -> bool {
        if first == second {
            return false;
        }
        let (Some(&a), Some(&b)) = (self.nodes.get(&first), self.nodes.get(&second)) else {
            return false;
        };
        if self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, order);
        true
    }

    /// Remove the bond between two atoms, returning its order.
    pub fn remove_bond(&mut self, first: u32, second: u32) -> Option<BondOrder> {
        let a = *self.nodes.get(&first)?;
        let b = *self.nodes.get(&second)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.remove_edge(edge)
    }

    /// Replace the order of an existing bond, returning the old one.
    pub fn set_bond_order(&mut self, first: u32, second: u32, order: BondOrder) -> Option<BondOrder> {
        let a = *self.nodes.get(&first)?;
        let b = *self.nodes.get(&second)?;
        let edge = self.graph.find_edge(a, b)?;
        Some(std::mem::replace(&mut self.graph[edge], order))
    }

    /// Total unpaired electrons plus one. Summed as `u64` so any set of
    /// `u32` radical counts fits.
    pub fn spin_multiplicity(&self) -> u64 {
        self.atoms()
            .map(|atom| u64::from(atom.radical_count))
            .sum::<u64>()
            + 1
    }

    /// The underlying petgraph graph, for algorithms and DOT export.
    pub fn as_petgraph(&self) -> &UnGraph<AtomRecord, BondOrder> {
        &self.graph
    }
}
