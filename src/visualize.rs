use std::fmt::{Result as FmtResult, Write};

use petgraph::visit::EdgeRef;

use crate::{AtomRecord, BondOrder, MoleculeGraph};

/// Renders a MoleculeGraph as a Graphviz DOT document.
///
/// Nodes are labeled `index:element`, with the reaction-center label and one
/// dot per unpaired electron appended. Reaction centers get a thick gold
/// outline, and double/triple bonds are drawn as parallel edges.
pub fn generate_dot(graph: &MoleculeGraph) -> String {
    let mut dot_output = String::new();
    // Writing into a String cannot fail.
    let _ = write_dot(graph, &mut dot_output);
    dot_output
}

fn write_dot(graph: &MoleculeGraph, out: &mut impl Write) -> FmtResult {
    let petgraph = graph.as_petgraph();
    writeln!(out, "graph Molecule {{")?;
    writeln!(out, "    layout=neato;")?;
    writeln!(out, "    multiedge=true;")?;

    for node in petgraph.node_indices() {
        let atom = &petgraph[node];
        let outline = if atom.label.is_some() {
            "color=gold, penwidth=3, "
        } else {
            ""
        };
        writeln!(
            out,
            "    {} [label=\"{}\", fontcolor=white, shape=circle, style=filled, {}fillcolor={}];",
            atom.index,
            node_label(atom),
            outline,
            element_to_color(atom.element.as_str())
        )?;
    }

    for edge in petgraph.edge_references() {
        let source = petgraph[edge.source()].index;
        let target = petgraph[edge.target()].index;
        let (count, extra) = bond_to_style(edge.weight());
        for _ in 0..count {
            writeln!(out, "    {} -- {} [penwidth=2{}];", source, target, extra)?;
        }
    }

    writeln!(out, "}}")
}

/// Beyond this many unpaired electrons the label shows a count instead of dots.
const MAX_RADICAL_DOTS: u32 = 3;

fn node_label(atom: &AtomRecord) -> String {
    let mut label = format!("{}:{}", atom.index, atom.element);
    if let Some(tag) = &atom.label {
        label.push(' ');
        label.push_str(tag);
    }
    match atom.radical_count {
        0 => {}
        n @ 1..=MAX_RADICAL_DOTS => label.extend(std::iter::repeat('•').take(n as usize)),
        n => label.push_str(&format!("•{}", n)),
    }
    label
}

fn element_to_color(symbol: &str) -> &'static str {
    match symbol {
        "C" => "black",
        "H" => "gray",
        "O" => "red",
        "N" => "blue",
        "Cl" => "darkgreen",
        "Br" => "brown",
        "F" => "pink",
        "S" => "yellow",
        _ => "purple",
    }
}

/// How many parallel edges to draw, plus any extra attributes.
fn bond_to_style(bond: &BondOrder) -> (usize, &'static str) {
    match bond {
        BondOrder::Single => (1, ""),
        BondOrder::Double => (2, ""),
        BondOrder::Triple => (3, ""),
        BondOrder::Quadruple => (4, ""),
        BondOrder::Benzene => (1, ", style=dashed, color=purple"),
    }
}
