use std::collections::BTreeMap;
use std::str::FromStr;

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, satisfy, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize},
    error::VerboseError,
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};
use tracing::trace;

use crate::{AtomRecord, BondOrder, MoleculeGraph, ReactionError};

pub(crate) type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// One line of an adjacency list before any cross-line checks.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawRecord<'a> {
    index: u32,
    label: Option<&'a str>,
    element: &'a str,
    radical_count: u32,
    bonds: Vec<(u32, BondOrder)>,
}

fn unsigned(input: &str) -> Res<u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

/// `*`, `*1`, `*12`, ...
pub(crate) fn label(input: &str) -> Res<&str> {
    recognize(pair(char('*'), take_while(|c: char| c.is_ascii_alphanumeric())))(input)
}

/// An element symbol: one capital letter, then lowercase letters.
fn element(input: &str) -> Res<&str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase()),
        take_while(|c: char| c.is_ascii_lowercase()),
    ))(input)
}

fn bond_order(input: &str) -> Res<BondOrder> {
    map_res(take_while1(|c: char| c.is_ascii_alphabetic()), |tag: &str| {
        tag.parse::<BondOrder>()
    })(input)
}

/// `{12,S}`
fn bond(input: &str) -> Res<(u32, BondOrder)> {
    delimited(
        char('{'),
        separated_pair(unsigned, char(','), bond_order),
        char('}'),
    )(input)
}

fn atom_record(input: &str) -> Res<RawRecord> {
    let (input, (index, label, element, radical_count, bonds)) = tuple((
        preceded(space0, unsigned),
        opt(preceded(space1, label)),
        preceded(space1, element),
        preceded(space1, unsigned),
        terminated(many0(preceded(space1, bond)), space0),
    ))(input)?;
    Ok((
        input,
        RawRecord {
            index,
            label,
            element,
            radical_count,
            bonds,
        },
    ))
}

/// Turn a nom failure into a one-line reason pointing at the bad token.
fn describe_failure(line: &str, err: nom::Err<VerboseError<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => match e.errors.first() {
            Some(&(rest, _)) if rest.trim().is_empty() => {
                "expected `index [label] element radicals {neighbor,order}*`".to_string()
            }
            Some(&(rest, _)) => {
                let column = line.len() - rest.len() + 1;
                let token = rest.split_whitespace().next().unwrap_or(rest);
                format!("unexpected '{}' at column {}", token, column)
            }
            None => "unrecognized record".to_string(),
        },
        nom::Err::Incomplete(_) => "incomplete record".to_string(),
    }
}

/// Parses adjacency-list text into a MoleculeGraph.
///
/// Blank lines are skipped. Every other line must read
/// `index [label] element radicalCount {neighbor,order}*`, and every bond must
/// be listed on both of its atoms with the same order.
pub fn parse_adjacency_list(text: &str) -> Result<MoleculeGraph, ReactionError> {
    let mut records = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (_, record) = all_consuming(atom_record)(line)
            .map_err(|e| ReactionError::malformed(number + 1, describe_failure(line, e)))?;
        records.push((number + 1, record));
    }

    if records.is_empty() {
        return Err(ReactionError::malformed(1, "adjacency list declares no atoms"));
    }

    let mut graph = MoleculeGraph::new();
    for (line, record) in &records {
        if record.index == 0 {
            return Err(ReactionError::malformed(*line, "atom indices start at 1"));
        }
        let atom = AtomRecord::new(
            record.index,
            record.label.map(str::to_owned),
            record.element,
            record.radical_count,
        );
        if !graph.add_atom(atom) {
            return Err(ReactionError::malformed(
                *line,
                format!("atom index {} is declared twice", record.index),
            ));
        }
    }

    // Every directed entry, so the reverse of each can be checked afterwards.
    let mut declared: BTreeMap<(u32, u32), BondOrder> = BTreeMap::new();
    for (line, record) in &records {
        for &(neighbor, order) in &record.bonds {
            if neighbor == record.index {
                return Err(ReactionError::malformed(
                    *line,
                    format!("atom {} is bonded to itself", neighbor),
                ));
            }
            if !graph.contains(neighbor) {
                return Err(ReactionError::malformed(
                    *line,
                    format!("bond to atom {}, which is never declared", neighbor),
                ));
            }
            if declared.insert((record.index, neighbor), order).is_some() {
                return Err(ReactionError::malformed(
                    *line,
                    format!("neighbor {} is listed twice", neighbor),
                ));
            }
        }
    }

    for (&(first, second), &order) in &declared {
        match declared.get(&(second, first)) {
            Some(&reverse) if reverse == order => {
                if first < second {
                    graph.add_bond(first, second, order);
                }
            }
            _ => return Err(ReactionError::AsymmetricGraph { first, second }),
        }
    }

    trace!(
        "Parsed adjacency list with {} atoms and {} bonds",
        graph.atom_count(),
        graph.bond_count()
    );
    Ok(graph)
}

impl FromStr for MoleculeGraph {
    type Err = ReactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_adjacency_list(s)
    }
}
