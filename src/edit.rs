use tracing::debug;

use crate::{Action, BondOrder, LabelMap, MoleculeGraph, ReactionError};

/// The two atoms of a bond action, resolved to indices.
struct BondSite<'a> {
    first: &'a str,
    first_index: u32,
    second: &'a str,
    second_index: u32,
}

impl<'a> BondSite<'a> {
    fn resolve(labels: &LabelMap, first: &'a str, second: &'a str) -> Result<Self, ReactionError> {
        Ok(BondSite {
            first,
            first_index: labels.index_of(first)?,
            second,
            second_index: labels.index_of(second)?,
        })
    }

    fn not_found(&self) -> ReactionError {
        ReactionError::BondNotFound {
            first: self.first.to_owned(),
            first_index: self.first_index,
            second: self.second.to_owned(),
            second_index: self.second_index,
        }
    }

    fn already_exists(&self) -> ReactionError {
        ReactionError::BondAlreadyExists {
            first: self.first.to_owned(),
            first_index: self.first_index,
            second: self.second.to_owned(),
            second_index: self.second_index,
        }
    }
}

fn break_bond(graph: &mut MoleculeGraph, site: &BondSite) -> Result<(), ReactionError> {
    let order = graph
        .remove_bond(site.first_index, site.second_index)
        .ok_or_else(|| site.not_found())?;
    debug!(
        "Broke {} bond {} ({}) - {} ({})",
        order, site.first, site.first_index, site.second, site.second_index
    );
    Ok(())
}

fn form_bond(graph: &mut MoleculeGraph, site: &BondSite, order: BondOrder) -> Result<(), ReactionError> {
    if site.first_index == site.second_index {
        return Err(ReactionError::SelfBond {
            label: site.first.to_owned(),
            index: site.first_index,
        });
    }
    if !graph.add_bond(site.first_index, site.second_index, order) {
        return Err(site.already_exists());
    }
    debug!(
        "Formed {} bond {} ({}) - {} ({})",
        order, site.first, site.first_index, site.second, site.second_index
    );
    Ok(())
}

fn change_bond(graph: &mut MoleculeGraph, site: &BondSite, delta: i32) -> Result<(), ReactionError> {
    let current = graph
        .bond(site.first_index, site.second_index)
        .ok_or_else(|| site.not_found())?;
    let next = current
        .shifted(delta)
        .ok_or_else(|| ReactionError::BondOrderOutOfRange {
            first: site.first.to_owned(),
            second: site.second.to_owned(),
            order: current.to_string(),
            delta,
        })?;
    graph
        .set_bond_order(site.first_index, site.second_index, next)
        .ok_or_else(|| site.not_found())?;
    debug!(
        "Changed bond {} - {} from {} to {}",
        site.first, site.second, current, next
    );
    Ok(())
}

fn change_radicals(
    graph: &mut MoleculeGraph,
    labels: &LabelMap,
    label: &str,
    change: i64,
) -> Result<(), ReactionError> {
    let index = labels.index_of(label)?;
    let atom = graph
        .atom_mut(index)
        .ok_or_else(|| ReactionError::LabelNotFound {
            label: label.to_owned(),
        })?;
    let current = atom.radical_count;
    let next = u32::try_from(i64::from(current) + change).map_err(|_| {
        ReactionError::NegativeRadicalCount {
            label: label.to_owned(),
            index,
            current,
            change,
        }
    })?;
    atom.radical_count = next;
    debug!(
        "Radical count of {} ({}) changed from {} to {}",
        label, index, current, next
    );
    Ok(())
}

/// Apply one action in place.
pub fn apply_action(
    graph: &mut MoleculeGraph,
    action: &Action,
    labels: &LabelMap,
) -> Result<(), ReactionError> {
    match action {
        Action::BreakBond(a, b) => break_bond(graph, &BondSite::resolve(labels, a, b)?),
        Action::FormBond(a, b, order) => form_bond(graph, &BondSite::resolve(labels, a, b)?, *order),
        Action::ChangeBond(a, b, delta) => {
            change_bond(graph, &BondSite::resolve(labels, a, b)?, *delta)
        }
        Action::GainRadical(label, amount) => {
            change_radicals(graph, labels, label, i64::from(*amount))
        }
        Action::LoseRadical(label, amount) => {
            change_radicals(graph, labels, label, -i64::from(*amount))
        }
    }
}

/// Apply `actions` to `graph` strictly in order.
///
/// Later actions see the effect of earlier ones. The first failure is
/// returned as is and the graph keeps every mutation made before it, so a
/// failed graph should be thrown away rather than reused.
pub fn apply_actions<'g>(
    graph: &'g mut MoleculeGraph,
    actions: &[Action],
    labels: &LabelMap,
) -> Result<&'g mut MoleculeGraph, ReactionError> {
    for (step, action) in actions.iter().enumerate() {
        debug!("Applying step {}: {}", step + 1, action);
        apply_action(graph, action, labels)?;
    }
    Ok(graph)
}
