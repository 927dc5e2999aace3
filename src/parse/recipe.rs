use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, multispace0, one_of},
    combinator::{all_consuming, cut, opt, peek},
    error::{context, convert_error},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};
use tracing::trace;

use super::adjlist::{label, Res};
use crate::{Action, BondOrder, ReactionError};

fn comma(input: &str) -> Res<char> {
    delimited(multispace0, char(','), multispace0)(input)
}

/// A `'single'` or `"double"` quoted field.
fn quoted(input: &str) -> Res<&str> {
    alt((
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
    ))(input)
}

/// `['FORM_BOND', '*2', 'S', '*3']`
///
/// Once the opening bracket is seen the entry must complete, so a bad field
/// is reported where it sits instead of at the end of the recipe.
fn entry(input: &str) -> Res<Vec<&str>> {
    context(
        "recipe entry",
        preceded(
            pair(char('['), multispace0),
            cut(terminated(
                separated_list1(comma, quoted),
                tuple((multispace0, opt(char(',')), multispace0, char(']'))),
            )),
        ),
    )(input)
}

fn entries(input: &str) -> Res<Vec<Vec<&str>>> {
    terminated(
        separated_list0(comma, entry),
        pair(multispace0, opt(char(','))),
    )(input)
}

/// Either a bare run of entries or the whole run wrapped in one more `[...]`.
fn recipe(input: &str) -> Res<Vec<Vec<&str>>> {
    delimited(
        multispace0,
        alt((
            context(
                "recipe",
                preceded(
                    pair(char('['), multispace0),
                    // `[[` or `[]` opens the outer list, `['` a bare entry.
                    preceded(
                        peek(one_of("[]")),
                        cut(terminated(entries, pair(multispace0, char(']')))),
                    ),
                ),
            ),
            entries,
        )),
        multispace0,
    )(input)
}

fn malformed(reason: impl Into<String>) -> ReactionError {
    ReactionError::MalformedRecipe {
        reason: reason.into(),
    }
}

fn reaction_label(field: &str) -> Result<String, ReactionError> {
    all_consuming(label)(field)
        .map(|(_, label)| label.to_owned())
        .map_err(|_| malformed(format!("'{}' is not a reaction-center label", field)))
}

fn count<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, ReactionError> {
    field
        .trim()
        .parse::<T>()
        .map_err(|_| malformed(format!("'{}' is not a valid {}", field, what)))
}

fn to_action(fields: &[&str]) -> Result<Action, ReactionError> {
    let (name, args) = match fields.split_first() {
        Some((name, args)) => (name.trim().to_ascii_uppercase(), args),
        None => return Err(malformed("empty recipe entry")),
    };

    let action = match (name.as_str(), args) {
        // The order slot of BREAK_BOND is not checked against the graph.
        ("BREAK_BOND", [a, _, b]) => Action::BreakBond(reaction_label(a)?, reaction_label(b)?),
        ("FORM_BOND", [a, order, b]) => {
            let order = order
                .trim()
                .parse::<BondOrder>()
                .map_err(|e| malformed(e))?;
            Action::FormBond(reaction_label(a)?, reaction_label(b)?, order)
        }
        ("CHANGE_BOND", [a, delta, b]) => Action::ChangeBond(
            reaction_label(a)?,
            reaction_label(b)?,
            count(delta, "bond order change")?,
        ),
        ("GAIN_RADICAL", [l, n]) => Action::GainRadical(reaction_label(l)?, count(n, "radical count")?),
        ("LOSE_RADICAL", [l, n]) => Action::LoseRadical(reaction_label(l)?, count(n, "radical count")?),
        ("BREAK_BOND" | "FORM_BOND" | "CHANGE_BOND" | "GAIN_RADICAL" | "LOSE_RADICAL", _) => {
            return Err(malformed(format!(
                "{} takes {} arguments, got {}",
                name,
                if name.ends_with("_BOND") { 3 } else { 2 },
                args.len()
            )))
        }
        _ => return Err(malformed(format!("unknown action '{}'", fields[0]))),
    };
    Ok(action)
}

/// Parses a textual recipe such as
///
/// ```text
/// [
///     ['BREAK_BOND', '*1', 'S', '*2'],
///     ['FORM_BOND', '*2', 'S', '*3'],
///     ['GAIN_RADICAL', '*1', '1'],
///     ['LOSE_RADICAL', '*3', '1'],
/// ]
/// ```
///
/// into the ordered list of actions it describes. The outer brackets are
/// optional and action names are case-insensitive.
pub fn parse_recipe(text: &str) -> Result<Vec<Action>, ReactionError> {
    let (_, raw) = all_consuming(recipe)(text).map_err(|e| match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => malformed(convert_error(text, e)),
        nom::Err::Incomplete(_) => malformed("incomplete recipe"),
    })?;

    let actions = raw
        .iter()
        .map(|fields| to_action(fields))
        .collect::<Result<Vec<_>, _>>()?;
    trace!("Parsed recipe with {} actions", actions.len());
    Ok(actions)
}

/// Renders actions in the form `parse_recipe` reads back.
pub fn format_recipe(actions: &[Action]) -> String {
    let mut out = String::from("[\n");
    for action in actions {
        out.push_str("    ");
        out.push_str(&action.to_string());
        out.push_str(",\n");
    }
    out.push(']');
    out
}
