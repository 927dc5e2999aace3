use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::BondOrder;

/// One step of a reaction recipe. Atoms are named by reaction-center label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    BreakBond(String, String),
    FormBond(String, String, BondOrder),
    /// Step an existing bond along S/D/T/Q by a signed amount.
    ChangeBond(String, String, i32),
    GainRadical(String, u32),
    LoseRadical(String, u32),
}

impl Action {
    pub fn break_bond(first: &str, second: &str) -> Self {
        Action::BreakBond(first.to_owned(), second.to_owned())
    }

    pub fn form_bond(first: &str, second: &str, order: BondOrder) -> Self {
        Action::FormBond(first.to_owned(), second.to_owned(), order)
    }

    pub fn change_bond(first: &str, second: &str, delta: i32) -> Self {
        Action::ChangeBond(first.to_owned(), second.to_owned(), delta)
    }

    pub fn gain_radical(label: &str, amount: u32) -> Self {
        Action::GainRadical(label.to_owned(), amount)
    }

    pub fn lose_radical(label: &str, amount: u32) -> Self {
        Action::LoseRadical(label.to_owned(), amount)
    }

    /// The recipe keyword, e.g. `BREAK_BOND`.
    pub fn name(&self) -> &'static str {
        match self {
            Action::BreakBond(..) => "BREAK_BOND",
            Action::FormBond(..) => "FORM_BOND",
            Action::ChangeBond(..) => "CHANGE_BOND",
            Action::GainRadical(..) => "GAIN_RADICAL",
            Action::LoseRadical(..) => "LOSE_RADICAL",
        }
    }
}

/// Renders the recipe form, `['FORM_BOND', '*2', 'S', '*3']`.
impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            // The order slot of BREAK_BOND is not checked, S is what catalogs write.
            Action::BreakBond(a, b) => write!(f, "['{}', '{}', 'S', '{}']", self.name(), a, b),
            Action::FormBond(a, b, order) => {
                write!(f, "['{}', '{}', '{}', '{}']", self.name(), a, order, b)
            }
            Action::ChangeBond(a, b, delta) => {
                write!(f, "['{}', '{}', '{}', '{}']", self.name(), a, delta, b)
            }
            Action::GainRadical(l, n) | Action::LoseRadical(l, n) => {
                write!(f, "['{}', '{}', '{}']", self.name(), l, n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_recipe_form() {
        assert_eq!(
            Action::break_bond("*1", "*2").to_string(),
            "['BREAK_BOND', '*1', 'S', '*2']"
        );
        assert_eq!(
            Action::form_bond("*2", "*3", BondOrder::Double).to_string(),
            "['FORM_BOND', '*2', 'D', '*3']"
        );
        assert_eq!(
            Action::change_bond("*1", "*4", -1).to_string(),
            "['CHANGE_BOND', '*1', '-1', '*4']"
        );
        assert_eq!(
            Action::lose_radical("*3", 1).to_string(),
            "['LOSE_RADICAL', '*3', '1']"
        );
    }
}
