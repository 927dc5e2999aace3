use thiserror::Error;

/// Everything that can go wrong while turning a reactant adjacency list and a
/// recipe into a product adjacency list.
///
/// Every variant is terminal for the transform that raised it: they describe
/// a mistake in the template (or the reactant), so nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReactionError {
    #[error("Malformed adjacency list record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Bond {first} -> {second} has no matching bond {second} -> {first}")]
    AsymmetricGraph { first: u32, second: u32 },

    #[error("Label '{label}' appears on both atom {first} and atom {second}")]
    DuplicateLabel { label: String, first: u32, second: u32 },
    #[error("Label '{label}' does not mark any atom in the reactant")]
    LabelNotFound { label: String },

    #[error("Cannot break bond {first} ({first_index}) - {second} ({second_index}): the atoms are not bonded")]
    BondNotFound {
        first: String,
        first_index: u32,
        second: String,
        second_index: u32,
    },
    #[error("Cannot form bond {first} ({first_index}) - {second} ({second_index}): the atoms are already bonded")]
    BondAlreadyExists {
        first: String,
        first_index: u32,
        second: String,
        second_index: u32,
    },
    #[error("Cannot bond label {label} (atom {index}) to itself")]
    SelfBond { label: String, index: u32 },
    #[error("Changing bond {first} - {second} of order {order} by {delta} leaves the S/D/T/Q range")]
    BondOrderOutOfRange {
        first: String,
        second: String,
        order: String,
        delta: i32,
    },
    #[error("Radical count of {label} (atom {index}) cannot change from {current} by {change}")]
    NegativeRadicalCount {
        label: String,
        index: u32,
        current: u32,
        change: i64,
    },

    #[error("Malformed reaction recipe: {reason}")]
    MalformedRecipe { reason: String },
}

impl ReactionError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ReactionError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
