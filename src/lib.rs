//! Reaction-template transformer for adjacency-list molecular graphs.
//!
//! A reactant adjacency list plus an ordered recipe of graph edits
//! (`BREAK_BOND`, `FORM_BOND`, `CHANGE_BOND`, `GAIN_RADICAL`, `LOSE_RADICAL`)
//! referencing reaction-center labels becomes a product adjacency list:
//!
//! ```
//! use rxn_template::{transform, Action, BondOrder};
//!
//! let reactant = "
//! 1 *1 C 0 {2,S}
//! 2 *2 H 0 {1,S}
//! 3 *3 O 1
//! ";
//! let product = transform(reactant, &[
//!     Action::break_bond("*1", "*2"),
//!     Action::form_bond("*2", "*3", BondOrder::Single),
//!     Action::gain_radical("*1", 1),
//!     Action::lose_radical("*3", 1),
//! ]).unwrap();
//! assert_eq!(product, "1 *1 C 1\n2 *2 H 0 {3,S}\n3 *3 O 0 {2,S}\n");
//! ```

mod intern;
pub use intern::*;

mod error;
pub use error::*;

mod graph;
pub use graph::*;

mod action;
pub use action::*;

mod parse;
pub use parse::*;

mod labels;
pub use labels::*;

mod edit;
pub use edit::*;

mod serialize;
pub use serialize::*;

mod engine;
pub use engine::*;

mod visualize;
pub use visualize::*;

use tracing::metadata::LevelFilter;

/// Install a `tracing` subscriber that prints to stderr at `level`
/// (`"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"` or `"off"`).
///
/// Unrecognized levels fall back to `warn`. Calling this more than once is
/// harmless; only the first subscriber is kept.
pub fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::WARN);
    let _ = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
