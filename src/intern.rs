use std::{
    collections::HashMap,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    sync::{Arc, RwLock},
};

use lazy_static::lazy_static;

lazy_static! {
    static ref ELEMENT_SYMBOLS: RwLock<HashMap<String, Symbol>> = RwLock::new(HashMap::new());
}

/// An element symbol (`C`, `H`, `Cl`, ...) shared between every atom that
/// carries it.
///
/// Adjacency lists repeat the same handful of symbols on every line, so each
/// distinct symbol is allocated once and atoms hold a reference-counted handle.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Clone, Hash, Eq)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Look up (or allocate) the shared handle for `symbol`.
    pub fn new(symbol: &str) -> Self {
        if let Ok(table) = ELEMENT_SYMBOLS.read() {
            if let Some(existing) = table.get(symbol) {
                return existing.clone();
            }
        }

        let fresh = Symbol(Arc::from(symbol));
        match ELEMENT_SYMBOLS.write() {
            Ok(mut table) => table
                .entry(symbol.to_owned())
                .or_insert_with(|| fresh.clone())
                .clone(),
            // A poisoned table still leaves us with a valid, if unshared, symbol.
            Err(_) => fresh,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when both handles point at the same interned allocation.
    pub fn is_shared_with(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.is_shared_with(other) || self.0 == other.0
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
