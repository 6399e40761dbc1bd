//! Product identification.
//!
//! Products on the simulated exchange are identified by their listing
//! symbol (e.g. "RAINFOREST_RESIN"). The symbol is the primary key for
//! order depths, positions, and per-product state.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Product symbol on the simulated exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// Allows HashMap/BTreeMap lookups by `&str` without allocating.
impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}
