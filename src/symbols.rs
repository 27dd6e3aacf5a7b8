//! Symbol list
//!
//! The ordered list of symbols the front-end persists between sessions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered sequence of opaque symbol values
///
/// Serialized as a bare JSON array. Elements are passed through untouched,
/// so a stored `[1, "AAPL", {"x": 1}]` comes back exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolList(Vec<Value>);

impl SymbolList {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list of string symbols
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(symbols.into_iter().map(|s| Value::String(s.into())).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for SymbolList {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}
