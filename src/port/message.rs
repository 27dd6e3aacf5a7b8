//! Port message definitions

use serde::{Deserialize, Serialize};

use crate::symbols::SymbolList;

/// A request arriving from the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload")]
pub enum Request {
    /// Read the saved list and answer on `symbolsPort`
    #[serde(rename = "loadSymbols")]
    LoadSymbols,

    /// Replace the saved list (fire-and-forget)
    #[serde(rename = "saveSymbols")]
    SaveSymbols(SymbolList),
}

/// A message sent back to the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload")]
pub enum Response {
    /// The list found by a successful load
    #[serde(rename = "symbolsPort")]
    Symbols(SymbolList),
}

impl Request {
    /// Name of the port this request arrives on
    pub fn port_name(&self) -> &'static str {
        match self {
            Request::LoadSymbols => "loadSymbols",
            Request::SaveSymbols(_) => "saveSymbols",
        }
    }
}

impl Response {
    /// Name of the port this response is sent on
    pub fn port_name(&self) -> &'static str {
        match self {
            Response::Symbols(_) => "symbolsPort",
        }
    }
}
