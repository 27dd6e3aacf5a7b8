//! Bridge Module
//!
//! Translates port requests into storage reads and writes.
//!
//! ## Responsibilities
//! - Load: read the record, parse it, hand back only array-shaped JSON
//! - Save: serialize the list and replace the record in full
//! - Swallow every load failure (diagnostic only), propagate every save failure

use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, DEFAULT_STORAGE_KEY};
use crate::error::{BridgeError, Result};
use crate::port::{Request, Response};
use crate::store::KeyValueStore;
use crate::symbols::SymbolList;

/// Why a load produced no symbols
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no record stored")]
    Missing,

    #[error("storage read failed: {0}")]
    Storage(#[source] BridgeError),

    #[error("stored record is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("stored JSON is {found}, expected an array")]
    NotAnArray { found: &'static str },
}

/// Connects the front-end ports to a key-value store
///
/// Holds no state between calls; every request is handled on its own.
pub struct StorageBridge<S> {
    /// Backing store (shared by reference or `Arc` if several bridges race)
    store: S,

    /// Key the symbol list lives under
    key: String,
}

impl<S: KeyValueStore> StorageBridge<S> {
    /// Create a bridge over `store` using the default storage key
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create a bridge over `store` using a custom storage key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Create a bridge with the config's storage key
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_key(store, config.storage_key.clone()))
    }

    /// Route a port request
    ///
    /// Load never fails; save returns its error untouched.
    pub fn dispatch(&self, request: Request) -> Result<Option<Response>> {
        match request {
            Request::LoadSymbols => Ok(self.handle_load_request().map(Response::Symbols)),
            Request::SaveSymbols(symbols) => {
                self.handle_save_request(&symbols)?;
                Ok(None)
            }
        }
    }

    /// Handle a `loadSymbols` request
    ///
    /// Returns the stored list if it is array-shaped JSON, otherwise `None`.
    /// Failures are logged and never returned.
    pub fn handle_load_request(&self) -> Option<SymbolList> {
        match self.try_load() {
            Ok(symbols) => {
                tracing::debug!("Loaded {} symbols from {:?}", symbols.len(), self.key);
                Some(symbols)
            }
            Err(LoadError::Missing) => {
                tracing::debug!("No symbols stored under {:?}", self.key);
                None
            }
            Err(e) => {
                tracing::error!(
                    "Error occurred while handling loadSymbols for {:?}: {}",
                    self.key,
                    e
                );
                None
            }
        }
    }

    /// Load the stored list, reporting why nothing came back
    pub fn try_load(&self) -> std::result::Result<SymbolList, LoadError> {
        let raw = self
            .store
            .get_item(&self.key)
            .map_err(LoadError::Storage)?
            .ok_or(LoadError::Missing)?;

        let value: Value = serde_json::from_str(&raw).map_err(LoadError::InvalidJson)?;

        match value {
            Value::Array(items) => Ok(SymbolList::from(items)),
            other => Err(LoadError::NotAnArray {
                found: json_kind(&other),
            }),
        }
    }

    /// Handle a `saveSymbols` request
    ///
    /// Replaces the stored record with the list's JSON text. Emits nothing.
    pub fn handle_save_request(&self, symbols: &SymbolList) -> Result<()> {
        let json = serde_json::to_string(symbols)
            .map_err(|e| BridgeError::Serialization(e.to_string()))?;

        self.store.set_item(&self.key, &json)?;

        tracing::debug!("Saved {} symbols under {:?}", symbols.len(), self.key);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the storage key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
