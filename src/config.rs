//! Configuration for SymbolBridge
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{BridgeError, Result};

/// Storage key used by the front-end for the saved symbol list
pub const DEFAULT_STORAGE_KEY: &str = "stockSymbols";

/// Default root directory for record files
pub const DEFAULT_DATA_DIR: &str = "./symbolbridge_data";

/// Main configuration for a SymbolBridge instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for record files (only used by `FileStore`)
    /// Internal structure:
    ///   {data_dir}/
    ///     └── {hex(key)}.rec   (one record per key)
    pub data_dir: PathBuf,

    /// Key the symbol list is stored under
    pub storage_key: String,

    /// fsync each record before it replaces the previous one
    pub sync_on_write: bool,

    /// Optional byte quota for stores that enforce one
    pub quota_bytes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sync_on_write: false,
            quota_bytes: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check invariants that the builder cannot enforce by type
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(BridgeError::Config("storage_key must not be empty".into()));
        }
        if self.quota_bytes == Some(0) {
            return Err(BridgeError::Config("quota_bytes must be > 0".into()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for record files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the storage key
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Enable or disable fsync on every write
    pub fn sync_on_write(mut self, sync: bool) -> Self {
        self.config.sync_on_write = sync;
        self
    }

    /// Set the storage quota (in bytes)
    pub fn quota_bytes(mut self, quota: usize) -> Self {
        self.config.quota_bytes = Some(quota);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
