//! In-memory store
//!
//! HashMap-based store with RwLock for concurrency.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{BridgeError, Result};

use super::KeyValueStore;

/// In-memory key-value store
///
/// ## Quota:
/// When a quota is set, the sum of key and value lengths across all records
/// may not exceed it. A rejected write leaves the previous record in place.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store without a quota
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Create a store honoring the config's quota
    pub fn from_config(config: &Config) -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            quota: config.quota_bytes,
        }
    }

    /// Bytes currently counted against the quota
    pub fn used_bytes(&self) -> usize {
        Self::footprint(&self.data.read())
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn footprint(data: &HashMap<String, String>) -> usize {
        data.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.write();

        if let Some(quota) = self.quota {
            let replaced = data.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let requested = Self::footprint(&data) - replaced + key.len() + value.len();
            if requested > quota {
                return Err(BridgeError::QuotaExceeded { requested, quota });
            }
        }

        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }
}
