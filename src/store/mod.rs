//! Store Module
//!
//! Persistent key-value storage behind the bridge.
//!
//! ## Responsibilities
//! - Hold one raw text record per key
//! - Replace a record as a whole (no partial updates)
//! - Report missing keys as `None`, never as an error
//!
//! ## Implementations
//! - `MemoryStore`: in-process map, optional byte quota
//! - `FileStore`: one checksummed record file per key, atomic replace
//!
//! ## Record Format (FileStore)
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────────┐
//! │Magic (4) │ CRC (4)  │ Len (4)  │ Payload (UTF-8)  │
//! └──────────┴──────────┴──────────┴──────────────────┘
//! ```

mod file;
mod memory;
mod record;

use std::sync::Arc;

use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{decode_record, encode_record, HEADER_SIZE, MAGIC};

/// A string-keyed store of whole text records
///
/// Implementations serialize access internally, so every method takes `&self`.
pub trait KeyValueStore: Send + Sync {
    /// Read the record stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the record under `key` with `value`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the record under `key` (no-op if absent)
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
