//! File-backed store
//!
//! One record file per key inside a data directory.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{BridgeError, Result};

use super::record::{decode_record, encode_record, HEADER_SIZE};
use super::KeyValueStore;

/// Persistent store that keeps each key in its own record file
///
/// ## Atomic replace:
/// Every write lands in its own uniquely named temp file in the data
/// directory and is then renamed over `{name}.rec`. Readers only ever see
/// the old record or the new one, and concurrent writers (other instances
/// or other processes on the same directory) never share a temp file.
///
/// ## Quota:
/// When set, counts key bytes plus payload bytes across all record files in
/// the directory, matching `MemoryStore`. The check is serialized within one
/// instance only; separate processes may overshoot it.
pub struct FileStore {
    /// Directory holding the record files
    dir: PathBuf,

    /// fsync the record (and directory) before returning from a write
    sync_on_write: bool,

    /// Optional byte quota across all records
    quota: Option<usize>,

    /// Serializes quota check + replace within this instance
    write_lock: Mutex<()>,
}

impl FileStore {
    const RECORD_EXT: &'static str = "rec";

    /// Open or create a store in the given directory
    pub fn open(dir: &Path, sync_on_write: bool) -> Result<Self> {
        fs::create_dir_all(dir)?;
        tracing::debug!("Opened file store at {}", dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            sync_on_write,
            quota: None,
            write_lock: Mutex::new(()),
        })
    }

    /// Open using the config's data directory, sync policy, and quota
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Self::open(&config.data_dir, config.sync_on_write)?;
        Ok(match config.quota_bytes {
            Some(quota) => store.with_quota(quota),
            None => store,
        })
    }

    /// Reject writes that would take the directory past `quota` bytes
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Directory holding the record files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `key`
    ///
    /// Keys are hex-encoded so any string maps to a valid file name.
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", Self::encode_key(key), Self::RECORD_EXT))
    }

    /// Bytes currently counted against the quota
    pub fn used_bytes(&self) -> Result<usize> {
        self.footprint_excluding(None)
    }

    fn encode_key(key: &str) -> String {
        key.bytes().map(|b| format!("{:02x}", b)).collect()
    }

    /// Sum of key + payload lengths of every record, optionally skipping one
    fn footprint_excluding(&self, skip: Option<&Path>) -> Result<usize> {
        let mut total = 0;

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(Self::RECORD_EXT) {
                continue;
            }
            if skip == Some(path.as_path()) {
                continue;
            }

            let hex_len = path
                .file_stem()
                .map(|s| s.len())
                .unwrap_or(0);
            let file_len = entry.metadata()?.len() as usize;
            total += hex_len / 2 + file_len.saturating_sub(HEADER_SIZE);
        }

        Ok(total)
    }

    fn check_quota(&self, key: &str, value: &str, target: &Path) -> Result<()> {
        if let Some(quota) = self.quota {
            let requested = self.footprint_excluding(Some(target))? + key.len() + value.len();
            if requested > quota {
                return Err(BridgeError::QuotaExceeded { requested, quota });
            }
        }
        Ok(())
    }

    #[cfg(unix)]
    fn sync_dir(&self) -> Result<()> {
        File::open(&self.dir)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_dir(&self) -> Result<()> {
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read(self.record_path(key)) {
            Ok(bytes) => decode_record(&bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let record = encode_record(value)?;
        let target = self.record_path(key);
        let _guard = self.write_lock.lock();

        self.check_quota(key, value, &target)?;

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(&record)?;
        if self.sync_on_write {
            temp.as_file().sync_all()?;
        }

        temp.persist(&target).map_err(|e| e.error)?;
        if self.sync_on_write {
            self.sync_dir()?;
        }

        tracing::trace!("Wrote {} byte record for key {:?}", record.len(), key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
