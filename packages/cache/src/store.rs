//! Key-value stores backing the artifact cache

use adminstyle_common::{read_json, write_json, CommonError, FileSystem};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CacheStoreError {
    #[error("cache store I/O failed: {0}")]
    Io(#[from] CommonError),

    #[error("cache entry '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },

    #[error("cache store lock poisoned")]
    Poisoned,
}

pub type CacheStoreResult<T> = Result<T, CacheStoreError>;

/// A cached artifact and its expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub name: String,
    pub artifact: String,
    pub created_at: DateTime<Utc>,
    /// Lifetime in seconds
    pub ttl: u64,
}

impl CacheEntry {
    pub fn new(name: impl Into<String>, artifact: impl Into<String>, created_at: DateTime<Utc>, ttl: u64) -> Self {
        Self {
            name: name.into(),
            artifact: artifact.into(),
            created_at,
            ttl,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = i64::try_from(self.ttl).unwrap_or(i64::MAX);
        let lifetime = Duration::try_seconds(ttl).unwrap_or(Duration::MAX);
        self.created_at
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }
}

/// Storage for cache entries keyed by logical name
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> CacheStoreResult<Option<CacheEntry>>;

    fn put(&self, entry: CacheEntry) -> CacheStoreResult<()>;

    /// Remove an entry; removing a missing key is not an error
    fn remove(&self, key: &str) -> CacheStoreResult<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for InMemoryCacheStore {
    fn get(&self, key: &str) -> CacheStoreResult<Option<CacheEntry>> {
        let entries = self.entries.read().map_err(|_| CacheStoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, entry: CacheEntry) -> CacheStoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheStoreError::Poisoned)?;
        entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheStoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheStoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// One JSON file per entry under a cache directory
pub struct FileCacheStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> Self {
        Self { fs, dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`; characters outside `[A-Za-z0-9_-]` become `_`
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> CacheStoreResult<Option<CacheEntry>> {
        let path = self.entry_path(key);
        let entry = read_json::<CacheEntry>(self.fs.as_ref(), &path).map_err(|e| match e {
            CommonError::Json(e) => CacheStoreError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            },
            other => CacheStoreError::Io(other),
        })?;

        // Sanitized names can collide; only the exact key counts
        Ok(entry.filter(|entry| entry.name == key))
    }

    fn put(&self, entry: CacheEntry) -> CacheStoreResult<()> {
        let path = self.entry_path(&entry.name);
        debug!(key = %entry.name, path = %path.display(), "Writing cache entry");
        write_json(self.fs.as_ref(), &path, &entry)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheStoreResult<()> {
        self.fs
            .remove(&self.entry_path(key))
            .map_err(|e| CacheStoreError::Io(CommonError::Io(e)))
    }
}
