//! Memoizing artifact cache
//!
//! `remember` regenerates on a miss or after expiry. Every successful
//! generation is also kept as a last-known-good record that `invalidate`
//! does not touch, so callers can serve a stale artifact when regeneration
//! fails. Concurrent misses may both generate; the last write wins.

use crate::clock::{Clock, SystemClock};
use crate::store::{CacheEntry, CacheStore, CacheStoreError, CacheStoreResult, InMemoryCacheStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const LAST_GOOD_SUFFIX: &str = ":last-good";

fn last_good_key(key: &str) -> String {
    format!("{}{}", key, LAST_GOOD_SUFFIX)
}

#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
}

impl Cache {
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Process-local cache on the wall clock
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCacheStore::new()), Arc::new(SystemClock))
    }

    /// Return the fresh artifact for `key`, or call `generate` exactly once,
    /// store its result for `ttl` seconds and return it.
    ///
    /// Generator and store failures propagate; nothing is stored on failure.
    #[instrument(skip(self, generate))]
    pub fn remember<F, E>(&self, key: &str, ttl: u64, generate: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<String, E>,
        E: From<CacheStoreError>,
    {
        let now = self.clock.now();

        if let Some(entry) = self.store.get(key)? {
            if entry.is_fresh(now) {
                debug!("Cache hit");
                return Ok(entry.artifact);
            }
            debug!(created_at = %entry.created_at, "Cache entry expired");
        }

        let artifact = generate()?;

        self.store.put(CacheEntry::new(key, artifact.clone(), now, ttl))?;
        self.store
            .put(CacheEntry::new(last_good_key(key), artifact.clone(), now, ttl))?;

        info!(bytes = artifact.len(), "Cached regenerated artifact");
        Ok(artifact)
    }

    /// Drop the entry for `key` so the next `remember` regenerates.
    /// Idempotent; the last-known-good record is kept.
    pub fn invalidate(&self, key: &str) -> CacheStoreResult<()> {
        debug!(key, "Invalidating cache entry");
        self.store.remove(key)
    }

    /// The most recent successfully generated artifact, fresh or not
    pub fn last_known_good(&self, key: &str) -> CacheStoreResult<Option<String>> {
        Ok(self
            .store
            .get(&last_good_key(key))?
            .map(|entry| entry.artifact))
    }

    /// Drop both the entry and the last-known-good record
    pub fn purge(&self, key: &str) -> CacheStoreResult<()> {
        self.store.remove(key)?;
        self.store.remove(&last_good_key(key))
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;
    use std::cell::Cell;
    use thiserror::Error;

    #[derive(Error, Debug)]
    enum TestError {
        #[error("generator failed")]
        Failed,

        #[error(transparent)]
        Store(#[from] CacheStoreError),
    }

    fn cache() -> (Cache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = Cache::new(Arc::new(InMemoryCacheStore::new()), clock.clone());
        (cache, clock)
    }

    fn counting<'a>(calls: &'a Cell<u32>, artifact: &'a str) -> impl FnOnce() -> Result<String, TestError> + 'a {
        move || {
            calls.set(calls.get() + 1);
            Ok(artifact.to_string())
        }
    }

    #[test]
    fn test_generates_once_within_ttl() {
        let (cache, clock) = cache();
        let calls = Cell::new(0);

        assert_eq!(cache.remember("css", 60, counting(&calls, "a")).unwrap(), "a");
        clock.advance(Duration::seconds(59));
        assert_eq!(cache.remember("css", 60, counting(&calls, "b")).unwrap(), "a");

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_regenerates_after_expiry() {
        let (cache, clock) = cache();
        let calls = Cell::new(0);

        cache.remember("css", 60, counting(&calls, "a")).unwrap();
        clock.advance(Duration::seconds(60));
        assert_eq!(cache.remember("css", 60, counting(&calls, "b")).unwrap(), "b");

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_invalidate_forces_regeneration() {
        let (cache, _clock) = cache();
        let calls = Cell::new(0);

        cache.remember("css", 60, counting(&calls, "a")).unwrap();
        cache.invalidate("css").unwrap();
        cache.invalidate("css").unwrap();
        cache.invalidate("never-stored").unwrap();
        assert_eq!(cache.remember("css", 60, counting(&calls, "b")).unwrap(), "b");

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_failure_propagates_and_keeps_last_known_good() {
        let (cache, _clock) = cache();
        let calls = Cell::new(0);

        cache.remember("css", 60, counting(&calls, "a")).unwrap();
        cache.invalidate("css").unwrap();

        let result: Result<String, TestError> = cache.remember("css", 60, || Err(TestError::Failed));
        assert!(matches!(result, Err(TestError::Failed)));
        assert_eq!(cache.last_known_good("css").unwrap().as_deref(), Some("a"));

        // The failed attempt stored nothing
        assert_eq!(cache.remember("css", 60, counting(&calls, "c")).unwrap(), "c");
    }

    #[test]
    fn test_last_known_good_absent_before_first_success() {
        let (cache, _clock) = cache();
        assert!(cache.last_known_good("css").unwrap().is_none());
    }

    #[test]
    fn test_purge_drops_everything() {
        let (cache, _clock) = cache();
        let calls = Cell::new(0);

        cache.remember("css", 60, counting(&calls, "a")).unwrap();
        cache.purge("css").unwrap();
        assert!(cache.last_known_good("css").unwrap().is_none());
    }
}
