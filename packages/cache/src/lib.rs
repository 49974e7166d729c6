pub mod cache;
pub mod clock;
pub mod store;

pub use cache::Cache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheEntry, CacheStore, CacheStoreError, CacheStoreResult, FileCacheStore, InMemoryCacheStore};
