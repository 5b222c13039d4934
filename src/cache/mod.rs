// Cache module for the repository snapshot.
// Keeps one timestamped listing on disk (or in memory) with a one-hour freshness window.

pub mod paths;
pub mod store;

pub use paths::*;
pub use store::{
    CACHE_DURATION, CacheEntry, CacheStatus, CacheStore, DEFAULT_CACHE_KEY, FileCacheStore,
    Lookup, MemoryCacheStore,
};
