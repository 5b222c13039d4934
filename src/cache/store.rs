// Cache store for the repository snapshot.
// Handles JSON serialization, freshness checks, stale fallback reads, and filesystem operations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::Repository;

/// Freshness window for a snapshot: one hour.
pub const CACHE_DURATION: Duration = Duration::from_secs(60 * 60);

/// Default cache slot key.
pub const DEFAULT_CACHE_KEY: &str = "github_projects_cache";

/// A timestamped snapshot of the raw, unfiltered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Milliseconds since the Unix epoch at write time.
    pub timestamp: i64,
    pub repos: Vec<Repository>,
}

impl CacheEntry {
    pub fn new(timestamp: i64, repos: Vec<Repository>) -> Self {
        Self { timestamp, repos }
    }

    /// Age of the entry relative to `now_ms`, in milliseconds.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.timestamp
    }

    /// Fresh while the age does not exceed `ttl`.
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        self.age_ms(now_ms) <= ttl.as_millis() as i64
    }
}

/// Result of checking the slot for a usable snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Within the freshness window.
    Fresh(Vec<Repository>),
    /// Past the window. The slot has already been cleared; the listing is
    /// handed back only so a failed fetch can still fall back to it.
    Expired(Vec<Repository>),
    /// Nothing stored, or the stored text did not parse.
    Miss,
}

/// Snapshot slot capabilities used by the loader.
///
/// None of these report errors: failures are logged and degrade to a miss
/// (reads) or a no-op (writes), so rendering is never interrupted.
pub trait CacheStore {
    /// Check the slot, deleting an expired entry.
    fn lookup(&self) -> Lookup;

    /// The cached listing if present, parsable, and fresh. Expired entries are deleted.
    fn read(&self) -> Option<Vec<Repository>> {
        match self.lookup() {
            Lookup::Fresh(repos) => Some(repos),
            Lookup::Expired(_) | Lookup::Miss => None,
        }
    }

    /// Overwrite the slot with `{timestamp: now, repos}`.
    fn write(&self, repos: &[Repository]);

    /// The cached listing regardless of age. Never deletes.
    fn read_stale(&self) -> Option<Vec<Repository>>;
}

/// Summary of the slot for `cache status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub timestamp: i64,
    pub age_ms: i64,
    pub fresh: bool,
    pub repo_count: usize,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Hands out write timestamps that never go backwards within a session.
#[derive(Debug, Default)]
struct SessionStamp {
    last: AtomicI64,
}

impl SessionStamp {
    fn next(&self) -> i64 {
        let now = now_ms();
        let prev = self.last.fetch_max(now, Ordering::SeqCst);
        prev.max(now)
    }
}

/// Read a snapshot from a file. Missing file is `Ok(None)`.
pub fn read_entry(path: &Path) -> Result<Option<CacheEntry>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let entry: CacheEntry = serde_json::from_str(&contents)?;
    Ok(Some(entry))
}

/// Write a snapshot to a file atomically via a temp file.
pub fn write_entry(path: &Path, entry: &CacheEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Delete a snapshot file if it exists.
pub fn delete(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Snapshot slot backed by a single JSON file.
#[derive(Debug)]
pub struct FileCacheStore {
    path: PathBuf,
    ttl: Duration,
    stamp: SessionStamp,
}

impl FileCacheStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            stamp: SessionStamp::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inspect the slot without modifying it.
    pub fn status(&self) -> Result<Option<CacheStatus>> {
        let now = now_ms();
        Ok(read_entry(&self.path)?.map(|entry| CacheStatus {
            timestamp: entry.timestamp,
            age_ms: entry.age_ms(now),
            fresh: entry.is_fresh(now, self.ttl),
            repo_count: entry.repos.len(),
        }))
    }

    /// Remove the snapshot.
    pub fn clear(&self) -> Result<()> {
        delete(&self.path)
    }

    fn load_logged(&self) -> Option<CacheEntry> {
        match read_entry(&self.path) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read cache");
                None
            }
        }
    }
}

impl CacheStore for FileCacheStore {
    fn lookup(&self) -> Lookup {
        let Some(entry) = self.load_logged() else {
            return Lookup::Miss;
        };
        if entry.is_fresh(now_ms(), self.ttl) {
            return Lookup::Fresh(entry.repos);
        }

        tracing::debug!(path = %self.path.display(), "cache expired");
        if let Err(e) = delete(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove expired cache");
        }
        Lookup::Expired(entry.repos)
    }

    fn write(&self, repos: &[Repository]) {
        let entry = CacheEntry::new(self.stamp.next(), repos.to_vec());
        if let Err(e) = write_entry(&self.path, &entry) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to save cache");
        }
    }

    fn read_stale(&self) -> Option<Vec<Repository>> {
        self.load_logged().map(|entry| entry.repos)
    }
}

/// Snapshot slot held in memory. The slot stores the serialized JSON text so
/// that malformed contents behave exactly as they do on disk.
#[derive(Debug)]
pub struct MemoryCacheStore {
    slot: Mutex<Option<String>>,
    ttl: Duration,
    stamp: SessionStamp,
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new(CACHE_DURATION)
    }
}

impl MemoryCacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
            stamp: SessionStamp::default(),
        }
    }

    /// Replace the slot contents with a prepared entry.
    pub fn seed(&self, entry: &CacheEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        self.set_raw(Some(json));
        Ok(())
    }

    /// Replace the slot contents with raw text, valid or not.
    pub fn set_raw(&self, raw: Option<String>) {
        *self.lock() = raw;
    }

    /// Current raw slot contents.
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Parsed slot contents, if any.
    pub fn entry(&self) -> Option<CacheEntry> {
        self.parsed()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn parsed(&self) -> Option<CacheEntry> {
        let raw = self.raw()?;
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cache");
                None
            }
        }
    }
}

impl CacheStore for MemoryCacheStore {
    fn lookup(&self) -> Lookup {
        let Some(entry) = self.parsed() else {
            return Lookup::Miss;
        };
        if entry.is_fresh(now_ms(), self.ttl) {
            return Lookup::Fresh(entry.repos);
        }
        self.set_raw(None);
        Lookup::Expired(entry.repos)
    }

    fn write(&self, repos: &[Repository]) {
        let entry = CacheEntry::new(self.stamp.next(), repos.to_vec());
        if let Err(e) = self.seed(&entry) {
            tracing::warn!(error = %e, "failed to save cache");
        }
    }

    fn read_stale(&self) -> Option<Vec<Repository>> {
        self.parsed().map(|entry| entry.repos)
    }
}
