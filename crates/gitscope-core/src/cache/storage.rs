//! Persistent cache tier

use super::types::{CacheEntry, CacheKey, Category};
use crate::error::{GitScopeError, GitScopeResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::time::timeout;
use tracing::debug;

/// Suffix of the temporary files a write goes through
const TEMP_SUFFIX: &str = ".json.tmp";

/// Run `fut`, failing with [`GitScopeError::Timeout`] once `limit` elapses
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &str, fut: F) -> GitScopeResult<T>
where
    F: Future<Output = GitScopeResult<T>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(GitScopeError::timeout(limit.as_millis() as u64).with_context(operation)),
    }
}

/// Backend of the persistent tier
///
/// Implementations report failures as errors; the tiered cache decides how
/// to degrade. A payload that cannot be decoded is reported as
/// [`GitScopeError::Corrupted`] so the caller can discard it. The tiered
/// cache bounds every call by its configured I/O timeout, so a backend that
/// stops responding degrades to a miss instead of stalling lookups.
#[async_trait]
pub trait CacheStorage: Send + Sync + Debug {
    /// Prepare the backend (create directories, ...)
    async fn init(&self) -> GitScopeResult<()>;

    /// Load an entry, `None` if absent
    async fn load(&self, key: &CacheKey) -> GitScopeResult<Option<CacheEntry>>;

    /// Persist an entry, replacing any previous version
    async fn store(&self, entry: &CacheEntry) -> GitScopeResult<()>;

    /// Delete an entry; deleting an absent entry is not an error
    async fn remove(&self, key: &CacheKey) -> GitScopeResult<()>;

    /// Delete every entry, returning how many were removed
    async fn clear(&self) -> GitScopeResult<usize>;

    /// Summarize the persisted entries
    async fn scan(&self, now: DateTime<Utc>) -> GitScopeResult<DiskScan>;

    /// Delete entries that are expired at `now` or cannot be decoded, along
    /// with abandoned temporary files
    async fn purge_expired(&self, now: DateTime<Utc>) -> GitScopeResult<PurgeReport>;
}

/// Summary of the persisted entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskScan {
    pub files: usize,
    pub bytes: u64,
    pub expired: usize,
    pub corrupt: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl DiskScan {
    /// Entries that are neither expired nor corrupt
    pub fn live(&self) -> usize {
        self.files.saturating_sub(self.expired + self.corrupt)
    }
}

/// Outcome of [`CacheStorage::purge_expired`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    pub expired: usize,
    pub corrupt: usize,
    /// Temporary files left behind by interrupted writes
    pub temp: usize,
}

impl PurgeReport {
    pub fn total(&self) -> usize {
        self.expired + self.corrupt + self.temp
    }
}

/// One pretty-printed JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct DiskStorage {
    base_dir: PathBuf,
    io_timeout: Duration,
}

enum FileState {
    Live,
    Expired,
    Corrupt,
}

/// Directory listing split into cache files and temporary files
#[derive(Default)]
struct Listing {
    entries: Vec<(CacheKey, PathBuf, u64)>,
    temp: Vec<(PathBuf, Option<SystemTime>)>,
}

impl DiskStorage {
    pub fn new(base_dir: impl Into<PathBuf>, io_timeout: Duration) -> Self {
        Self {
            base_dir: base_dir.into(),
            io_timeout,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding `key`
    pub fn file_path(&self, key: &CacheKey) -> PathBuf {
        self.base_dir.join(key.file_name())
    }

    /// Run a file operation under the configured timeout
    async fn bounded<T, F>(&self, operation: &str, fut: F) -> GitScopeResult<T>
    where
        F: Future<Output = GitScopeResult<T>>,
    {
        let operation = format!("{} in '{}'", operation, self.base_dir.display());
        bounded(self.io_timeout, &operation, fut).await
    }

    async fn read_entry(path: &Path) -> GitScopeResult<Option<CacheEntry>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GitScopeError::io_with_path(
                    format!("Failed to read cache file: {}", e),
                    path.display().to_string(),
                ));
            }
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            GitScopeError::corrupted(
                format!("Failed to decode cache file: {}", e),
                path.display().to_string(),
            )
        })
    }

    async fn remove_file(path: &Path) -> GitScopeResult<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(GitScopeError::io_with_path(
                format!("Failed to remove cache file: {}", e),
                path.display().to_string(),
            )),
        }
    }

    /// Cache files in the directory with the key each one holds, plus
    /// temporary files
    async fn list_files(&self) -> GitScopeResult<Listing> {
        let mut listing = Listing::default();
        let mut dir = match fs::read_dir(&self.base_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(listing),
            Err(e) => {
                return Err(GitScopeError::io_with_path(
                    format!("Failed to read cache directory: {}", e),
                    self.base_dir.display().to_string(),
                ));
            }
        };

        while let Some(dir_entry) = dir.next_entry().await? {
            let path = dir_entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            if name.ends_with(TEMP_SUFFIX) {
                let metadata = dir_entry.metadata().await?;
                if metadata.is_file() {
                    listing.temp.push((path, metadata.modified().ok()));
                }
                continue;
            }

            let Some(key) = name
                .strip_suffix(".json")
                .and_then(|stem| CacheKey::parse(stem).ok())
            else {
                continue;
            };

            let metadata = dir_entry.metadata().await?;
            if metadata.is_file() {
                listing.entries.push((key, path, metadata.len()));
            }
        }

        Ok(listing)
    }

    /// Whether a temporary file is older than any write still in flight
    fn is_abandoned(&self, modified: Option<SystemTime>) -> bool {
        modified
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .is_some_and(|age| age > self.io_timeout)
    }

    async fn classify(path: &Path, now: DateTime<Utc>) -> GitScopeResult<Option<FileState>> {
        match Self::read_entry(path).await {
            Ok(Some(entry)) if entry.is_expired_at(now) => Ok(Some(FileState::Expired)),
            Ok(Some(_)) => Ok(Some(FileState::Live)),
            Ok(None) => Ok(None),
            Err(GitScopeError::Corrupted { .. }) => Ok(Some(FileState::Corrupt)),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CacheStorage for DiskStorage {
    async fn init(&self) -> GitScopeResult<()> {
        self.bounded("create", async {
            fs::create_dir_all(&self.base_dir).await.map_err(|e| {
                GitScopeError::io_with_path(
                    format!("Failed to create cache directory: {}", e),
                    self.base_dir.display().to_string(),
                )
            })
        })
        .await
    }

    async fn load(&self, key: &CacheKey) -> GitScopeResult<Option<CacheEntry>> {
        let path = self.file_path(key);
        self.bounded("load", Self::read_entry(&path)).await
    }

    async fn store(&self, entry: &CacheEntry) -> GitScopeResult<()> {
        let path = self.file_path(&entry.key);
        let content = serde_json::to_vec_pretty(entry)?;
        let dir = self.base_dir.clone();
        let prefix = format!("{}.", entry.key);
        let target = path.clone();

        self.bounded("store", async move {
            tokio::task::spawn_blocking(move || write_atomic(&dir, &prefix, &target, &content))
                .await
                .map_err(|e| GitScopeError::io(format!("Cache write task failed: {}", e)))?
        })
        .await?;

        debug!(key = %entry.key, path = %path.display(), "persisted cache entry");
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> GitScopeResult<()> {
        let path = self.file_path(key);
        self.bounded("remove", Self::remove_file(&path)).await?;
        Ok(())
    }

    async fn clear(&self) -> GitScopeResult<usize> {
        self.bounded("clear", async {
            let listing = self.list_files().await?;
            let mut removed = 0;
            for (_, path, _) in listing.entries {
                if Self::remove_file(&path).await? {
                    removed += 1;
                }
            }
            for (path, _) in listing.temp {
                Self::remove_file(&path).await?;
            }
            Ok(removed)
        })
        .await
    }

    async fn scan(&self, now: DateTime<Utc>) -> GitScopeResult<DiskScan> {
        self.bounded("scan", async {
            let mut scan = DiskScan::default();
            for (key, path, size) in self.list_files().await?.entries {
                let Some(state) = Self::classify(&path, now).await? else {
                    continue;
                };

                scan.files += 1;
                scan.bytes += size;
                match state {
                    FileState::Live => {}
                    FileState::Expired => scan.expired += 1,
                    FileState::Corrupt => scan.corrupt += 1,
                }
                if let Some(category) = key.category() {
                    *scan.by_category.entry(category).or_default() += 1;
                }
            }
            Ok(scan)
        })
        .await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> GitScopeResult<PurgeReport> {
        self.bounded("purge", async {
            let listing = self.list_files().await?;
            let mut report = PurgeReport::default();
            for (_, path, _) in listing.entries {
                let counter = match Self::classify(&path, now).await? {
                    Some(FileState::Expired) => &mut report.expired,
                    Some(FileState::Corrupt) => &mut report.corrupt,
                    Some(FileState::Live) | None => continue,
                };
                if Self::remove_file(&path).await? {
                    *counter += 1;
                }
            }
            for (path, modified) in listing.temp {
                if self.is_abandoned(modified) && Self::remove_file(&path).await? {
                    report.temp += 1;
                }
            }
            Ok(report)
        })
        .await
    }
}

/// Write `content` to a uniquely named temporary file in `dir`, then move it
/// over `target` so readers never see a half-written entry
fn write_atomic(dir: &Path, prefix: &str, target: &Path, content: &[u8]) -> GitScopeResult<()> {
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| {
            GitScopeError::io_with_path(
                format!("Failed to create temporary cache file: {}", e),
                dir.display().to_string(),
            )
        })?;

    file.write_all(content).map_err(|e| {
        GitScopeError::io_with_path(
            format!("Failed to write cache file: {}", e),
            file.path().display().to_string(),
        )
    })?;

    file.persist(target).map_err(|e| {
        GitScopeError::io_with_path(
            format!("Failed to move cache file into place: {}", e),
            target.display().to_string(),
        )
    })?;
    Ok(())
}
