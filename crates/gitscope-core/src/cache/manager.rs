//! Two-tier cache manager

use super::memory::MemoryStorage;
use super::storage::{CacheStorage, DiskScan, DiskStorage, PurgeReport, bounded};
use super::types::{CacheCounters, CacheEntry, CacheKey, CacheStats, Category};
use crate::clock::{SharedClock, system_clock};
use crate::config::CacheConfig;
use crate::error::{GitScopeError, GitScopeResult};
use crate::maintenance::spawn_sweeper;
use crate::payload::{AnalysisResult, Payload, RepositoryInfo, RepositorySummary};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Cache with a bounded memory tier in front of a persistent tier
///
/// Lookups check memory first, then the persistent tier, promoting disk
/// hits into memory. Environmental failures of the persistent tier never
/// surface to callers: they are logged and the lookup counts as a miss.
/// Every call into the persistent tier is bounded by
/// [`CacheConfig::disk_io_timeout`], whatever the backend.
#[derive(Debug)]
pub struct TieredCache {
    config: CacheConfig,
    memory: MemoryStorage,
    disk: Option<Arc<dyn CacheStorage>>,
    /// Cleared when the persistent tier could not be initialized
    disk_available: AtomicBool,
    clock: SharedClock,
    counters: CacheCounters,
}

impl TieredCache {
    /// Create a cache using the system clock
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    /// Create a cache reading time from `clock`
    pub fn with_clock(config: CacheConfig, clock: SharedClock) -> Self {
        let disk = config.enable_disk_cache.then(|| {
            Arc::new(DiskStorage::new(&config.cache_dir, config.disk_io_timeout))
                as Arc<dyn CacheStorage>
        });
        Self::build(config, disk, clock)
    }

    /// Create a cache over a custom persistent tier
    pub fn with_storage(
        config: CacheConfig,
        storage: Arc<dyn CacheStorage>,
        clock: SharedClock,
    ) -> Self {
        Self::build(config, Some(storage), clock)
    }

    fn build(config: CacheConfig, disk: Option<Arc<dyn CacheStorage>>, clock: SharedClock) -> Self {
        Self {
            memory: MemoryStorage::new(config.memory_capacity),
            disk_available: AtomicBool::new(disk.is_some()),
            disk,
            config,
            clock,
            counters: CacheCounters::default(),
        }
    }

    /// Prepare the persistent tier
    ///
    /// On failure the cache keeps working from memory only.
    pub async fn init(&self) {
        let Some(disk) = &self.disk else {
            info!("disk cache disabled, running memory-only");
            return;
        };

        match self.bounded("init", disk.init()).await {
            Ok(()) => {
                self.disk_available.store(true, Ordering::Relaxed);
                info!(dir = %self.config.cache_dir.display(), "cache initialized");
            }
            Err(e) => {
                self.disk_available.store(false, Ordering::Relaxed);
                warn!(error = %e, "failed to initialize disk cache, running memory-only");
            }
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn disk(&self) -> Option<&Arc<dyn CacheStorage>> {
        self.disk
            .as_ref()
            .filter(|_| self.disk_available.load(Ordering::Relaxed))
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = GitScopeResult<T>>,
    ) -> GitScopeResult<T> {
        bounded(self.config.disk_io_timeout, operation, fut).await
    }

    fn insert_memory(&self, entry: CacheEntry) {
        if let Some(evicted) = self.memory.insert(entry) {
            self.counters.record_eviction();
            debug!(key = %evicted, "evicted oldest memory entry");
        }
    }

    /// Look up a payload
    pub async fn get(&self, category: Category, identifier: &str) -> Option<Payload> {
        let key = CacheKey::derive(category, identifier);
        let now = self.clock.now();

        if let Some(entry) = self.memory.get(&key) {
            if !entry.is_expired_at(now) {
                self.counters.record_memory_hit();
                debug!(%key, "memory cache hit");
                return Some(entry.payload);
            }
            self.memory.remove(&key);
            debug!(%key, "memory entry expired");
        }

        let Some(disk) = self.disk() else {
            self.counters.record_miss();
            return None;
        };

        match self.bounded("load", disk.load(&key)).await {
            Ok(Some(entry)) if entry.payload.category() != category => {
                warn!(%key, "cache file holds a payload of another category, discarding");
                self.discard(disk, &key).await;
            }
            Ok(Some(entry)) if entry.is_expired_at(now) => {
                debug!(%key, "disk entry expired");
                self.discard(disk, &key).await;
            }
            Ok(Some(entry)) => {
                let payload = entry.payload.clone();
                self.insert_memory(entry);
                self.counters.record_disk_hit();
                debug!(%key, "disk cache hit");
                return Some(payload);
            }
            Ok(None) => {}
            Err(e @ GitScopeError::Corrupted { .. }) => {
                warn!(%key, error = %e, "discarding corrupted cache file");
                self.discard(disk, &key).await;
            }
            Err(e) => {
                warn!(%key, error = %e, "disk cache read failed");
            }
        }

        self.counters.record_miss();
        None
    }

    async fn discard(&self, disk: &Arc<dyn CacheStorage>, key: &CacheKey) {
        if let Err(e) = self.bounded("remove", disk.remove(key)).await {
            warn!(%key, error = %e, "failed to delete cache file");
        }
    }

    pub async fn get_repository_info(&self, identifier: &str) -> Option<RepositoryInfo> {
        match self.get(Category::RepositoryInfo, identifier).await? {
            Payload::RepositoryInfo(info) => Some(info),
            _ => None,
        }
    }

    pub async fn get_analysis(&self, identifier: &str) -> Option<AnalysisResult> {
        self.get(Category::AnalysisResult, identifier)
            .await?
            .into_analysis()
    }

    pub async fn get_user_repositories(&self, identifier: &str) -> Option<Vec<RepositorySummary>> {
        match self.get(Category::UserRepositories, identifier).await? {
            Payload::UserRepositories(repos) => Some(repos),
            _ => None,
        }
    }

    /// Store a payload in both tiers
    ///
    /// Fails only when `payload` does not belong to `category`. A failed
    /// disk write is logged and the memory copy is kept.
    pub async fn set(
        &self,
        category: Category,
        identifier: &str,
        payload: Payload,
    ) -> GitScopeResult<()> {
        let actual = payload.category();
        if actual != category {
            return Err(GitScopeError::category_mismatch(
                category.as_str(),
                actual.as_str(),
            ));
        }

        let ttl = self.config.ttl.ttl_for(category);
        let entry = CacheEntry::new(category, identifier, payload, ttl, self.clock.now());
        let key = entry.key.clone();

        match self.disk() {
            Some(disk) => {
                self.insert_memory(entry.clone());
                if let Err(e) = self.bounded("store", disk.store(&entry)).await {
                    warn!(%key, error = %e, "failed to persist cache entry, kept in memory");
                }
            }
            None => self.insert_memory(entry),
        }

        debug!(%key, %category, "cached payload");
        Ok(())
    }

    pub async fn set_repository_info(&self, identifier: &str, info: RepositoryInfo) {
        self.set_matching(Category::RepositoryInfo, identifier, info.into())
            .await
    }

    pub async fn set_analysis(&self, identifier: &str, analysis: AnalysisResult) {
        self.set_matching(Category::AnalysisResult, identifier, analysis.into())
            .await
    }

    pub async fn set_user_repositories(&self, identifier: &str, repos: Vec<RepositorySummary>) {
        self.set_matching(Category::UserRepositories, identifier, repos.into())
            .await
    }

    async fn set_matching(&self, category: Category, identifier: &str, payload: Payload) {
        if let Err(e) = self.set(category, identifier, payload).await {
            // Typed setters build the payload for their own category
            error!(error = %e, "unexpected cache write failure");
        }
    }

    /// Return the cached payload, or compute and cache it
    ///
    /// An error from `compute` is returned unchanged and nothing is stored.
    pub async fn get_or_compute<F, E>(
        &self,
        category: Category,
        identifier: &str,
        compute: F,
    ) -> Result<Payload, E>
    where
        F: Future<Output = Result<Payload, E>>,
        E: From<GitScopeError>,
    {
        if let Some(payload) = self.get(category, identifier).await {
            return Ok(payload);
        }

        let payload = compute.await?;
        self.set(category, identifier, payload.clone()).await?;
        Ok(payload)
    }

    /// Invalidate one entry in both tiers
    pub async fn remove(&self, category: Category, identifier: &str) {
        let key = CacheKey::derive(category, identifier);
        self.memory.remove(&key);
        if let Some(disk) = self.disk() {
            self.discard(disk, &key).await;
        }
    }

    /// Drop every entry in both tiers; statistics are kept
    pub async fn clear(&self) {
        let in_memory = self.memory.clear();
        let on_disk = match self.disk() {
            Some(disk) => match self.bounded("clear", disk.clear()).await {
                Ok(count) => count,
                Err(e) => {
                    warn!(error = %e, "failed to clear disk cache");
                    0
                }
            },
            None => 0,
        };
        info!(in_memory, on_disk, "cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.memory.len())
    }

    /// Remove expired entries from the memory tier
    pub fn cleanup_expired(&self) -> usize {
        let removed = self.memory.remove_expired(self.clock.now());
        if removed > 0 {
            info!(removed, "removed expired cache entries");
        }
        removed
    }

    /// Summarize the persistent tier, `None` when it is disabled
    pub async fn scan_disk(&self) -> GitScopeResult<Option<DiskScan>> {
        match self.disk() {
            Some(disk) => self
                .bounded("scan", disk.scan(self.clock.now()))
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Delete expired and corrupted files from the persistent tier
    pub async fn purge_disk(&self) -> GitScopeResult<PurgeReport> {
        match self.disk() {
            Some(disk) => {
                self.bounded("purge", disk.purge_expired(self.clock.now()))
                    .await
            }
            None => Ok(PurgeReport::default()),
        }
    }

    /// Sweep the memory tier every `period` until `cancel` fires
    pub fn spawn_cleanup_task(
        self: &Arc<Self>,
        period: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        spawn_sweeper("cache", period, cancel, move || cache.cleanup_expired())
    }
}
