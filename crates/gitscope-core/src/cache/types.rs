//! Cache types and data structures

use crate::error::{GitScopeError, GitScopeResult};
use crate::payload::Payload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Kind of data a cache entry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RepositoryInfo,
    AnalysisResult,
    UserRepositories,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 3] = [
        Category::RepositoryInfo,
        Category::AnalysisResult,
        Category::UserRepositories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RepositoryInfo => "repository_info",
            Self::AnalysisResult => "analysis_result",
            Self::UserRepositories => "user_repositories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GitScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| GitScopeError::UnknownCategory(s.to_string()))
    }
}

/// Storage key of a cache entry
///
/// Rendered as `{category}_{sha256(category ":" identifier)}`. The digest
/// covers the category so equal identifiers in different categories never
/// collide, and the key is safe to use as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for an identifier within a category
    pub fn derive(category: Category, identifier: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(category.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(identifier.as_bytes());
        Self(format!("{}_{:x}", category, hasher.finalize()))
    }

    /// Parse a key previously produced by [`CacheKey::derive`]
    ///
    /// Used to recognize cache files when scanning a directory.
    pub fn parse(raw: &str) -> GitScopeResult<Self> {
        let (prefix, digest) = raw
            .rsplit_once('_')
            .ok_or_else(|| GitScopeError::invalid_input_field(format!("Not a cache key: {}", raw), "key"))?;
        prefix.parse::<Category>()?;
        if digest.len() != 64 || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GitScopeError::invalid_input_field(
                format!("Not a cache key: {}", raw),
                "key",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Category encoded in the key prefix
    pub fn category(&self) -> Option<Category> {
        self.0
            .rsplit_once('_')
            .and_then(|(prefix, _)| prefix.parse().ok())
    }

    /// Name of the file holding this entry on disk
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cached payload with its lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub category: Category,
    /// Identifier the key was derived from
    pub identifier: String,
    pub payload: Payload,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped at `now` that expires after `ttl`
    pub fn new(
        category: Category,
        identifier: impl Into<String>,
        payload: Payload,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let identifier = identifier.into();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            key: CacheKey::derive(category, &identifier),
            category,
            identifier,
            payload,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Whether the entry is dead at `now`
    ///
    /// An entry is still alive at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Snapshot of cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub memory_hits: u64,
    pub disk_hits: u64,
    pub total_requests: u64,
    /// `hits / total_requests`, 0 when nothing was requested
    pub hit_rate: f64,
    /// Entries currently held in memory
    pub memory_size: usize,
    /// Entries dropped from memory to respect the capacity
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate as a percentage with two decimals, e.g. `"12.50%"`
    pub fn hit_rate_percent(&self) -> String {
        format!("{:.2}%", self.hit_rate * 100.0)
    }
}

/// Lock-free request counters
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    pub memory_hits: AtomicU64,
    pub disk_hits: AtomicU64,
    pub misses: AtomicU64,
    pub evictions: AtomicU64,
}

impl CacheCounters {
    pub fn record_memory_hit(&self) {
        self.memory_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disk_hit(&self) {
        self.disk_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, memory_size: usize) -> CacheStats {
        let memory_hits = self.memory_hits.load(Ordering::Relaxed);
        let disk_hits = self.disk_hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hits = memory_hits + disk_hits;
        let total_requests = hits + misses;
        let hit_rate = if total_requests == 0 {
            0.0
        } else {
            hits as f64 / total_requests as f64
        };

        CacheStats {
            hits,
            misses,
            memory_hits,
            disk_hits,
            total_requests,
            hit_rate,
            memory_size,
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
