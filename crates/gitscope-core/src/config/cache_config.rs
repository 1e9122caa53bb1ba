//! Tiered cache configuration

use crate::cache::Category;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const HOUR: u64 = 60 * 60;

/// Time-to-live for each cache category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlPolicy {
    #[serde(with = "humantime_serde")]
    pub repository_info: Duration,
    #[serde(with = "humantime_serde")]
    pub analysis_result: Duration,
    #[serde(with = "humantime_serde")]
    pub user_repositories: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            repository_info: Duration::from_secs(24 * HOUR),
            analysis_result: Duration::from_secs(7 * 24 * HOUR),
            user_repositories: Duration::from_secs(6 * HOUR),
        }
    }
}

impl TtlPolicy {
    /// TTL for a category
    pub fn ttl_for(&self, category: Category) -> Duration {
        match category {
            Category::RepositoryInfo => self.repository_info,
            Category::AnalysisResult => self.analysis_result,
            Category::UserRepositories => self.user_repositories,
        }
    }
}

/// Configuration of the memory and disk tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one JSON file per cache key
    pub cache_dir: PathBuf,
    /// Maximum number of entries in the memory tier
    pub memory_capacity: usize,
    /// Persist entries to `cache_dir`
    pub enable_disk_cache: bool,
    /// Upper bound for a single disk read, write or delete
    #[serde(with = "humantime_serde")]
    pub disk_io_timeout: Duration,
    /// Interval of the background sweep over the memory tier
    #[serde(with = "humantime_serde")]
    pub cleanup_interval: Duration,
    pub ttl: TtlPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            memory_capacity: 1000,
            enable_disk_cache: true,
            disk_io_timeout: Duration::from_secs(5),
            cleanup_interval: Duration::from_secs(HOUR),
            ttl: TtlPolicy::default(),
        }
    }
}

impl CacheConfig {
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_memory_capacity(mut self, capacity: usize) -> Self {
        self.memory_capacity = capacity;
        self
    }

    /// Disable the disk tier
    pub fn memory_only(mut self) -> Self {
        self.enable_disk_cache = false;
        self
    }
}

/// `~/.gitscope/cache/github`, or `cache/github` when no home directory is known
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".gitscope"))
        .unwrap_or_default()
        .join("cache")
        .join("github")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttls() {
        let policy = TtlPolicy::default();
        assert_eq!(
            policy.ttl_for(Category::RepositoryInfo),
            Duration::from_secs(86_400)
        );
        assert_eq!(
            policy.ttl_for(Category::AnalysisResult),
            Duration::from_secs(604_800)
        );
        assert_eq!(
            policy.ttl_for(Category::UserRepositories),
            Duration::from_secs(21_600)
        );
    }

    #[test]
    fn test_humantime_durations() {
        let config: CacheConfig = serde_json::from_str(
            r#"{"memory_capacity": 5, "cleanup_interval": "30m", "ttl": {"analysis_result": "2days"}}"#,
        )
        .unwrap();
        assert_eq!(config.memory_capacity, 5);
        assert_eq!(config.cleanup_interval, Duration::from_secs(1800));
        assert_eq!(config.ttl.analysis_result, Duration::from_secs(2 * 86_400));
        assert_eq!(config.ttl.repository_info, Duration::from_secs(86_400));
        assert!(config.enable_disk_cache);
    }

    #[test]
    fn test_default_cache_dir_layout() {
        let dir = default_cache_dir();
        assert!(dir.ends_with("cache/github"));
    }
}
