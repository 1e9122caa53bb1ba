//! Configuration validation

use super::{CacheConfig, ContextConfig};
use crate::error::{GitScopeError, GitScopeResult};

pub(super) fn validate_cache(config: &CacheConfig) -> GitScopeResult<()> {
    if config.memory_capacity == 0 {
        return Err(GitScopeError::config("cache.memory_capacity must be at least 1"));
    }
    if config.disk_io_timeout.is_zero() {
        return Err(GitScopeError::config("cache.disk_io_timeout must be positive"));
    }
    if config.cleanup_interval.is_zero() {
        return Err(GitScopeError::config("cache.cleanup_interval must be positive"));
    }
    let ttl = config.ttl;
    if ttl.repository_info.is_zero() || ttl.analysis_result.is_zero() || ttl.user_repositories.is_zero() {
        return Err(GitScopeError::config("cache.ttl values must be positive"));
    }
    Ok(())
}

pub(super) fn validate_context(config: &ContextConfig) -> GitScopeResult<()> {
    if config.max_records_per_conversation == 0 {
        return Err(GitScopeError::config(
            "context.max_records_per_conversation must be at least 1",
        ));
    }
    if !config.relevance_threshold.is_finite() || config.relevance_threshold < 0.0 {
        return Err(GitScopeError::config(
            "context.relevance_threshold must be a non-negative number",
        ));
    }
    let weights = config.weights;
    if [weights.project_name, weights.language, weights.technology]
        .iter()
        .any(|w| !w.is_finite())
    {
        return Err(GitScopeError::config("context.weights must be finite"));
    }
    if config.cleanup_interval.is_zero() {
        return Err(GitScopeError::config("context.cleanup_interval must be positive"));
    }
    Ok(())
}
