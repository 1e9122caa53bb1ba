//! Environment variable overrides

use super::GitScopeConfig;
use super::logging_config::LogFormat;
use crate::error::{GitScopeError, GitScopeResult};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Prefix shared by all gitscope environment variables
pub const ENV_PREFIX: &str = "GITSCOPE_";

/// Apply `GITSCOPE_*` variables from the process environment
pub fn apply_env(config: &mut GitScopeConfig) -> GitScopeResult<()> {
    apply_env_with(config, |key| env::var(key).ok())
}

/// Apply overrides read through `lookup`
///
/// | Variable                          | Field                                   |
/// |-----------------------------------|-----------------------------------------|
/// | `GITSCOPE_CACHE_DIR`              | `cache.cache_dir`                       |
/// | `GITSCOPE_MEMORY_CAPACITY`        | `cache.memory_capacity`                 |
/// | `GITSCOPE_DISK_CACHE`             | `cache.enable_disk_cache`               |
/// | `GITSCOPE_DISK_IO_TIMEOUT_MS`     | `cache.disk_io_timeout`                 |
/// | `GITSCOPE_CONTEXT_RETENTION_SECS` | `context.retention`                     |
/// | `GITSCOPE_RELEVANCE_THRESHOLD`    | `context.relevance_threshold`           |
/// | `GITSCOPE_LOG_LEVEL`              | `logging.level`                         |
/// | `GITSCOPE_LOG_FORMAT`             | `logging.format` (pretty/compact/json)  |
pub fn apply_env_with<F>(config: &mut GitScopeConfig, lookup: F) -> GitScopeResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

    if let Some(dir) = var("CACHE_DIR") {
        config.cache.cache_dir = PathBuf::from(dir);
    }
    if let Some(value) = var("MEMORY_CAPACITY") {
        config.cache.memory_capacity = parse("MEMORY_CAPACITY", &value)?;
    }
    if let Some(value) = var("DISK_CACHE") {
        config.cache.enable_disk_cache = parse_bool("DISK_CACHE", &value)?;
    }
    if let Some(value) = var("DISK_IO_TIMEOUT_MS") {
        config.cache.disk_io_timeout =
            Duration::from_millis(parse("DISK_IO_TIMEOUT_MS", &value)?);
    }
    if let Some(value) = var("CONTEXT_RETENTION_SECS") {
        config.context.retention = Duration::from_secs(parse("CONTEXT_RETENTION_SECS", &value)?);
    }
    if let Some(value) = var("RELEVANCE_THRESHOLD") {
        config.context.relevance_threshold = parse("RELEVANCE_THRESHOLD", &value)?;
    }
    if let Some(level) = var("LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(value) = var("LOG_FORMAT") {
        config.logging.format = match value.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            "json" => LogFormat::Json,
            _ => return Err(invalid("LOG_FORMAT", &value)),
        };
    }

    Ok(())
}

fn parse<T: FromStr>(name: &str, value: &str) -> GitScopeResult<T> {
    value.trim().parse().map_err(|_| invalid(name, value))
}

fn parse_bool(name: &str, value: &str) -> GitScopeResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn invalid(name: &str, value: &str) -> GitScopeError {
    GitScopeError::config(format!("Invalid {}{} value: {}", ENV_PREFIX, name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = GitScopeConfig::default();
        let lookup = env_of(&[
            ("GITSCOPE_CACHE_DIR", "/tmp/gitscope"),
            ("GITSCOPE_MEMORY_CAPACITY", "42"),
            ("GITSCOPE_DISK_CACHE", "off"),
            ("GITSCOPE_DISK_IO_TIMEOUT_MS", "250"),
            ("GITSCOPE_CONTEXT_RETENTION_SECS", "120"),
            ("GITSCOPE_RELEVANCE_THRESHOLD", "0.5"),
            ("GITSCOPE_LOG_LEVEL", "debug"),
            ("GITSCOPE_LOG_FORMAT", "JSON"),
        ]);

        apply_env_with(&mut config, lookup).unwrap();

        assert_eq!(config.cache.cache_dir, PathBuf::from("/tmp/gitscope"));
        assert_eq!(config.cache.memory_capacity, 42);
        assert!(!config.cache.enable_disk_cache);
        assert_eq!(config.cache.disk_io_timeout, Duration::from_millis(250));
        assert_eq!(config.context.retention, Duration::from_secs(120));
        assert_eq!(config.context.relevance_threshold, 0.5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let mut config = GitScopeConfig::default();
        let err = apply_env_with(&mut config, env_of(&[("GITSCOPE_MEMORY_CAPACITY", "lots")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "GITSCOPE_CONFIG");
        assert!(err.to_string().contains("GITSCOPE_MEMORY_CAPACITY"));
    }

    #[test]
    fn test_no_env_leaves_defaults() {
        let mut config = GitScopeConfig::default();
        apply_env_with(&mut config, |_| None).unwrap();
        assert_eq!(config, GitScopeConfig::default());
    }
}
