//! File-based configuration loading

use super::GitScopeConfig;
use crate::error::{GitScopeError, GitScopeResult};
use std::fs;
use std::path::Path;

/// Load configuration from a JSON file
///
/// Returns the default config if the file doesn't exist. Missing fields keep
/// their defaults.
pub fn load_from_file(path: &Path) -> GitScopeResult<GitScopeConfig> {
    if !path.exists() {
        return Ok(GitScopeConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        GitScopeError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        GitScopeError::config_with_context(
            format!("Failed to parse JSON config: {}", e),
            format!("Deserializing JSON configuration from '{}'", path.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("gitscope.json");
        fs::write(
            &config_path,
            r#"{
                "cache": {"cache_dir": "/var/cache/gitscope", "memory_capacity": 64},
                "context": {"relevance_threshold": 0.9, "retention": "2h"},
                "logging": {"level": "warn", "format": "compact"}
            }"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.cache.memory_capacity, 64);
        assert_eq!(config.cache.ttl.analysis_result, Duration::from_secs(604_800));
        assert_eq!(config.context.relevance_threshold, 0.9);
        assert_eq!(config.context.retention, Duration::from_secs(7200));
        assert_eq!(config.context.max_records_per_conversation, 10);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_from_file(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, GitScopeConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.json");
        fs::write(&config_path, "{ not json").unwrap();

        let err = load_from_file(&config_path).unwrap_err();
        assert_eq!(err.error_code(), "GITSCOPE_CONFIG");
        assert!(err.context().unwrap().contains("broken.json"));
    }
}
