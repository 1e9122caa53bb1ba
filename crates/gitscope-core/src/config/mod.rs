//! Configuration management for gitscope
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. a JSON file (`gitscope.json` by default)
//! 3. `GITSCOPE_*` environment variables
//!
//! Command-line flags are applied on top by the CLI.

mod cache_config;
mod context_config;
mod env_loader;
mod file_loader;
mod logging_config;
mod validation;

pub use cache_config::{CacheConfig, TtlPolicy, default_cache_dir};
pub use context_config::{ContextConfig, RelevanceWeights};
pub use env_loader::{ENV_PREFIX, apply_env, apply_env_with};
pub use file_loader::load_from_file;
pub use logging_config::{LogFormat, LoggingConfig};

use crate::error::GitScopeResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "gitscope.json";

/// Complete gitscope configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitScopeConfig {
    pub cache: CacheConfig,
    pub context: ContextConfig,
    pub logging: LoggingConfig,
}

impl GitScopeConfig {
    /// Load defaults, then the optional file, then the process environment
    pub fn load(path: Option<&Path>) -> GitScopeResult<Self> {
        let mut config = match path {
            Some(path) => load_from_file(path)?,
            None => Self::default(),
        };
        apply_env(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> GitScopeResult<()> {
        validation::validate_cache(&self.cache)?;
        validation::validate_context(&self.context)?;
        Ok(())
    }
}
