//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use gitscope_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitscope")]
#[command(about = "Inspect and maintain the gitscope GitHub analysis cache")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, env = "GITSCOPE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Cache directory, overriding the configuration
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the entries stored in the cache directory
    Stats,

    /// Show the cache key and file for an identifier
    Key {
        /// repository_info, analysis_result or user_repositories
        category: String,
        /// Repository URL, owner/repo shorthand or username
        identifier: String,
        /// Use the identifier as given instead of canonicalizing it
        #[arg(long)]
        raw: bool,
    },

    /// Print a cached payload
    Get {
        /// repository_info, analysis_result or user_repositories
        category: String,
        /// Repository URL, owner/repo shorthand or username
        identifier: String,
        /// Use the identifier as given instead of canonicalizing it
        #[arg(long)]
        raw: bool,
    },

    /// Delete expired and corrupted cache files
    Purge,
}
