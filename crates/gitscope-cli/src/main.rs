//! gitscope operator CLI
//!
//! Inspects and maintains the on-disk tier of the GitHub analysis cache
//! while the service is running or offline.
//!
//! ```bash
//! gitscope stats                                  # summarize the cache directory
//! gitscope key analysis_result acme/storefront    # show the key and file of an entry
//! gitscope get repository_info acme/storefront    # print a cached payload
//! gitscope purge                                  # delete expired and corrupted files
//! ```

mod args;
mod commands;
mod console;
mod logging;
mod router;

use anyhow::Context;
use clap::Parser;
use gitscope_core::GitScopeConfig;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = GitScopeConfig::load(Some(&cli.config))
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if let Some(cache_dir) = &cli.cache_dir {
        config.cache.cache_dir = cache_dir.clone();
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    logging::init(&config.logging);
    router::route(cli, config).await
}
