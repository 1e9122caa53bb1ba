//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use gitscope_core::{GitScopeConfig, TieredCache};

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: GitScopeConfig) -> anyhow::Result<()> {
    let console = CliConsole::new(cli.json);
    tracing::debug!(cache_dir = %config.cache.cache_dir.display(), "using cache directory");
    let cache = TieredCache::new(config.cache.clone());
    cache.init().await;

    match cli.command {
        Commands::Stats => commands::stats::run(&console, &cache).await,
        Commands::Key {
            category,
            identifier,
            raw,
        } => commands::key::run(&console, &cache, &category, &identifier, raw),
        Commands::Get {
            category,
            identifier,
            raw,
        } => commands::get::run(&console, &cache, &category, &identifier, raw).await,
        Commands::Purge => commands::purge::run(&console, &cache).await,
    }
}
