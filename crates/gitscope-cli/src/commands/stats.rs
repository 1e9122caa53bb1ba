//! `gitscope stats`

use crate::console::{CliConsole, format_bytes};
use gitscope_core::TieredCache;
use gitscope_core::cache::{Category, DiskScan};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StatsReport<'a> {
    cache_dir: &'a Path,
    disk_cache: bool,
    scan: Option<DiskScan>,
}

/// Summarize the cache directory
pub async fn run(console: &CliConsole, cache: &TieredCache) -> anyhow::Result<()> {
    let config = cache.config();
    let scan = cache.scan_disk().await?;

    if console.is_json() {
        return console.print_json(&StatsReport {
            cache_dir: &config.cache_dir,
            disk_cache: scan.is_some(),
            scan,
        });
    }

    console.print_header("Cache Statistics");
    console.field("Directory", config.cache_dir.display());

    let Some(scan) = scan else {
        console.warn("Disk cache is disabled or unavailable");
        return Ok(());
    };

    console.field("Files", scan.files);
    console.field("Size", format_bytes(scan.bytes));
    console.field("Live", scan.live());
    console.field("Expired", scan.expired);
    console.field("Corrupted", scan.corrupt);

    println!();
    for category in Category::ALL {
        let files = scan.by_category.get(&category).copied().unwrap_or(0);
        let ttl_hours = config.ttl.ttl_for(category).as_secs() / 3600;
        console.field(category.as_str(), format!("{} files (TTL {}h)", files, ttl_hours));
    }

    if scan.expired + scan.corrupt > 0 {
        println!();
        console.info("Run `gitscope purge` to delete expired and corrupted files");
    }

    Ok(())
}
