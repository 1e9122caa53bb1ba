//! `gitscope purge`

use crate::console::CliConsole;
use gitscope_core::TieredCache;

/// Delete expired and corrupted cache files
pub async fn run(console: &CliConsole, cache: &TieredCache) -> anyhow::Result<()> {
    let report = cache.purge_disk().await?;

    if console.is_json() {
        return console.print_json(&report);
    }

    if report.total() == 0 {
        console.info("Nothing to purge");
    } else {
        console.success(&format!(
            "Removed {} expired, {} corrupted and {} temporary files",
            report.expired, report.corrupt, report.temp
        ));
    }
    Ok(())
}
