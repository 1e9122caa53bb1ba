//! `gitscope get`

use super::resolve;
use crate::console::CliConsole;
use gitscope_core::TieredCache;

/// Print a cached payload, or `miss`
pub async fn run(
    console: &CliConsole,
    cache: &TieredCache,
    category: &str,
    identifier: &str,
    raw: bool,
) -> anyhow::Result<()> {
    let (category, identifier) = resolve(category, identifier, raw)?;
    let payload = cache.get(category, &identifier).await;

    if console.is_json() {
        return console.print_json(&payload);
    }

    match payload {
        Some(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
        None => println!("miss"),
    }
    Ok(())
}
