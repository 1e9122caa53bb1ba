//! `gitscope key`

use super::resolve;
use crate::console::CliConsole;
use gitscope_core::TieredCache;
use gitscope_core::cache::{CacheKey, Category};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct KeyReport {
    key: CacheKey,
    category: Category,
    identifier: String,
    path: PathBuf,
    exists: bool,
}

/// Show the key and file for an identifier
pub fn run(
    console: &CliConsole,
    cache: &TieredCache,
    category: &str,
    identifier: &str,
    raw: bool,
) -> anyhow::Result<()> {
    let (category, identifier) = resolve(category, identifier, raw)?;
    let key = CacheKey::derive(category, &identifier);
    let path = cache.config().cache_dir.join(key.file_name());
    let exists = path.is_file();

    if console.is_json() {
        return console.print_json(&KeyReport {
            key,
            category,
            identifier,
            path,
            exists,
        });
    }

    println!("{}", key);
    console.field("Category", category);
    console.field("Identifier", &identifier);
    console.field("File", path.display());
    console.field("Stored", if exists { "yes" } else { "no" });
    Ok(())
}
