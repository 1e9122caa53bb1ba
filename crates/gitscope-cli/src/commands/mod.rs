//! CLI commands

pub mod get;
pub mod key;
pub mod purge;
pub mod stats;

use gitscope_core::{Category, GitHubTarget};

/// Parse the category and identifier arguments shared by `key` and `get`
///
/// Identifiers are canonicalized the same way the service does unless
/// `raw` is set or the identifier is not a GitHub target.
pub(crate) fn resolve(category: &str, identifier: &str, raw: bool) -> anyhow::Result<(Category, String)> {
    let category: Category = category.parse()?;
    if raw {
        return Ok((category, identifier.to_string()));
    }

    let identifier = match GitHubTarget::parse(identifier) {
        Ok(target) => target.cache_identifier(),
        Err(_) => identifier.to_string(),
    };
    Ok((category, identifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonicalizes() {
        let (category, identifier) =
            resolve("repository_info", "https://github.com/Acme/Widget.git", false).unwrap();
        assert_eq!(category, Category::RepositoryInfo);
        assert_eq!(identifier, "https://github.com/acme/widget");

        let (_, identifier) = resolve("repository_info", "Acme/Widget", true).unwrap();
        assert_eq!(identifier, "Acme/Widget");
    }

    #[test]
    fn test_resolve_rejects_unknown_category() {
        let err = resolve("commits", "acme/widget", false).unwrap_err();
        assert!(err.to_string().contains("commits"));
    }

    #[tokio::test]
    async fn test_purge_removes_corrupted_files() {
        use crate::console::CliConsole;
        use gitscope_core::cache::CacheKey;
        use gitscope_core::{CacheConfig, TieredCache};

        let temp_dir = tempfile::TempDir::new().unwrap();
        let cache = TieredCache::new(CacheConfig::default().with_cache_dir(temp_dir.path()));
        cache.init().await;

        let key = CacheKey::derive(Category::RepositoryInfo, "acme/widget");
        let path = temp_dir.path().join(key.file_name());
        std::fs::write(&path, "garbage").unwrap();

        let console = CliConsole::new(true);
        stats::run(&console, &cache).await.unwrap();
        purge::run(&console, &cache).await.unwrap();
        assert!(!path.exists());
    }
}
