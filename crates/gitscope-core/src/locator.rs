//! GitHub target parsing
//!
//! Tool calls hand the cache whatever the user typed: full URLs, URLs with
//! `.git` or `/tree/main` suffixes, `owner/repo` shorthands or bare
//! usernames. [`GitHubTarget`] reduces all of them to one canonical
//! identifier so the same repository never ends up under two cache keys.

use crate::cache::Category;
use crate::error::{GitScopeError, GitScopeResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Repository URL, optionally followed by a path, query or fragment
static URL_REPO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:www\.)?github\.com/([a-z0-9-]+)/([a-z0-9._-]+?)(?:\.git)?(?:[/?#].*)?$",
    )
    .unwrap()
});

/// Profile URL
static URL_USER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?github\.com/([a-z0-9-]+)/?(?:[?#].*)?$").unwrap()
});

/// `owner/repo` shorthand
static SHORT_REPO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z0-9-]+)/([a-z0-9._-]+?)(?:\.git)?$").unwrap());

/// Bare username, optionally prefixed with `@`
static SHORT_USER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^@?([a-z0-9-]+)$").unwrap());

/// A repository or a user on GitHub
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubTarget {
    Repository { owner: String, repo: String },
    User { owner: String },
}

impl GitHubTarget {
    /// Parse a URL, `owner/repo` shorthand or username
    pub fn parse(input: &str) -> GitScopeResult<Self> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(GitScopeError::invalid_input_field(
                "GitHub target is empty",
                "identifier",
            ));
        }

        let looks_like_url = trimmed.to_ascii_lowercase().contains("github.com");
        let (repo_pattern, user_pattern) = if looks_like_url {
            (&*URL_REPO_PATTERN, &*URL_USER_PATTERN)
        } else {
            (&*SHORT_REPO_PATTERN, &*SHORT_USER_PATTERN)
        };

        if let Some(caps) = repo_pattern.captures(trimmed) {
            return Ok(Self::Repository {
                owner: caps[1].to_string(),
                repo: caps[2].to_string(),
            });
        }
        if let Some(caps) = user_pattern.captures(trimmed) {
            return Ok(Self::User {
                owner: caps[1].to_string(),
            });
        }

        Err(GitScopeError::invalid_input_field(
            format!("Invalid GitHub URL format: {}", input),
            "identifier",
        ))
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::Repository { owner, .. } | Self::User { owner } => owner,
        }
    }

    pub fn is_repository(&self) -> bool {
        matches!(self, Self::Repository { .. })
    }

    /// Canonical `https://github.com/...` URL, preserving the original casing
    pub fn canonical_url(&self) -> String {
        match self {
            Self::Repository { owner, repo } => format!("https://github.com/{}/{}", owner, repo),
            Self::User { owner } => format!("https://github.com/{}", owner),
        }
    }

    /// Identifier to key the cache with
    ///
    /// GitHub names are case-insensitive, so the identifier is lowercased.
    /// Repositories are identified by their canonical URL, users by name.
    pub fn cache_identifier(&self) -> String {
        match self {
            Self::Repository { .. } => self.canonical_url().to_ascii_lowercase(),
            Self::User { owner } => owner.to_ascii_lowercase(),
        }
    }

    /// Categories that accept this target as identifier
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Self::Repository { .. } => &[Category::RepositoryInfo, Category::AnalysisResult],
            Self::User { .. } => &[Category::UserRepositories],
        }
    }
}

impl FromStr for GitHubTarget {
    type Err = GitScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GitHubTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository { owner, repo } => write!(f, "{}/{}", owner, repo),
            Self::User { owner } => write!(f, "{}", owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_variants_share_identifier() {
        let inputs = [
            "https://github.com/a/b",
            "https://github.com/a/b.git",
            "https://github.com/a/b/tree/main/src",
            "http://www.github.com/A/B/",
            "github.com/a/b?tab=readme",
            "a/b",
            "a/b.git",
        ];

        for input in inputs {
            let target = GitHubTarget::parse(input).unwrap();
            assert_eq!(
                target.cache_identifier(),
                "https://github.com/a/b",
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_user_targets() {
        for input in ["https://github.com/octocat", "github.com/octocat/", "octocat", "@octocat"] {
            let target = GitHubTarget::parse(input).unwrap();
            assert_eq!(
                target,
                GitHubTarget::User {
                    owner: "octocat".to_string()
                },
                "input: {}",
                input
            );
            assert_eq!(target.categories(), &[Category::UserRepositories]);
        }
    }

    #[test]
    fn test_github_host_is_not_an_owner() {
        let target = GitHubTarget::parse("github.com/octocat").unwrap();
        assert_eq!(target.owner(), "octocat");
        assert!(!target.is_repository());
    }

    #[test]
    fn test_repo_names_with_dots() {
        let target = GitHubTarget::parse("https://github.com/owner/site.github.io").unwrap();
        assert_eq!(target.to_string(), "owner/site.github.io");
    }

    #[test]
    fn test_invalid_targets() {
        for input in ["", "   ", "https://gitlab.com/a/b", "a/b/c", "not a url"] {
            let err = GitHubTarget::parse(input).unwrap_err();
            assert!(err.is_programmer_error(), "input: {}", input);
        }
    }
}
