//! Repository metadata payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a single repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language as reported by GitHub
    #[serde(default)]
    pub language: Option<String>,
    /// Repository size in kilobytes
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl RepositoryInfo {
    /// Create metadata with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stargazers_count = stars;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}

/// Entry of a user's repository listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl RepositorySummary {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sort a listing by star count, most starred first
    pub fn sort_by_stars(repos: &mut [RepositorySummary]) {
        repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    }
}

impl From<&RepositoryInfo> for RepositorySummary {
    fn from(info: &RepositoryInfo) -> Self {
        Self {
            name: info.name.clone(),
            full_name: info.full_name.clone(),
            description: info.description.clone(),
            language: info.language.clone(),
            stargazers_count: info.stargazers_count,
            forks_count: info.forks_count,
            updated_at: info.updated_at,
            html_url: info.html_url.clone(),
            topics: info.topics.clone(),
        }
    }
}
