//! Typed payloads stored in the cache
//!
//! Each cache category holds exactly one payload shape:
//!
//! | Category            | Payload variant                 |
//! |---------------------|---------------------------------|
//! | `repository_info`   | [`Payload::RepositoryInfo`]     |
//! | `analysis_result`   | [`Payload::AnalysisResult`]     |
//! | `user_repositories` | [`Payload::UserRepositories`]   |
//!
//! Payloads serialize as `{"kind": "...", "data": ...}` so a file on disk
//! names its own shape.

mod analysis;
mod inference;
mod repository;

pub use analysis::{
    AnalysisResult, AnalysisSummary, Complexity, DevelopmentStatus, Framework, FrameworkKind,
    LanguageShare, LanguageStats, ProjectType, Readme, RepositoryFile, TechStackSummary,
};
pub use inference::{complexity_for, key_highlights, recommendations};
pub use repository::{RepositoryInfo, RepositorySummary};

use crate::cache::Category;
use serde::{Deserialize, Serialize};

/// A cached value, tagged with its shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// Basic repository metadata
    RepositoryInfo(RepositoryInfo),
    /// Full repository analysis
    AnalysisResult(Box<AnalysisResult>),
    /// Public repositories of a user
    UserRepositories(Vec<RepositorySummary>),
}

impl Payload {
    /// Category this payload belongs to
    pub fn category(&self) -> Category {
        match self {
            Self::RepositoryInfo(_) => Category::RepositoryInfo,
            Self::AnalysisResult(_) => Category::AnalysisResult,
            Self::UserRepositories(_) => Category::UserRepositories,
        }
    }

    pub fn as_repository_info(&self) -> Option<&RepositoryInfo> {
        match self {
            Self::RepositoryInfo(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_analysis(&self) -> Option<&AnalysisResult> {
        match self {
            Self::AnalysisResult(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn as_user_repositories(&self) -> Option<&[RepositorySummary]> {
        match self {
            Self::UserRepositories(repos) => Some(repos),
            _ => None,
        }
    }

    pub fn into_analysis(self) -> Option<AnalysisResult> {
        match self {
            Self::AnalysisResult(analysis) => Some(*analysis),
            _ => None,
        }
    }
}

impl From<RepositoryInfo> for Payload {
    fn from(info: RepositoryInfo) -> Self {
        Self::RepositoryInfo(info)
    }
}

impl From<AnalysisResult> for Payload {
    fn from(analysis: AnalysisResult) -> Self {
        Self::AnalysisResult(Box::new(analysis))
    }
}

impl From<Vec<RepositorySummary>> for Payload {
    fn from(repos: Vec<RepositorySummary>) -> Self {
        Self::UserRepositories(repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_tagged_by_kind() {
        let payload = Payload::from(RepositoryInfo::named("gitscope"));
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["kind"], "repository_info");
        assert_eq!(value["data"]["name"], "gitscope");
        assert_eq!(payload.category(), Category::RepositoryInfo);
    }

    #[test]
    fn test_payload_accessors() {
        let payload = Payload::from(vec![RepositorySummary::named("a")]);
        assert!(payload.as_analysis().is_none());
        assert!(payload.as_repository_info().is_none());
        assert_eq!(payload.as_user_repositories().map(|r| r.len()), Some(1));
        assert_eq!(payload.category(), Category::UserRepositories);

        let payload = Payload::from(RepositoryInfo::named("widget"));
        assert_eq!(payload.as_repository_info().map(|info| info.name.as_str()), Some("widget"));
        assert!(payload.into_analysis().is_none());
    }
}
