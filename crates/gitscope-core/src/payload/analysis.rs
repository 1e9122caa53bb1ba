//! Repository analysis payload

use super::repository::RepositoryInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What role a detected framework plays in a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameworkKind {
    #[serde(rename = "Frontend Framework")]
    Frontend,
    #[serde(rename = "Backend Framework")]
    Backend,
    #[serde(rename = "Full-stack Framework")]
    FullStack,
    #[serde(rename = "Build Tool")]
    BuildTool,
}

/// Framework or library detected in a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framework {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FrameworkKind,
}

impl Framework {
    pub fn new(name: impl Into<String>, kind: FrameworkKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn frontend(name: impl Into<String>) -> Self {
        Self::new(name, FrameworkKind::Frontend)
    }

    pub fn backend(name: impl Into<String>) -> Self {
        Self::new(name, FrameworkKind::Backend)
    }
}

/// Share of a single language in a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    pub percentage: f64,
}

/// Language breakdown of a repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    /// Languages ordered by byte count, largest first
    #[serde(default)]
    pub languages: Vec<LanguageShare>,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub primary_language: Option<String>,
}

impl LanguageStats {
    /// Build stats from raw `(language, bytes)` pairs
    pub fn from_bytes(pairs: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut raw: Vec<(String, u64)> = pairs.into_iter().collect();
        raw.sort_by(|a, b| b.1.cmp(&a.1));
        let total_bytes: u64 = raw.iter().map(|(_, bytes)| bytes).sum();

        let languages: Vec<LanguageShare> = raw
            .into_iter()
            .map(|(language, bytes)| {
                let percentage = if total_bytes == 0 {
                    0.0
                } else {
                    (bytes as f64 / total_bytes as f64 * 10_000.0).round() / 100.0
                };
                LanguageShare {
                    language,
                    bytes,
                    percentage,
                }
            })
            .collect();

        let primary_language = languages.first().map(|l| l.language.clone());
        Self {
            languages,
            total_bytes,
            primary_language,
        }
    }
}

/// Complexity rating of a tech stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Complexity {
    #[default]
    Simple,
    Moderate,
    Complex,
    #[serde(rename = "Very Complex")]
    VeryComplex,
}

/// Condensed view of a repository's technologies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechStackSummary {
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub frontend_stack: Vec<Framework>,
    #[serde(default)]
    pub backend_stack: Vec<Framework>,
    #[serde(default)]
    pub build_tools: Vec<String>,
    #[serde(default)]
    pub is_fullstack: bool,
    #[serde(default)]
    pub complexity_score: Complexity,
}

impl TechStackSummary {
    /// Frontend then backend framework names
    pub fn framework_names(&self) -> impl Iterator<Item = &str> {
        self.frontend_stack
            .iter()
            .chain(self.backend_stack.iter())
            .map(|f| f.name.as_str())
    }
}

/// Kind of project inferred from its tech stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "Full-stack Application")]
    FullStackApplication,
    #[serde(rename = "Frontend Application")]
    FrontendApplication,
    #[serde(rename = "Backend Service")]
    BackendService,
    #[default]
    #[serde(rename = "Library/Tool")]
    LibraryOrTool,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullStackApplication => "Full-stack Application",
            Self::FrontendApplication => "Frontend Application",
            Self::BackendService => "Backend Service",
            Self::LibraryOrTool => "Library/Tool",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How actively a repository is being worked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DevelopmentStatus {
    #[serde(rename = "Active Development")]
    ActiveDevelopment,
    #[serde(rename = "Recently Updated")]
    RecentlyUpdated,
    Maintained,
    #[default]
    #[serde(rename = "Legacy/Inactive")]
    LegacyOrInactive,
}

impl DevelopmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveDevelopment => "Active Development",
            Self::RecentlyUpdated => "Recently Updated",
            Self::Maintained => "Maintained",
            Self::LegacyOrInactive => "Legacy/Inactive",
        }
    }
}

impl fmt::Display for DevelopmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// High-level conclusions of an analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub development_status: DevelopmentStatus,
    #[serde(default)]
    pub key_highlights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// File found at the repository root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFile {
    pub name: String,
    pub path: String,
    /// `file` or `dir`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readme {
    pub content: String,
    pub size: u64,
}

/// Complete analysis of one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub repository_info: RepositoryInfo,
    #[serde(default)]
    pub tech_stack: TechStackSummary,
    #[serde(default)]
    pub languages: LanguageStats,
    #[serde(default)]
    pub frameworks: Vec<Framework>,
    #[serde(default)]
    pub build_tools: Vec<String>,
    #[serde(default)]
    pub config_files: Vec<RepositoryFile>,
    #[serde(default)]
    pub readme: Option<Readme>,
    #[serde(default)]
    pub analysis_summary: AnalysisSummary,
}

impl AnalysisResult {
    /// Create an analysis with empty tech stack and default summary
    pub fn new(url: impl Into<String>, repository_info: RepositoryInfo) -> Self {
        Self {
            url: url.into(),
            timestamp: Utc::now(),
            repository_info,
            tech_stack: TechStackSummary::default(),
            languages: LanguageStats::default(),
            frameworks: Vec::new(),
            build_tools: Vec::new(),
            config_files: Vec::new(),
            readme: None,
            analysis_summary: AnalysisSummary::default(),
        }
    }

    pub fn with_frameworks(mut self, frameworks: Vec<Framework>) -> Self {
        self.frameworks = frameworks;
        self
    }

    pub fn with_tech_stack(mut self, tech_stack: TechStackSummary) -> Self {
        self.tech_stack = tech_stack;
        self
    }

    pub fn with_summary(mut self, summary: AnalysisSummary) -> Self {
        self.analysis_summary = summary;
        self
    }

    /// Repository name, or `None` when blank
    pub fn project_name(&self) -> Option<&str> {
        let name = self.repository_info.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Primary language from repository metadata, falling back to the tech stack
    pub fn primary_language(&self) -> Option<&str> {
        self.repository_info
            .language
            .as_deref()
            .or(self.tech_stack.primary_language.as_deref())
            .filter(|l| !l.trim().is_empty())
    }
}
