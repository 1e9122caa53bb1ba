//! Context tracker types

use crate::payload::{AnalysisResult, DevelopmentStatus, ProjectType, TechStackSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name used for analyses whose repository has no name
pub const UNKNOWN_PROJECT: &str = "Unknown";

/// An analysis remembered for one conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContextRecord {
    /// Repository the analysis belongs to, usually its URL
    pub repository_id: String,
    pub project_name: String,
    pub primary_language: Option<String>,
    pub tech_stack: TechStackSummary,
    pub analysis: AnalysisResult,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub stored_at: DateTime<Utc>,
}

impl AnalysisContextRecord {
    pub fn new(repository_id: impl Into<String>, analysis: AnalysisResult, stored_at: DateTime<Utc>) -> Self {
        Self {
            repository_id: repository_id.into(),
            project_name: analysis.project_name().unwrap_or(UNKNOWN_PROJECT).to_string(),
            primary_language: analysis.primary_language().map(str::to_string),
            tech_stack: analysis.tech_stack.clone(),
            analysis,
            stored_at,
        }
    }

    pub fn overview(&self) -> ProjectOverview {
        ProjectOverview {
            name: self.project_name.clone(),
            repository_id: self.repository_id.clone(),
            language: self.primary_language.clone(),
        }
    }

    pub fn detail(&self) -> ContextDetail {
        let summary = &self.analysis.analysis_summary;
        ContextDetail {
            project_name: self.project_name.clone(),
            repository_id: self.repository_id.clone(),
            language: self.primary_language.clone(),
            tech_stack: self.tech_stack.clone(),
            key_info: KeyInfo {
                project_type: summary.project_type,
                development_status: summary.development_status,
                highlights: summary.key_highlights.clone(),
            },
        }
    }
}

/// A record together with its relevance to a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub record: AnalysisContextRecord,
    pub score: f64,
}

/// Name, repository and language of a remembered project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub name: String,
    pub repository_id: String,
    pub language: Option<String>,
}

/// Inferred facts about a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(rename = "status")]
    pub development_status: DevelopmentStatus,
    pub highlights: Vec<String>,
}

/// Structured view of a relevant project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDetail {
    pub project_name: String,
    pub repository_id: String,
    pub language: Option<String>,
    pub tech_stack: TechStackSummary,
    pub key_info: KeyInfo,
}

/// Context available for a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextResult {
    /// Nothing has been analyzed in this conversation
    NoContext,
    /// Analyses exist but none is relevant to the message
    Ambient {
        projects: Vec<ProjectOverview>,
        summary: String,
    },
    /// At least one analysis is relevant, most relevant first
    Specific {
        relevant: Vec<ScoredRecord>,
        details: Vec<ContextDetail>,
        suggestions: Vec<String>,
    },
}

impl ContextResult {
    pub fn has_context(&self) -> bool {
        !matches!(self, Self::NoContext)
    }

    /// Relevant records, empty unless the context is specific
    pub fn relevant(&self) -> &[ScoredRecord] {
        match self {
            Self::Specific { relevant, .. } => relevant,
            _ => &[],
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Specific { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// How a follow-up question can be handled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FollowUp {
    /// The conversation has no analysis to answer from
    NeedsAnalysis,
    /// The question refers to analyzed projects
    Answerable {
        details: Vec<ContextDetail>,
        relevant: Vec<ScoredRecord>,
        suggestions: Vec<String>,
    },
    /// The question is not about a specific project; offer what is known
    Overview {
        projects: Vec<ProjectOverview>,
        summary: String,
    },
}

impl FollowUp {
    /// Message to show the user alongside the outcome
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NeedsAnalysis => Some(
                "Please analyze a GitHub project first, then I can answer detailed questions about it.",
            ),
            Self::Overview { .. } => {
                Some("I can help you dig into the details of the projects analyzed so far.")
            }
            Self::Answerable { .. } => None,
        }
    }
}

impl From<ContextResult> for FollowUp {
    fn from(result: ContextResult) -> Self {
        match result {
            ContextResult::NoContext => Self::NeedsAnalysis,
            ContextResult::Ambient { projects, summary } => Self::Overview { projects, summary },
            ContextResult::Specific {
                relevant,
                details,
                suggestions,
            } => Self::Answerable {
                details,
                relevant,
                suggestions,
            },
        }
    }
}

/// Snapshot of tracker usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextStats {
    pub total_conversations: usize,
    pub total_stored_records: usize,
    pub average_records_per_conversation: f64,
}
