//! Follow-up question suggestions

use super::types::ScoredRecord;
use crate::payload::{AnalysisResult, DevelopmentStatus, ProjectType};
use indexmap::IndexSet;

const GENERIC_QUESTIONS: [&str; 2] = [
    "Can you explain the core implementation of this project in detail?",
    "What specific problem does this project solve?",
];

/// Suggest follow-up questions about one analysis
///
/// Rules apply in a fixed order: architecture of full-stack projects,
/// the primary language, the leading framework, ongoing work for actively
/// developed projects, then generic questions. Duplicates are dropped and
/// at most `limit` questions are returned.
pub fn suggest(analysis: &AnalysisResult, limit: usize) -> Vec<String> {
    collect_unique(candidates(analysis), limit)
}

/// Suggestions drawn from the `sources` most relevant records
pub fn suggest_for(relevant: &[ScoredRecord], sources: usize, limit: usize) -> Vec<String> {
    collect_unique(
        relevant
            .iter()
            .take(sources)
            .flat_map(|scored| candidates(&scored.record.analysis)),
        limit,
    )
}

fn candidates(analysis: &AnalysisResult) -> Vec<String> {
    let summary = &analysis.analysis_summary;
    let mut questions = Vec::new();

    if summary.project_type == ProjectType::FullStackApplication {
        questions.push("How are the frontend and backend of this project architected?".to_string());
    }
    if let Some(language) = analysis.primary_language() {
        questions.push(format!(
            "What distinctive features does this {} project have?",
            language
        ));
    }
    if let Some(framework) = leading_framework(analysis) {
        questions.push(format!("How is {} used in this project?", framework));
    }
    if summary.development_status == DevelopmentStatus::ActiveDevelopment {
        questions.push("What new features are currently being developed in this project?".to_string());
    }
    questions.extend(GENERIC_QUESTIONS.iter().map(|q| q.to_string()));

    questions
}

fn leading_framework(analysis: &AnalysisResult) -> Option<&str> {
    analysis
        .frameworks
        .first()
        .map(|f| f.name.as_str())
        .or_else(|| analysis.tech_stack.framework_names().next())
        .filter(|name| !name.trim().is_empty())
}

fn collect_unique(questions: impl IntoIterator<Item = String>, limit: usize) -> Vec<String> {
    let mut unique = IndexSet::new();
    for question in questions {
        if unique.len() >= limit {
            break;
        }
        unique.insert(question);
    }
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{AnalysisSummary, Framework, RepositoryInfo};

    fn fullstack_typescript() -> AnalysisResult {
        AnalysisResult::new(
            "https://github.com/acme/shop",
            RepositoryInfo::named("shop").with_language("TypeScript"),
        )
        .with_frameworks(vec![Framework::frontend("React")])
        .with_summary(AnalysisSummary {
            project_type: ProjectType::FullStackApplication,
            ..Default::default()
        })
    }

    #[test]
    fn test_fullstack_typescript_react() {
        let suggestions = suggest(&fullstack_typescript(), 5);
        assert_eq!(
            suggestions,
            [
                "How are the frontend and backend of this project architected?",
                "What distinctive features does this TypeScript project have?",
                "How is React used in this project?",
                GENERIC_QUESTIONS[0],
                GENERIC_QUESTIONS[1],
            ]
        );
    }

    #[test]
    fn test_active_development_respects_limit() {
        let mut analysis = fullstack_typescript();
        analysis.analysis_summary.development_status = DevelopmentStatus::ActiveDevelopment;

        let suggestions = suggest(&analysis, 5);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(
            suggestions[3],
            "What new features are currently being developed in this project?"
        );
    }

    #[test]
    fn test_bare_analysis_gets_generic_questions() {
        let analysis = AnalysisResult::new("https://github.com/acme/x", RepositoryInfo::named("x"));
        assert_eq!(suggest(&analysis, 5), GENERIC_QUESTIONS);
        assert_eq!(suggest(&analysis, 1).len(), 1);
    }
}
