//! Heuristics that classify an analysis from its raw facts

use super::analysis::{
    AnalysisSummary, Complexity, DevelopmentStatus, Framework, FrameworkKind, LanguageStats,
    ProjectType, TechStackSummary,
};
use super::repository::RepositoryInfo;
use chrono::{DateTime, Utc};

/// Rate complexity from the number of languages, frameworks and build tools
pub fn complexity_for(languages: usize, frameworks: usize, build_tools: usize) -> Complexity {
    match languages + frameworks + build_tools {
        0..=3 => Complexity::Simple,
        4..=6 => Complexity::Moderate,
        7..=10 => Complexity::Complex,
        _ => Complexity::VeryComplex,
    }
}

impl TechStackSummary {
    /// Summarize detected technologies
    pub fn from_detection(
        languages: &LanguageStats,
        frameworks: &[Framework],
        build_tools: &[String],
    ) -> Self {
        let of_kind = |kind: FrameworkKind| -> Vec<Framework> {
            frameworks.iter().filter(|f| f.kind == kind).cloned().collect()
        };

        Self {
            primary_language: languages.primary_language.clone(),
            frontend_stack: of_kind(FrameworkKind::Frontend),
            backend_stack: of_kind(FrameworkKind::Backend),
            build_tools: build_tools.to_vec(),
            is_fullstack: frameworks.iter().any(|f| f.kind == FrameworkKind::FullStack),
            complexity_score: complexity_for(
                languages.languages.len(),
                frameworks.len(),
                build_tools.len(),
            ),
        }
    }
}

impl ProjectType {
    pub fn infer(tech_stack: &TechStackSummary) -> Self {
        let frontend = !tech_stack.frontend_stack.is_empty();
        let backend = !tech_stack.backend_stack.is_empty();
        match (frontend, backend) {
            (true, true) => Self::FullStackApplication,
            (true, false) => Self::FrontendApplication,
            (false, true) => Self::BackendService,
            (false, false) => Self::LibraryOrTool,
        }
    }
}

impl DevelopmentStatus {
    /// Classify by days elapsed since the last update
    pub fn from_last_update(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(updated_at) = updated_at else {
            return Self::LegacyOrInactive;
        };

        match (now - updated_at).num_days() {
            days if days < 7 => Self::ActiveDevelopment,
            days if days < 30 => Self::RecentlyUpdated,
            days if days < 365 => Self::Maintained,
            _ => Self::LegacyOrInactive,
        }
    }
}

/// Notable facts worth mentioning to a recruiter
pub fn key_highlights(
    repository: &RepositoryInfo,
    tech_stack: &TechStackSummary,
    languages: &LanguageStats,
) -> Vec<String> {
    let mut highlights = Vec::new();

    if repository.stargazers_count > 100 {
        highlights.push(format!(
            "Popular project with {} stars",
            repository.stargazers_count
        ));
    }
    if tech_stack.is_fullstack {
        highlights.push("Full-stack application with modern architecture".to_string());
    }
    if languages.languages.len() > 3 {
        highlights.push("Multi-language project showcasing versatility".to_string());
    }

    highlights
}

/// Improvement suggestions for the analyzed stack
pub fn recommendations(tech_stack: &TechStackSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if tech_stack.complexity_score == Complexity::VeryComplex {
        recommendations
            .push("Consider simplifying the tech stack for better maintainability".to_string());
    }
    if tech_stack.build_tools.is_empty() {
        recommendations.push(
            "Consider adding automated build tools for better development workflow".to_string(),
        );
    }

    recommendations
}

impl AnalysisSummary {
    /// Derive the summary of an analysis from its facts
    pub fn infer(
        repository: &RepositoryInfo,
        tech_stack: &TechStackSummary,
        languages: &LanguageStats,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            project_type: ProjectType::infer(tech_stack),
            development_status: DevelopmentStatus::from_last_update(repository.updated_at, now),
            key_highlights: key_highlights(repository, tech_stack, languages),
            recommendations: recommendations(tech_stack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_complexity_buckets() {
        assert_eq!(complexity_for(1, 1, 1), Complexity::Simple);
        assert_eq!(complexity_for(2, 2, 2), Complexity::Moderate);
        assert_eq!(complexity_for(4, 4, 2), Complexity::Complex);
        assert_eq!(complexity_for(5, 5, 1), Complexity::VeryComplex);
    }

    #[test]
    fn test_project_type_from_stack() {
        let frameworks = vec![Framework::frontend("React"), Framework::backend("Express.js")];
        let stack = TechStackSummary::from_detection(&LanguageStats::default(), &frameworks, &[]);
        assert_eq!(ProjectType::infer(&stack), ProjectType::FullStackApplication);

        let stack = TechStackSummary::from_detection(
            &LanguageStats::default(),
            &[Framework::backend("Koa.js")],
            &[],
        );
        assert_eq!(ProjectType::infer(&stack), ProjectType::BackendService);
        assert_eq!(
            ProjectType::infer(&TechStackSummary::default()),
            ProjectType::LibraryOrTool
        );
    }

    #[test]
    fn test_development_status_thresholds() {
        let now = Utc::now();
        let status = |days| DevelopmentStatus::from_last_update(Some(now - Duration::days(days)), now);

        assert_eq!(status(2), DevelopmentStatus::ActiveDevelopment);
        assert_eq!(status(10), DevelopmentStatus::RecentlyUpdated);
        assert_eq!(status(100), DevelopmentStatus::Maintained);
        assert_eq!(status(400), DevelopmentStatus::LegacyOrInactive);
        assert_eq!(
            DevelopmentStatus::from_last_update(None, now),
            DevelopmentStatus::LegacyOrInactive
        );
    }

    #[test]
    fn test_summary_highlights_and_recommendations() {
        let repo = RepositoryInfo::named("popular").with_stars(250);
        let frameworks = vec![Framework::new("Next.js", FrameworkKind::FullStack)];
        let stack = TechStackSummary::from_detection(&LanguageStats::default(), &frameworks, &[]);

        let summary = AnalysisSummary::infer(&repo, &stack, &LanguageStats::default(), Utc::now());
        assert_eq!(
            summary.key_highlights,
            vec![
                "Popular project with 250 stars".to_string(),
                "Full-stack application with modern architecture".to_string(),
            ]
        );
        assert_eq!(summary.recommendations.len(), 1);
    }
}
