//! Relevance scoring of remembered analyses against a message

use super::types::{AnalysisContextRecord, ScoredRecord};
use crate::config::RelevanceWeights;
use std::cmp::Ordering;

/// Score a record against a lowercased message
///
/// Matches are plain substring checks: the project name and the primary
/// language add their weight once, every frontend or backend framework
/// found in the message adds the technology weight. Empty names never
/// match.
pub fn relevance_score(
    message_lower: &str,
    record: &AnalysisContextRecord,
    weights: &RelevanceWeights,
) -> f64 {
    let mentions = |term: &str| {
        let term = term.trim();
        !term.is_empty() && message_lower.contains(&term.to_lowercase())
    };

    let mut score = 0.0;
    if mentions(&record.project_name) {
        score += weights.project_name;
    }
    if record.primary_language.as_deref().is_some_and(mentions) {
        score += weights.language;
    }
    score += record
        .tech_stack
        .framework_names()
        .filter(|name| mentions(name))
        .count() as f64
        * weights.technology;

    score
}

/// Records scoring at least `threshold`, most relevant first
///
/// Records with equal scores keep their stored order.
pub fn rank<'a>(
    message: &str,
    records: impl IntoIterator<Item = &'a AnalysisContextRecord>,
    weights: &RelevanceWeights,
    threshold: f64,
) -> Vec<ScoredRecord> {
    let message_lower = message.to_lowercase();
    let mut relevant: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| ScoredRecord {
            score: relevance_score(&message_lower, record, weights),
            record: record.clone(),
        })
        .filter(|scored| scored.score >= threshold)
        .collect();

    relevant.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    relevant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{AnalysisResult, Framework, RepositoryInfo, TechStackSummary};
    use chrono::Utc;

    fn record(name: &str, language: &str, frameworks: &[&str]) -> AnalysisContextRecord {
        let tech_stack = TechStackSummary {
            frontend_stack: frameworks.iter().map(|f| Framework::frontend(*f)).collect(),
            ..Default::default()
        };
        let analysis = AnalysisResult::new(
            format!("https://github.com/acme/{}", name),
            RepositoryInfo::named(name).with_language(language),
        )
        .with_tech_stack(tech_stack);
        AnalysisContextRecord::new(analysis.url.clone(), analysis, Utc::now())
    }

    #[test]
    fn test_score_components() {
        let weights = RelevanceWeights::default();
        let record = record("widget", "TypeScript", &["React", "Redux"]);

        assert_eq!(relevance_score("tell me about widget", &record, &weights), 0.8);
        assert_eq!(relevance_score("any typescript tips?", &record, &weights), 0.6);
        assert_eq!(relevance_score("how is react used with redux", &record, &weights), 0.8);
        assert_eq!(relevance_score("what's for lunch", &record, &weights), 0.0);
    }

    #[test]
    fn test_blank_names_never_match() {
        let weights = RelevanceWeights::default();
        let mut record = record("widget", "Rust", &[]);
        record.project_name = "  ".to_string();
        record.primary_language = Some(String::new());
        assert_eq!(relevance_score("anything at all", &record, &weights), 0.0);
    }

    #[test]
    fn test_rank_orders_by_score_and_keeps_ties_stable() {
        let weights = RelevanceWeights::default();
        let records = [
            record("alpha", "Go", &[]),
            record("beta", "Go", &[]),
            record("gamma", "Rust", &["Axum"]),
        ];

        let ranked = rank("Compare alpha, beta and gamma built with rust", &records, &weights, 0.7);
        let names: Vec<_> = ranked.iter().map(|s| s.record.project_name.as_str()).collect();
        assert_eq!(names, ["gamma", "alpha", "beta"]);
        assert!((ranked[0].score - 1.4).abs() < 1e-9);

        assert!(rank("Go projects", &records, &weights, 0.7).is_empty());
    }
}
