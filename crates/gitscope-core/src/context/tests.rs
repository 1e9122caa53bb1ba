//! Context tracker tests

#[cfg(test)]
mod tests {
    use crate::clock::{ManualClock, SharedClock};
    use crate::config::ContextConfig;
    use crate::context::{ContextResult, ContextTracker, FollowUp, UNKNOWN_PROJECT};
    use crate::payload::{
        AnalysisResult, AnalysisSummary, DevelopmentStatus, Framework, ProjectType,
        RepositoryInfo, TechStackSummary,
    };
    use indexmap::IndexSet;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn analysis(name: &str, language: &str, frameworks: &[&str]) -> AnalysisResult {
        let frameworks: Vec<Framework> = frameworks.iter().map(|f| Framework::frontend(*f)).collect();
        AnalysisResult::new(
            format!("https://github.com/acme/{}", name),
            RepositoryInfo::named(name).with_language(language),
        )
        .with_tech_stack(TechStackSummary {
            primary_language: Some(language.to_string()),
            frontend_stack: frameworks.clone(),
            ..Default::default()
        })
        .with_frameworks(frameworks)
        .with_summary(AnalysisSummary {
            project_type: ProjectType::FrontendApplication,
            development_status: DevelopmentStatus::ActiveDevelopment,
            key_highlights: vec!["Popular project with 120 stars".to_string()],
            ..Default::default()
        })
    }

    fn tracker() -> (ContextTracker, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let shared: SharedClock = clock.clone();
        (ContextTracker::with_clock(ContextConfig::default(), shared), clock)
    }

    fn url(name: &str) -> String {
        format!("https://github.com/acme/{}", name)
    }

    #[test]
    fn test_no_context_for_unknown_conversation() {
        let (tracker, _) = tracker();
        assert_eq!(tracker.enhance("anything", "conv-1"), ContextResult::NoContext);
        assert_eq!(tracker.follow_up("anything", "conv-1"), FollowUp::NeedsAnalysis);
        assert!(FollowUp::NeedsAnalysis.message().is_some());
    }

    #[test]
    fn test_exact_project_name_gives_specific_context() {
        let (tracker, _) = tracker();
        tracker.remember("conv-1", &url("storefront"), analysis("storefront", "TypeScript", &["React"]));
        tracker.remember("conv-1", &url("billing"), analysis("billing", "Go", &[]));

        let result = tracker.enhance("How does Storefront handle checkout?", "conv-1");
        let ContextResult::Specific {
            relevant,
            details,
            suggestions,
        } = result
        else {
            panic!("expected specific context");
        };

        assert_eq!(relevant.len(), 1);
        assert!(relevant[0].score >= 0.8);
        assert_eq!(details[0].project_name, "storefront");
        assert_eq!(details[0].repository_id, url("storefront"));
        assert_eq!(details[0].key_info.project_type, ProjectType::FrontendApplication);
        assert_eq!(details[0].key_info.highlights.len(), 1);
        assert!(!suggestions.is_empty() && suggestions.len() <= 5);
        assert!(suggestions.contains(&"How is React used in this project?".to_string()));
    }

    #[test]
    fn test_unrelated_message_gives_ambient_context() {
        let (tracker, _) = tracker();
        tracker.remember("conv-1", &url("storefront"), analysis("storefront", "TypeScript", &["React"]));
        tracker.remember("conv-1", &url("billing"), analysis("billing", "Go", &[]));
        tracker.remember("conv-1", &url("admin"), analysis("admin", "TypeScript", &[]));

        let result = tracker.enhance("What's the weather like?", "conv-1");
        let ContextResult::Ambient { projects, summary } = result else {
            panic!("expected ambient context");
        };

        assert_eq!(projects.len(), 3);
        assert_eq!(projects[1].language.as_deref(), Some("Go"));
        assert_eq!(
            summary,
            "Analyzed projects: storefront, billing, admin. Technologies involved: TypeScript, Go"
        );

        let follow_up = tracker.follow_up("What's the weather like?", "conv-1");
        assert!(matches!(follow_up, FollowUp::Overview { .. }));
    }

    #[test]
    fn test_suggestions_come_from_top_two_sources() {
        let (tracker, _) = tracker();
        tracker.remember("conv-1", &url("alpha"), analysis("alpha", "Rust", &["Axum"]));
        tracker.remember("conv-1", &url("beta"), analysis("beta", "Python", &["Django"]));
        tracker.remember("conv-1", &url("gamma"), analysis("gamma", "Elixir", &["Phoenix"]));

        let follow_up = tracker.follow_up("compare alpha, beta and gamma", "conv-1");
        let FollowUp::Answerable {
            relevant,
            suggestions,
            ..
        } = follow_up
        else {
            panic!("expected answerable follow-up");
        };

        assert_eq!(relevant.len(), 3);
        assert_eq!(suggestions.len(), 5);
        assert!(suggestions.iter().all(|s| !s.contains("Elixir") && !s.contains("Phoenix")));
        let unique: IndexSet<&String> = suggestions.iter().collect();
        assert_eq!(unique.len(), suggestions.len());
    }

    #[test]
    fn test_bounded_records_evict_oldest() {
        let (tracker, clock) = tracker();
        for i in 0..11 {
            let name = format!("repo-{}", i);
            tracker.remember("conv-1", &url(&name), analysis(&name, "Rust", &[]));
            clock.advance(chrono::Duration::seconds(1));
        }

        let records = tracker.records("conv-1");
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].project_name, "repo-1");
        assert!(tracker.lookup("conv-1", &url("repo-0")).is_none());
        assert!(tracker.lookup("conv-1", &url("repo-10")).is_some());
    }

    #[test]
    fn test_remember_again_replaces_and_refreshes() {
        let clock = Arc::new(ManualClock::new());
        let shared: SharedClock = clock.clone();
        let small = ContextTracker::with_clock(ContextConfig::default().with_max_records(2), shared);

        small.remember("conv-1", &url("a"), analysis("a", "Rust", &[]));
        small.remember("conv-1", &url("b"), analysis("b", "Rust", &[]));
        small.remember("conv-1", &url("a"), analysis("a", "Go", &[]));
        small.remember("conv-1", &url("c"), analysis("c", "Rust", &[]));

        let names: Vec<_> = small.records("conv-1").into_iter().map(|r| r.project_name).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(
            small.lookup("conv-1", &url("a")).and_then(|r| r.primary_language),
            Some("Go".to_string())
        );
    }

    #[test]
    fn test_unnamed_repository_is_unknown() {
        let (tracker, _) = tracker();
        let repo = "https://github.com/acme/x";
        tracker.remember("conv-1", repo, AnalysisResult::new(repo, RepositoryInfo::default()));
        let record = tracker.lookup("conv-1", repo).unwrap();
        assert_eq!(record.project_name, UNKNOWN_PROJECT);
        assert_eq!(record.primary_language, None);
    }

    #[test]
    fn test_retention_hides_then_sweeps_records() {
        let (tracker, clock) = tracker();
        tracker.remember("conv-1", &url("old"), analysis("old", "Rust", &[]));
        clock.advance(chrono::Duration::minutes(30));
        tracker.remember("conv-1", &url("new"), analysis("new", "Rust", &[]));
        tracker.remember("conv-2", &url("other"), analysis("other", "Go", &[]));

        clock.advance(chrono::Duration::minutes(31));
        assert_eq!(tracker.records("conv-1").len(), 1);
        assert!(tracker.lookup("conv-1", &url("old")).is_none());

        assert_eq!(tracker.cleanup_expired(), 1);
        let stats = tracker.stats();
        assert_eq!(stats.total_conversations, 2);
        assert_eq!(stats.total_stored_records, 2);

        clock.advance(chrono::Duration::minutes(30));
        assert_eq!(tracker.cleanup_expired(), 2);
        assert_eq!(tracker.stats().total_conversations, 0);
        assert_eq!(tracker.enhance("old new other", "conv-1"), ContextResult::NoContext);
    }

    #[test]
    fn test_stats_average() {
        let (tracker, _) = tracker();
        assert_eq!(tracker.stats().average_records_per_conversation, 0.0);

        tracker.remember("conv-1", &url("a"), analysis("a", "Rust", &[]));
        tracker.remember("conv-1", &url("b"), analysis("b", "Rust", &[]));
        tracker.remember("conv-2", &url("c"), analysis("c", "Rust", &[]));

        let stats = tracker.stats();
        assert_eq!(stats.total_conversations, 2);
        assert_eq!(stats.total_stored_records, 3);
        assert_eq!(stats.average_records_per_conversation, 1.5);

        assert_eq!(tracker.forget("conv-1"), 2);
        assert_eq!(tracker.stats().total_conversations, 1);
    }

    #[test]
    fn test_result_serializes_with_kind_tag() {
        let (tracker, _) = tracker();
        tracker.remember("conv-1", &url("a"), analysis("a", "Rust", &[]));
        let value = serde_json::to_value(tracker.enhance("hello", "conv-1")).unwrap();
        assert_eq!(value["kind"], "ambient");
        assert_eq!(value["projects"][0]["name"], "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_sweeps_periodically() {
        let clock = Arc::new(ManualClock::new());
        let shared: SharedClock = clock.clone();
        let tracker = Arc::new(ContextTracker::with_clock(ContextConfig::default(), shared));
        tracker.remember("conv-1", &url("a"), analysis("a", "Rust", &[]));
        clock.advance(chrono::Duration::hours(2));

        let cancel = CancellationToken::new();
        let handle = tracker.spawn_cleanup_task(Duration::from_secs(600), cancel.clone());
        tokio::time::sleep(Duration::from_secs(601)).await;
        assert_eq!(tracker.stats().total_conversations, 0);

        cancel.cancel();
        handle.await.unwrap();
    }
}
