use chrono::NaiveDate;
use serde_json::{json, Map};

use super::{event, issues};
use crate::analyses::active_labels::{label_activity, occurrence_summary};
use crate::analyses::contributor_activity::{month_of, monthly_activity};
use crate::analyses::contributor_interactions::{build_interaction_graph, degree_centrality};
use crate::analyses::reopened_issues::reopen_counts;
use crate::analyses::{rank, ReopenedIssuesAnalysis};
use crate::analysis::{Analysis, RunContext};
use crate::charts::RecordingRenderer;
use crate::config::Config;
use crate::error::LensError;
use crate::loader::DataLoader;
use crate::models::Issue;

fn label_dataset() -> Vec<Issue> {
    issues(json!([
        {
            "state": "open",
            "labels": ["bug", "feature"],
            "events": [
                { "event_type": "commented" },
                { "event_type": "commented" },
                { "event_type": "closed" }
            ]
        },
        {
            "state": "open",
            "labels": ["documentation", "feature"],
            "events": [{ "event_type": "commented" }]
        },
        {
            "state": "closed",
            "labels": ["bug"],
            "events": [{ "event_type": "commented" }]
        }
    ]))
}

fn pairs(items: &[(&str, u64)]) -> Vec<(String, u64)> {
    items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_rank_orders_by_value_then_key() {
    let ranked = rank(vec![("b", 2), ("c", 5), ("a", 2)]);
    assert_eq!(ranked, vec![("c", 5), ("a", 2), ("b", 2)]);
}

#[test]
fn test_label_activity_scenario() {
    let activity = label_activity(&label_dataset(), None);
    assert_eq!(
        activity,
        pairs(&[("bug", 3), ("feature", 3), ("documentation", 1)])
    );
}

#[test]
fn test_label_activity_with_filter() {
    let activity = label_activity(&label_dataset(), Some("feature"));
    assert_eq!(activity, pairs(&[("feature", 3)]));
    assert!(label_activity(&label_dataset(), Some("ui")).is_empty());
}

#[test]
fn test_label_occurrence_summary() {
    assert_eq!(
        occurrence_summary(&label_dataset(), "bug"),
        "The label 'bug' occurred 2 times across 3 issues."
    );
}

#[test]
fn test_duplicate_labels_count_twice() {
    let data = issues(json!([
        { "state": "open", "labels": ["bug", "bug"], "events": [{ "event_type": "commented" }] }
    ]));
    assert_eq!(label_activity(&data, None), pairs(&[("bug", 2)]));
}

#[test]
fn test_monthly_activity_groups_by_author_and_month() {
    let data = issues(json!([
        {
            "state": "open",
            "events": [
                event("commented", "alice", "2024-01-03T10:00:00Z"),
                event("labeled", "alice", "2024-01-20T10:00:00Z"),
                event("commented", "alice", "2024-03-01T00:00:00Z"),
                event("commented", "bob", "2024-02-11T10:00:00Z"),
                { "event_type": "commented", "author": "carol" },
                { "event_type": "commented", "event_date": "2024-01-01" }
            ]
        }
    ]));

    let activity = monthly_activity(&data, None);
    assert_eq!(activity.len(), 2);

    assert_eq!(activity[0].author, "alice");
    assert_eq!(activity[0].total, 3);
    assert_eq!(
        activity[0].months,
        vec![
            (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 2),
            (NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 1),
        ]
    );
    assert_eq!(activity[1].author, "bob");

    let only_bob = monthly_activity(&data, Some("bob"));
    assert_eq!(only_bob.len(), 1);
    assert_eq!(only_bob[0].total, 1);
}

#[test]
fn test_month_of_truncates_to_first_day() {
    let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    assert_eq!(month_of(&date), NaiveDate::from_ymd_opt(2023, 12, 1));
}

#[test]
fn test_reopen_counts_per_label() {
    let data = issues(json!([
        {
            "state": "open",
            "labels": ["bug", "ui"],
            "events": [{ "event_type": "reopened" }, { "event_type": "reopened" }]
        },
        {
            "state": "open",
            "labels": ["bug"],
            "events": [{ "event_type": "reopened" }, { "event_type": "commented" }]
        },
        { "state": "open", "labels": ["docs"], "events": [{ "event_type": "commented" }] },
        { "state": "closed", "events": [{ "event_type": "reopened" }] }
    ]));

    assert_eq!(reopen_counts(&data), pairs(&[("bug", 3), ("ui", 2)]));
}

#[test]
fn test_no_reopened_issues_is_an_empty_result() {
    let loader = DataLoader::with_issues(label_dataset());
    let config = Config::from_parts(Map::new(), None);
    let mut renderer = RecordingRenderer::new();
    let mut out: Vec<u8> = Vec::new();

    let result = {
        let mut ctx = RunContext {
            config: &config,
            loader: &loader,
            renderer: &mut renderer,
            out: &mut out,
        };
        ReopenedIssuesAnalysis::new().unwrap().run(&mut ctx)
    };

    match result {
        Err(LensError::EmptyResult(message)) => assert_eq!(message, "No reopened issues found."),
        _ => panic!("Expected LensError::EmptyResult"),
    }
    assert!(renderer.charts.is_empty());
}

#[test]
fn test_interaction_graph_scenario() {
    let data = issues(json!([
        {
            "state": "open",
            "creator": "user1",
            "events": [
                { "event_type": "commented", "author": "user2" },
                { "event_type": "commented", "author": "user3" }
            ]
        },
        {
            "state": "open",
            "creator": "user2",
            "events": [{ "event_type": "commented", "author": "user1" }]
        }
    ]));

    let graph = build_interaction_graph(&data, None, None);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.edge_weight("user1", "user2"), Some(&2));
    assert_eq!(graph.edge_weight("user2", "user1"), Some(&2));
    assert_eq!(graph.edge_weight("user1", "user3"), Some(&1));
    assert_eq!(graph.edge_weight("user2", "user3"), Some(&1));

    let centrality = degree_centrality(&graph);
    assert_eq!(centrality.len(), 3);
    assert!(centrality.iter().all(|(_, score)| (*score - 1.0).abs() < f64::EPSILON));
    assert_eq!(centrality[0].0, "user1");
}

#[test]
fn test_interaction_filters() {
    let data = issues(json!([
        {
            "state": "open",
            "creator": "a",
            "labels": ["bug"],
            "events": [{ "event_type": "commented", "author": "b" }]
        },
        {
            "state": "open",
            "creator": "c",
            "labels": ["docs"],
            "events": [
                { "event_type": "commented", "author": "d" },
                { "event_type": "commented", "author": "a" }
            ]
        }
    ]));

    let bug_only = build_interaction_graph(&data, Some("bug"), None);
    assert_eq!(bug_only.node_count(), 2);
    assert!(bug_only.contains_edge("a", "b"));

    let with_d = build_interaction_graph(&data, None, Some("d"));
    assert_eq!(with_d.node_count(), 3);
    assert!(!with_d.contains_node("b"));

    let centrality = degree_centrality(&build_interaction_graph(&data, None, None));
    assert_eq!(centrality[0], ("a", 1.0));
    assert_eq!(centrality[1].0, "c");
    assert!((centrality[1].1 - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(build_interaction_graph(&data, Some("ui"), None).node_count(), 0);
}

#[test]
fn test_solo_issues_make_no_interactions() {
    let data = issues(json!([{ "state": "open", "creator": "lonely" }]));
    assert_eq!(build_interaction_graph(&data, None, None).node_count(), 0);
}
