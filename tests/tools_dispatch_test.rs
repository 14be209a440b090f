// ABOUTME: Integration tests for the tool registry and dispatch boundary
// ABOUTME: Valid calls, validation failures, unknown tools, and lap partial failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

mod common;

use serde_json::{json, Value};
use std::sync::Arc;

use stride_insights::cache::RangeCache;
use stride_insights::config::{AnalyticsConfig, CacheSettings};
use stride_insights::models::{LapRecord, SportType};
use stride_insights::providers::FixtureSource;
use stride_insights::tools::{ToolExecutionContext, ToolRegistry};

use common::{activity, context_for, scenario_activities};

fn parse_payload(text: &str) -> Value {
    serde_json::from_str(text).expect("tool payload is JSON")
}

#[tokio::test]
async fn test_fastest_runs_payload_carries_ranks() {
    let (_, context) = context_for(scenario_activities());
    let registry = ToolRegistry::with_builtin_tools();

    let response = registry
        .call("get_fastest_runs", json!({"limit": 2}), &context)
        .await;
    assert!(!response.is_error());

    let payload = parse_payload(response.text().expect("text content"));
    let runs = payload["runs"].as_array().expect("runs array");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0]["rank"], 1);
    assert_eq!(runs[1]["rank"], 2);
    assert_eq!(runs[0]["id"], "one-mile");
    assert!(payload["summary"].as_str().expect("summary").len() > 10);
}

#[tokio::test]
async fn test_invalid_month_returns_error_payload_naming_field() {
    let (_, context) = context_for(scenario_activities());
    let registry = ToolRegistry::with_builtin_tools();

    let response = registry
        .call("get_recent_runs", json!({"year": 2024, "month": 13}), &context)
        .await;
    assert!(response.is_error());

    let payload = parse_payload(response.text().expect("text content"));
    assert_eq!(payload["tool"], "get_recent_runs");
    assert_eq!(payload["arguments"]["month"], 13);
    assert!(payload["error"]
        .as_str()
        .expect("error string")
        .contains("'month'"));
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let (_, context) = context_for(scenario_activities());
    let registry = ToolRegistry::with_builtin_tools();

    let response = registry.call("analyze_activity_laps", json!({}), &context).await;
    assert!(response.is_error());
    let payload = parse_payload(response.text().expect("text content"));
    assert!(payload["error"]
        .as_str()
        .expect("error string")
        .contains("'activity_id'"));
}

#[tokio::test]
async fn test_unknown_tool_is_an_error_payload_not_a_crash() {
    let (_, context) = context_for(scenario_activities());
    let registry = ToolRegistry::with_builtin_tools();

    let response = registry.call("no_such_tool", json!({}), &context).await;
    assert!(response.is_error());
    let payload = parse_payload(response.text().expect("text content"));
    assert_eq!(payload["tool"], "no_such_tool");
}

#[tokio::test]
async fn test_before_after_override_year_month_in_dispatch() {
    let (_, context) = context_for(vec![
        activity("early", SportType::Run, (2024, 1, 5), 7, 5_000.0, 1_500),
        activity("late", SportType::Run, (2024, 6, 5), 7, 5_000.0, 1_500),
    ]);
    let registry = ToolRegistry::with_builtin_tools();

    // year says 2024, but before narrows to January only
    let response = registry
        .call(
            "get_recent_runs",
            json!({"year": 2024, "before": "2024-02-01"}),
            &context,
        )
        .await;
    let payload = parse_payload(response.text().expect("text content"));
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["runs"][0]["id"], "early");
}

#[tokio::test]
async fn test_target_lap_partial_failure_is_isolated() {
    // Two qualifying runs, laps attached to only one of them
    let source = Arc::new(
        FixtureSource::new(vec![
            activity("with-laps", SportType::Run, (2024, 4, 2), 7, 8_000.0, 2_400),
            activity("no-laps", SportType::Run, (2024, 4, 1), 7, 8_000.0, 2_400),
        ])
        .with_laps(
            "with-laps",
            vec![
                LapRecord {
                    lap_index: 1,
                    distance_meters: 1_609.0,
                    moving_time_seconds: 420,
                    average_speed: None,
                },
                LapRecord {
                    lap_index: 2,
                    distance_meters: 1_610.0,
                    moving_time_seconds: 405,
                    average_speed: None,
                },
                LapRecord {
                    lap_index: 3,
                    distance_meters: 800.0,
                    moving_time_seconds: 200,
                    average_speed: None,
                },
            ],
        ),
    );
    let cache = Arc::new(RangeCache::new(&CacheSettings::default()));
    let context = ToolExecutionContext::new(source, cache, AnalyticsConfig::default());
    let registry = ToolRegistry::with_builtin_tools();

    let response = registry
        .call(
            "find_target_laps",
            json!({"target_distance_miles": 1.0}),
            &context,
        )
        .await;
    assert!(!response.is_error(), "one failed lap fetch is not fatal");

    let payload = parse_payload(response.text().expect("text content"));
    assert_eq!(payload["activities_scanned"], 1);
    assert_eq!(payload["activities_failed"], 1);
    let matches = payload["matching_laps"].as_array().expect("laps array");
    assert_eq!(matches.len(), 2, "the 800 m lap is outside 5% of a mile");
    // Sorted fastest first
    assert_eq!(matches[0]["lap_index"], 2);
}

#[tokio::test]
async fn test_analyze_activity_laps_round_trip() {
    let source = Arc::new(
        FixtureSource::new(vec![activity(
            "workout",
            SportType::Run,
            (2024, 4, 2),
            7,
            8_000.0,
            2_400,
        )])
        .with_laps(
            "workout",
            vec![LapRecord {
                lap_index: 1,
                distance_meters: 1_609.344,
                moving_time_seconds: 360,
                average_speed: None,
            }],
        ),
    );
    let cache = Arc::new(RangeCache::new(&CacheSettings::default()));
    let context = ToolExecutionContext::new(source, cache, AnalyticsConfig::default());
    let registry = ToolRegistry::with_builtin_tools();

    let response = registry
        .call("analyze_activity_laps", json!({"activity_id": "workout"}), &context)
        .await;
    let payload = parse_payload(response.text().expect("text content"));
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["laps"][0]["pace"], "6:00");
}
