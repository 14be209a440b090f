// ABOUTME: Integration tests for the range cache against the fetch layer
// ABOUTME: Verifies superset serving prevents redundant upstream fetches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

mod common;

use chrono::NaiveDate;
use stride_insights::cache::{resolve_activities, ActivityQuery, RangeCache};
use stride_insights::config::CacheSettings;
use stride_insights::models::SportType;
use stride_insights::providers::FixtureSource;

use common::activity;

fn year_of_runs() -> Vec<stride_insights::models::ActivityRecord> {
    vec![
        activity("jan", SportType::Run, (2024, 1, 10), 7, 5_000.0, 1_500),
        activity("may-1", SportType::Run, (2024, 5, 5), 7, 8_000.0, 2_400),
        activity("may-2", SportType::Run, (2024, 5, 20), 18, 6_000.0, 1_800),
        activity("ride", SportType::Ride, (2024, 5, 21), 7, 20_000.0, 3_600),
        activity("dec", SportType::Run, (2024, 12, 1), 7, 10_000.0, 3_000),
    ]
}

#[tokio::test]
async fn test_all_time_fetch_then_bounded_query_hits_superset() {
    let source = FixtureSource::new(year_of_runs());
    let cache = RangeCache::new(&CacheSettings::default());

    // First resolve: all-time query goes upstream once
    let all = resolve_activities(&cache, &source, &ActivityQuery::default())
        .await
        .expect("resolve");
    assert_eq!(all.len(), 5);
    assert_eq!(source.fetch_count(), 1);

    // A date-bounded query inside the superset span is served in memory
    let may = ActivityQuery {
        year: Some(2024),
        month: Some(5),
        ..Default::default()
    };
    let may_records = resolve_activities(&cache, &source, &may)
        .await
        .expect("resolve");
    assert_eq!(may_records.len(), 3);
    assert_eq!(source.fetch_count(), 1, "no second upstream fetch");

    // Non-date filters also apply in memory against the superset
    let may_runs_only = ActivityQuery {
        year: Some(2024),
        month: Some(5),
        sport: Some(SportType::Run),
        ..Default::default()
    };
    let filtered = resolve_activities(&cache, &source, &may_runs_only)
        .await
        .expect("resolve");
    assert_eq!(filtered.len(), 2);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_bounded_query_without_superset_fetches_and_caches() {
    let source = FixtureSource::new(year_of_runs());
    let cache = RangeCache::new(&CacheSettings::default());

    let may = ActivityQuery {
        year: Some(2024),
        month: Some(5),
        ..Default::default()
    };
    let first = resolve_activities(&cache, &source, &may).await.expect("resolve");
    assert_eq!(first.len(), 3);
    assert_eq!(source.fetch_count(), 1);

    // Same fingerprint: exact-match entry answers, no new fetch
    let second = resolve_activities(&cache, &source, &may).await.expect("resolve");
    assert_eq!(second.len(), 3);
    assert!(first
        .iter()
        .zip(second.iter())
        .all(|(a, b)| a.id == b.id));
    assert_eq!(source.fetch_count(), 1);

    // A different window misses and fetches again
    let december = ActivityQuery {
        year: Some(2024),
        month: Some(12),
        ..Default::default()
    };
    let dec_records = resolve_activities(&cache, &source, &december)
        .await
        .expect("resolve");
    assert_eq!(dec_records.len(), 1);
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn test_epoch_floor_after_bound_counts_as_all_time() {
    let source = FixtureSource::new(year_of_runs());
    let cache = RangeCache::new(&CacheSettings::default());

    let floor_query = ActivityQuery {
        after: Some(NaiveDate::from_ymd_opt(1999, 1, 1).expect("valid date")),
        ..Default::default()
    };
    resolve_activities(&cache, &source, &floor_query)
        .await
        .expect("resolve");

    // The floor-bounded query installed the superset
    assert!(cache.has_superset().await);
    let bounded = ActivityQuery {
        year: Some(2024),
        month: Some(1),
        ..Default::default()
    };
    let records = resolve_activities(&cache, &source, &bounded)
        .await
        .expect("resolve");
    assert_eq!(records.len(), 1);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_clear_forces_refetch() {
    let source = FixtureSource::new(year_of_runs());
    let cache = RangeCache::new(&CacheSettings::default());

    resolve_activities(&cache, &source, &ActivityQuery::default())
        .await
        .expect("resolve");
    cache.clear().await;
    resolve_activities(&cache, &source, &ActivityQuery::default())
        .await
        .expect("resolve");
    assert_eq!(source.fetch_count(), 2);
}
