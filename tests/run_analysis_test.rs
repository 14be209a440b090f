// ABOUTME: End-to-end analytics checks over the acceptance scenario and derived stats
// ABOUTME: Covers pace ranking, time-of-day placement, gaps, load, and double days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

mod common;

use stride_insights::intelligence::{
    analyze_double_days, analyze_monthly_load, analyze_runs, analyze_time_of_day, detect_gaps,
    fastest_runs, DayPeriod,
};
use stride_insights::models::SportType;

use common::{activity, scenario_activities};

#[test]
fn test_scenario_fastest_run_has_lower_pace_seconds() {
    let runs = analyze_runs(&scenario_activities());
    assert_eq!(runs.len(), 2, "both activities qualify as runs");

    let ranked = fastest_runs(&runs, 1.0, 1);
    assert_eq!(ranked.len(), 1);
    let best = &ranked[0];

    // 360 s over ~1 mile beats 900 s over ~2 miles (~450 s/mile)
    assert_eq!(best.run.id, "one-mile");
    assert!(best.run.pace_seconds < 365.0);
    let other = runs
        .iter()
        .find(|r| r.id == "two-mile")
        .expect("second run analyzed");
    assert!(other.pace_seconds > 445.0 && other.pace_seconds < 455.0);
    assert!(best.run.pace_seconds < other.pace_seconds);
}

#[test]
fn test_scenario_time_of_day_placement() {
    let runs = analyze_runs(&scenario_activities());
    let buckets = analyze_time_of_day(&runs);

    let early = buckets
        .iter()
        .find(|b| b.period == DayPeriod::EarlyMorning)
        .expect("bucket present");
    assert_eq!(early.count, 1, "07:00 run lands in early morning");

    let evening = buckets
        .iter()
        .find(|b| b.period == DayPeriod::Evening)
        .expect("bucket present");
    assert_eq!(evening.count, 1, "18:00 run lands in evening");
}

#[test]
fn test_gap_detection_across_twenty_days() {
    let records = vec![
        activity("before", SportType::Run, (2024, 2, 1), 7, 5_000.0, 1_500),
        activity("after", SportType::Run, (2024, 2, 21), 7, 5_000.0, 1_450),
    ];
    let runs = analyze_runs(&records);
    let gaps = detect_gaps(&runs, 14);
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].days_off, 20);
    assert!(gaps[0].pace_delta_seconds < 0.0, "faster after the break");
}

#[test]
fn test_monthly_load_flags_jump() {
    let records = vec![
        activity("a", SportType::Run, (2024, 1, 10), 7, 10_000.0, 3_000),
        activity("b", SportType::Run, (2024, 2, 10), 7, 10_000.0, 3_000),
        activity("c", SportType::Run, (2024, 2, 20), 7, 10_000.0, 3_000),
    ];
    let runs = analyze_runs(&records);
    let load = analyze_monthly_load(&runs);
    assert_eq!(load.months.len(), 2);
    assert!(load.months[1].flagged, "February doubled January's mileage");
    assert_eq!(load.ramp_ups.len(), 1);
}

#[test]
fn test_double_day_detection_and_subsequent_day() {
    let records = vec![
        activity("am", SportType::Run, (2024, 3, 4), 6, 5_000.0, 1_500),
        activity("noon", SportType::Run, (2024, 3, 4), 12, 4_000.0, 1_200),
        activity("pm", SportType::Run, (2024, 3, 4), 18, 6_000.0, 1_800),
        activity("next", SportType::Run, (2024, 3, 5), 7, 5_000.0, 1_550),
        activity("ordinary", SportType::Run, (2024, 3, 12), 7, 5_000.0, 1_480),
    ];
    let runs = analyze_runs(&records);
    let analysis = analyze_double_days(&runs);

    assert_eq!(analysis.count, 1, "three same-day runs are one double day");
    assert_eq!(analysis.double_days[0].run_count, 3);

    let subsequent = analysis.subsequent_day.expect("comparison available");
    assert_eq!(subsequent.subsequent_run_count, 1);
    assert_eq!(
        subsequent.baseline_run_count, 1,
        "only the ordinary run is baseline; the next-day run is excluded"
    );
}

#[test]
fn test_qualification_is_order_independent() {
    let mut records = vec![
        activity("run", SportType::Run, (2024, 1, 1), 7, 5_000.0, 1_500),
        activity("short", SportType::Run, (2024, 1, 2), 7, 800.0, 300),
        activity("brief", SportType::Run, (2024, 1, 3), 7, 5_000.0, 180),
        activity("walk", SportType::Walk, (2024, 1, 4), 7, 5_000.0, 3_600),
    ];
    let forward = analyze_runs(&records);
    records.reverse();
    let backward = analyze_runs(&records);

    assert_eq!(forward.len(), 1);
    assert_eq!(backward.len(), 1);
    assert_eq!(forward[0].id, backward[0].id);
}
