// ABOUTME: Day-of-week distribution, consistency percentages, and runner classification
// ABOUTME: Availability uses the original fixed 5-weekday/2-weekend approximation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Day-of-Week Analysis
//!
//! Groups runs by weekday and derives a "consistency" percentage: runs on a
//! day divided by the day's available occurrences across the observed span.
//! Availability is `ceil(span_days / 7)` weeks times a fixed multiplier —
//! 5 for weekdays, 2 for weekend days. This mirrors the upstream formula
//! rather than counting exact weekday occurrences; see DESIGN.md.

use super::{format_pace, RunAnalysis};
use chrono::{Datelike, Weekday};
use serde::Serialize;

/// Threshold below which the weekday/weekend run ratio marks a weekend runner
const WEEKEND_RUNNER_RATIO: f64 = 0.8;

/// Fixed weekday iteration order (also the tie-break order)
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Aggregates for one weekday
#[derive(Debug, Clone, Serialize)]
pub struct WeekdayStats {
    /// Weekday name ("Monday" .. "Sunday")
    pub weekday: String,
    /// Runs on this weekday
    pub count: usize,
    /// Total miles on this weekday
    pub total_distance_miles: f64,
    /// Mean miles per run (0 when empty)
    pub average_distance_miles: f64,
    /// Mean pace in seconds per mile (0 when empty)
    pub average_pace_seconds: f64,
    /// Mean pace formatted `MM:SS`
    pub average_pace: String,
    /// Runs divided by available occurrences, as a percentage
    pub consistency_pct: f64,
}

/// Full day-of-week report
#[derive(Debug, Clone, Serialize)]
pub struct WeekdayAnalysis {
    /// Per-day stats, Monday through Sunday
    pub per_day: Vec<WeekdayStats>,
    /// Top three weekdays by run count
    pub preferred_days: Vec<String>,
    /// Weekday with the highest consistency (first wins ties)
    pub most_consistent: Option<String>,
    /// Weekday with the lowest run count (first wins ties)
    pub least_active: Option<String>,
    /// Runs on Monday-Friday
    pub weekday_runs: usize,
    /// Runs on Saturday/Sunday
    pub weekend_runs: usize,
    /// Consistency across all weekdays as a group
    pub weekday_consistency_pct: f64,
    /// Consistency across the weekend as a group
    pub weekend_consistency_pct: f64,
    /// Either "`weekend_runner`" or "`weekday_runner`"
    pub runner_type: String,
    /// One-sentence natural-language summary
    pub summary: String,
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

const fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Weeks covered by the observed span, never less than one
fn observed_weeks(runs: &[RunAnalysis]) -> i64 {
    let Some(min) = runs.iter().map(|r| r.start_date_local.date()).min() else {
        return 1;
    };
    let Some(max) = runs.iter().map(|r| r.start_date_local.date()).max() else {
        return 1;
    };
    let span_days = (max - min).num_days() + 1;
    ((span_days + 6) / 7).max(1)
}

/// Analyze the weekday distribution of a run list.
#[must_use]
pub fn analyze_weekdays(runs: &[RunAnalysis]) -> WeekdayAnalysis {
    let weeks = observed_weeks(runs);

    let per_day: Vec<WeekdayStats> = WEEK
        .iter()
        .map(|&day| {
            let members: Vec<&RunAnalysis> = runs
                .iter()
                .filter(|r| r.start_date_local.date().weekday() == day)
                .collect();
            let count = members.len();
            let total_distance_miles: f64 = members.iter().map(|r| r.distance_miles).sum();
            let average_distance_miles = if count == 0 {
                0.0
            } else {
                total_distance_miles / count as f64
            };
            let average_pace_seconds = if count == 0 {
                0.0
            } else {
                members.iter().map(|r| r.pace_seconds).sum::<f64>() / count as f64
            };
            let multiplier: i64 = if is_weekend(day) { 2 } else { 5 };
            let available = (weeks * multiplier) as f64;
            let consistency_pct = if available > 0.0 {
                count as f64 / available * 100.0
            } else {
                0.0
            };
            WeekdayStats {
                weekday: weekday_name(day).to_owned(),
                count,
                total_distance_miles,
                average_distance_miles,
                average_pace_seconds,
                average_pace: format_pace(average_pace_seconds),
                consistency_pct,
            }
        })
        .collect();

    let weekday_runs: usize = per_day.iter().take(5).map(|d| d.count).sum();
    let weekend_runs: usize = per_day.iter().skip(5).map(|d| d.count).sum();

    let weekday_available = (weeks * 5) as f64;
    let weekend_available = (weeks * 2) as f64;
    let weekday_consistency_pct = weekday_runs as f64 / weekday_available * 100.0;
    let weekend_consistency_pct = weekend_runs as f64 / weekend_available * 100.0;

    let mut preferred: Vec<&WeekdayStats> = per_day.iter().collect();
    preferred.sort_by(|a, b| b.count.cmp(&a.count));
    let preferred_days: Vec<String> = preferred
        .iter()
        .take(3)
        .filter(|d| d.count > 0)
        .map(|d| d.weekday.clone())
        .collect();

    // reduce-style extrema: the first strict winner keeps the slot on ties
    let most_consistent = per_day
        .iter()
        .filter(|d| d.count > 0)
        .fold(None::<&WeekdayStats>, |best, d| match best {
            Some(b) if d.consistency_pct > b.consistency_pct => Some(d),
            Some(b) => Some(b),
            None => Some(d),
        })
        .map(|d| d.weekday.clone());
    let least_active = per_day
        .iter()
        .fold(None::<&WeekdayStats>, |worst, d| match worst {
            Some(w) if d.count < w.count => Some(d),
            Some(w) => Some(w),
            None => Some(d),
        })
        .map(|d| d.weekday.clone());

    let runner_type = classify_runner(weekday_runs, weekend_runs);

    let summary = format!(
        "{} runs across {} weeks: {} on weekdays, {} on weekends ({}).",
        runs.len(),
        weeks,
        weekday_runs,
        weekend_runs,
        runner_type.replace('_', " "),
    );

    WeekdayAnalysis {
        per_day,
        preferred_days,
        most_consistent,
        least_active,
        weekday_runs,
        weekend_runs,
        weekday_consistency_pct,
        weekend_consistency_pct,
        runner_type: runner_type.to_owned(),
        summary,
    }
}

/// Weekend runner iff the normalized weekday/weekend ratio falls below 0.8.
/// Zero weekend runs can never make a weekend runner; zero weekday runs with
/// any weekend running always does.
fn classify_runner(weekday_runs: usize, weekend_runs: usize) -> &'static str {
    if weekend_runs == 0 {
        return "weekday_runner";
    }
    let ratio = (weekday_runs as f64 / 5.0) / (weekend_runs as f64 / 2.0);
    if ratio < WEEKEND_RUNNER_RATIO {
        "weekend_runner"
    } else {
        "weekday_runner"
    }
}
