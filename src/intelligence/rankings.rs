// ABOUTME: Fastest-N and longest-N run rankings with stable tie handling
// ABOUTME: Ranked payloads carry a 1-based rank field for LLM consumption
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use super::{RunAnalysis, METERS_PER_MILE, MIN_RUN_DISTANCE_METERS};
use serde::Serialize;

// Qualification accepts 1609 raw meters as a mile, so the ranking filter
// softens each requested mile by the same ratio; otherwise a logged 1609 m
// mile would qualify as a run yet never rank.
const MILE_FLOOR_RATIO: f64 = MIN_RUN_DISTANCE_METERS / METERS_PER_MILE;

/// A run with its 1-based position in a ranking
#[derive(Debug, Clone, Serialize)]
pub struct RankedRun {
    /// 1-based rank within the requested ordering
    pub rank: usize,
    /// The ranked run
    #[serde(flatten)]
    pub run: RunAnalysis,
}

/// Fastest runs by ascending pace, after dropping runs shorter than
/// `min_distance_miles`. Equal paces keep their input order.
#[must_use]
pub fn fastest_runs(
    runs: &[RunAnalysis],
    min_distance_miles: f64,
    limit: usize,
) -> Vec<RankedRun> {
    let mut eligible: Vec<RunAnalysis> = runs
        .iter()
        .filter(|r| r.distance_miles >= min_distance_miles * MILE_FLOOR_RATIO)
        .cloned()
        .collect();
    // Stable sort keeps input-relative order for equal keys
    eligible.sort_by(|a, b| a.pace_seconds.total_cmp(&b.pace_seconds));
    rank(eligible, limit)
}

/// Longest runs by descending distance. Equal distances keep their input
/// order.
#[must_use]
pub fn longest_runs(runs: &[RunAnalysis], limit: usize) -> Vec<RankedRun> {
    let mut sorted: Vec<RunAnalysis> = runs.to_vec();
    sorted.sort_by(|a, b| b.distance_miles.total_cmp(&a.distance_miles));
    rank(sorted, limit)
}

fn rank(runs: Vec<RunAnalysis>, limit: usize) -> Vec<RankedRun> {
    runs.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, run)| RankedRun { rank: i + 1, run })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn run(id: &str, miles: f64, pace_seconds: f64) -> RunAnalysis {
        RunAnalysis {
            id: id.to_owned(),
            name: format!("run {id}"),
            start_date_local: NaiveDate::from_ymd_opt(2024, 1, 1)
                .expect("valid date")
                .and_hms_opt(7, 0, 0)
                .expect("valid time"),
            distance_miles: miles,
            duration_minutes: miles * pace_seconds / 60.0,
            pace: super::super::format_pace(pace_seconds),
            pace_seconds,
            elevation_gain_feet: 0.0,
            average_heart_rate: None,
        }
    }

    #[test]
    fn test_fastest_applies_distance_floor_before_ranking() {
        let runs = vec![run("sprint", 0.5, 300.0), run("five-k", 3.1, 420.0)];
        let ranked = fastest_runs(&runs, 1.0, 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].run.id, "five-k");
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_logged_mile_still_ranks_at_one_mile_floor() {
        // 1609 raw meters converts to just under 1.0 miles
        let runs = vec![run("logged-mile", 1_609.0 / METERS_PER_MILE, 360.0)];
        let ranked = fastest_runs(&runs, 1.0, 5);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let runs = vec![run("a", 5.0, 400.0), run("b", 5.0, 400.0), run("c", 5.0, 390.0)];
        let ranked = fastest_runs(&runs, 1.0, 5);
        assert_eq!(ranked[0].run.id, "c");
        assert_eq!(ranked[1].run.id, "a");
        assert_eq!(ranked[2].run.id, "b");

        let longest = longest_runs(&runs, 5);
        assert_eq!(longest[0].run.id, "a");
        assert_eq!(longest[1].run.id, "b");
    }

    #[test]
    fn test_limit_and_rank_numbering() {
        let runs = vec![
            run("a", 3.0, 500.0),
            run("b", 6.0, 480.0),
            run("c", 10.0, 520.0),
        ];
        let longest = longest_runs(&runs, 2);
        assert_eq!(longest.len(), 2);
        assert_eq!(longest[0].rank, 1);
        assert_eq!(longest[0].run.id, "c");
        assert_eq!(longest[1].rank, 2);
        assert_eq!(longest[1].run.id, "b");
    }
}
