// ABOUTME: Detects training gaps between consecutive runs and describes the comeback
// ABOUTME: Reports pace and distance deltas across each gap; negative pace delta = faster after
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use super::RunAnalysis;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Distance changes smaller than this are not worth mentioning
const DISTANCE_MENTION_THRESHOLD_PCT: f64 = 10.0;

/// One endpoint of a gap
#[derive(Debug, Clone, Serialize)]
pub struct GapEndpoint {
    /// Activity id
    pub id: String,
    /// Activity title
    pub name: String,
    /// Local start timestamp
    pub start_date_local: NaiveDateTime,
    /// Distance in miles
    pub distance_miles: f64,
    /// Pace formatted `MM:SS`
    pub pace: String,
    /// Pace in seconds per mile
    pub pace_seconds: f64,
}

impl From<&RunAnalysis> for GapEndpoint {
    fn from(run: &RunAnalysis) -> Self {
        Self {
            id: run.id.clone(),
            name: run.name.clone(),
            start_date_local: run.start_date_local,
            distance_miles: run.distance_miles,
            pace: run.pace.clone(),
            pace_seconds: run.pace_seconds,
        }
    }
}

/// A break between two consecutive runs
#[derive(Debug, Clone, Serialize)]
pub struct ActivityGap {
    /// Calendar days between the two runs
    pub days_off: i64,
    /// Last run before the break
    pub before_run: GapEndpoint,
    /// First run after the break
    pub after_run: GapEndpoint,
    /// Pace change in seconds per mile; negative means faster after the gap
    pub pace_delta_seconds: f64,
    /// Distance change as a percentage of the pre-gap run
    pub distance_change_pct: f64,
    /// Natural-language description of the comeback
    pub description: String,
}

/// Find gaps of at least `min_gap_days` between consecutive runs.
///
/// Input order does not matter; runs are sorted ascending by date before
/// pairing.
#[must_use]
pub fn detect_gaps(runs: &[RunAnalysis], min_gap_days: i64) -> Vec<ActivityGap> {
    let mut ordered: Vec<&RunAnalysis> = runs.iter().collect();
    ordered.sort_by(|a, b| a.start_date_local.cmp(&b.start_date_local));

    ordered
        .windows(2)
        .filter_map(|pair| {
            let (before, after) = (pair[0], pair[1]);
            let days_off =
                (after.start_date_local.date() - before.start_date_local.date()).num_days();
            if days_off < min_gap_days {
                return None;
            }
            let pace_delta_seconds = after.pace_seconds - before.pace_seconds;
            let distance_change_pct = if before.distance_miles > 0.0 {
                (after.distance_miles - before.distance_miles) / before.distance_miles * 100.0
            } else {
                0.0
            };
            let description = describe_gap(days_off, pace_delta_seconds, distance_change_pct);
            Some(ActivityGap {
                days_off,
                before_run: GapEndpoint::from(before),
                after_run: GapEndpoint::from(after),
                pace_delta_seconds,
                distance_change_pct,
                description,
            })
        })
        .collect()
}

fn describe_gap(days_off: i64, pace_delta_seconds: f64, distance_change_pct: f64) -> String {
    let pace_clause = if pace_delta_seconds < 0.0 {
        format!(
            "came back {:.0} sec/mile faster",
            pace_delta_seconds.abs()
        )
    } else if pace_delta_seconds > 0.0 {
        format!("came back {pace_delta_seconds:.0} sec/mile slower")
    } else {
        "came back at the same pace".to_owned()
    };

    let mut description = format!("Took {days_off} days off and {pace_clause}");
    if distance_change_pct.abs() > DISTANCE_MENTION_THRESHOLD_PCT {
        let direction = if distance_change_pct > 0.0 { "longer" } else { "shorter" };
        description.push_str(&format!(
            ", with a {:.0}% {direction} first run back",
            distance_change_pct.abs()
        ));
    }
    description.push('.');
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn run(id: &str, date: (i32, u32, u32), miles: f64, pace_seconds: f64) -> RunAnalysis {
        RunAnalysis {
            id: id.to_owned(),
            name: format!("run {id}"),
            start_date_local: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
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
    fn test_twenty_day_gap_reported_once() {
        let runs = vec![
            run("a", (2024, 1, 1), 3.0, 480.0),
            run("b", (2024, 1, 21), 3.0, 470.0),
            run("c", (2024, 1, 23), 3.0, 465.0),
        ];
        let gaps = detect_gaps(&runs, 14);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].days_off, 20);
        assert_eq!(gaps[0].before_run.id, "a");
        assert_eq!(gaps[0].after_run.id, "b");
    }

    #[test]
    fn test_detection_ignores_input_order() {
        let runs = vec![
            run("b", (2024, 1, 21), 3.0, 470.0),
            run("a", (2024, 1, 1), 3.0, 480.0),
        ];
        let gaps = detect_gaps(&runs, 14);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].before_run.id, "a");
    }

    #[test]
    fn test_pace_delta_sign_and_description() {
        let runs = vec![
            run("a", (2024, 1, 1), 3.0, 480.0),
            run("b", (2024, 2, 1), 3.1, 460.0),
        ];
        let gaps = detect_gaps(&runs, 14);
        assert!((gaps[0].pace_delta_seconds - -20.0).abs() < 1e-9);
        assert!(gaps[0].description.contains("faster"));
        // 3.3% distance change stays below the mention threshold
        assert!(!gaps[0].description.contains('%'));
    }

    #[test]
    fn test_large_distance_change_is_mentioned() {
        let runs = vec![
            run("a", (2024, 1, 1), 6.0, 480.0),
            run("b", (2024, 2, 1), 3.0, 500.0),
        ];
        let gaps = detect_gaps(&runs, 14);
        assert!(gaps[0].description.contains("50% shorter"));
    }

    #[test]
    fn test_below_threshold_gap_not_reported() {
        let runs = vec![
            run("a", (2024, 1, 1), 3.0, 480.0),
            run("b", (2024, 1, 10), 3.0, 480.0),
        ];
        assert!(detect_gaps(&runs, 14).is_empty());
    }
}
