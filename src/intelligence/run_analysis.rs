// ABOUTME: Run qualification, unit conversion, and pace computation/formatting
// ABOUTME: Produces the RunAnalysis view every other derivation consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Run Analysis
//!
//! Filters activity records down to qualifying runs and converts units:
//! miles, minutes, and pace as both seconds-per-mile and an `MM:SS` string.
//! Records that do not qualify are dropped, never zero-filled.

use super::{FEET_PER_METER, METERS_PER_MILE, MIN_RUN_DISTANCE_METERS, MIN_RUN_DURATION_SECONDS};
use crate::models::ActivityRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unit-converted view of one qualifying run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAnalysis {
    /// Source activity id
    pub id: String,
    /// Activity title
    pub name: String,
    /// Local start timestamp
    pub start_date_local: NaiveDateTime,
    /// Distance in statute miles
    pub distance_miles: f64,
    /// Moving time in minutes
    pub duration_minutes: f64,
    /// Pace formatted `MM:SS` per mile
    pub pace: String,
    /// Pace in seconds per mile
    pub pace_seconds: f64,
    /// Elevation gain in feet
    pub elevation_gain_feet: f64,
    /// Average heart rate if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
}

/// Whether a record qualifies as a run: run-like type, at least four minutes
/// moving, at least one mile covered.
#[must_use]
pub fn qualifies_as_run(record: &ActivityRecord) -> bool {
    record.sport_type.is_run_like()
        && record.moving_time_seconds >= MIN_RUN_DURATION_SECONDS
        && record.distance_meters >= MIN_RUN_DISTANCE_METERS
}

/// Pace in seconds per mile. Zero or negative distance yields `0.0` rather
/// than a non-finite value.
#[must_use]
pub fn pace_seconds_per_mile(distance_meters: f64, moving_time_seconds: u64) -> f64 {
    let miles = distance_meters / METERS_PER_MILE;
    if miles <= 0.0 {
        return 0.0;
    }
    moving_time_seconds as f64 / miles
}

/// Format a pace in seconds per mile as `MM:SS`.
///
/// Seconds round to the nearest integer; a rounded 60 rolls into the next
/// minute, so the seconds component is always in `[0, 59]`.
#[must_use]
pub fn format_pace(pace_seconds: f64) -> String {
    if !pace_seconds.is_finite() || pace_seconds <= 0.0 {
        return "0:00".to_owned();
    }
    let mut minutes = (pace_seconds / 60.0).floor() as u64;
    let mut seconds = (pace_seconds - (minutes as f64) * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{minutes}:{seconds:02}")
}

/// Convert one qualifying record. Returns `None` when it does not qualify.
#[must_use]
pub fn analyze_run(record: &ActivityRecord) -> Option<RunAnalysis> {
    if !qualifies_as_run(record) {
        return None;
    }
    let pace_seconds = pace_seconds_per_mile(record.distance_meters, record.moving_time_seconds);
    Some(RunAnalysis {
        id: record.id.clone(),
        name: record.name.clone(),
        start_date_local: record.start_date_local,
        distance_miles: record.distance_meters / METERS_PER_MILE,
        duration_minutes: record.moving_time_seconds as f64 / 60.0,
        pace: format_pace(pace_seconds),
        pace_seconds,
        elevation_gain_feet: record.elevation_gain_meters * FEET_PER_METER,
        average_heart_rate: record.average_heart_rate,
    })
}

/// Filter and convert a record list, newest first.
#[must_use]
pub fn analyze_runs(records: &[ActivityRecord]) -> Vec<RunAnalysis> {
    let mut runs: Vec<RunAnalysis> = records.iter().filter_map(analyze_run).collect();
    runs.sort_by(|a, b| b.start_date_local.cmp(&a.start_date_local));
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SportType;
    use chrono::NaiveDate;

    fn record(sport: SportType, meters: f64, seconds: u64) -> ActivityRecord {
        ActivityRecord {
            id: "1".to_owned(),
            name: "test".to_owned(),
            start_date_local: NaiveDate::from_ymd_opt(2024, 1, 1)
                .expect("valid date")
                .and_hms_opt(7, 0, 0)
                .expect("valid time"),
            distance_meters: meters,
            moving_time_seconds: seconds,
            elevation_gain_meters: 10.0,
            average_speed: None,
            max_speed: None,
            average_heart_rate: None,
            sport_type: sport,
            is_private: false,
            is_manual: false,
        }
    }

    #[test]
    fn test_qualification_thresholds() {
        assert!(qualifies_as_run(&record(SportType::Run, 1_609.0, 360)));
        assert!(qualifies_as_run(&record(SportType::TrailRun, 5_000.0, 1_500)));
        // Too short in time
        assert!(!qualifies_as_run(&record(SportType::Run, 2_000.0, 239)));
        // Too short in distance
        assert!(!qualifies_as_run(&record(SportType::Run, 1_500.0, 600)));
        // Wrong type
        assert!(!qualifies_as_run(&record(SportType::Walk, 5_000.0, 3_000)));
    }

    #[test]
    fn test_disqualified_records_are_dropped_not_zero_filled() {
        let records = vec![
            record(SportType::Run, 5_000.0, 1_500),
            record(SportType::Ride, 20_000.0, 3_600),
            record(SportType::Run, 100.0, 60),
        ];
        let runs = analyze_runs(&records);
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn test_pace_formatting_rollover() {
        // 359.6 s/mi -> rounds to 6:00, not 5:60
        assert_eq!(format_pace(359.6), "6:00");
        assert_eq!(format_pace(359.4), "5:59");
        assert_eq!(format_pace(360.0), "6:00");
        assert_eq!(format_pace(600.5), "10:01");
        assert_eq!(format_pace(0.0), "0:00");
        assert_eq!(format_pace(f64::NAN), "0:00");
    }

    #[test]
    fn test_seconds_component_always_in_range() {
        let mut pace = 150.0;
        while pace < 900.0 {
            let formatted = format_pace(pace);
            let (_, secs) = formatted.split_once(':').expect("has colon");
            let secs: u64 = secs.parse().expect("numeric seconds");
            assert!(secs <= 59, "pace {pace} formatted as {formatted}");
            pace += 0.37;
        }
    }

    #[test]
    fn test_ordering_is_descending_by_date() {
        let mut a = record(SportType::Run, 5_000.0, 1_500);
        a.id = "old".to_owned();
        let mut b = record(SportType::Run, 5_000.0, 1_500);
        b.id = "new".to_owned();
        b.start_date_local = NaiveDate::from_ymd_opt(2024, 6, 1)
            .expect("valid date")
            .and_hms_opt(7, 0, 0)
            .expect("valid time");

        let runs = analyze_runs(&[a, b]);
        assert_eq!(runs[0].id, "new");
        assert_eq!(runs[1].id, "old");
    }
}
