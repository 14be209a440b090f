// ABOUTME: In-memory activity source with deterministic data and fetch accounting
// ABOUTME: Backs the integration tests and credential-free local development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Fixture Activity Source
//!
//! Serves a fixed set of activity records and lap lists from memory. Fetches
//! are counted so tests can assert the range cache prevented a second trip
//! upstream.

use super::ActivitySource;
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityRecord, LapRecord, SportType};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic in-memory activity source
pub struct FixtureSource {
    activities: Vec<ActivityRecord>,
    laps: HashMap<String, Vec<LapRecord>>,
    fetches: AtomicUsize,
}

impl FixtureSource {
    /// Create a source over the given records
    #[must_use]
    pub fn new(activities: Vec<ActivityRecord>) -> Self {
        Self {
            activities,
            laps: HashMap::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Attach lap splits for an activity id
    #[must_use]
    pub fn with_laps(mut self, activity_id: impl Into<String>, laps: Vec<LapRecord>) -> Self {
        self.laps.insert(activity_id.into(), laps);
        self
    }

    /// Number of activity-list fetches served so far (lap fetches excluded)
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// A small season of training data: three runs a week across twelve
    /// weeks, with a mid-season break, a few double days, and one ride.
    #[must_use]
    pub fn season() -> Self {
        let mut activities = Vec::new();
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap_or_default();

        for week in 0..12_i64 {
            // Two-week break after week six
            if (6..8).contains(&week) {
                continue;
            }
            for (slot, weekday_offset) in [0_i64, 2, 5].iter().enumerate() {
                let date = start + Duration::days(week * 7 + weekday_offset);
                let hour = if slot == 2 { 8 } else { 6 + (week % 2) as u32 * 12 };
                let distance = 5_000.0 + 400.0 * week as f64 + 800.0 * slot as f64;
                let seconds = (distance / 3.2) as u64;
                activities.push(run_record(
                    format!("{}{:02}", week + 1, slot + 1),
                    format!("Week {} run {}", week + 1, slot + 1),
                    date,
                    hour,
                    distance,
                    seconds,
                ));
            }
        }

        // Double day in week ten
        let double_date = start + Duration::days(9 * 7 + 3);
        activities.push(run_record(
            "d1", "Morning shakeout", double_date, 6, 4_000.0, 1_300,
        ));
        activities.push(run_record(
            "d2", "Evening tempo", double_date, 18, 8_000.0, 2_300,
        ));

        // One non-run activity to exercise the filters
        activities.push(ActivityRecord {
            id: "r1".to_owned(),
            name: "Recovery spin".to_owned(),
            start_date_local: at(double_date + Duration::days(2), 7),
            distance_meters: 20_000.0,
            moving_time_seconds: 3_600,
            elevation_gain_meters: 120.0,
            average_speed: Some(5.5),
            max_speed: Some(12.0),
            average_heart_rate: Some(110.0),
            sport_type: SportType::Ride,
            is_private: false,
            is_manual: false,
        });

        let laps = vec![
            lap(1, 1_609.0, 420),
            lap(2, 1_609.0, 415),
            lap(3, 1_609.0, 430),
            lap(4, 800.0, 180),
        ];

        Self::new(activities).with_laps("d2", laps)
    }
}

fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 15, 0).unwrap_or_default()
}

fn run_record(
    id: impl Into<String>,
    name: impl Into<String>,
    date: NaiveDate,
    hour: u32,
    distance_meters: f64,
    moving_time_seconds: u64,
) -> ActivityRecord {
    ActivityRecord {
        id: id.into(),
        name: name.into(),
        start_date_local: at(date, hour),
        distance_meters,
        moving_time_seconds,
        elevation_gain_meters: distance_meters / 100.0,
        average_speed: Some(distance_meters / moving_time_seconds as f64),
        max_speed: None,
        average_heart_rate: Some(148.0),
        sport_type: SportType::Run,
        is_private: false,
        is_manual: false,
    }
}

fn lap(index: u32, distance_meters: f64, moving_time_seconds: u64) -> LapRecord {
    LapRecord {
        lap_index: index,
        distance_meters,
        moving_time_seconds,
        average_speed: Some(distance_meters / moving_time_seconds as f64),
    }
}

#[async_trait]
impl ActivitySource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_all_activities(&self) -> AppResult<Vec<ActivityRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.activities.clone())
    }

    async fn fetch_activities_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ActivityRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .activities
            .iter()
            .filter(|a| {
                let date = a.local_date();
                date >= start && date <= end
            })
            .cloned()
            .collect())
    }

    async fn fetch_activity_laps(&self, activity_id: &str) -> AppResult<Vec<LapRecord>> {
        self.laps
            .get(activity_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("laps for activity '{activity_id}'")))
    }
}
