// ABOUTME: Time-of-day distribution over five fixed local-hour windows
// ABOUTME: Night wraps around midnight: [21,24) joined with [0,4)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use super::{format_pace, RunAnalysis};
use chrono::Timelike;
use serde::Serialize;

/// The five fixed local-hour windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// [4, 8)
    EarlyMorning,
    /// [8, 12)
    Morning,
    /// [12, 17)
    Afternoon,
    /// [17, 21)
    Evening,
    /// [21, 24) and [0, 4)
    Night,
}

impl DayPeriod {
    /// All periods in display order
    pub const ALL: [Self; 5] = [
        Self::EarlyMorning,
        Self::Morning,
        Self::Afternoon,
        Self::Evening,
        Self::Night,
    ];

    /// Classify a local hour (0-23)
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            4..=7 => Self::EarlyMorning,
            8..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::EarlyMorning => "early morning",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

/// Aggregates for one time-of-day window
#[derive(Debug, Clone, Serialize)]
pub struct TimeOfDayBucket {
    /// Which window this is
    pub period: DayPeriod,
    /// Runs started in this window
    pub count: usize,
    /// Total miles in this window
    pub total_distance_miles: f64,
    /// Mean miles per run (0 when empty)
    pub average_distance_miles: f64,
    /// Mean pace in seconds per mile (0 when empty)
    pub average_pace_seconds: f64,
    /// Mean pace formatted `MM:SS`
    pub average_pace: String,
}

/// Bucket runs by local start hour. Always returns all five buckets in
/// display order; empty buckets carry zero counts, not absent keys.
#[must_use]
pub fn analyze_time_of_day(runs: &[RunAnalysis]) -> Vec<TimeOfDayBucket> {
    DayPeriod::ALL
        .iter()
        .map(|&period| {
            let members: Vec<&RunAnalysis> = runs
                .iter()
                .filter(|r| DayPeriod::from_hour(r.start_date_local.hour()) == period)
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
            TimeOfDayBucket {
                period,
                count,
                total_distance_miles,
                average_distance_miles,
                average_pace_seconds,
                average_pace: format_pace(average_pace_seconds),
            }
        })
        .collect()
}
