// ABOUTME: Lap split conversion and target-distance matching for interval analysis
// ABOUTME: A lap matches a target when within 5% relative distance of it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use super::run_analysis::pace_seconds_per_mile;
use super::{format_pace, METERS_PER_MILE};
use crate::models::LapRecord;
use serde::Serialize;

/// Relative distance tolerance for target matching
const TARGET_TOLERANCE: f64 = 0.05;

/// Unit-converted view of one lap
#[derive(Debug, Clone, Serialize)]
pub struct LapSplit {
    /// 1-based lap index within the activity
    pub lap_index: u32,
    /// Lap distance in miles
    pub distance_miles: f64,
    /// Lap moving time in seconds
    pub moving_time_seconds: u64,
    /// Lap pace formatted `MM:SS`
    pub pace: String,
    /// Lap pace in seconds per mile
    pub pace_seconds: f64,
}

impl From<&LapRecord> for LapSplit {
    fn from(lap: &LapRecord) -> Self {
        let pace_seconds = pace_seconds_per_mile(lap.distance_meters, lap.moving_time_seconds);
        Self {
            lap_index: lap.lap_index,
            distance_miles: lap.distance_meters / METERS_PER_MILE,
            moving_time_seconds: lap.moving_time_seconds,
            pace: format_pace(pace_seconds),
            pace_seconds,
        }
    }
}

/// Convert a lap list to unit-converted splits, preserving lap order.
#[must_use]
pub fn analyze_laps(laps: &[LapRecord]) -> Vec<LapSplit> {
    laps.iter().map(LapSplit::from).collect()
}

/// Whether a lap's distance is within 5% of the target distance.
#[must_use]
pub fn lap_matches_target(lap: &LapRecord, target_distance_miles: f64) -> bool {
    if target_distance_miles <= 0.0 {
        return false;
    }
    let lap_miles = lap.distance_meters / METERS_PER_MILE;
    ((lap_miles - target_distance_miles) / target_distance_miles).abs() <= TARGET_TOLERANCE
}
