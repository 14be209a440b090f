// ABOUTME: Domain models for activity records, sport types, and per-activity laps
// ABOUTME: Records are owned by the activity source and never mutated downstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Domain Models
//!
//! Shared data structures exchanged between the activity source, the range
//! cache, and the analytics pipeline. An [`ActivityRecord`] is immutable once
//! fetched; downstream layers borrow it and derive their own views.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Type of sport/activity as reported by the tracking source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    /// Outdoor running activity
    Run,
    /// Trail running activity
    TrailRun,
    /// Treadmill/indoor running activity
    VirtualRun,
    /// Walking activity
    Walk,
    /// Hiking activity
    Hike,
    /// Cycling activity
    Ride,
    /// Indoor/trainer cycling activity
    VirtualRide,
    /// Swimming activity
    Swim,
    /// Any other activity type reported by the source
    Other(String),
}

impl SportType {
    /// True for the run variants the analytics pipeline accepts
    #[must_use]
    pub const fn is_run_like(&self) -> bool {
        matches!(self, Self::Run | Self::TrailRun | Self::VirtualRun)
    }

    /// Provider-facing string form (e.g. "`trail_run`")
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Run => "run",
            Self::TrailRun => "trail_run",
            Self::VirtualRun => "virtual_run",
            Self::Walk => "walk",
            Self::Hike => "hike",
            Self::Ride => "ride",
            Self::VirtualRide => "virtual_ride",
            Self::Swim => "swim",
            Self::Other(name) => name,
        }
    }
}

/// One tracked workout as returned by the activity source.
///
/// Timestamps are the athlete's local time; the time-of-day and calendar
/// groupings downstream depend on that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Source-assigned identifier
    pub id: String,
    /// Display name/title
    pub name: String,
    /// Start timestamp in the athlete's local time
    pub start_date_local: NaiveDateTime,
    /// Total distance covered in meters
    pub distance_meters: f64,
    /// Moving time in seconds
    pub moving_time_seconds: u64,
    /// Total elevation gained in meters
    pub elevation_gain_meters: f64,
    /// Average speed in meters per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed: Option<f64>,
    /// Maximum speed reached in meters per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    /// Average heart rate during the activity (BPM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
    /// Sport/activity type tag
    pub sport_type: SportType,
    /// Visibility flag from the source
    #[serde(default)]
    pub is_private: bool,
    /// Whether the activity was manually entered rather than recorded
    #[serde(default)]
    pub is_manual: bool,
}

impl ActivityRecord {
    /// Local calendar date of the activity start
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.start_date_local.date()
    }
}

/// One lap split within an activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapRecord {
    /// 1-based lap index within the activity
    pub lap_index: u32,
    /// Lap distance in meters
    pub distance_meters: f64,
    /// Lap moving time in seconds
    pub moving_time_seconds: u64,
    /// Average speed for the lap in meters per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed: Option<f64>,
}
