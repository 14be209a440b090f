// ABOUTME: Analytics pipeline turning raw activity records into derived run statistics
// ABOUTME: Pure, deterministic functions only; no I/O and no hidden state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Analytics Pipeline
//!
//! Pure functions from activity records to derived statistics. Each submodule
//! owns one family of derivations; all of them consume the [`RunAnalysis`]
//! view produced by [`run_analysis`]. Determinism is part of the contract:
//! the same input list always yields the same output, and ties keep the
//! input's relative order.

/// Double-day detection and first-vs-second comparisons
pub mod double_days;
/// Training gap detection
pub mod gaps;
/// Lap split conversion and target-distance matching
pub mod laps;
/// Monthly load progression and ramp-up periods
pub mod load;
/// Fastest/longest rankings
pub mod rankings;
/// Run qualification, unit conversion, and pace formatting
pub mod run_analysis;
/// Time-of-day bucket distribution
pub mod time_of_day;
/// Title word frequency and sentiment tallies
pub mod titles;
/// Day-of-week distribution and consistency
pub mod weekday;

pub use double_days::{analyze_double_days, DoubleDay, DoubleDayAnalysis};
pub use gaps::{detect_gaps, ActivityGap};
pub use laps::{analyze_laps, lap_matches_target, LapSplit};
pub use load::{analyze_monthly_load, LoadProgression, MonthlyLoad, RampUpPeriod};
pub use rankings::{fastest_runs, longest_runs, RankedRun};
pub use run_analysis::{analyze_runs, format_pace, qualifies_as_run, RunAnalysis};
pub use time_of_day::{analyze_time_of_day, DayPeriod, TimeOfDayBucket};
pub use titles::{analyze_titles, TitleAnalysis};
pub use weekday::{analyze_weekdays, WeekdayAnalysis, WeekdayStats};

/// Meters in one statute mile, used for display conversion
pub const METERS_PER_MILE: f64 = 1_609.344;

/// Feet in one meter
pub const FEET_PER_METER: f64 = 3.280_84;

/// Minimum moving time for an activity to qualify as a run
pub const MIN_RUN_DURATION_SECONDS: u64 = 240;

/// Minimum raw distance, in meters, for an activity to qualify as a run.
/// Kept on raw meters so a logged 1609 m mile still qualifies.
pub const MIN_RUN_DISTANCE_METERS: f64 = 1_609.0;
