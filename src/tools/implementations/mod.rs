// ABOUTME: Built-in insight tool implementations grouped by analytics family
// ABOUTME: Run lists/rankings, distributions, training patterns, and lap analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

/// Distribution tools: time of day, day of week, titles
pub mod distributions;
/// Lap-level tools that bypass the range cache
pub mod laps;
/// Pattern tools: gaps, monthly load, double days
pub mod patterns;
/// Run list, ranking, and summary tools
pub mod runs;

pub use distributions::{
    GetDayOfWeekAnalysisTool, GetTimeOfDayDistributionTool, GetTitleAnalysisTool,
};
pub use laps::{AnalyzeActivityLapsTool, FindTargetLapsTool};
pub use patterns::{GetActivityGapsTool, GetDoubleDaysTool, GetMonthlyLoadTool};
pub use runs::{GetFastestRunsTool, GetLongestRunsTool, GetRecentRunsTool, GetRunSummaryTool};
