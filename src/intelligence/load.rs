// ABOUTME: Monthly training load aggregation with percent deltas and ramp-up grouping
// ABOUTME: A ramp-up is a run of consecutive months each more than 10% above the prior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use super::RunAnalysis;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Month-over-month increase that flags a month as a load jump
const RAMP_FLAG_THRESHOLD_PCT: f64 = 10.0;

/// One calendar month of training load
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyLoad {
    /// Calendar key, `YYYY-MM`
    pub month: String,
    /// Total miles in the month
    pub total_distance_miles: f64,
    /// Runs in the month
    pub run_count: usize,
    /// Percent change from the preceding month in the list (absent for the
    /// first month)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    /// True when the increase exceeds 10%
    pub flagged: bool,
}

/// Consecutive flagged months grouped together
#[derive(Debug, Clone, Serialize)]
pub struct RampUpPeriod {
    /// Months in the period, in calendar order
    pub months: Vec<String>,
    /// Mean of the monthly percent increases
    pub average_increase_pct: f64,
}

/// Full monthly load report
#[derive(Debug, Clone, Serialize)]
pub struct LoadProgression {
    /// Per-month aggregates in calendar order
    pub months: Vec<MonthlyLoad>,
    /// Ramp-up periods found
    pub ramp_ups: Vec<RampUpPeriod>,
    /// One-sentence natural-language summary
    pub summary: String,
}

/// Aggregate distance per calendar month and flag ramp-up periods.
///
/// Percent change compares consecutive entries of the calendar-key-sorted
/// month list; a month with no preceding entry carries no change.
#[must_use]
pub fn analyze_monthly_load(runs: &[RunAnalysis]) -> LoadProgression {
    let mut by_month: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for run in runs {
        let date = run.start_date_local.date();
        let key = format!("{:04}-{:02}", date.year(), date.month());
        let entry = by_month.entry(key).or_insert((0.0, 0));
        entry.0 += run.distance_miles;
        entry.1 += 1;
    }

    let mut months: Vec<MonthlyLoad> = Vec::with_capacity(by_month.len());
    let mut previous_distance: Option<f64> = None;
    for (month, (total_distance_miles, run_count)) in by_month {
        let change_pct = previous_distance.map(|prev| {
            if prev > 0.0 {
                (total_distance_miles - prev) / prev * 100.0
            } else {
                0.0
            }
        });
        let flagged = change_pct.is_some_and(|c| c > RAMP_FLAG_THRESHOLD_PCT);
        previous_distance = Some(total_distance_miles);
        months.push(MonthlyLoad {
            month,
            total_distance_miles,
            run_count,
            change_pct,
            flagged,
        });
    }

    let ramp_ups = group_ramp_ups(&months);

    let total_miles: f64 = months.iter().map(|m| m.total_distance_miles).sum();
    let summary = if months.is_empty() {
        "No monthly load data.".to_owned()
    } else {
        format!(
            "{:.0} miles across {} months with {} ramp-up period(s).",
            total_miles,
            months.len(),
            ramp_ups.len(),
        )
    };

    LoadProgression {
        months,
        ramp_ups,
        summary,
    }
}

fn group_ramp_ups(months: &[MonthlyLoad]) -> Vec<RampUpPeriod> {
    let mut periods = Vec::new();
    let mut current: Vec<&MonthlyLoad> = Vec::new();

    for month in months {
        if month.flagged {
            current.push(month);
        } else if !current.is_empty() {
            periods.push(finish_period(&current));
            current.clear();
        }
    }
    if !current.is_empty() {
        periods.push(finish_period(&current));
    }
    periods
}

fn finish_period(months: &[&MonthlyLoad]) -> RampUpPeriod {
    let sum: f64 = months.iter().filter_map(|m| m.change_pct).sum();
    RampUpPeriod {
        months: months.iter().map(|m| m.month.clone()).collect(),
        average_increase_pct: sum / months.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn run_in(year: i32, month: u32, day: u32, miles: f64) -> RunAnalysis {
        RunAnalysis {
            id: format!("{year}-{month}-{day}"),
            name: "run".to_owned(),
            start_date_local: NaiveDate::from_ymd_opt(year, month, day)
                .expect("valid date")
                .and_hms_opt(7, 0, 0)
                .expect("valid time"),
            distance_miles: miles,
            duration_minutes: miles * 8.0,
            pace: "8:00".to_owned(),
            pace_seconds: 480.0,
            elevation_gain_feet: 0.0,
            average_heart_rate: None,
        }
    }

    #[test]
    fn test_monthly_aggregation_and_change() {
        let runs = vec![
            run_in(2024, 1, 5, 10.0),
            run_in(2024, 1, 20, 10.0),
            run_in(2024, 2, 5, 30.0),
        ];
        let load = analyze_monthly_load(&runs);
        assert_eq!(load.months.len(), 2);
        assert_eq!(load.months[0].month, "2024-01");
        assert_eq!(load.months[0].run_count, 2);
        assert!(load.months[0].change_pct.is_none());
        // 20 -> 30 miles = +50%
        assert!((load.months[1].change_pct.expect("has change") - 50.0).abs() < 1e-9);
        assert!(load.months[1].flagged);
    }

    #[test]
    fn test_consecutive_flags_group_into_one_ramp_up() {
        let runs = vec![
            run_in(2024, 1, 5, 10.0),
            run_in(2024, 2, 5, 12.0), // +20%
            run_in(2024, 3, 5, 15.0), // +25%
            run_in(2024, 4, 5, 15.0), // flat
            run_in(2024, 5, 5, 18.0), // +20%
        ];
        let load = analyze_monthly_load(&runs);
        assert_eq!(load.ramp_ups.len(), 2);
        assert_eq!(load.ramp_ups[0].months, vec!["2024-02", "2024-03"]);
        assert!((load.ramp_ups[0].average_increase_pct - 22.5).abs() < 1e-9);
        assert_eq!(load.ramp_ups[1].months, vec!["2024-05"]);
    }

    #[test]
    fn test_small_increase_not_flagged() {
        let runs = vec![run_in(2024, 1, 5, 100.0), run_in(2024, 2, 5, 105.0)];
        let load = analyze_monthly_load(&runs);
        assert!(!load.months[1].flagged);
        assert!(load.ramp_ups.is_empty());
    }
}
