// ABOUTME: Double-day detection: calendar dates with two or more runs, plus aggregates
// ABOUTME: Compares first vs second sessions and next-day performance against a baseline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Double-Day Analysis
//!
//! A *double day* is a local calendar date with at least two runs. Beyond the
//! per-day detail this module reports frequency by month and weekday, how the
//! second session of a day compares with the first, and how runs on the day
//! immediately after a double day compare with a baseline of ordinary days
//! (dates that are neither double days nor the day right after one).

use super::{format_pace, RunAnalysis};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A run reference inside a double day
#[derive(Debug, Clone, Serialize)]
pub struct DoubleDayRun {
    /// Activity id
    pub id: String,
    /// Activity title
    pub name: String,
    /// Local start time, `HH:MM`
    pub start_time: String,
    /// Distance in miles
    pub distance_miles: f64,
    /// Pace formatted `MM:SS`
    pub pace: String,
    /// Pace in seconds per mile
    pub pace_seconds: f64,
}

impl From<&RunAnalysis> for DoubleDayRun {
    fn from(run: &RunAnalysis) -> Self {
        Self {
            id: run.id.clone(),
            name: run.name.clone(),
            start_time: run.start_date_local.format("%H:%M").to_string(),
            distance_miles: run.distance_miles,
            pace: run.pace.clone(),
            pace_seconds: run.pace_seconds,
        }
    }
}

/// One calendar date with two or more runs
#[derive(Debug, Clone, Serialize)]
pub struct DoubleDay {
    /// The calendar date
    pub date: NaiveDate,
    /// Runs on the date
    pub run_count: usize,
    /// Total miles across the date's runs
    pub total_distance_miles: f64,
    /// Mean pace across the date's runs, seconds per mile
    pub average_pace_seconds: f64,
    /// Mean pace formatted `MM:SS`
    pub average_pace: String,
    /// Earliest run of the day
    pub first_run: DoubleDayRun,
    /// Second run of the day by start time
    pub second_run: DoubleDayRun,
    /// Hours between the first two runs
    pub hours_between: f64,
}

/// Averages comparing first sessions with second sessions
#[derive(Debug, Clone, Serialize)]
pub struct FirstVsSecond {
    /// Mean miles of the first session
    pub first_average_distance_miles: f64,
    /// Mean miles of the second session
    pub second_average_distance_miles: f64,
    /// Mean pace of the first session, seconds per mile
    pub first_average_pace_seconds: f64,
    /// Mean pace of the second session, seconds per mile
    pub second_average_pace_seconds: f64,
    /// Mean hours between the two sessions
    pub average_hours_between: f64,
}

/// Next-day runs compared with the ordinary-day baseline
#[derive(Debug, Clone, Serialize)]
pub struct SubsequentDayPerformance {
    /// Runs on days immediately following a double day
    pub subsequent_run_count: usize,
    /// Runs in the baseline (neither a double day nor the day after one)
    pub baseline_run_count: usize,
    /// Pace difference vs baseline, percent (positive = slower)
    pub pace_diff_pct: f64,
    /// Distance difference vs baseline, percent
    pub distance_diff_pct: f64,
}

/// A labelled frequency count
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyCount {
    /// Group key (month `YYYY-MM` or weekday name)
    pub key: String,
    /// Double days in the group
    pub count: usize,
}

/// Full double-day report
#[derive(Debug, Clone, Serialize)]
pub struct DoubleDayAnalysis {
    /// Every double day, in date order
    pub double_days: Vec<DoubleDay>,
    /// Number of double days
    pub count: usize,
    /// Double days per calendar month
    pub frequency_by_month: Vec<FrequencyCount>,
    /// Double days per weekday, Monday through Sunday
    pub frequency_by_weekday: Vec<FrequencyCount>,
    /// First-vs-second comparison (absent without double days)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_vs_second: Option<FirstVsSecond>,
    /// Next-day comparison (absent when either side is empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsequent_day: Option<SubsequentDayPerformance>,
    /// One-sentence natural-language summary
    pub summary: String,
}

/// Detect double days and derive their aggregates.
#[must_use]
pub fn analyze_double_days(runs: &[RunAnalysis]) -> DoubleDayAnalysis {
    let mut by_date: BTreeMap<NaiveDate, Vec<&RunAnalysis>> = BTreeMap::new();
    for run in runs {
        by_date
            .entry(run.start_date_local.date())
            .or_default()
            .push(run);
    }
    for members in by_date.values_mut() {
        members.sort_by(|a, b| a.start_date_local.cmp(&b.start_date_local));
    }

    let double_days: Vec<DoubleDay> = by_date
        .iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(&date, members)| {
            let run_count = members.len();
            let total_distance_miles: f64 = members.iter().map(|r| r.distance_miles).sum();
            let average_pace_seconds =
                members.iter().map(|r| r.pace_seconds).sum::<f64>() / run_count as f64;
            let first = members[0];
            let second = members[1];
            let hours_between =
                (second.start_date_local - first.start_date_local).num_minutes() as f64 / 60.0;
            DoubleDay {
                date,
                run_count,
                total_distance_miles,
                average_pace_seconds,
                average_pace: format_pace(average_pace_seconds),
                first_run: DoubleDayRun::from(first),
                second_run: DoubleDayRun::from(second),
                hours_between,
            }
        })
        .collect();

    let frequency_by_month = month_frequency(&double_days);
    let frequency_by_weekday = weekday_frequency(&double_days);
    let first_vs_second = first_vs_second(&double_days);
    let subsequent_day = subsequent_day_performance(runs, &double_days);

    let summary = if double_days.is_empty() {
        "No double days found.".to_owned()
    } else {
        format!(
            "{} double day(s); the second session averages {} pace.",
            double_days.len(),
            format_pace(
                first_vs_second
                    .as_ref()
                    .map_or(0.0, |f| f.second_average_pace_seconds)
            ),
        )
    };

    DoubleDayAnalysis {
        count: double_days.len(),
        double_days,
        frequency_by_month,
        frequency_by_weekday,
        first_vs_second,
        subsequent_day,
        summary,
    }
}

fn month_frequency(double_days: &[DoubleDay]) -> Vec<FrequencyCount> {
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for day in double_days {
        let key = format!("{:04}-{:02}", day.date.year(), day.date.month());
        *by_month.entry(key).or_insert(0) += 1;
    }
    by_month
        .into_iter()
        .map(|(key, count)| FrequencyCount { key, count })
        .collect()
}

fn weekday_frequency(double_days: &[DoubleDay]) -> Vec<FrequencyCount> {
    const WEEK: [(Weekday, &str); 7] = [
        (Weekday::Mon, "Monday"),
        (Weekday::Tue, "Tuesday"),
        (Weekday::Wed, "Wednesday"),
        (Weekday::Thu, "Thursday"),
        (Weekday::Fri, "Friday"),
        (Weekday::Sat, "Saturday"),
        (Weekday::Sun, "Sunday"),
    ];
    WEEK.iter()
        .map(|&(day, name)| FrequencyCount {
            key: name.to_owned(),
            count: double_days.iter().filter(|d| d.date.weekday() == day).count(),
        })
        .collect()
}

fn first_vs_second(double_days: &[DoubleDay]) -> Option<FirstVsSecond> {
    if double_days.is_empty() {
        return None;
    }
    let n = double_days.len() as f64;
    Some(FirstVsSecond {
        first_average_distance_miles: double_days
            .iter()
            .map(|d| d.first_run.distance_miles)
            .sum::<f64>()
            / n,
        second_average_distance_miles: double_days
            .iter()
            .map(|d| d.second_run.distance_miles)
            .sum::<f64>()
            / n,
        first_average_pace_seconds: double_days
            .iter()
            .map(|d| d.first_run.pace_seconds)
            .sum::<f64>()
            / n,
        second_average_pace_seconds: double_days
            .iter()
            .map(|d| d.second_run.pace_seconds)
            .sum::<f64>()
            / n,
        average_hours_between: double_days.iter().map(|d| d.hours_between).sum::<f64>() / n,
    })
}

/// Compare runs on the day after each double day with the ordinary baseline.
/// Returns `None` rather than dividing by zero when either side is empty.
fn subsequent_day_performance(
    runs: &[RunAnalysis],
    double_days: &[DoubleDay],
) -> Option<SubsequentDayPerformance> {
    let double_dates: HashSet<NaiveDate> = double_days.iter().map(|d| d.date).collect();
    let next_dates: HashSet<NaiveDate> = double_dates
        .iter()
        .map(|&d| d + Duration::days(1))
        .collect();

    let subsequent: Vec<&RunAnalysis> = runs
        .iter()
        .filter(|r| next_dates.contains(&r.start_date_local.date()))
        .collect();
    let baseline: Vec<&RunAnalysis> = runs
        .iter()
        .filter(|r| {
            let date = r.start_date_local.date();
            !double_dates.contains(&date) && !next_dates.contains(&date)
        })
        .collect();

    if subsequent.is_empty() || baseline.is_empty() {
        return None;
    }

    let mean = |members: &[&RunAnalysis], f: fn(&RunAnalysis) -> f64| {
        members.iter().map(|r| f(r)).sum::<f64>() / members.len() as f64
    };
    let baseline_pace = mean(&baseline, |r| r.pace_seconds);
    let baseline_distance = mean(&baseline, |r| r.distance_miles);
    let subsequent_pace = mean(&subsequent, |r| r.pace_seconds);
    let subsequent_distance = mean(&subsequent, |r| r.distance_miles);

    let pct = |current: f64, base: f64| {
        if base > 0.0 {
            (current - base) / base * 100.0
        } else {
            0.0
        }
    };

    Some(SubsequentDayPerformance {
        subsequent_run_count: subsequent.len(),
        baseline_run_count: baseline.len(),
        pace_diff_pct: pct(subsequent_pace, baseline_pace),
        distance_diff_pct: pct(subsequent_distance, baseline_distance),
    })
}
