// ABOUTME: Lap-level tools that fetch per-activity splits straight from the source
// ABOUTME: Per-activity fetch failures are logged and skipped, never fatal to the batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Lap Tools
//!
//! Per-activity lap data is not part of the cached activity list, so both
//! tools here call the activity source directly. `find_target_laps` still
//! resolves its candidate run list through the range cache; only the lap
//! fetches bypass it.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use crate::cache::resolve_activities;
use crate::errors::AppResult;
use crate::intelligence::{analyze_laps, analyze_runs, lap_matches_target, LapSplit};
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::{
    date_filter_from_args, date_filter_properties, optional_limit, required_positive_f64,
    required_str,
};
use crate::tools::schema::{JsonSchema, PropertySchema};
use crate::tools::traits::{InsightTool, ToolCapabilities};
use std::collections::HashMap;

/// `analyze_activity_laps`: splits for one activity
pub struct AnalyzeActivityLapsTool;

#[async_trait]
impl InsightTool for AnalyzeActivityLapsTool {
    fn name(&self) -> &'static str {
        "analyze_activity_laps"
    }

    fn description(&self) -> &'static str {
        "Fetch the lap splits of one activity with per-lap distance and pace."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "activity_id".to_owned(),
            PropertySchema::new("string", "Identifier of the activity to analyze"),
        );
        JsonSchema::object(properties, vec!["activity_id"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::LAP_DATA | ToolCapabilities::BYPASSES_CACHE
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let activity_id = required_str(self.name(), &args, "activity_id")?;
        let laps = context.source.fetch_activity_laps(&activity_id).await?;
        let splits = analyze_laps(&laps);

        let fastest = splits
            .iter()
            .filter(|s| s.pace_seconds > 0.0)
            .min_by(|a, b| a.pace_seconds.total_cmp(&b.pace_seconds));
        let summary = fastest.map_or_else(
            || format!("Activity {activity_id} has no timed laps."),
            |lap| {
                format!(
                    "{} laps; the fastest was lap {} at {} pace.",
                    splits.len(),
                    lap.lap_index,
                    lap.pace,
                )
            },
        );

        Ok(json!({
            "activity_id": activity_id,
            "laps": splits,
            "count": splits.len(),
            "summary": summary,
        }))
    }
}

/// A matching lap tagged with its parent activity
#[derive(Debug, serde::Serialize)]
struct TargetLap {
    activity_id: String,
    activity_name: String,
    date: String,
    #[serde(flatten)]
    lap: LapSplit,
}

/// `find_target_laps`: laps near a target distance across recent runs
pub struct FindTargetLapsTool;

#[async_trait]
impl InsightTool for FindTargetLapsTool {
    fn name(&self) -> &'static str {
        "find_target_laps"
    }

    fn description(&self) -> &'static str {
        "Scan the laps of recent runs for splits within 5% of a target \
         distance (e.g. 1.0 for mile repeats), ranked fastest first."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = date_filter_properties();
        properties.insert(
            "target_distance_miles".to_owned(),
            PropertySchema::new("number", "Target lap distance in miles"),
        );
        properties.insert(
            "activity_limit".to_owned(),
            PropertySchema::new("integer", "How many recent runs to scan")
                .with_default(json!(10)),
        );
        JsonSchema::object(properties, vec!["target_distance_miles"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES
            | ToolCapabilities::LAP_DATA
            | ToolCapabilities::BYPASSES_CACHE
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let target = required_positive_f64(self.name(), &args, "target_distance_miles")?;
        let activity_limit = optional_limit(self.name(), &args, "activity_limit", 10)?;

        let query = date_filter_from_args(self.name(), &args)?;
        let records =
            resolve_activities(context.cache.as_ref(), context.source.as_ref(), &query).await?;
        let runs = analyze_runs(&records);

        let mut matching: Vec<TargetLap> = Vec::new();
        let mut scanned = 0_usize;
        let mut failed = 0_usize;

        for run in runs.iter().take(activity_limit) {
            // One activity's lap failure never aborts the batch
            let laps = match context.source.fetch_activity_laps(&run.id).await {
                Ok(laps) => laps,
                Err(e) => {
                    warn!(activity_id = %run.id, error = %e, "lap fetch failed; skipping activity");
                    failed += 1;
                    continue;
                }
            };
            scanned += 1;
            for lap in laps.iter().filter(|l| lap_matches_target(l, target)) {
                matching.push(TargetLap {
                    activity_id: run.id.clone(),
                    activity_name: run.name.clone(),
                    date: run.start_date_local.date().to_string(),
                    lap: LapSplit::from(lap),
                });
            }
        }

        matching.sort_by(|a, b| a.lap.pace_seconds.total_cmp(&b.lap.pace_seconds));

        let summary = if matching.is_empty() {
            format!("No laps within 5% of {target:.2} miles across {scanned} runs.")
        } else {
            format!(
                "{} lap(s) near {target:.2} miles across {scanned} runs; best pace {}.",
                matching.len(),
                matching[0].lap.pace,
            )
        };

        Ok(json!({
            "target_distance_miles": target,
            "matching_laps": matching,
            "activities_scanned": scanned,
            "activities_failed": failed,
            "summary": summary,
        }))
    }
}
