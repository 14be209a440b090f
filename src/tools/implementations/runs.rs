// ABOUTME: Run list, ranking, and summary tools backed by the cache-resolved fetch layer
// ABOUTME: Ranked payloads carry 1-based rank fields; containers carry prose summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::cache::resolve_activities;
use crate::errors::AppResult;
use crate::intelligence::{analyze_runs, fastest_runs, format_pace, longest_runs, RunAnalysis};
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::{
    date_filter_from_args, date_filter_properties, optional_f64, optional_limit,
};
use crate::tools::schema::{JsonSchema, PropertySchema};
use crate::tools::traits::{InsightTool, ToolCapabilities};

async fn resolve_runs(
    tool: &str,
    args: &Value,
    context: &ToolExecutionContext,
) -> AppResult<Vec<RunAnalysis>> {
    let query = date_filter_from_args(tool, args)?;
    let records = resolve_activities(context.cache.as_ref(), context.source.as_ref(), &query).await?;
    Ok(analyze_runs(&records))
}

/// `get_recent_runs`: filtered run list, newest first
pub struct GetRecentRunsTool;

#[async_trait]
impl InsightTool for GetRecentRunsTool {
    fn name(&self) -> &'static str {
        "get_recent_runs"
    }

    fn description(&self) -> &'static str {
        "List the athlete's runs, newest first, with distance, duration, and pace. \
         Optionally restrict by year, month, or explicit date bounds."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = date_filter_properties();
        properties.insert(
            "limit".to_owned(),
            PropertySchema::new("integer", "Maximum runs to return").with_default(json!(10)),
        );
        JsonSchema::object(properties, vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let limit = optional_limit(self.name(), &args, "limit", 10)?;
        let runs = resolve_runs(self.name(), &args, context).await?;
        let total = runs.len();
        let page: Vec<&RunAnalysis> = runs.iter().take(limit).collect();
        Ok(json!({
            "runs": page,
            "count": total,
            "summary": format!("{total} qualifying runs; showing the {} most recent.", page.len()),
        }))
    }
}

/// `get_fastest_runs`: ascending pace ranking with a distance floor
pub struct GetFastestRunsTool;

#[async_trait]
impl InsightTool for GetFastestRunsTool {
    fn name(&self) -> &'static str {
        "get_fastest_runs"
    }

    fn description(&self) -> &'static str {
        "Rank the athlete's fastest runs by pace. Runs shorter than min_distance_miles \
         are excluded before ranking."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = date_filter_properties();
        properties.insert(
            "limit".to_owned(),
            PropertySchema::new("integer", "Maximum runs to return").with_default(json!(5)),
        );
        properties.insert(
            "min_distance_miles".to_owned(),
            PropertySchema::new("number", "Minimum distance for a run to be ranked")
                .with_default(json!(1.0)),
        );
        JsonSchema::object(properties, vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let limit = optional_limit(self.name(), &args, "limit", 5)?;
        let min_distance = optional_f64(self.name(), &args, "min_distance_miles", 1.0)?;
        let runs = resolve_runs(self.name(), &args, context).await?;
        let ranked = fastest_runs(&runs, min_distance, limit);
        let summary = ranked.first().map_or_else(
            || "No qualifying runs in the window.".to_owned(),
            |best| {
                format!(
                    "Fastest run: {} at {} pace over {:.1} miles.",
                    best.run.name, best.run.pace, best.run.distance_miles,
                )
            },
        );
        Ok(json!({
            "runs": ranked,
            "min_distance_miles": min_distance,
            "summary": summary,
        }))
    }
}

/// `get_longest_runs`: descending distance ranking
pub struct GetLongestRunsTool;

#[async_trait]
impl InsightTool for GetLongestRunsTool {
    fn name(&self) -> &'static str {
        "get_longest_runs"
    }

    fn description(&self) -> &'static str {
        "Rank the athlete's longest runs by distance."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = date_filter_properties();
        properties.insert(
            "limit".to_owned(),
            PropertySchema::new("integer", "Maximum runs to return").with_default(json!(5)),
        );
        JsonSchema::object(properties, vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let limit = optional_limit(self.name(), &args, "limit", 5)?;
        let runs = resolve_runs(self.name(), &args, context).await?;
        let ranked = longest_runs(&runs, limit);
        let summary = ranked.first().map_or_else(
            || "No qualifying runs in the window.".to_owned(),
            |best| {
                format!(
                    "Longest run: {} at {:.1} miles.",
                    best.run.name, best.run.distance_miles,
                )
            },
        );
        Ok(json!({ "runs": ranked, "summary": summary }))
    }
}

/// `get_run_summary`: aggregate totals for the window
pub struct GetRunSummaryTool;

#[async_trait]
impl InsightTool for GetRunSummaryTool {
    fn name(&self) -> &'static str {
        "get_run_summary"
    }

    fn description(&self) -> &'static str {
        "Aggregate totals for the window: run count, miles, hours, elevation, \
         and overall average pace."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(date_filter_properties(), vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let runs = resolve_runs(self.name(), &args, context).await?;
        let count = runs.len();
        let total_miles: f64 = runs.iter().map(|r| r.distance_miles).sum();
        let total_minutes: f64 = runs.iter().map(|r| r.duration_minutes).sum();
        let total_elevation_feet: f64 = runs.iter().map(|r| r.elevation_gain_feet).sum();
        // Overall pace weights by distance, not by run
        let average_pace_seconds = if total_miles > 0.0 {
            total_minutes * 60.0 / total_miles
        } else {
            0.0
        };
        Ok(json!({
            "run_count": count,
            "total_distance_miles": total_miles,
            "total_duration_hours": total_minutes / 60.0,
            "total_elevation_gain_feet": total_elevation_feet,
            "average_pace_seconds": average_pace_seconds,
            "average_pace": format_pace(average_pace_seconds),
            "summary": format!(
                "{count} runs totaling {total_miles:.1} miles at {} average pace.",
                format_pace(average_pace_seconds),
            ),
        }))
    }
}
