// ABOUTME: Distribution tools: time-of-day buckets, day-of-week analysis, title analysis
// ABOUTME: Each resolves runs through the cache and delegates to the analytics pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::cache::resolve_activities;
use crate::errors::AppResult;
use crate::intelligence::{analyze_runs, analyze_time_of_day, analyze_titles, analyze_weekdays};
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::{date_filter_from_args, date_filter_properties};
use crate::tools::schema::JsonSchema;
use crate::tools::traits::{InsightTool, ToolCapabilities};

/// `get_time_of_day_distribution`: the five fixed local-hour windows
pub struct GetTimeOfDayDistributionTool;

#[async_trait]
impl InsightTool for GetTimeOfDayDistributionTool {
    fn name(&self) -> &'static str {
        "get_time_of_day_distribution"
    }

    fn description(&self) -> &'static str {
        "Bucket runs into early morning, morning, afternoon, evening, and night \
         windows with per-window counts, mileage, and average pace."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(date_filter_properties(), vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let query = date_filter_from_args(self.name(), &args)?;
        let records =
            resolve_activities(context.cache.as_ref(), context.source.as_ref(), &query).await?;
        let runs = analyze_runs(&records);
        let buckets = analyze_time_of_day(&runs);

        let favorite = buckets
            .iter()
            .max_by_key(|b| b.count)
            .filter(|b| b.count > 0);
        let summary = favorite.map_or_else(
            || "No runs in the window.".to_owned(),
            |b| {
                format!(
                    "Most runs start in the {} ({} of {}).",
                    b.period.label(),
                    b.count,
                    runs.len(),
                )
            },
        );

        Ok(json!({ "buckets": buckets, "summary": summary }))
    }
}

/// `get_day_of_week_analysis`: weekday stats and consistency
pub struct GetDayOfWeekAnalysisTool;

#[async_trait]
impl InsightTool for GetDayOfWeekAnalysisTool {
    fn name(&self) -> &'static str {
        "get_day_of_week_analysis"
    }

    fn description(&self) -> &'static str {
        "Group runs by weekday: per-day counts, mileage, pace, consistency \
         percentages, preferred days, and weekend/weekday runner classification."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(date_filter_properties(), vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let query = date_filter_from_args(self.name(), &args)?;
        let records =
            resolve_activities(context.cache.as_ref(), context.source.as_ref(), &query).await?;
        let runs = analyze_runs(&records);
        let analysis = analyze_weekdays(&runs);
        Ok(serde_json::to_value(analysis)?)
    }
}

/// `get_title_analysis`: word frequencies and sentiment from run titles
pub struct GetTitleAnalysisTool;

#[async_trait]
impl InsightTool for GetTitleAnalysisTool {
    fn name(&self) -> &'static str {
        "get_title_analysis"
    }

    fn description(&self) -> &'static str {
        "Analyze run titles: the 20 most frequent words (with the share of \
         titles containing each) and positive/negative/neutral sentiment tallies."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(date_filter_properties(), vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let query = date_filter_from_args(self.name(), &args)?;
        let records =
            resolve_activities(context.cache.as_ref(), context.source.as_ref(), &query).await?;
        let runs = analyze_runs(&records);
        let titles: Vec<&str> = runs.iter().map(|r| r.name.as_str()).collect();
        let analysis = analyze_titles(&titles);
        Ok(serde_json::to_value(analysis)?)
    }
}
