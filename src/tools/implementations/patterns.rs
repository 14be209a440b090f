// ABOUTME: Training pattern tools: activity gaps, monthly load progression, double days
// ABOUTME: Gap threshold defaults come from the analytics configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::cache::resolve_activities;
use crate::errors::AppResult;
use crate::intelligence::{analyze_double_days, analyze_monthly_load, analyze_runs, detect_gaps};
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::{date_filter_from_args, date_filter_properties, optional_limit};
use crate::tools::schema::{JsonSchema, PropertySchema};
use crate::tools::traits::{InsightTool, ToolCapabilities};

/// `get_activity_gaps`: breaks between consecutive runs
pub struct GetActivityGapsTool;

#[async_trait]
impl InsightTool for GetActivityGapsTool {
    fn name(&self) -> &'static str {
        "get_activity_gaps"
    }

    fn description(&self) -> &'static str {
        "Find breaks of at least min_gap_days between consecutive runs, with \
         pace and distance changes across each break."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = date_filter_properties();
        properties.insert(
            "min_gap_days".to_owned(),
            PropertySchema::new("integer", "Minimum days off to count as a gap")
                .with_default(json!(14)),
        );
        JsonSchema::object(properties, vec![])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_ACTIVITIES | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value> {
        let default_threshold = usize::try_from(context.analytics.gap_threshold_days.max(1))
            .unwrap_or(14);
        let min_gap_days =
            optional_limit(self.name(), &args, "min_gap_days", default_threshold)? as i64;

        let query = date_filter_from_args(self.name(), &args)?;
        let records =
            resolve_activities(context.cache.as_ref(), context.source.as_ref(), &query).await?;
        let runs = analyze_runs(&records);
        let gaps = detect_gaps(&runs, min_gap_days);

        let summary = if gaps.is_empty() {
            format!("No breaks of {min_gap_days}+ days in the window.")
        } else {
            let longest = gaps.iter().map(|g| g.days_off).max().unwrap_or(0);
            format!(
                "{} break(s) of {min_gap_days}+ days; the longest was {longest} days.",
                gaps.len(),
            )
        };

        Ok(json!({
            "gaps": gaps,
            "count": gaps.len(),
            "min_gap_days": min_gap_days,
            "summary": summary,
        }))
    }
}

/// `get_monthly_load`: per-month mileage with ramp-up periods
pub struct GetMonthlyLoadTool;

#[async_trait]
impl InsightTool for GetMonthlyLoadTool {
    fn name(&self) -> &'static str {
        "get_monthly_load"
    }

    fn description(&self) -> &'static str {
        "Aggregate mileage per calendar month with month-over-month percent \
         change and ramp-up periods (consecutive months each up more than 10%)."
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
        let progression = analyze_monthly_load(&runs);
        Ok(serde_json::to_value(progression)?)
    }
}

/// `get_double_days`: dates with two or more runs
pub struct GetDoubleDaysTool;

#[async_trait]
impl InsightTool for GetDoubleDaysTool {
    fn name(&self) -> &'static str {
        "get_double_days"
    }

    fn description(&self) -> &'static str {
        "Find days with two or more runs: per-day detail, frequency by month \
         and weekday, first-vs-second session comparison, and how the next \
         day's running compares with ordinary days."
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
        let analysis = analyze_double_days(&runs);
        Ok(serde_json::to_value(analysis)?)
    }
}
