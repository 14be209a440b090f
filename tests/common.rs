// ABOUTME: Shared test fixtures: execution contexts, scripted chat models, canned channels
// ABOUTME: Used by the integration suites; carries no tests of its own
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use stride_insights::cache::RangeCache;
use stride_insights::config::{AnalyticsConfig, CacheSettings};
use stride_insights::errors::AppResult;
use stride_insights::llm::{
    ChatRequest, ChatResponseWithTools, FunctionCall, LlmProvider, Tool,
};
use stride_insights::models::{ActivityRecord, SportType};
use stride_insights::providers::FixtureSource;
use stride_insights::tools::ToolExecutionContext;

/// Build an activity record with the given shape.
pub fn activity(
    id: &str,
    sport: SportType,
    date: (i32, u32, u32),
    hour: u32,
    distance_meters: f64,
    moving_time_seconds: u64,
) -> ActivityRecord {
    ActivityRecord {
        id: id.to_owned(),
        name: format!("Activity {id}"),
        start_date_local: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .expect("valid date")
            .and_hms_opt(hour, 0, 0)
            .expect("valid time"),
        distance_meters,
        moving_time_seconds,
        elevation_gain_meters: 25.0,
        average_speed: Some(distance_meters / moving_time_seconds as f64),
        max_speed: None,
        average_heart_rate: Some(150.0),
        sport_type: sport,
        is_private: false,
        is_manual: false,
    }
}

/// The two-activity scenario from the service's acceptance checklist.
pub fn scenario_activities() -> Vec<ActivityRecord> {
    vec![
        activity("one-mile", SportType::Run, (2024, 1, 1), 7, 1_609.0, 360),
        activity("two-mile", SportType::Run, (2024, 1, 2), 18, 3_219.0, 900),
    ]
}

/// Build a tool execution context over the given records.
pub fn context_for(records: Vec<ActivityRecord>) -> (Arc<FixtureSource>, ToolExecutionContext) {
    let source = Arc::new(FixtureSource::new(records));
    let cache = Arc::new(RangeCache::new(&CacheSettings::default()));
    let context =
        ToolExecutionContext::new(source.clone(), cache, AnalyticsConfig::default());
    (source, context)
}

/// A chat model that replays a fixed script of turns.
pub struct ScriptedModel {
    turns: Mutex<VecDeque<ChatResponseWithTools>>,
}

impl ScriptedModel {
    pub fn new(turns: Vec<ChatResponseWithTools>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
        }
    }

    /// A turn that requests the given tool calls.
    pub fn tool_turn(calls: Vec<FunctionCall>) -> ChatResponseWithTools {
        ChatResponseWithTools {
            content: None,
            function_calls: Some(calls),
            model: "scripted".to_owned(),
            usage: None,
            finish_reason: Some("tool_calls".to_owned()),
        }
    }

    /// A turn that answers in prose.
    pub fn prose_turn(answer: &str) -> ChatResponseWithTools {
        ChatResponseWithTools {
            content: Some(answer.to_owned()),
            function_calls: None,
            model: "scripted".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted"
    }

    async fn complete_with_tools(
        &self,
        _request: &ChatRequest,
        _tools: Option<&[Tool]>,
    ) -> AppResult<ChatResponseWithTools> {
        let mut turns = self.turns.lock().await;
        // Once the script runs out, keep answering in prose
        Ok(turns
            .pop_front()
            .unwrap_or_else(|| Self::prose_turn("script exhausted")))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// A model that requests the same tool call forever, for cap testing.
pub struct RelentlessModel;

#[async_trait]
impl LlmProvider for RelentlessModel {
    fn name(&self) -> &'static str {
        "relentless"
    }

    fn default_model(&self) -> &str {
        "relentless"
    }

    async fn complete_with_tools(
        &self,
        _request: &ChatRequest,
        _tools: Option<&[Tool]>,
    ) -> AppResult<ChatResponseWithTools> {
        Ok(ScriptedModel::tool_turn(vec![FunctionCall {
            id: "again".to_owned(),
            name: "get_run_summary".to_owned(),
            args: serde_json::json!({}),
        }]))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
