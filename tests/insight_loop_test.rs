// ABOUTME: Integration tests for the agentic conversation loop and channel lifecycle
// ABOUTME: Scripted models drive tool execution, cap behavior, and reconnection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

mod common;

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use stride_insights::errors::{AppError, AppResult, ErrorCode};
use stride_insights::llm::FunctionCall;
use stride_insights::services::{InsightService, LocalToolChannel, ToolChannel};
use stride_insights::tools::{ToolRegistry, ToolResponse, ToolSchema};

use common::{context_for, scenario_activities, RelentlessModel, ScriptedModel};

fn local_channel() -> Arc<LocalToolChannel> {
    let (_, context) = context_for(scenario_activities());
    let registry = Arc::new(ToolRegistry::with_builtin_tools());
    Arc::new(LocalToolChannel::new(registry, context))
}

#[tokio::test]
async fn test_tool_call_then_prose_answer() {
    let model = Arc::new(ScriptedModel::new(vec![
        ScriptedModel::tool_turn(vec![FunctionCall {
            id: "call-1".to_owned(),
            name: "get_run_summary".to_owned(),
            args: json!({}),
        }]),
        ScriptedModel::prose_turn("You logged two runs totaling about three miles."),
    ]));
    let channel = local_channel();
    let service = InsightService::new(model, channel.clone());

    let insight = service
        .get_insight("How much did I run in January?")
        .await
        .expect("insight");

    assert_eq!(insight.question, "How much did I run in January?");
    assert!(insight.answer.contains("two runs"));
    assert!(insight.supporting_activities.is_empty());
    assert!(channel.is_live(), "channel stays connected between questions");
}

#[tokio::test]
async fn test_empty_question_is_validation_error() {
    let model = Arc::new(ScriptedModel::new(vec![]));
    let service = InsightService::new(model, local_channel());

    let err = service.get_insight("   ").await.expect_err("rejected");
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_iteration_cap_stops_a_relentless_model() {
    let service =
        InsightService::new(Arc::new(RelentlessModel), local_channel()).with_max_iterations(3);

    let insight = service
        .get_insight("What is my fastest mile?")
        .await
        .expect("capped, not hung");
    assert!(insight.answer.contains("analysis steps"));
}

#[tokio::test]
async fn test_connect_is_idempotent() {
    let channel = local_channel();
    channel.connect().await.expect("connect");
    channel.connect().await.expect("second connect is a no-op");
    assert!(channel.is_live());

    channel.disconnect().await;
    assert!(!channel.is_live());
    let err = channel
        .call_tool("get_run_summary", json!({}))
        .await
        .expect_err("disconnected channel rejects calls");
    assert_eq!(err.code, ErrorCode::ConnectionFailed);
}

/// A channel that dies on the first tool call and works after reconnecting.
struct FlakyChannel {
    live: AtomicBool,
    dropped_once: AtomicBool,
    connects: AtomicU32,
}

impl FlakyChannel {
    fn new() -> Self {
        Self {
            live: AtomicBool::new(false),
            dropped_once: AtomicBool::new(false),
            connects: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl ToolChannel for FlakyChannel {
    async fn connect(&self) -> AppResult<()> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.live.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    async fn list_tools(&self) -> AppResult<Vec<ToolSchema>> {
        if !self.is_live() {
            return Err(AppError::connection("channel not connected"));
        }
        Ok(Vec::new())
    }

    async fn call_tool(&self, _name: &str, _arguments: Value) -> AppResult<ToolResponse> {
        if !self.dropped_once.swap(true, Ordering::SeqCst) {
            self.live.store(false, Ordering::SeqCst);
            return Err(AppError::connection("transport dropped"));
        }
        Ok(ToolResponse::success(&json!({"run_count": 2})))
    }

    async fn disconnect(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

/// A channel whose transport never comes up.
struct DeadChannel;

#[async_trait]
impl ToolChannel for DeadChannel {
    async fn connect(&self) -> AppResult<()> {
        Err(AppError::connection("transport refused"))
    }

    fn is_live(&self) -> bool {
        false
    }

    async fn list_tools(&self) -> AppResult<Vec<ToolSchema>> {
        Err(AppError::connection("channel not connected"))
    }

    async fn call_tool(&self, _name: &str, _arguments: Value) -> AppResult<ToolResponse> {
        Err(AppError::connection("channel not connected"))
    }

    async fn disconnect(&self) {}
}

#[tokio::test(start_paused = true)]
async fn test_dropped_channel_reconnects_and_retries_once() {
    // Needs two scripted passes: the first dies mid-tool-call, the retry
    // runs the same script shape again.
    let model = Arc::new(ScriptedModel::new(vec![
        ScriptedModel::tool_turn(vec![FunctionCall {
            id: "c1".to_owned(),
            name: "get_run_summary".to_owned(),
            args: json!({}),
        }]),
        // retry pass
        ScriptedModel::tool_turn(vec![FunctionCall {
            id: "c2".to_owned(),
            name: "get_run_summary".to_owned(),
            args: json!({}),
        }]),
        ScriptedModel::prose_turn("Two runs on record."),
    ]));
    let channel = Arc::new(FlakyChannel::new());
    let service = InsightService::new(model, channel.clone());

    let insight = service
        .get_insight("How many runs do I have?")
        .await
        .expect("answered after reconnect");
    assert_eq!(insight.answer, "Two runs on record.");
    assert!(
        channel.connects.load(Ordering::SeqCst) >= 2,
        "initial connect plus at least one reconnect"
    );
}

#[tokio::test(start_paused = true)]
async fn test_dead_channel_is_fatal_after_bounded_attempts() {
    let model = Arc::new(ScriptedModel::new(vec![]));
    let service = InsightService::new(model, Arc::new(DeadChannel));

    let err = service
        .get_insight("Anything there?")
        .await
        .expect_err("dead transport is fatal to the question");
    assert_eq!(err.code, ErrorCode::ConnectionFailed);
}
