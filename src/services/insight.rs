// ABOUTME: Agentic conversation loop: the model calls tools until it can answer in prose
// ABOUTME: Bounded iterations, sequential tool execution, and bounded reconnection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Insight Service
//!
//! Drives one natural-language question to completion: send the conversation
//! history plus the tool catalog to the model, execute whatever tool calls it
//! requests (sequentially, in request order), feed the results back tagged
//! with their invocation ids, and stop when the model answers in prose.
//!
//! The loop is a small state machine — awaiting the model, executing tools,
//! done — with a hard iteration cap so a model that never stops calling
//! tools cannot spin forever. Conversation state lives only for the duration
//! of one question.
//!
//! The tool-execution side channel has an explicit lifecycle: `connect()` is
//! idempotent, failures while the channel is not live trigger bounded
//! reconnection with linearly increasing backoff, and `disconnect()` never
//! propagates teardown errors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::llm::{
    insight_system_prompt, ChatMessage, ChatRequest, FunctionCall, FunctionResponse, LlmProvider,
    Tool,
};
use crate::tools::{ToolExecutionContext, ToolRegistry, ToolResponse, ToolSchema};

/// Maximum model turns before the loop gives up on convergence
const MAX_TOOL_ITERATIONS: usize = 10;

/// Reconnection attempts before a question fails fatally
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Base backoff; attempt N waits N times this
const RECONNECT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Answer to one insight question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// The question as asked
    pub question: String,
    /// The model's prose answer
    pub answer: String,
    /// Activity references the model chose to surface (may be empty)
    #[serde(rename = "supportingActivities")]
    pub supporting_activities: Vec<Value>,
}

/// The tool-execution side channel.
///
/// In-process deployments use [`LocalToolChannel`]; the same contract fits a
/// remote MCP-style endpoint.
#[async_trait]
pub trait ToolChannel: Send + Sync {
    /// Establish the channel. Calling while already connected is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` when the channel cannot be established.
    async fn connect(&self) -> AppResult<()>;

    /// Whether the channel is currently live
    fn is_live(&self) -> bool;

    /// List the tool catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` when the channel is not live.
    async fn list_tools(&self) -> AppResult<Vec<ToolSchema>>;

    /// Invoke one tool. Tool-level failures come back as error payloads in
    /// the response, not as `Err`.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` when the channel is not live.
    async fn call_tool(&self, name: &str, arguments: Value) -> AppResult<ToolResponse>;

    /// Release the channel. Teardown errors are logged, never propagated,
    /// and the channel is unconditionally marked not-live.
    async fn disconnect(&self);
}

/// In-process channel over the tool registry
pub struct LocalToolChannel {
    registry: Arc<ToolRegistry>,
    context: ToolExecutionContext,
    live: AtomicBool,
}

impl LocalToolChannel {
    /// Create a channel over the registry and execution context
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, context: ToolExecutionContext) -> Self {
        Self {
            registry,
            context,
            live: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ToolChannel for LocalToolChannel {
    async fn connect(&self) -> AppResult<()> {
        if self.live.swap(true, Ordering::SeqCst) {
            debug!("tool channel already connected");
        } else {
            info!("tool channel connected ({} tools)", self.registry.len());
        }
        Ok(())
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    async fn list_tools(&self) -> AppResult<Vec<ToolSchema>> {
        if !self.is_live() {
            return Err(AppError::connection("tool channel is not connected"));
        }
        Ok(self.registry.list_schemas())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> AppResult<ToolResponse> {
        if !self.is_live() {
            return Err(AppError::connection("tool channel is not connected"));
        }
        Ok(self.registry.call(name, arguments, &self.context).await)
    }

    async fn disconnect(&self) {
        self.live.store(false, Ordering::SeqCst);
        debug!("tool channel disconnected");
    }
}

/// Outcome of one model turn
enum LoopStep {
    /// The model answered in prose
    Done(String),
    /// The model requested tool calls; keep looping
    ExecutedTools,
}

/// The agentic insight service
pub struct InsightService {
    model: Arc<dyn LlmProvider>,
    channel: Arc<dyn ToolChannel>,
    max_iterations: usize,
}

impl InsightService {
    /// Create a service over a chat model and a tool channel
    #[must_use]
    pub fn new(model: Arc<dyn LlmProvider>, channel: Arc<dyn ToolChannel>) -> Self {
        Self {
            model,
            channel,
            max_iterations: MAX_TOOL_ITERATIONS,
        }
    }

    /// Override the iteration cap (mainly for tests)
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Answer one natural-language question.
    ///
    /// Ensures the tool channel is connected; on a failure while the channel
    /// is not live, attempts bounded reconnection and retries the question
    /// once. Exhausted reconnection is fatal to the question, not to the
    /// process.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty question, `ConnectionFailed`
    /// after exhausted reconnection, or the loop's own failure.
    pub async fn get_insight(&self, question: &str) -> AppResult<Insight> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::invalid_input("question must not be empty"));
        }

        if !self.channel.is_live() {
            if let Err(e) = self.channel.connect().await {
                warn!(error = %e, "initial connect failed; entering bounded reconnection");
                self.reconnect().await?;
            }
        }

        match self.run_loop(question).await {
            Ok(insight) => Ok(insight),
            Err(e) if !self.channel.is_live() => {
                warn!(error = %e, "insight failed with dead channel; reconnecting");
                self.reconnect().await?;
                self.run_loop(question).await
            }
            Err(e) => Err(e),
        }
    }

    /// Release the tool channel, swallowing teardown errors.
    pub async fn disconnect(&self) {
        self.channel.disconnect().await;
    }

    async fn reconnect(&self) -> AppResult<()> {
        for attempt in 1..=MAX_RECONNECT_ATTEMPTS {
            sleep(RECONNECT_BASE_DELAY * attempt).await;
            info!(attempt, "reconnecting tool channel");
            match self.channel.connect().await {
                Ok(()) if self.channel.is_live() => return Ok(()),
                Ok(()) => warn!(attempt, "connect returned but channel is not live"),
                Err(e) => warn!(attempt, error = %e, "reconnect attempt failed"),
            }
        }
        Err(AppError::connection(format!(
            "tool channel unavailable after {MAX_RECONNECT_ATTEMPTS} reconnection attempts"
        )))
    }

    /// One full conversation: `AwaitingModel` until the model stops
    /// requesting tools or the iteration cap trips.
    async fn run_loop(&self, question: &str) -> AppResult<Insight> {
        let schemas = self.channel.list_tools().await?;
        let tools = [Tool::from_schemas(&schemas)?];

        let mut messages = vec![
            ChatMessage::system(insight_system_prompt()),
            ChatMessage::user(question),
        ];

        for iteration in 0..self.max_iterations {
            match self.step(&mut messages, &tools, iteration).await? {
                LoopStep::Done(answer) => {
                    return Ok(Insight {
                        question: question.to_owned(),
                        answer,
                        supporting_activities: Vec::new(),
                    });
                }
                LoopStep::ExecutedTools => {}
            }
        }

        warn!(
            max_iterations = self.max_iterations,
            "model did not converge within the iteration cap"
        );
        Ok(Insight {
            question: question.to_owned(),
            answer: "I could not settle on an answer within the allowed number of \
                     analysis steps. Try narrowing the question."
                .to_owned(),
            supporting_activities: Vec::new(),
        })
    }

    /// One `AwaitingModel` turn, possibly followed by tool execution.
    async fn step(
        &self,
        messages: &mut Vec<ChatMessage>,
        tools: &[Tool],
        iteration: usize,
    ) -> AppResult<LoopStep> {
        let request = ChatRequest::new(messages.clone());
        let response = self.model.complete_with_tools(&request, Some(tools)).await?;

        let Some(function_calls) = response
            .function_calls
            .filter(|calls| !calls.is_empty())
        else {
            return Ok(LoopStep::Done(response.content.unwrap_or_default()));
        };

        info!(
            iteration,
            count = function_calls.len(),
            "executing tool calls"
        );

        // Keep the model's reasoning in the history
        if let Some(text) = response.content {
            if !text.is_empty() {
                messages.push(ChatMessage::assistant(text));
            }
        }

        // Sequential execution, in request order, so results line up with
        // their invocation ids in the reply
        let responses = self.execute_function_calls(&function_calls).await?;
        add_function_responses_to_messages(messages, &responses);
        Ok(LoopStep::ExecutedTools)
    }

    async fn execute_function_calls(
        &self,
        function_calls: &[FunctionCall],
    ) -> AppResult<Vec<FunctionResponse>> {
        let mut responses = Vec::with_capacity(function_calls.len());
        for call in function_calls {
            info!(tool = %call.name, invocation = %call.id, "executing tool");
            let tool_response = self.channel.call_tool(&call.name, call.args.clone()).await?;
            responses.push(build_function_response(call, &tool_response));
        }
        Ok(responses)
    }
}

/// Convert a tool response into the model-facing result, preserving the
/// invocation id.
fn build_function_response(call: &FunctionCall, response: &ToolResponse) -> FunctionResponse {
    let payload = response
        .text()
        .and_then(|text| serde_json::from_str::<Value>(text).ok())
        .unwrap_or_else(|| serde_json::json!({ "status": "empty" }));

    let payload = if response.is_error() {
        serde_json::json!({ "isError": true, "result": payload })
    } else {
        payload
    };

    FunctionResponse {
        id: call.id.clone(),
        name: call.name.clone(),
        response: payload,
    }
}

/// Append tool results as user messages tagged with their invocation ids so
/// the model can correlate them on the next turn.
fn add_function_responses_to_messages(
    messages: &mut Vec<ChatMessage>,
    responses: &[FunctionResponse],
) {
    for response in responses {
        let text = serde_json::to_string(&response.response).unwrap_or_else(|_| "{}".to_owned());
        messages.push(ChatMessage::user(format!(
            "[Tool result {} ({})]: {}",
            response.id, response.name, text
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_response_keeps_invocation_id() {
        let call = FunctionCall {
            id: "call-7".to_owned(),
            name: "get_run_summary".to_owned(),
            args: serde_json::json!({}),
        };
        let tool_response = ToolResponse::success(&serde_json::json!({"run_count": 3}));
        let response = build_function_response(&call, &tool_response);
        assert_eq!(response.id, "call-7");
        assert_eq!(response.response["run_count"], 3);
    }

    #[test]
    fn test_error_payload_is_flagged_for_the_model() {
        let call = FunctionCall {
            id: "call-8".to_owned(),
            name: "get_recent_runs".to_owned(),
            args: serde_json::json!({"month": 13}),
        };
        let tool_response = ToolResponse::error(&serde_json::json!({"error": "bad month"}));
        let response = build_function_response(&call, &tool_response);
        assert_eq!(response.response["isError"], true);
    }

    #[test]
    fn test_history_entries_are_tagged() {
        let mut messages = Vec::new();
        add_function_responses_to_messages(
            &mut messages,
            &[FunctionResponse {
                id: "abc".to_owned(),
                name: "get_double_days".to_owned(),
                response: serde_json::json!({"count": 0}),
            }],
        );
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.starts_with("[Tool result abc (get_double_days)]"));
    }
}
