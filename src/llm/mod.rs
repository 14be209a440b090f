// ABOUTME: Chat model abstraction: message types, tool declarations, and the provider trait
// ABOUTME: Function calls carry correlation ids so tool results can be matched per turn
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Chat Model Provider Interface
//!
//! The contract a chat model transport must implement for the conversation
//! loop: role-based messages in, prose plus zero-or-more tool-call requests
//! out. The shipped implementation speaks the OpenAI-compatible chat
//! completions API, which covers Ollama, vLLM, and most cloud endpoints.

mod openai_compatible;
/// System prompt construction
pub mod prompts;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use prompts::insight_system_prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppResult;
use crate::tools::ToolSchema;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message (also used for tool results)
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// String form for wire protocols
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// Temperature for response randomness
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// One tool-call request from the model.
///
/// The `id` correlates this call with its result in the next turn; no two
/// calls in the same turn share one. Transports that omit ids get a
/// generated UUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Correlation identifier for this invocation
    pub id: String,
    /// Tool name to invoke
    pub name: String,
    /// Raw tool arguments
    pub args: Value,
}

/// The result of one tool call, fed back to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Correlation identifier copied from the call
    pub id: String,
    /// Tool name that was invoked
    pub name: String,
    /// Serialized tool result
    pub response: Value,
}

/// One tool declaration sent to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema of the parameters
    pub parameters: Option<Value>,
}

/// Tool catalog wrapper in the wire shape the model expects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Declared functions
    pub function_declarations: Vec<FunctionDeclaration>,
}

impl Tool {
    /// Build the model-facing catalog from tool descriptors.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a schema cannot be converted.
    pub fn from_schemas(schemas: &[ToolSchema]) -> AppResult<Self> {
        let function_declarations = schemas
            .iter()
            .map(|schema| {
                Ok(FunctionDeclaration {
                    name: schema.name.clone(),
                    description: schema.description.clone(),
                    parameters: Some(serde_json::to_value(&schema.input_schema)?),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self {
            function_declarations,
        })
    }
}

/// Response from a completion that may contain tool calls
#[derive(Debug, Clone)]
pub struct ChatResponseWithTools {
    /// Prose content, if any
    pub content: Option<String>,
    /// Tool calls requested this turn, in request order
    pub function_calls: Option<Vec<FunctionCall>>,
    /// Model that produced the response
    pub model: String,
    /// Token usage if reported
    pub usage: Option<TokenUsage>,
    /// Finish reason if reported
    pub finish_reason: Option<String>,
}

/// Chat model provider trait.
///
/// Implement this to plug a different transport into the conversation loop.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g. "ollama", "local")
    fn name(&self) -> &'static str;

    /// Default model used when the request does not name one
    fn default_model(&self) -> &str;

    /// Perform a chat completion with tool/function calling support.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the API call fails.
    async fn complete_with_tools(
        &self,
        request: &ChatRequest,
        tools: Option<&[Tool]>,
    ) -> AppResult<ChatResponseWithTools>;

    /// Check that the provider is reachable.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the endpoint cannot be reached.
    async fn health_check(&self) -> AppResult<bool>;
}
