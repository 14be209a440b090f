// ABOUTME: JSON Schema and MCP-style response types for the tool protocol
// ABOUTME: Tool descriptors are serialized into tools/list responses for clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tool descriptor returned by the catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool name
    pub name: String,
    /// Human-readable description for LLM consumption
    pub description: String,
    /// Parameter schema
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always "object" for tool parameters
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Named parameter schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Names of required parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// An object schema with the given properties and required list
    #[must_use]
    pub fn object(
        properties: HashMap<String, PropertySchema>,
        required: Vec<&str>,
    ) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required.into_iter().map(str::to_owned).collect())
            },
        }
    }
}

/// Schema for one parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name
    #[serde(rename = "type")]
    pub property_type: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default applied when the parameter is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl PropertySchema {
    /// A typed property with a description
    #[must_use]
    pub fn new(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_owned(),
            description: Some(description.to_owned()),
            default: None,
        }
    }

    /// Attach a default value
    #[must_use]
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Content element of a tool response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text content (tool payloads are JSON-encoded strings)
    #[serde(rename = "text")]
    Text {
        /// The text body
        text: String,
    },
}

/// Tool response in MCP wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Response content blocks
    pub content: Vec<Content>,
    /// Whether this response carries an error payload
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResponse {
    /// Wrap a JSON payload as a successful response
    #[must_use]
    pub fn success(payload: &serde_json::Value) -> Self {
        Self {
            content: vec![Content::Text {
                text: payload.to_string(),
            }],
            is_error: None,
        }
    }

    /// Wrap a JSON payload as an error response
    #[must_use]
    pub fn error(payload: &serde_json::Value) -> Self {
        Self {
            content: vec![Content::Text {
                text: payload.to_string(),
            }],
            is_error: Some(true),
        }
    }

    /// The first text block, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|Content::Text { text }| text.as_str())
    }

    /// Whether this response carries an error payload
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}
