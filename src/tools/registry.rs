// ABOUTME: Central tool registry with name lookup, catalog listing, and safe dispatch
// ABOUTME: Dispatch converts every handler failure into an error payload, never a crash
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Tool Registry
//!
//! A lookup table from tool name to handler. The set is fixed at process
//! start: `with_builtin_tools()` registers the full catalog and nothing is
//! added afterwards. Adding a tool to the codebase is a one-line
//! registration here, not a new arm in a dispatch conditional.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::context::ToolExecutionContext;
use super::implementations::{
    AnalyzeActivityLapsTool, FindTargetLapsTool, GetActivityGapsTool, GetDayOfWeekAnalysisTool,
    GetDoubleDaysTool, GetFastestRunsTool, GetLongestRunsTool, GetMonthlyLoadTool,
    GetRecentRunsTool, GetRunSummaryTool, GetTimeOfDayDistributionTool, GetTitleAnalysisTool,
};
use super::schema::{ToolResponse, ToolSchema};
use super::traits::InsightTool;

/// Central registry for insight tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn InsightTool>>,
    // Registration order, so catalogs list tools deterministically
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry with the full built-in catalog
    #[must_use]
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GetRecentRunsTool));
        registry.register(Arc::new(GetFastestRunsTool));
        registry.register(Arc::new(GetLongestRunsTool));
        registry.register(Arc::new(GetRunSummaryTool));
        registry.register(Arc::new(GetTimeOfDayDistributionTool));
        registry.register(Arc::new(GetDayOfWeekAnalysisTool));
        registry.register(Arc::new(GetTitleAnalysisTool));
        registry.register(Arc::new(GetActivityGapsTool));
        registry.register(Arc::new(GetMonthlyLoadTool));
        registry.register(Arc::new(GetDoubleDaysTool));
        registry.register(Arc::new(AnalyzeActivityLapsTool));
        registry.register(Arc::new(FindTargetLapsTool));
        registry
    }

    /// Register a tool. Returns `false` when the name is already taken.
    pub fn register(&mut self, tool: Arc<dyn InsightTool>) -> bool {
        let name = tool.name().to_owned();
        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }
        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        true
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn InsightTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Catalog of all tool descriptors, in registration order
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.schema())
            .collect()
    }

    /// Dispatch one tool call.
    ///
    /// The boundary contract: this never returns an `Err` and never panics
    /// past the handler. Unknown names and handler failures both come back
    /// as `{error, tool, arguments}` payloads flagged `isError`, which the
    /// conversation loop feeds to the model as an ordinary (if unhelpful)
    /// result.
    pub async fn call(
        &self,
        name: &str,
        arguments: Value,
        context: &ToolExecutionContext,
    ) -> ToolResponse {
        let Some(tool) = self.tools.get(name) else {
            warn!("Requested unknown tool '{}'", name);
            return ToolResponse::error(&json!({
                "error": format!("Tool '{name}' not found"),
                "tool": name,
                "arguments": arguments,
            }));
        };

        debug!(tool = name, "dispatching tool call");
        match tool.execute(arguments.clone(), context).await {
            Ok(payload) => ToolResponse::success(&payload),
            Err(e) => {
                warn!(tool = name, error = %e, "tool execution failed");
                ToolResponse::error(&json!({
                    "error": e.to_string(),
                    "tool": name,
                    "arguments": arguments,
                }))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
