// ABOUTME: Defines the InsightTool trait and ToolCapabilities for the tool architecture
// ABOUTME: Tools implement this trait to be registered and dispatched via the ToolRegistry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Tool Trait and Capabilities
//!
//! Every analytic capability is a named tool implementing [`InsightTool`]:
//! metadata for the catalog, a declarative parameter schema, and an async
//! handler. Capability flags describe how a tool touches data — notably
//! whether it bypasses the range cache for per-activity lap fetches.

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;

use super::context::ToolExecutionContext;
use super::schema::{JsonSchema, ToolSchema};

bitflags! {
    /// Capabilities a tool declares for logging and dispatch decisions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool reads the athlete's activity list
        const READS_ACTIVITIES = 0b0000_0001;
        /// Tool derives statistics rather than returning raw data
        const ANALYTICS = 0b0000_0010;
        /// Tool fetches per-activity lap data
        const LAP_DATA = 0b0000_0100;
        /// Tool calls the activity source directly, skipping the range cache
        const BYPASSES_CACHE = 0b0000_1000;
    }
}

impl ToolCapabilities {
    /// Check if the tool skips the range cache
    #[must_use]
    pub const fn bypasses_cache(self) -> bool {
        self.contains(Self::BYPASSES_CACHE)
    }

    /// Describe enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.contains(Self::READS_ACTIVITIES) {
            parts.push("reads_activities");
        }
        if self.contains(Self::ANALYTICS) {
            parts.push("analytics");
        }
        if self.contains(Self::LAP_DATA) {
            parts.push("lap_data");
        }
        if self.contains(Self::BYPASSES_CACHE) {
            parts.push("bypasses_cache");
        }
        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The trait every insight tool implements.
///
/// Tools are `Send + Sync` so the registry can share them across concurrent
/// requests; `name()` returns `&'static str` because the tool set is fixed
/// at process start.
#[async_trait]
pub trait InsightTool: Send + Sync {
    /// Unique identifier (e.g. `get_fastest_runs`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute with validated-at-runtime arguments.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-contract arguments or an
    /// upstream/internal error from execution. The registry converts either
    /// into an error payload; nothing propagates past the dispatch boundary.
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<Value>;

    /// Catalog entry for this tool
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            input_schema: self.input_schema(),
        }
    }
}
