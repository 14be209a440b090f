// ABOUTME: Tool registry and dispatcher: named, schema-validated analytics capabilities
// ABOUTME: The set is fixed at process start; dispatch never lets a tool failure escape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Tool Registry & Dispatcher
//!
//! Each analytic capability is exposed as a named tool with a declarative
//! parameter schema and an async handler. The registry owns lookup, catalog
//! listing, and the dispatch boundary that converts handler failures into
//! error payloads.

/// Execution context shared by all tools
pub mod context;
/// Tool-specific error types
pub mod errors;
/// Built-in tool implementations
pub mod implementations;
/// Shared argument parsing helpers
pub mod params;
/// Central registry and dispatch
pub mod registry;
/// JSON Schema and response types
pub mod schema;
/// The `InsightTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use schema::{Content, JsonSchema, PropertySchema, ToolResponse, ToolSchema};
pub use traits::{InsightTool, ToolCapabilities};
