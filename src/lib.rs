// ABOUTME: Crate root for the stride-insights service library
// ABOUTME: Modules are layered: providers/cache feed intelligence, tools wrap it, services drive it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Stride Insights
//!
//! Natural-language insights over a runner's activity history. A chat model
//! orchestrates a fixed catalog of analytics tools over activity records
//! pulled from a fitness-tracking source:
//!
//! - [`providers`] — the activity source seam (upstream API is external)
//! - [`cache`] — time-range-aware memoization with an all-time superset
//! - [`intelligence`] — pure analytics: pace, rankings, distributions,
//!   gaps, load progression, double days, laps
//! - [`tools`] — the schema-validated tool registry and dispatcher
//! - [`llm`] — chat model types and the OpenAI-compatible transport
//! - [`services`] — the agentic conversation loop
//! - [`routes`] — the HTTP boundary

/// Range cache for activity queries
pub mod cache;
/// Environment-driven configuration
pub mod config;
/// Unified error handling
pub mod errors;
/// Analytics pipeline
pub mod intelligence;
/// Chat model abstraction and transport
pub mod llm;
/// Logging setup
pub mod logging;
/// Domain models
pub mod models;
/// Activity source trait and fixture implementation
pub mod providers;
/// HTTP routes
pub mod routes;
/// Domain services (the insight loop)
pub mod services;
/// Tool registry and dispatcher
pub mod tools;
