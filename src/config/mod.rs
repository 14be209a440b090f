// ABOUTME: Configuration module root re-exporting the environment-driven config loader
// ABOUTME: The service is configured exclusively from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

/// Environment-variable-backed configuration
pub mod environment;

pub use environment::{AnalyticsConfig, CacheSettings, Config, LlmConfig, ServerConfig};
