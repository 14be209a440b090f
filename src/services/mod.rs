// ABOUTME: Domain services above the tool layer
// ABOUTME: Currently the agentic insight loop and its tool-execution channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

/// Agentic conversation loop answering natural-language questions
pub mod insight;

pub use insight::{Insight, InsightService, LocalToolChannel, ToolChannel};
