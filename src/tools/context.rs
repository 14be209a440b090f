// ABOUTME: Execution context giving tools access to the activity source and range cache
// ABOUTME: Replaces scattered parameter passing with one shared, cheaply-cloned object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use crate::cache::RangeCache;
use crate::config::AnalyticsConfig;
use crate::providers::ActivitySource;
use std::sync::Arc;

/// Context provided to every tool execution.
///
/// The `Arc` fields are shared process-wide: one cache instance lives for
/// the process lifetime, and the activity source is whatever the entry point
/// wired in.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Upstream activity data
    pub source: Arc<dyn ActivitySource>,
    /// Shared range cache
    pub cache: Arc<RangeCache>,
    /// Analytics settings (gap threshold etc.)
    pub analytics: AnalyticsConfig,
}

impl ToolExecutionContext {
    /// Create a context over the shared resources
    #[must_use]
    pub fn new(
        source: Arc<dyn ActivitySource>,
        cache: Arc<RangeCache>,
        analytics: AnalyticsConfig,
    ) -> Self {
        Self {
            source,
            cache,
            analytics,
        }
    }
}
