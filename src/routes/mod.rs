// ABOUTME: HTTP boundary: router construction and shared route state
// ABOUTME: Exposes the insight endpoint, the tool catalog, and a health probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

/// Insight request/response handlers
pub mod insight;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Hard ceiling on one request; insight loops can be slow but not unbounded
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

use crate::services::InsightService;
use crate::tools::ToolRegistry;

/// Shared state for all routes
#[derive(Clone)]
pub struct AppState {
    /// The agentic insight service
    pub service: Arc<InsightService>,
    /// The tool registry, for catalog listing
    pub registry: Arc<ToolRegistry>,
}

/// Build the service router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/insight", post(insight::post_insight))
        .route("/api/tools", get(insight::list_tools))
        .route("/health", get(insight::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
