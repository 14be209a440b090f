// ABOUTME: Insight endpoint handlers: question in, prose answer out
// ABOUTME: Validation failures map to 400 envelopes, internal failures to 500
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::errors::{AppError, ErrorResponse};
use crate::services::Insight;
use crate::tools::ToolSchema;

use super::AppState;

/// Body of an insight request
#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    /// The natural-language question
    pub question: String,
}

/// Catalog listing response
#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    /// All tool descriptors
    pub tools: Vec<ToolSchema>,
}

/// `AppError` wrapper that renders the JSON envelope with the right status
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        // Stack detail stays in the logs; the caller gets the message string
        error!(code = ?error.code, message = %error.message, "request failed");
        let status = StatusCode::from_u16(error.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(error))).into_response()
    }
}

/// `POST /api/insight` — answer a natural-language question.
pub async fn post_insight(
    State(state): State<AppState>,
    Json(request): Json<InsightRequest>,
) -> Result<Json<Insight>, ApiError> {
    let insight = state.service.get_insight(&request.question).await?;
    Ok(Json(insight))
}

/// `GET /api/tools` — the tool catalog for MCP-style clients.
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: state.registry.list_schemas(),
    })
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
