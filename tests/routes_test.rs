// ABOUTME: HTTP boundary tests: insight endpoint envelopes, tool catalog, health probe
// ABOUTME: Drives the router in-process with tower::ServiceExt::oneshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stride_insights::routes::{router, AppState};
use stride_insights::services::{InsightService, LocalToolChannel};
use stride_insights::tools::ToolRegistry;

use common::{context_for, scenario_activities, ScriptedModel};

fn test_app(turns: Vec<stride_insights::llm::ChatResponseWithTools>) -> axum::Router {
    let (_, context) = context_for(scenario_activities());
    let registry = Arc::new(ToolRegistry::with_builtin_tools());
    let channel = Arc::new(LocalToolChannel::new(registry.clone(), context));
    let model = Arc::new(ScriptedModel::new(turns));
    let service = Arc::new(InsightService::new(model, channel));
    router(AppState { service, registry })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[tokio::test]
async fn test_insight_round_trip() {
    let app = test_app(vec![ScriptedModel::prose_turn("You ran twice in January.")]);

    let response = app
        .oneshot(
            Request::post("/api/insight")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"question": "How often did I run?"}).to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["question"], "How often did I run?");
    assert_eq!(body["answer"], "You ran twice in January.");
    assert_eq!(body["supportingActivities"], json!([]));
}

#[tokio::test]
async fn test_empty_question_is_400_envelope() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(
            Request::post("/api/insight")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"question": ""}).to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["status"], 400);
    assert!(body["details"]
        .as_str()
        .expect("details string")
        .contains("question"));
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(
            Request::post("/api/insight")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tool_catalog_lists_every_tool() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(Request::get("/api/tools").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let tools = body["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 12);
    assert!(tools
        .iter()
        .any(|t| t["name"] == "get_time_of_day_distribution"));
    // Descriptors carry schemas with typed properties
    assert_eq!(tools[0]["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn test_health_probe() {
    let app = test_app(vec![]);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
