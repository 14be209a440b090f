// ABOUTME: Server binary: wires config, cache, tools, model transport, and HTTP routes
// ABOUTME: Ships with the fixture activity source; a real upstream implements ActivitySource
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use stride_insights::cache::RangeCache;
use stride_insights::config::Config;
use stride_insights::llm::OpenAiCompatibleProvider;
use stride_insights::logging;
use stride_insights::providers::FixtureSource;
use stride_insights::routes::{router, AppState};
use stride_insights::services::{InsightService, LocalToolChannel};
use stride_insights::tools::{ToolExecutionContext, ToolRegistry};

/// Natural-language insights over a runner's activity history
#[derive(Parser, Debug)]
#[command(name = "stride-insights-server", version, about)]
struct Args {
    /// Bind address (overrides STRIDE_HTTP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides STRIDE_HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let config = Config::from_env()?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    // The upstream HTTP client is an external collaborator; the shipped
    // source serves deterministic fixture data so the stack runs without
    // credentials. Swap in any ActivitySource implementation here.
    let source = Arc::new(FixtureSource::season());
    let cache = Arc::new(RangeCache::new(&config.cache));
    let registry = Arc::new(ToolRegistry::with_builtin_tools());

    let context = ToolExecutionContext::new(source, cache, config.analytics.clone());
    let channel = Arc::new(LocalToolChannel::new(registry.clone(), context));
    let model = Arc::new(OpenAiCompatibleProvider::from_config(&config.llm)?);
    let service = Arc::new(InsightService::new(model, channel));

    let state = AppState {
        service: service.clone(),
        registry,
    };

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("stride-insights listening on {host}:{port}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.disconnect().await;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install ctrl-c handler: {e}");
    }
}
