// ABOUTME: Environment-only configuration with typed sub-structs and documented defaults
// ABOUTME: No config files; every knob is an environment variable with a sane default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Environment Configuration
//!
//! All runtime configuration comes from environment variables. Each setting
//! has a default suitable for local development, so `Config::from_env()` only
//! fails on values that are present but unparseable.

use crate::errors::{AppError, AppResult};
use std::env;

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default `127.0.0.1`)
    pub host: String,
    /// Bind port (default `8084`)
    pub port: u16,
}

/// Range cache settings
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Entry time-to-live in seconds (default 24 hours)
    pub ttl_secs: u64,
    /// Exact-match entry bound (default 50)
    pub max_entries: usize,
}

/// Analytics pipeline settings
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Minimum day gap reported by gap detection (default 14)
    pub gap_threshold_days: i64,
}

/// Chat model transport settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL (default Ollama at `http://localhost:11434/v1`)
    pub base_url: String,
    /// Model name (default `qwen2.5:14b-instruct`)
    pub model: String,
    /// Bearer token, empty for local servers
    pub api_key: Option<String>,
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Range cache settings
    pub cache: CacheSettings,
    /// Analytics settings
    pub analytics: AnalyticsConfig,
    /// Chat model settings
    pub llm: LlmConfig,
}

/// Default cache TTL: 24 hours
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Default exact-match cache bound
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 50;

/// Default minimum gap, in days, for gap detection
pub const DEFAULT_GAP_THRESHOLD_DAYS: i64 = 14;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8084;
const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434/v1";
const DEFAULT_LLM_MODEL: &str = "qwen2.5:14b-instruct";

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env_or("STRIDE_HTTP_HOST", DEFAULT_HOST),
                port: parse_env("STRIDE_HTTP_PORT", DEFAULT_PORT)?,
            },
            cache: CacheSettings {
                ttl_secs: parse_env("STRIDE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
                max_entries: parse_env("STRIDE_CACHE_MAX_ENTRIES", DEFAULT_CACHE_MAX_ENTRIES)?,
            },
            analytics: AnalyticsConfig {
                gap_threshold_days: parse_env(
                    "STRIDE_GAP_THRESHOLD_DAYS",
                    DEFAULT_GAP_THRESHOLD_DAYS,
                )?,
            },
            llm: LlmConfig {
                base_url: env_or("STRIDE_LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
                model: env_or("STRIDE_LLM_MODEL", DEFAULT_LLM_MODEL),
                api_key: env::var("STRIDE_LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            },
        })
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            gap_threshold_days: DEFAULT_GAP_THRESHOLD_DAYS,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::config(format!("invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
