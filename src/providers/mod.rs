// ABOUTME: Activity source abstraction for unified access to tracked workout data
// ABOUTME: Defines the trait upstream clients implement plus the fixture source for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Activity Source
//!
//! The seam between this service and the upstream fitness-tracking API.
//! Everything above this trait treats activity data as an opaque list of
//! [`ActivityRecord`]s: pagination, token refresh, and rate-limit backoff are
//! the implementor's concern.
//!
//! Date ranges are inclusive on both ends. Implementors wrapping a half-open
//! upstream API must widen the end bound by one day before querying.

/// Deterministic in-memory source for tests and local development
pub mod fixture;

use crate::errors::AppResult;
use crate::models::{ActivityRecord, LapRecord};
use async_trait::async_trait;
use chrono::NaiveDate;

pub use fixture::FixtureSource;

/// Upstream activity data contract.
///
/// Implementations must be cheap to share (`Arc`) and safe to call
/// concurrently; the range cache above this trait serializes nothing.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Source identifier for logging (e.g. "strava", "fixture")
    fn name(&self) -> &'static str;

    /// Fetch every activity the athlete has recorded.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the source cannot be reached or
    /// rejects the request.
    async fn fetch_all_activities(&self) -> AppResult<Vec<ActivityRecord>>;

    /// Fetch activities whose local start date falls inside
    /// `[start, end]` (both inclusive).
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the source cannot be reached or
    /// rejects the request.
    async fn fetch_activities_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ActivityRecord>>;

    /// Fetch lap splits for one activity.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or an upstream error
    /// when the source cannot be reached.
    async fn fetch_activity_laps(&self, activity_id: &str) -> AppResult<Vec<LapRecord>>;
}
