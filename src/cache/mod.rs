// ABOUTME: Time-range-aware activity cache with a privileged all-time superset entry
// ABOUTME: Serves date-bounded subsets from the superset to avoid redundant upstream fetches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Range Cache
//!
//! Memoizes activity query results keyed by query fingerprint. A query with
//! no meaningful date bound is an *all-time* query; its result is kept as a
//! single privileged superset entry which, while fresh, answers both all-time
//! requests and any date-bounded request by filtering in memory.
//!
//! Cache operations never fail: a miss is a normal outcome and the caller
//! falls back to the live activity source. Entries expire lazily on read
//! after a fixed TTL; the bounded exact-match map evicts its oldest-inserted
//! entry, never the superset.

use crate::config::CacheSettings;
use crate::errors::AppResult;
use crate::models::{ActivityRecord, SportType};
use crate::providers::ActivitySource;
use chrono::{Local, NaiveDate};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Earliest date the service considers meaningful. An `after` bound at or
/// before this floor carries no information, so the query is all-time.
pub const EPOCH_FLOOR: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(d) => d,
    None => panic!("epoch floor is a valid date"),
};

/// Query shape used as the cache fingerprint.
///
/// `before`/`after` take precedence over bounds implied by `year`/`month`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    /// Restrict to a calendar year
    pub year: Option<i32>,
    /// Restrict to a month (1-12) within `year`
    pub month: Option<u32>,
    /// Only activities strictly before this date
    pub before: Option<NaiveDate>,
    /// Only activities on or after this date
    pub after: Option<NaiveDate>,
    /// Restrict to one sport type
    pub sport: Option<SportType>,
    /// Include activities flagged private
    pub include_private: bool,
}

impl ActivityQuery {
    /// Resolve the effective date bounds: explicit `before`/`after` override
    /// anything implied by `year`/`month`.
    ///
    /// Returns `(start_inclusive, end_exclusive)`.
    #[must_use]
    pub fn resolved_bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let (implied_start, implied_end) = match (self.year, self.month) {
            (Some(year), Some(month)) => {
                let start = NaiveDate::from_ymd_opt(year, month, 1);
                let end = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                };
                (start, end)
            }
            (Some(year), None) => (
                NaiveDate::from_ymd_opt(year, 1, 1),
                NaiveDate::from_ymd_opt(year + 1, 1, 1),
            ),
            _ => (None, None),
        };

        let start = self.after.or(implied_start);
        let end = self.before.or(implied_end);
        (start, end)
    }

    /// An all-time request has no end bound and either no start bound or a
    /// start bound at or before the epoch floor.
    #[must_use]
    pub fn is_all_time(&self) -> bool {
        let (start, end) = self.resolved_bounds();
        end.is_none() && start.map_or(true, |s| s <= EPOCH_FLOOR)
    }

    /// Whether a record passes this query's filters
    #[must_use]
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        if !self.include_private && record.is_private {
            return false;
        }
        if let Some(ref sport) = self.sport {
            if &record.sport_type != sport {
                return false;
            }
        }
        let (start, end) = self.resolved_bounds();
        let date = record.local_date();
        if start.is_some_and(|s| date < s) {
            return false;
        }
        if end.is_some_and(|e| date >= e) {
            return false;
        }
        true
    }
}

impl fmt::Display for ActivityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_date = |d: Option<NaiveDate>| d.map_or_else(|| "-".to_owned(), |d| d.to_string());
        write!(
            f,
            "year:{}:month:{}:before:{}:after:{}:sport:{}:private:{}",
            self.year.map_or_else(|| "-".to_owned(), |y| y.to_string()),
            self.month.map_or_else(|| "-".to_owned(), |m| m.to_string()),
            fmt_date(self.before),
            fmt_date(self.after),
            self.sport
                .as_ref()
                .map_or("-", SportType::as_str),
            self.include_private,
        )
    }
}

/// A cached exact-match query result
#[derive(Debug, Clone)]
struct CachedEntry {
    records: Vec<ActivityRecord>,
    stored_at: Instant,
}

impl CachedEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// The privileged all-time entry with its observed date span
#[derive(Debug, Clone)]
struct SupersetEntry {
    records: Vec<ActivityRecord>,
    stored_at: Instant,
    span: Option<(NaiveDate, NaiveDate)>,
}

#[derive(Default)]
struct CacheState {
    superset: Option<SupersetEntry>,
    exact: HashMap<String, CachedEntry>,
    insertion_order: VecDeque<String>,
}

/// Time-range-aware activity cache shared across requests
pub struct RangeCache {
    ttl: Duration,
    max_entries: usize,
    state: RwLock<CacheState>,
}

impl RangeCache {
    /// Create a cache from settings
    #[must_use]
    pub fn new(settings: &CacheSettings) -> Self {
        Self {
            ttl: Duration::from_secs(settings.ttl_secs),
            max_entries: settings.max_entries.max(1),
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Look up a query. Returns the matching record list or `None` on miss.
    ///
    /// A fresh superset entry answers every query by filtering in memory;
    /// otherwise only an unexpired exact fingerprint match hits. Expired
    /// entries are removed here, not by a background sweep.
    pub async fn get(&self, query: &ActivityQuery) -> Option<Vec<ActivityRecord>> {
        let mut state = self.state.write().await;

        if let Some(ref superset) = state.superset {
            if superset.stored_at.elapsed() < self.ttl {
                let filtered: Vec<ActivityRecord> = superset
                    .records
                    .iter()
                    .filter(|r| query.matches(r))
                    .cloned()
                    .collect();
                debug!(
                    fingerprint = %query,
                    matched = filtered.len(),
                    span = ?superset.span,
                    "range cache: served from superset"
                );
                return Some(filtered);
            }
            state.superset = None;
        }

        let fingerprint = query.to_string();
        match state.exact.get(&fingerprint) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                debug!(fingerprint = %query, "range cache: exact hit");
                Some(entry.records.clone())
            }
            Some(_) => {
                state.exact.remove(&fingerprint);
                state.insertion_order.retain(|k| k != &fingerprint);
                None
            }
            None => None,
        }
    }

    /// Store a query result. An all-time write additionally installs the
    /// privileged superset entry with the observed date span of its records.
    pub async fn set(&self, query: &ActivityQuery, records: Vec<ActivityRecord>) {
        let mut state = self.state.write().await;

        if query.is_all_time() {
            let span = observed_span(&records);
            debug!(count = records.len(), span = ?span, "range cache: superset stored");
            state.superset = Some(SupersetEntry {
                records: records.clone(),
                stored_at: Instant::now(),
                span,
            });
        }

        let fingerprint = query.to_string();
        if !state.exact.contains_key(&fingerprint) {
            state.insertion_order.push_back(fingerprint.clone());
        }
        state.exact.insert(
            fingerprint,
            CachedEntry {
                records,
                stored_at: Instant::now(),
            },
        );

        while state.exact.len() > self.max_entries {
            let Some(oldest) = state.insertion_order.pop_front() else {
                break;
            };
            state.exact.remove(&oldest);
            debug!(fingerprint = %oldest, "range cache: evicted oldest entry");
        }
    }

    /// Drop the superset entry and all exact-match entries
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.superset = None;
        state.exact.clear();
        state.insertion_order.clear();
    }

    /// Number of live exact-match entries (expired entries may be counted
    /// until the next read touches them)
    pub async fn exact_len(&self) -> usize {
        self.state.read().await.exact.len()
    }

    /// Whether a superset entry is currently installed
    pub async fn has_superset(&self) -> bool {
        self.state.read().await.superset.is_some()
    }
}

fn observed_span(records: &[ActivityRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = records.iter().map(ActivityRecord::local_date).min()?;
    let max = records.iter().map(ActivityRecord::local_date).max()?;
    Some((min, max))
}

/// Resolve activity data for a query: cache hit, or upstream fetch + store.
///
/// An all-time query fetches everything; a bounded query fetches only the
/// resolved window. Missing bounds fall back to the epoch floor and today.
///
/// # Errors
///
/// Propagates upstream fetch failures; the cache itself never fails.
pub async fn resolve_activities(
    cache: &RangeCache,
    source: &dyn ActivitySource,
    query: &ActivityQuery,
) -> AppResult<Vec<ActivityRecord>> {
    if let Some(records) = cache.get(query).await {
        return Ok(records);
    }

    let fetched = if query.is_all_time() {
        source.fetch_all_activities().await?
    } else {
        let (start, end) = query.resolved_bounds();
        let start = start.unwrap_or(EPOCH_FLOOR);
        // The upstream range is inclusive; our end bound is exclusive.
        let end = end
            .and_then(|e| e.pred_opt())
            .unwrap_or_else(|| Local::now().date_naive());
        source.fetch_activities_by_date_range(start, end).await?
    };

    // Upstream answers the date window; the remaining filters are local.
    let records: Vec<ActivityRecord> = fetched.into_iter().filter(|r| query.matches(r)).collect();

    if records.is_empty() && !query.is_all_time() {
        debug!(fingerprint = %query, "range cache: caching empty window result");
    }
    cache.set(query, records.clone()).await;

    if records.len() > 10_000 {
        warn!(
            count = records.len(),
            "unusually large activity window; consider narrowing the query"
        );
    }

    Ok(records)
}
