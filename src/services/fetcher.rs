// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time-boxed caching around the remote calendar source.

use crate::error::AppError;
use crate::models::{CachedPayload, ContributionCalendar, DateWindow};
use crate::services::cache::CacheStore;
use crate::time_utils::trailing_year_window;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Remote provider of contribution calendars.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Fetch the calendar for `user_id`; `None` leaves the range to the
    /// provider.
    async fn fetch_remote(
        &self,
        user_id: &str,
        window: Option<DateWindow>,
    ) -> Result<ContributionCalendar, AppError>;
}

/// Date range requested on a cache miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryWindow {
    /// One year back from today (UTC) through today.
    #[default]
    TrailingYear,
    /// Let the provider pick.
    ProviderDefault,
}

/// Shared per-user fetch locks.
pub type FetchLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Cache-first calendar lookup.
///
/// Serves a stored calendar while it is younger than the freshness window;
/// otherwise fetches, stores and returns a new one. Fetch failures are
/// returned as-is and leave the stored entry untouched, stale or not.
#[derive(Clone)]
pub struct CachingFetcher {
    source: Arc<dyn ContributionSource>,
    store: Arc<dyn CacheStore>,
    /// Per-user mutex to serialize check-fetch-write cycles.
    locks: FetchLocks,
    window: QueryWindow,
}

impl CachingFetcher {
    pub fn new(source: Arc<dyn ContributionSource>, store: Arc<dyn CacheStore>) -> Self {
        Self {
            source,
            store,
            locks: Arc::new(DashMap::new()),
            window: QueryWindow::default(),
        }
    }

    pub fn with_window(mut self, window: QueryWindow) -> Self {
        self.window = window;
        self
    }

    /// Return the calendar for `user_id`, refetching once it is older than
    /// `max_age`.
    pub async fn get_calendar(
        &self,
        user_id: &str,
        max_age: Duration,
    ) -> Result<ContributionCalendar, AppError> {
        // Fast path: no lock
        if let Some(calendar) = self.fresh(user_id, max_age).await {
            tracing::debug!(user = user_id, "Calendar cache hit");
            return Ok(calendar);
        }

        // Only one task per user fetches; the others wait here.
        let lock = self
            .locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // Another task may have refreshed while we were waiting.
        if let Some(calendar) = self.fresh(user_id, max_age).await {
            tracing::debug!(user = user_id, "Calendar refreshed by concurrent request");
            return Ok(calendar);
        }

        let window = match self.window {
            QueryWindow::TrailingYear => Some(trailing_year_window(Utc::now().date_naive())),
            QueryWindow::ProviderDefault => None,
        };

        tracing::info!(
            user = user_id,
            from = ?window.map(|w| w.from),
            to = ?window.map(|w| w.to),
            "Fetching contribution calendar"
        );

        let calendar = self
            .source
            .fetch_remote(user_id, window)
            .await
            .inspect_err(|e| tracing::warn!(user = user_id, error = %e, "Calendar fetch failed"))?;

        self.store
            .put(user_id, CachedPayload::new(user_id, calendar.clone(), Utc::now()))
            .await;

        tracing::info!(
            user = user_id,
            weeks = calendar.week_count(),
            "Calendar cached"
        );
        Ok(calendar)
    }

    async fn fresh(&self, user_id: &str, max_age: Duration) -> Option<ContributionCalendar> {
        self.store
            .get(user_id)
            .await
            .filter(|entry| entry.is_fresh(Utc::now(), max_age))
            .map(|entry| entry.value)
    }
}
