// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use contrib_heatmap::config::Config;
use contrib_heatmap::error::AppError;
use contrib_heatmap::models::{ContributionCalendar, DateWindow, Day, Week};
use contrib_heatmap::routes::create_router;
use contrib_heatmap::services::{
    CachingFetcher, ContributionSource, MemoryStore, WidgetAssembler,
};
use contrib_heatmap::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build a week of seven days at one level.
#[allow(dead_code)]
pub fn uniform_week(level: &str, color: &str) -> Week {
    Week {
        contribution_days: (0..7)
            .map(|_| Day {
                date: None,
                contribution_level: level.to_string(),
                color: color.to_string(),
            })
            .collect(),
    }
}

/// Calendar of `weeks` identical weeks.
#[allow(dead_code)]
pub fn uniform_calendar(weeks: usize, level: &str) -> ContributionCalendar {
    ContributionCalendar {
        weeks: (0..weeks).map(|_| uniform_week(level, "#ebedf0")).collect(),
    }
}

/// Scripted remote source that counts its calls.
#[derive(Default)]
pub struct FakeSource {
    calls: AtomicUsize,
    users: Mutex<Vec<String>>,
    response: Mutex<Option<Result<ContributionCalendar, String>>>,
    delay_ms: u64,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn returning(calendar: ContributionCalendar) -> Self {
        Self {
            response: Mutex::new(Some(Ok(calendar))),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Mutex::new(Some(Err(message.to_string()))),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn set_response(&self, calendar: ContributionCalendar) {
        *self.response.lock().unwrap() = Some(Ok(calendar));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn users(&self) -> Vec<String> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContributionSource for FakeSource {
    async fn fetch_remote(
        &self,
        user_id: &str,
        _window: Option<DateWindow>,
    ) -> Result<ContributionCalendar, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().push(user_id.to_string());
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        match self.response.lock().unwrap().clone() {
            Some(Ok(calendar)) => Ok(calendar),
            Some(Err(message)) => Err(AppError::RemoteFetch(message)),
            None => Ok(ContributionCalendar::default()),
        }
    }
}

/// Create a test app backed by `source` and an in-memory cache.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(source: Arc<FakeSource>) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let fetcher = CachingFetcher::new(source, Arc::new(MemoryStore::new()));
    let assembler = WidgetAssembler::new(fetcher, config.cache_max_age());

    let state = Arc::new(AppState { config, assembler });

    (create_router(state.clone()), state)
}
