// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contribution calendar model as returned by the GitHub GraphQL API.

use crate::error::AppError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Quartile-bucketed intensity of a single day's contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityLevel {
    None,
    FirstQuartile,
    SecondQuartile,
    ThirdQuartile,
    FourthQuartile,
}

impl ActivityLevel {
    /// Highest ordinal; used as the divisor when normalizing.
    pub const MAX_ORDINAL: u8 = 4;

    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::None,
        ActivityLevel::FirstQuartile,
        ActivityLevel::SecondQuartile,
        ActivityLevel::ThirdQuartile,
        ActivityLevel::FourthQuartile,
    ];

    /// Position in the enumeration, 0 through 4.
    pub fn ordinal(self) -> u8 {
        match self {
            ActivityLevel::None => 0,
            ActivityLevel::FirstQuartile => 1,
            ActivityLevel::SecondQuartile => 2,
            ActivityLevel::ThirdQuartile => 3,
            ActivityLevel::FourthQuartile => 4,
        }
    }

    /// Wire name used by the GraphQL `ContributionLevel` enum.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::None => "NONE",
            ActivityLevel::FirstQuartile => "FIRST_QUARTILE",
            ActivityLevel::SecondQuartile => "SECOND_QUARTILE",
            ActivityLevel::ThirdQuartile => "THIRD_QUARTILE",
            ActivityLevel::FourthQuartile => "FOURTH_QUARTILE",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| AppError::UnknownLevel(s.to_string()))
    }
}

/// One calendar day.
///
/// The level is kept as the raw wire token so a cached payload is exactly
/// what the API returned; it is parsed when the day is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Only present when the query requested it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub contribution_level: String,
    /// Base color token, e.g. `#216e39`.
    pub color: String,
}

impl Day {
    /// Parse the raw level token.
    pub fn level(&self) -> Result<ActivityLevel, AppError> {
        self.contribution_level.parse()
    }
}

/// A week of days, normally seven but short at the edges of a range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub contribution_days: Vec<Day>,
}

/// Weeks in ascending chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    pub weeks: Vec<Week>,
}

impl ContributionCalendar {
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Day at `(week, day)`, if both indices exist.
    pub fn day(&self, week: usize, day: usize) -> Option<&Day> {
        self.weeks.get(week)?.contribution_days.get(day)
    }
}

/// Inclusive date range sent with a calendar query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Cache entry for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPayload {
    pub key: String,
    pub value: ContributionCalendar,
    pub fetched_at: DateTime<Utc>,
}

impl CachedPayload {
    pub fn new(
        key: impl Into<String>,
        value: ContributionCalendar,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            value,
            fetched_at,
        }
    }

    /// Fresh when `now - fetched_at <= max_age`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.fetched_at <= max_age
    }
}
