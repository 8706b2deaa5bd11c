// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables, and the
//! widget layout presets.

use crate::services::layout::MissingDataPolicy;
use crate::services::levels::OpacityRange;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// User shown when the request does not name one.
pub const FALLBACK_USERNAME: &str = "vtolj";

/// Default GitHub GraphQL endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com/graphql";

/// Default freshness window for cached calendars (30 minutes).
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 30 * 60;

/// Upper bound for `CACHE_MAX_AGE_SECS` (one year).
pub const MAX_CACHE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// Application configuration, loaded once at startup.
///
/// The GitHub token is not part of this struct; it comes from a
/// [`CredentialProvider`](crate::services::credentials::CredentialProvider).
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GraphQL endpoint
    pub github_api_url: String,
    /// User rendered when no `user` parameter is given
    pub default_username: String,
    /// Maximum age of a cached calendar before it is refetched
    pub cache_max_age_secs: u64,
    /// Directory for the on-disk cache; in-memory when unset
    pub cache_dir: Option<PathBuf>,
    /// Layout preset used when the request does not pick one
    pub default_preset: Preset,
    /// Timeout for a single GitHub request
    pub http_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            github_api_url: GITHUB_API_URL.to_string(),
            default_username: FALLBACK_USERNAME.to_string(),
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            cache_dir: None,
            default_preset: Preset::Compact,
            http_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| GITHUB_API_URL.to_string()),
            default_username: env::var("DEFAULT_USERNAME")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| FALLBACK_USERNAME.to_string()),
            cache_max_age_secs: cache_max_age_var()?,
            cache_dir: env::var("CACHE_DIR").ok().map(PathBuf::from),
            default_preset: parse_var("WIDGET_PRESET", Preset::Compact)?,
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", 10)?,
        })
    }

    /// Freshness window for cached calendars.
    pub fn cache_max_age(&self) -> chrono::Duration {
        // Bounded by MAX_CACHE_MAX_AGE_SECS when loaded from the environment.
        let secs = self.cache_max_age_secs.min(MAX_CACHE_MAX_AGE_SECS);
        chrono::Duration::seconds(secs as i64)
    }
}

fn cache_max_age_var() -> Result<u64, ConfigError> {
    let secs = parse_var("CACHE_MAX_AGE_SECS", DEFAULT_CACHE_MAX_AGE_SECS)?;
    if secs > MAX_CACHE_MAX_AGE_SECS {
        return Err(ConfigError::Invalid("CACHE_MAX_AGE_SECS", secs.to_string()));
    }
    Ok(secs)
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

/// Named widget layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Last 16 weeks, one row per weekday.
    Compact,
    /// Last 25 weeks stretched over 10 rows to fill a medium widget.
    FullYear,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Preset::Compact),
            "full-year" => Ok(Preset::FullYear),
            other => Err(ConfigError::Invalid("WIDGET_PRESET", other.to_string())),
        }
    }
}

impl Preset {
    pub fn widget_config(self) -> WidgetConfig {
        match self {
            Preset::Compact => WidgetConfig::compact(),
            Preset::FullYear => WidgetConfig::full_year(),
        }
    }
}

/// Grid geometry and styling for one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub columns: usize,
    pub rows: usize,
    pub cell_size: u32,
    pub padding: u32,
    pub corner_radius: u32,
    pub opacity: OpacityRange,
    /// Fill for cells with no backing day.
    pub empty_color: String,
    pub empty_opacity: f64,
    pub missing: MissingDataPolicy,
}

impl WidgetConfig {
    pub const EMPTY_COLOR: &'static str = "#1e1e1e";
    pub const EMPTY_OPACITY: f64 = 0.1;

    pub fn compact() -> Self {
        Self {
            columns: 16,
            rows: 7,
            cell_size: 9,
            padding: 1,
            corner_radius: 3,
            opacity: OpacityRange::COMPACT,
            empty_color: Self::EMPTY_COLOR.to_string(),
            empty_opacity: Self::EMPTY_OPACITY,
            missing: MissingDataPolicy::FillEmpty,
        }
    }

    pub fn full_year() -> Self {
        Self {
            columns: 25,
            rows: 10,
            cell_size: 10,
            padding: 2,
            corner_radius: 2,
            opacity: OpacityRange::FULL_YEAR,
            empty_color: Self::EMPTY_COLOR.to_string(),
            empty_opacity: Self::EMPTY_OPACITY,
            missing: MissingDataPolicy::FillEmpty,
        }
    }

    /// Pixel extent of `count` cells separated by padding.
    pub fn extent(&self, count: usize) -> u32 {
        let count = count as u32;
        count * self.cell_size + count.saturating_sub(1) * self.padding
    }
}
