// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub GraphQL client for contribution calendars.
//!
//! Handles:
//! - Bearer authentication from a credential provider
//! - Optional trailing date window on the query
//! - Rate limit detection (429, or 403 with an exhausted quota)
//! - GraphQL-level errors and unknown users

use crate::error::AppError;
use crate::models::{ContributionCalendar, DateWindow};
use crate::services::credentials::CredentialProvider;
use crate::services::fetcher::ContributionSource;
use crate::time_utils::format_iso_date;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const CALENDAR_QUERY: &str = r#"query($login: String!, $from: DateTime, $to: DateTime) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            contributionLevel
            color
            date
          }
        }
      }
    }
  }
}"#;

/// GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a client, failing if the provider has no token.
    pub fn new(
        api_url: impl Into<String>,
        credentials: &dyn CredentialProvider,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let token = credentials.bearer_token().ok_or_else(|| {
            AppError::MissingCredential("GitHub token not found in credential store".to_string())
        })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            token,
        })
    }

    /// Query the contribution calendar for `login`.
    ///
    /// With no window GitHub uses its own default range (the last year).
    pub async fn contribution_calendar(
        &self,
        login: &str,
        window: Option<DateWindow>,
    ) -> Result<ContributionCalendar, AppError> {
        let body = serde_json::json!({
            "query": CALENDAR_QUERY,
            "variables": {
                "login": login,
                "from": window.map(|w| format_iso_date(w.from)),
                "to": window.map(|w| format_iso_date(w.to)),
            }
        });

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::RemoteFetch(e.to_string()))?;

        let payload: GraphQlResponse<UserData> = self.check_response_json(response).await?;
        into_calendar(payload, login)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let quota_exhausted = response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v.as_bytes() == b"0");
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 || (status.as_u16() == 403 && quota_exhausted) {
                tracing::warn!(status = status.as_u16(), "GitHub rate limit hit");
                return Err(AppError::RemoteFetch(AppError::GITHUB_RATE_LIMIT.to_string()));
            }

            return Err(AppError::RemoteFetch(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::RemoteFetch(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl ContributionSource for GitHubClient {
    async fn fetch_remote(
        &self,
        user_id: &str,
        window: Option<DateWindow>,
    ) -> Result<ContributionCalendar, AppError> {
        self.contribution_calendar(user_id, window).await
    }
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

/// Unwrap the calendar, turning GraphQL errors and missing users into
/// fetch errors.
pub fn into_calendar(
    response: GraphQlResponse<UserData>,
    login: &str,
) -> Result<ContributionCalendar, AppError> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(AppError::RemoteFetch(format!(
            "GraphQL error: {}",
            messages.join("; ")
        )));
    }

    response
        .data
        .and_then(|data| data.user)
        .map(|user| user.contributions_collection.contribution_calendar)
        .ok_or_else(|| AppError::RemoteFetch(format!("User {} not found", login)))
}
