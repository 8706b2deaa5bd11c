// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No credential available: {0}")]
    MissingCredential(String),

    #[error("GitHub API error: {0}")]
    RemoteFetch(String),

    #[error("Unknown contribution level: {0}")]
    UnknownLevel(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Marker message used when GitHub rejects a request for rate limiting.
    pub const GITHUB_RATE_LIMIT: &'static str = "Rate limit exceeded";

    /// Check if this is a rate limit error from GitHub.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            AppError::RemoteFetch(msg) => msg.contains(Self::GITHUB_RATE_LIMIT),
            _ => false,
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::MissingCredential(msg) => {
                tracing::error!(error = %msg, "Missing credential");
                (StatusCode::INTERNAL_SERVER_ERROR, "missing_credential", None)
            }
            AppError::RemoteFetch(msg) => {
                (StatusCode::BAD_GATEWAY, "github_error", Some(msg.clone()))
            }
            AppError::UnknownLevel(level) => {
                (StatusCode::BAD_GATEWAY, "unknown_level", Some(level.clone()))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
