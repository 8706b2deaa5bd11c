// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use contrib_heatmap::error::AppError;

#[test]
fn test_is_rate_limited_matches() {
    let err = AppError::RemoteFetch(AppError::GITHUB_RATE_LIMIT.to_string());
    assert!(err.is_rate_limited());
}

#[test]
fn test_is_rate_limited_no_match() {
    let err = AppError::RemoteFetch("HTTP 500: oops".to_string());
    assert!(!err.is_rate_limited());

    let err = AppError::BadRequest(AppError::GITHUB_RATE_LIMIT.to_string());
    assert!(!err.is_rate_limited());
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::RemoteFetch("x".to_string()), StatusCode::BAD_GATEWAY),
        (AppError::UnknownLevel("x".to_string()), StatusCode::BAD_GATEWAY),
        (
            AppError::MissingCredential("x".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (
            AppError::Internal(anyhow::anyhow!("x")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}
