// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub GraphQL client tests against a local stand-in server.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use contrib_heatmap::error::AppError;
use contrib_heatmap::models::DateWindow;
use contrib_heatmap::services::{GitHubClient, StaticCredentials};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stand-in server answers and what it saw.
#[derive(Default)]
struct Recorded {
    status: u16,
    body: Value,
    rate_limit_remaining: Option<&'static str>,
    requests: Mutex<Vec<(Option<String>, Value)>>,
}

async fn graphql(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    recorded.requests.lock().unwrap().push((auth, request));

    let mut response_headers = HeaderMap::new();
    if let Some(remaining) = recorded.rate_limit_remaining {
        response_headers.insert("x-ratelimit-remaining", remaining.parse().unwrap());
    }
    (
        StatusCode::from_u16(recorded.status).unwrap(),
        response_headers,
        Json(recorded.body.clone()),
    )
}

/// Serve `recorded` on an ephemeral port and return the endpoint URL.
async fn spawn_server(recorded: Arc<Recorded>) -> String {
    let app = Router::new()
        .route("/graphql", post(graphql))
        .with_state(recorded);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/graphql", addr)
}

fn client(url: String) -> GitHubClient {
    GitHubClient::new(
        url,
        &StaticCredentials(Some("test-token".to_string())),
        Duration::from_secs(5),
    )
    .expect("client should build")
}

fn calendar_body() -> Value {
    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "contributionCalendar": {
                        "weeks": [
                            {"contributionDays": [
                                {"contributionLevel": "NONE", "color": "#ebedf0", "date": "2026-10-18"},
                                {"contributionLevel": "FOURTH_QUARTILE", "color": "#216e39", "date": "2026-10-19"}
                            ]}
                        ]
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn test_fetch_sends_bearer_and_window() {
    let recorded = Arc::new(Recorded {
        status: 200,
        body: calendar_body(),
        ..Default::default()
    });
    let url = spawn_server(recorded.clone()).await;

    let window = DateWindow {
        from: NaiveDate::from_ymd_opt(2025, 10, 19).unwrap(),
        to: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    };
    let calendar = client(url)
        .contribution_calendar("alice", Some(window))
        .await
        .unwrap();

    assert_eq!(calendar.week_count(), 1);
    let day = calendar.day(0, 1).unwrap();
    assert_eq!(day.contribution_level, "FOURTH_QUARTILE");
    assert_eq!(day.date, NaiveDate::from_ymd_opt(2026, 10, 19));

    let requests = recorded.requests.lock().unwrap();
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-token"));
    assert_eq!(body["variables"]["login"], "alice");
    assert_eq!(body["variables"]["from"], "2025-10-19");
    assert_eq!(body["variables"]["to"], "2026-10-19");
    assert!(body["query"]
        .as_str()
        .unwrap()
        .contains("contributionLevel"));
}

#[tokio::test]
async fn test_fetch_without_window_sends_nulls() {
    let recorded = Arc::new(Recorded {
        status: 200,
        body: calendar_body(),
        ..Default::default()
    });
    let url = spawn_server(recorded.clone()).await;

    client(url).contribution_calendar("alice", None).await.unwrap();

    let requests = recorded.requests.lock().unwrap();
    assert!(requests[0].1["variables"]["from"].is_null());
    assert!(requests[0].1["variables"]["to"].is_null());
}

#[tokio::test]
async fn test_rate_limit_is_tagged() {
    let recorded = Arc::new(Recorded {
        status: 403,
        body: json!({"message": "API rate limit exceeded"}),
        rate_limit_remaining: Some("0"),
        ..Default::default()
    });
    let url = spawn_server(recorded).await;

    let err = client(url)
        .contribution_calendar("alice", None)
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_http_error_is_remote_fetch() {
    let recorded = Arc::new(Recorded {
        status: 401,
        body: json!({"message": "Bad credentials"}),
        ..Default::default()
    });
    let url = spawn_server(recorded).await;

    let err = client(url)
        .contribution_calendar("alice", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RemoteFetch(ref msg) if msg.contains("401")));
    assert!(!err.is_rate_limited());
}

#[tokio::test]
async fn test_unknown_user_is_remote_fetch() {
    let recorded = Arc::new(Recorded {
        status: 200,
        body: json!({
            "data": {"user": null},
            "errors": [{"message": "Could not resolve to a User with the login of 'ghost'."}]
        }),
        ..Default::default()
    });
    let url = spawn_server(recorded).await;

    let err = client(url)
        .contribution_calendar("ghost", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RemoteFetch(ref msg) if msg.contains("Could not resolve")));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_remote_fetch() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{}/graphql", addr))
        .contribution_calendar("alice", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RemoteFetch(_)));
}
