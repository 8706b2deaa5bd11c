// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Widget routes: the heatmap as SVG or as JSON draw instructions.

use crate::config::{Preset, WidgetConfig};
use crate::error::{AppError, Result};
use crate::models::{PresentationMode, RenderedWidget};
use crate::services::{Canvas, SvgCanvas};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// GitHub logins are at most 39 characters.
const MAX_LOGIN_LEN: usize = 39;
/// A year of data spans at most 53 calendar weeks.
const MAX_COLUMNS: usize = 53;
const MAX_ROWS: usize = 14;

/// Widget routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/widget.svg", get(widget_svg))
        .route("/widget.json", get(widget_json))
}

/// Query parameters shared by both widget formats.
#[derive(Debug, Default, Deserialize)]
pub struct WidgetQuery {
    pub user: Option<String>,
    pub preset: Option<Preset>,
    pub mode: Option<PresentationMode>,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
}

/// Render the widget as SVG.
async fn widget_svg(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<WidgetQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query?;
    let widget = render(&state, query).await?;
    let canvas = SvgCanvas;

    Ok((
        [
            (header::CONTENT_TYPE, canvas.content_type().to_string()),
            (header::CACHE_CONTROL, cache_control(&state)),
        ],
        canvas.draw(&widget),
    )
        .into_response())
}

/// Render the widget as JSON draw instructions.
async fn widget_json(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<WidgetQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query?;
    let widget = render(&state, query).await?;
    Ok(([(header::CACHE_CONTROL, cache_control(&state))], Json(widget)).into_response())
}

async fn render(state: &AppState, query: WidgetQuery) -> Result<RenderedWidget> {
    // `?user=` counts as unset.
    let user = match query.user.filter(|user| !user.is_empty()) {
        Some(user) => {
            validate_login(&user)?;
            user
        }
        None => state.config.default_username.clone(),
    };

    let config = widget_config(
        query.preset.unwrap_or(state.config.default_preset),
        query.columns,
        query.rows,
    )?;
    let mode = query.mode.unwrap_or_default();

    tracing::debug!(
        user = %user,
        columns = config.columns,
        rows = config.rows,
        mode = ?mode,
        "Rendering widget"
    );

    state
        .assembler
        .build_widget(&user, &config, mode.color_override())
        .await
}

/// Preset geometry with optional overrides.
fn widget_config(
    preset: Preset,
    columns: Option<usize>,
    rows: Option<usize>,
) -> Result<WidgetConfig> {
    let mut config = preset.widget_config();

    if let Some(columns) = columns {
        if !(1..=MAX_COLUMNS).contains(&columns) {
            return Err(AppError::BadRequest(format!(
                "columns must be between 1 and {}",
                MAX_COLUMNS
            )));
        }
        config.columns = columns;
    }

    if let Some(rows) = rows {
        if !(1..=MAX_ROWS).contains(&rows) {
            return Err(AppError::BadRequest(format!(
                "rows must be between 1 and {}",
                MAX_ROWS
            )));
        }
        config.rows = rows;
    }

    Ok(config)
}

/// Accept GitHub-style logins: alphanumerics and inner hyphens.
fn validate_login(login: &str) -> Result<()> {
    let valid = !login.is_empty()
        && login.len() <= MAX_LOGIN_LEN
        && !login.starts_with('-')
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid user: {:?}", login)))
    }
}

fn cache_control(state: &AppState) -> String {
    format!("public, max-age={}", state.config.cache_max_age_secs)
}
