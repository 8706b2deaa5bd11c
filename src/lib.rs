// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contrib-Heatmap: GitHub contribution calendar widgets
//!
//! This crate fetches a user's contribution calendar from the GitHub
//! GraphQL API, caches it for a short freshness window, and lays the days
//! out as a fixed grid of shaded cells served as SVG or JSON.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::WidgetAssembler;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub assembler: WidgetAssembler,
}
