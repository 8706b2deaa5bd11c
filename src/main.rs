// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contrib-Heatmap widget server
//!
//! Serves GitHub contribution heatmaps as SVG and JSON widgets.

use contrib_heatmap::{
    config::Config,
    services::{
        CacheStore, CachingFetcher, EnvCredentials, FileStore, GitHubClient, MemoryStore,
        WidgetAssembler,
    },
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Contrib-Heatmap");

    // No token means no widget can ever render; refuse to start.
    let credentials = EnvCredentials::default();
    let client = GitHubClient::new(
        config.github_api_url.clone(),
        &credentials,
        std::time::Duration::from_secs(config.http_timeout_secs),
    )
    .expect("Failed to initialize GitHub client");
    tracing::info!(url = %config.github_api_url, "GitHub client initialized");

    let store: Arc<dyn CacheStore> = match &config.cache_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Using on-disk calendar cache");
            Arc::new(FileStore::new(dir))
        }
        None => {
            tracing::info!("Using in-memory calendar cache");
            Arc::new(MemoryStore::new())
        }
    };

    let fetcher = CachingFetcher::new(Arc::new(client), store);
    let assembler = WidgetAssembler::new(fetcher, config.cache_max_age());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        assembler,
    });

    // Build router
    let app = contrib_heatmap::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contrib_heatmap=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
