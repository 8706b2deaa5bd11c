// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value stores for fetched calendars.
//!
//! Stores only hold entries; freshness is decided by the caller with
//! [`CachedPayload::is_fresh`]. A store failure is never fatal: a broken
//! read is a miss and a broken write is logged and dropped.

use crate::models::CachedPayload;
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One entry per key, overwritten in place.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<CachedPayload>;
    async fn put(&self, key: &str, payload: CachedPayload);
}

/// In-process store backed by a `DashMap`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, CachedPayload>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<CachedPayload> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    async fn put(&self, key: &str, payload: CachedPayload) {
        self.entries.insert(key.to_string(), payload);
    }
}

/// Store that keeps one JSON file per key, surviving restarts.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`. Anything outside `[A-Za-z0-9_-]` becomes `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, key: &str) -> Option<CachedPayload> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read cache file");
                return None;
            }
        };

        match serde_json::from_slice::<CachedPayload>(&bytes) {
            // Sanitized names can collide; never serve another user's entry.
            Ok(payload) if payload.key == key => Some(payload),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt cache file ignored");
                None
            }
        }
    }

    async fn put(&self, key: &str, payload: CachedPayload) {
        let path = self.path_for(key);
        let result = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            let json = serde_json::to_vec(&payload)?;
            // Write then rename so readers never see a half-written file.
            let tmp = path.with_extension("json.tmp");
            tokio::fs::write(&tmp, json).await?;
            tokio::fs::rename(&tmp, &path).await?;
            Ok::<_, anyhow::Error>(())
        }
        .await;

        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write cache file");
        }
    }
}
