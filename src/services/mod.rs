// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - data pipeline from GitHub to draw instructions.

pub mod cache;
pub mod canvas;
pub mod credentials;
pub mod fetcher;
pub mod github;
pub mod layout;
pub mod levels;
pub mod widget;

pub use cache::{CacheStore, FileStore, MemoryStore};
pub use canvas::{Canvas, SvgCanvas};
pub use credentials::{CredentialProvider, EnvCredentials, StaticCredentials};
pub use fetcher::{CachingFetcher, ContributionSource, QueryWindow};
pub use github::GitHubClient;
pub use layout::{layout, MissingDataPolicy};
pub use levels::{level_to_opacity, OpacityRange};
pub use widget::WidgetAssembler;
