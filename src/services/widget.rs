// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Builds widgets: fetch, lay out, shade.

use crate::config::WidgetConfig;
use crate::error::AppError;
use crate::models::{CellInstruction, ContributionCalendar, RenderedWidget, WidgetRow};
use crate::services::fetcher::CachingFetcher;
use crate::services::layout::{layout_with_policy, Slot};
use crate::services::levels::level_to_opacity;
use chrono::Duration;

/// Glue between the fetcher and the pure layout code.
#[derive(Clone)]
pub struct WidgetAssembler {
    fetcher: CachingFetcher,
    max_age: Duration,
}

impl WidgetAssembler {
    pub fn new(fetcher: CachingFetcher, max_age: Duration) -> Self {
        Self { fetcher, max_age }
    }

    /// Fetch (or reuse) `user_id`'s calendar and render it.
    ///
    /// `color_override` replaces every day's own color when set.
    pub async fn build_widget(
        &self,
        user_id: &str,
        config: &WidgetConfig,
        color_override: Option<&str>,
    ) -> Result<RenderedWidget, AppError> {
        let calendar = self.fetcher.get_calendar(user_id, self.max_age).await?;
        assemble(user_id, &calendar, config, color_override)
    }
}

/// Turn a calendar into draw instructions, rows outer and columns inner.
///
/// Fails on the first day whose level is not recognized.
pub fn assemble(
    user_id: &str,
    calendar: &ContributionCalendar,
    config: &WidgetConfig,
    color_override: Option<&str>,
) -> Result<RenderedWidget, AppError> {
    let grid = layout_with_policy(calendar, config.columns, config.rows, config.missing);

    let mut rows = Vec::with_capacity(grid.rows.len());
    for (row, slots) in grid.rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(slots.len());
        for (col, slot) in slots.iter().enumerate() {
            let (color, opacity) = match slot {
                Slot::Day(day) => (
                    color_override
                        .map(str::to_string)
                        .unwrap_or_else(|| day.color.clone()),
                    level_to_opacity(day.level()?, config.opacity),
                ),
                Slot::Empty => (config.empty_color.clone(), config.empty_opacity),
            };
            cells.push(CellInstruction {
                row,
                col,
                color,
                opacity,
                size: config.cell_size,
                corner_radius: config.corner_radius,
                empty: slot.is_empty(),
            });
        }
        rows.push(WidgetRow {
            spacing: config.padding,
            cells,
        });
    }

    Ok(RenderedWidget {
        user: user_id.to_string(),
        spacing: config.padding,
        width: config.extent(config.columns),
        height: config.extent(config.rows),
        rows,
    })
}
