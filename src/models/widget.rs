// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Draw instructions handed to a canvas.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// How the host presents the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PresentationMode {
    /// Lock-screen accessory: monochrome, intensity encoded by opacity only.
    Accessory,
    /// Per-day color plus opacity.
    #[default]
    Full,
}

impl PresentationMode {
    /// Monochrome cell color forced in accessory mode.
    pub const ACCESSORY_COLOR: &'static str = "#ffffff";

    /// Color that replaces each day's own color, if any.
    pub fn color_override(self) -> Option<&'static str> {
        match self {
            PresentationMode::Accessory => Some(Self::ACCESSORY_COLOR),
            PresentationMode::Full => None,
        }
    }
}

/// One rounded rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CellInstruction {
    pub row: usize,
    pub col: usize,
    pub color: String,
    pub opacity: f64,
    pub size: u32,
    pub corner_radius: u32,
    /// True when no real day backs this cell.
    pub empty: bool,
}

/// A horizontal container of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WidgetRow {
    pub spacing: u32,
    pub cells: Vec<CellInstruction>,
}

/// Complete widget: rows stacked vertically with `spacing` between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RenderedWidget {
    pub user: String,
    pub spacing: u32,
    pub width: u32,
    pub height: u32,
    pub rows: Vec<WidgetRow>,
}

impl RenderedWidget {
    pub fn cells(&self) -> impl Iterator<Item = &CellInstruction> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellInstruction> {
        self.rows.get(row)?.cells.get(col)
    }
}
