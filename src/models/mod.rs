// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for contribution calendars and rendered widgets.

pub mod calendar;
pub mod widget;

pub use calendar::{ActivityLevel, CachedPayload, ContributionCalendar, DateWindow, Day, Week};
pub use widget::{CellInstruction, PresentationMode, RenderedWidget, WidgetRow};
