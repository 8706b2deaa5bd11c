// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Placement of a ragged week/day calendar into a fixed grid.
//!
//! Columns are right-aligned so the last column is the most recent week.
//! Display row `r` reads weekday `r % 7`, so asking for more than seven rows
//! repeats weekdays from the same week further down the grid.

use crate::models::{ContributionCalendar, Day};

/// Days in a calendar week; display rows wrap modulo this.
pub const DAYS_PER_WEEK: usize = 7;

/// What to do when a grid slot has no backing day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDataPolicy {
    /// Emit an empty slot and keep going. Every row has `columns` slots.
    #[default]
    FillEmpty,
    /// End the row at its first missing slot.
    TruncateRow,
}

/// Content of one grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    Day(&'a Day),
    Empty,
}

impl Slot<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// Row-major grid of slots borrowed from a calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<'a> {
    pub rows: Vec<Vec<Slot<'a>>>,
}

impl<'a> Grid<'a> {
    pub fn slot(&self, row: usize, col: usize) -> Option<Slot<'a>> {
        self.rows.get(row)?.get(col).copied()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Index of the first week shown when `columns` weeks fit on screen.
pub fn week_offset(total_weeks: usize, columns: usize) -> usize {
    total_weeks.saturating_sub(columns)
}

/// Day index within a week read by display row `row`.
pub fn weekday_for_row(row: usize) -> usize {
    row % DAYS_PER_WEEK
}

/// Lay out `calendar` into exactly `rows × columns` slots.
pub fn layout(calendar: &ContributionCalendar, columns: usize, rows: usize) -> Grid<'_> {
    layout_with_policy(calendar, columns, rows, MissingDataPolicy::FillEmpty)
}

/// Lay out `calendar` with an explicit missing-data policy.
pub fn layout_with_policy(
    calendar: &ContributionCalendar,
    columns: usize,
    rows: usize,
    policy: MissingDataPolicy,
) -> Grid<'_> {
    let offset = week_offset(calendar.week_count(), columns);

    let rows = (0..rows)
        .map(|row| {
            let weekday = weekday_for_row(row);
            let mut slots = Vec::with_capacity(columns);
            for col in 0..columns {
                match calendar.day(offset + col, weekday) {
                    Some(day) => slots.push(Slot::Day(day)),
                    None if policy == MissingDataPolicy::TruncateRow => break,
                    None => slots.push(Slot::Empty),
                }
            }
            slots
        })
        .collect();

    Grid { rows }
}
