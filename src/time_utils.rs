// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates.

use crate::models::DateWindow;
use chrono::{Months, NaiveDate};

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Window from one year before `today` through `today`.
///
/// On Feb 29 the start clamps to Feb 28 of the previous year.
pub fn trailing_year_window(today: NaiveDate) -> DateWindow {
    let from = today.checked_sub_months(Months::new(12)).unwrap_or(today);
    DateWindow { from, to: today }
}
