// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapping of contribution levels onto cell opacity.

use crate::error::AppError;
use crate::models::ActivityLevel;

/// Opacity interval that levels are spread across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityRange {
    pub min: f64,
    pub max: f64,
}

impl OpacityRange {
    /// Boosted floor so empty days stay visible on small accessory widgets.
    pub const COMPACT: OpacityRange = OpacityRange { min: 0.3, max: 1.0 };
    pub const FULL_YEAR: OpacityRange = OpacityRange { min: 0.1, max: 1.0 };

    /// Build a range, requiring `0 <= min <= max <= 1`.
    pub fn new(min: f64, max: f64) -> Result<Self, AppError> {
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(AppError::BadRequest(format!(
                "opacity range {}..{} must satisfy 0 <= min <= max <= 1",
                min, max
            )));
        }
        Ok(Self { min, max })
    }
}

/// Linear map of the level ordinal onto `[min, max]`.
pub fn level_to_opacity(level: ActivityLevel, range: OpacityRange) -> f64 {
    let t = f64::from(level.ordinal()) / f64::from(ActivityLevel::MAX_ORDINAL);
    range.min + t * (range.max - range.min)
}

/// Parse a raw wire token and map it; unknown tokens are an error.
pub fn token_to_opacity(token: &str, range: OpacityRange) -> Result<f64, AppError> {
    let level: ActivityLevel = token.parse()?;
    Ok(level_to_opacity(level, range))
}
