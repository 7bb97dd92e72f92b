// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Per Nørgård's infinity series.
//!
//! Any term is computed directly from the binary digits of its index, so a
//! window deep into the series costs no more than one at the start.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};

/// Term `n` of the infinity series: scanning the binary digits of `n` from
/// the most significant, a 1 adds one and a 0 negates the running value.
pub fn norgard_integer(n: u64) -> i64 {
    if n == 0 {
        return 0;
    }
    let bits = u64::BITS - n.leading_zeros();
    (0..bits).rev().fold(0i64, |acc, bit| {
        if (n >> bit) & 1 == 1 {
            acc + 1
        } else {
            -acc
        }
    })
}

/// Where the series window starts, or the range its values are mapped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesOffset {
    /// First index of the window
    Start(u64),
    /// Inclusive `[min, max]` output range
    Range(i64, i64),
}

impl Default for SeriesOffset {
    fn default() -> Self {
        SeriesOffset::Start(0)
    }
}

/// How values outside a range are brought back in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Saturate at the nearest boundary
    #[default]
    Clamp,
    /// Modulo into the range
    Wrap,
    /// Reflect back and forth between the boundaries
    Fold,
}

impl BoundaryMode {
    /// Map a value into `[min, max]`; reversed bounds are swapped
    pub fn apply(self, value: i64, min: i64, max: i64) -> i64 {
        self.apply_wide(i128::from(value), min, max)
    }

    /// Map a value of any width into `[min, max]`
    fn apply_wide(self, value: i128, min: i64, max: i64) -> i64 {
        let (low, high) = (i128::from(min.min(max)), i128::from(min.max(max)));
        let mapped = match self {
            BoundaryMode::Clamp => value.clamp(low, high),
            BoundaryMode::Wrap => low + (value - low).rem_euclid(high - low + 1),
            BoundaryMode::Fold => {
                let span = high - low;
                if span == 0 {
                    return min;
                }
                let phase = (value - low).rem_euclid(2 * span);
                if phase <= span {
                    low + phase
                } else {
                    low + 2 * span - phase
                }
            }
        };
        saturate(mapped)
    }

    /// Parse boundary mode from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clamp" => Some(BoundaryMode::Clamp),
            "wrap" => Some(BoundaryMode::Wrap),
            "fold" => Some(BoundaryMode::Fold),
            _ => None,
        }
    }
}

/// Settings for one run of the infinity series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfinitySeries {
    /// Values for terms 0 and 1; later terms scale by their difference
    pub seed: [i64; 2],
    /// Number of terms to produce
    pub size: usize,
    pub offset: SeriesOffset,
    /// Only used with a range offset
    pub boundary: BoundaryMode,
}

impl Default for InfinitySeries {
    fn default() -> Self {
        Self {
            seed: [0, 1],
            size: 16,
            offset: SeriesOffset::default(),
            boundary: BoundaryMode::default(),
        }
    }
}

impl InfinitySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: [i64; 2]) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_offset(mut self, offset: SeriesOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Seeded value of term `index`, saturated to the `i64` range
    pub fn value(&self, index: u64) -> i64 {
        saturate(self.wide_value(index))
    }

    fn wide_value(&self, index: u64) -> i128 {
        let [first, second] = self.seed.map(i128::from);
        first + i128::from(norgard_integer(index)) * (second - first)
    }

    /// Produce the configured window of the series
    pub fn generate(&self) -> Result<Vec<i64>> {
        match self.offset {
            SeriesOffset::Start(start) => {
                let size = self.size as u64;
                let end = start
                    .checked_add(size)
                    .ok_or(TheoryError::WindowOverflow { start, size })?;
                Ok((start..end).map(|i| self.value(i)).collect())
            }
            SeriesOffset::Range(min, max) => {
                if min >= max {
                    return Err(TheoryError::InvalidRange { min, max });
                }
                let midpoint = i128::from(min) + (i128::from(max) - i128::from(min)) / 2;
                Ok((0..self.size as u64)
                    .map(|i| self.boundary.apply_wide(self.wide_value(i) + midpoint, min, max))
                    .collect())
            }
        }
    }
}

fn saturate(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Generate an infinity series window in one call
pub fn infinity_series(
    seed: [i64; 2],
    size: usize,
    offset: SeriesOffset,
    boundary: BoundaryMode,
) -> Result<Vec<i64>> {
    InfinitySeries {
        seed,
        size,
        offset,
        boundary,
    }
    .generate()
}
