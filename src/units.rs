//! Unit-tagged numeric outputs
//!
//! The dashboard mixes two scales: frequencies on 0-100 and fractions on
//! 0-1, and multiplies a fractional mean by a 0-100 frequency to get the
//! "adjusted return". Each scale gets its own newtype so a value cannot be
//! silently reinterpreted as another. All arithmetic happens on raw values;
//! rounding is only offered for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of decimal places for display rounding
pub const DISPLAY_PRECISION: u32 = 2;

/// Round to `places` decimal places, for presentation only
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Percentage points on the 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    pub fn new(points: f64) -> Self {
        Self(points)
    }

    /// `part / whole * 100`, or `None` when `whole` is zero
    pub fn of(part: usize, whole: usize) -> Option<Self> {
        (whole > 0).then(|| Self(part as f64 / whole as f64 * 100.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn rounded(self, places: u32) -> f64 {
        round_to(self.0, places)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = f.precision().unwrap_or(DISPLAY_PRECISION as usize);
        write!(f, "{:.*}%", places, self.0)
    }
}

/// A ratio on the 0-1 scale (coverage fractions, returns)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(f64);

impl Fraction {
    pub fn new(ratio: f64) -> Self {
        Self(ratio)
    }

    /// `part / whole`, or `None` when `whole` is zero
    pub fn of(part: usize, whole: usize) -> Option<Self> {
        (whole > 0).then(|| Self(part as f64 / whole as f64))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_percent(self) -> Percent {
        Percent(self.0 * 100.0)
    }

    pub fn rounded(self, places: u32) -> f64 {
        round_to(self.0, places)
    }
}

/// Subset mean multiplied by the subset's frequency in percentage points.
///
/// This is a frequency-weighted magnitude, not an expected value: dividing
/// by 100 would be needed for that, and the dashboard never does.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjustedReturn(f64);

impl AdjustedReturn {
    pub fn from_parts(mean: f64, frequency: Percent) -> Self {
        Self(mean * frequency.value())
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn rounded(self, places: u32) -> f64 {
        round_to(self.0, places)
    }
}
