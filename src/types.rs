//! Input bar type shared by every derivation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily trading session.
///
/// Bars are assumed chronologically ordered with `high >= open, close >= low`.
/// The engine does not validate that; ratio derivations only guard their
/// denominators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Session date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price in session
    pub high: f64,
    /// Lowest price in session
    pub low: f64,
    /// Closing price
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }
}
