//! Population coverage inside mean ± k·stdev bands

use crate::units::Fraction;
use serde::Serialize;

/// Sigma multipliers reported for every series
pub const SIGMA_LEVELS: [u32; 3] = [1, 2, 3];

/// Coverage of one band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandRow {
    pub k: u32,
    pub upper_bound: f64,
    pub lower_bound: f64,
    /// Observations with `lower_bound <= x <= upper_bound`
    pub count_within: usize,
    pub pct_within: Fraction,
}

/// The 1σ/2σ/3σ rows for one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCoverageStats {
    pub count_total: usize,
    pub rows: [BandRow; 3],
}

impl BandCoverageStats {
    /// Count coverage of `values` around `mean` for each of [`SIGMA_LEVELS`].
    ///
    /// Returns `None` for an empty slice; callers only reach this once the
    /// series has data and a defined standard deviation.
    pub fn compute(values: &[f64], mean: f64, stdev: f64) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count_total = values.len();
        let rows = SIGMA_LEVELS.map(|k| {
            let half_width = k as f64 * stdev;
            let upper_bound = mean + half_width;
            let lower_bound = mean - half_width;
            let count_within = values
                .iter()
                .filter(|&&x| lower_bound <= x && x <= upper_bound)
                .count();
            BandRow {
                k,
                upper_bound,
                lower_bound,
                count_within,
                pct_within: Fraction::new(count_within as f64 / count_total as f64),
            }
        });
        Some(Self { count_total, rows })
    }

    pub fn row(&self, k: u32) -> Option<&BandRow> {
        self.rows.iter().find(|row| row.k == k)
    }

    /// Row label as shown in the dashboard tables
    pub fn label(k: u32) -> String {
        format!("Std_{k}")
    }
}
