//! Histogram bin counts for return series, on the percent scale
//!
//! Only the counting lives here; drawing the chart is the caller's job.

use crate::errors::{Result, StatsError};
use crate::series::{ReturnKind, ReturnSeries};
use serde::{Deserialize, Serialize};

/// Upper bound on bins per histogram
pub const MAX_BINS: usize = 100_000;

/// Fixed-width bin layout, in percent (series value × 100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    pub start: f64,
    pub end: f64,
    pub width: f64,
}

impl BinSpec {
    pub fn new(start: f64, end: f64, width: f64) -> Result<Self> {
        let spec = Self { start, end, width };
        spec.validate()?;
        Ok(spec)
    }

    /// Dashboard layout for each derivation
    pub fn default_for(kind: ReturnKind) -> Self {
        match kind {
            ReturnKind::LogClose | ReturnKind::OpenClose => Self {
                start: -12.0,
                end: 12.0,
                width: 0.5,
            },
            ReturnKind::HighLow => Self {
                start: 0.0,
                end: 20.0,
                width: 1.0,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if ![self.start, self.end, self.width].iter().all(|v| v.is_finite()) {
            return Err(StatsError::InvalidBins {
                message: format!("non-finite bin layout {self:?}"),
            });
        }
        if self.width <= 0.0 {
            return Err(StatsError::InvalidBins {
                message: format!("bin width must be positive, got {}", self.width),
            });
        }
        if self.end <= self.start {
            return Err(StatsError::InvalidBins {
                message: format!("end {} must exceed start {}", self.end, self.start),
            });
        }
        let bins = ((self.end - self.start) / self.width).ceil();
        if !bins.is_finite() || bins > MAX_BINS as f64 {
            return Err(StatsError::InvalidBins {
                message: format!("layout needs {bins} bins, at most {MAX_BINS} allowed"),
            });
        }
        Ok(())
    }

    pub fn bin_count(&self) -> usize {
        ((self.end - self.start) / self.width).ceil() as usize
    }

    /// Bin index for a percent value; the final bin is closed on the right
    fn index_of(&self, pct: f64, bins: usize) -> Option<usize> {
        if pct < self.start || pct > self.end {
            return None;
        }
        let idx = ((pct - self.start) / self.width).floor() as usize;
        Some(idx.min(bins - 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub kind: ReturnKind,
    pub spec: BinSpec,
    pub bins: Vec<Bin>,
    /// Observations left of `spec.start`
    pub below: usize,
    /// Observations right of `spec.end`
    pub above: usize,
}

impl Histogram {
    pub fn compute(series: &ReturnSeries, spec: BinSpec) -> Result<Self> {
        spec.validate()?;
        let n = spec.bin_count();
        let mut counts = vec![0usize; n];
        let (mut below, mut above) = (0, 0);

        for &value in series.values() {
            let pct = value * 100.0;
            match spec.index_of(pct, n) {
                Some(idx) => counts[idx] += 1,
                None if pct < spec.start => below += 1,
                None => above += 1,
            }
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let lower = spec.start + i as f64 * spec.width;
                Bin {
                    lower,
                    upper: (lower + spec.width).min(spec.end),
                    count,
                }
            })
            .collect();

        Ok(Self {
            kind: series.kind(),
            spec,
            bins,
            below,
            above,
        })
    }

    pub fn total_in_range(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
