//! Sign-conditional distribution statistics
//!
//! One routine serves every return derivation:
//! - full-series count, mean and sample standard deviation (statrs)
//! - positive/negative partition with per-subset mean and frequency
//! - 1σ/2σ/3σ band coverage (see [`crate::bands`])
//!
//! Empty subsets report absent means instead of a measured-looking zero.

use crate::bands::BandCoverageStats;
use crate::errors::{Result, StatsError};
use crate::series::{ReturnKind, ReturnSeries};
use crate::units::{AdjustedReturn, Percent};
use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::debug;

/// Which side of zero a subset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn label(self) -> &'static str {
        match self {
            Sign::Positive => "Positive",
            Sign::Negative => "Negative",
        }
    }
}

/// Single-pass sign partition accumulator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignTally {
    pub count_total: usize,
    pub count_positive: usize,
    pub count_negative: usize,
    pub count_zero: usize,
    sum_positive: f64,
    sum_negative: f64,
}

impl SignTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one observation; exact zero goes to neither signed subset
    pub fn update(&mut self, value: f64) {
        self.count_total += 1;
        if value > 0.0 {
            self.count_positive += 1;
            self.sum_positive += value;
        } else if value < 0.0 {
            self.count_negative += 1;
            self.sum_negative += value;
        } else {
            self.count_zero += 1;
        }
    }

    pub fn has_data(&self) -> bool {
        self.count_total > 0
    }

    fn subset(&self, sign: Sign) -> SignedSubset {
        let (count, sum) = match sign {
            Sign::Positive => (self.count_positive, self.sum_positive),
            Sign::Negative => (self.count_negative, self.sum_negative),
        };
        let pct = Percent::of(count, self.count_total).unwrap_or(Percent::new(0.0));
        let mean = (count > 0).then(|| sum / count as f64);
        SignedSubset {
            sign,
            count,
            pct,
            mean,
            adjusted: mean.map(|m| AdjustedReturn::from_parts(m, pct)),
        }
    }
}

impl FromIterator<f64> for SignTally {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut tally = SignTally::new();
        for value in iter {
            tally.update(value);
        }
        tally
    }
}

/// Statistics over the strictly positive or strictly negative observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignedSubset {
    pub sign: Sign,
    pub count: usize,
    /// `count / count_total * 100`; a measured 0 when the subset is empty
    pub pct: Percent,
    /// `None` when the subset is empty
    pub mean: Option<f64>,
    /// `mean * pct`, `None` when the subset is empty
    pub adjusted: Option<AdjustedReturn>,
}

impl SignedSubset {
    /// No observations fell on this side of zero
    pub fn is_degenerate(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignConditionalStats {
    pub kind: ReturnKind,
    pub count_total: usize,
    pub count_zero: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); `None` below two observations
    pub stdev: Option<f64>,
    pub positive: SignedSubset,
    pub negative: SignedSubset,
}

impl SignConditionalStats {
    pub fn subset(&self, sign: Sign) -> &SignedSubset {
        match sign {
            Sign::Positive => &self.positive,
            Sign::Negative => &self.negative,
        }
    }
}

/// Full analysis of one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionStats {
    pub sign: SignConditionalStats,
    /// `None` when the standard deviation is undefined (one observation)
    pub bands: Option<BandCoverageStats>,
}

/// Analyse a return series.
///
/// An empty series yields [`StatsError::InsufficientData`]; nothing is
/// reported as a zero it did not measure.
pub fn analyze(series: &ReturnSeries) -> Result<DistributionStats> {
    let values = series.values();
    let tally: SignTally = values.iter().copied().collect();
    if !tally.has_data() {
        return Err(StatsError::insufficient(series.kind().name()));
    }

    let mean = values.iter().mean();
    let stdev = (values.len() >= 2).then(|| values.iter().std_dev());

    let sign = SignConditionalStats {
        kind: series.kind(),
        count_total: tally.count_total,
        count_zero: tally.count_zero,
        mean,
        stdev,
        positive: tally.subset(Sign::Positive),
        negative: tally.subset(Sign::Negative),
    };
    let bands = stdev.and_then(|sd| BandCoverageStats::compute(values, mean, sd));

    debug!(
        series = %series.kind(),
        count = sign.count_total,
        positive = sign.positive.count,
        negative = sign.negative.count,
        zero = sign.count_zero,
        mean,
        stdev = ?stdev,
        "analyzed return series"
    );

    Ok(DistributionStats { sign, bands })
}
