//! Result shaping for presentation layers
//!
//! Runs every derivation over one immutable bar slice and packages the
//! outcome per series. Display rows carry values already scaled and rounded
//! the way the dashboard tables show them; the raw statistics stay available
//! alongside.

use crate::aggregate::{total_return_label, window_return};
use crate::bands::BandCoverageStats;
use crate::errors::{Result, StatsError};
use crate::histogram::{BinSpec, Histogram};
use crate::series::ReturnKind;
use crate::stats::{DistributionStats, Sign, analyze};
use crate::types::PriceBar;
use crate::units::{DISPLAY_PRECISION, Fraction, Percent};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowOptions {
    /// Analyse the three series on the rayon pool
    pub parallel: bool,
    /// Attach histogram bin counts to each series report
    pub histograms: bool,
    /// Decimal places for display rows and the total-return label
    pub display_precision: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            histograms: true,
            display_precision: DISPLAY_PRECISION,
        }
    }
}

/// Positive/Negative table row, display-scaled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignRow {
    pub label: &'static str,
    /// Subset mean as a percentage; `None` for an empty subset
    pub mean_pct: Option<f64>,
    pub count: usize,
    /// Frequency in percentage points
    pub frequency_pct: f64,
    /// Mean × frequency, unscaled; `None` for an empty subset
    pub adjusted: Option<f64>,
}

/// Std_k table row, display-scaled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandDisplayRow {
    pub label: String,
    pub upper_pct: f64,
    pub lower_pct: f64,
    pub count: usize,
    pub count_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport {
    pub kind: ReturnKind,
    pub stats: DistributionStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
}

impl SeriesReport {
    pub fn sign_rows(&self, places: u32) -> [SignRow; 2] {
        [Sign::Positive, Sign::Negative].map(|sign| {
            let subset = self.stats.sign.subset(sign);
            SignRow {
                label: sign.label(),
                mean_pct: subset
                    .mean
                    .map(|m| Fraction::new(m).to_percent().rounded(places)),
                count: subset.count,
                frequency_pct: subset.pct.rounded(places),
                adjusted: subset.adjusted.map(|a| a.rounded(places)),
            }
        })
    }

    /// Empty when the series has too few observations for a deviation
    pub fn band_rows(&self, places: u32) -> Vec<BandDisplayRow> {
        let Some(bands) = &self.stats.bands else {
            return Vec::new();
        };
        bands
            .rows
            .iter()
            .map(|row| BandDisplayRow {
                label: BandCoverageStats::label(row.k),
                upper_pct: Fraction::new(row.upper_bound).to_percent().rounded(places),
                lower_pct: Fraction::new(row.lower_bound).to_percent().rounded(places),
                count: row.count_within,
                count_pct: row.pct_within.to_percent().rounded(places),
            })
            .collect()
    }
}

/// Per-series tagged outcome; one failing derivation never hides the others
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesOutcome {
    pub kind: ReturnKind,
    pub result: std::result::Result<SeriesReport, StatsError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    pub symbol: String,
    pub bar_count: usize,
    pub total_return: std::result::Result<Percent, StatsError>,
    /// `"{SYMBOL} Total Return : x.xx%"`, present when the total return was computed
    pub label: Option<String>,
    pub series: Vec<SeriesOutcome>,
}

impl WindowReport {
    pub fn outcome(&self, kind: ReturnKind) -> Option<&SeriesOutcome> {
        self.series.iter().find(|o| o.kind == kind)
    }
}

/// Derive and analyse one series
pub fn analyze_series(
    kind: ReturnKind,
    bars: &[PriceBar],
    options: &WindowOptions,
) -> Result<SeriesReport> {
    let series = kind.derive(bars)?;
    let stats = analyze(&series)?;
    let histogram = if options.histograms {
        Some(Histogram::compute(&series, BinSpec::default_for(kind))?)
    } else {
        None
    };
    Ok(SeriesReport {
        kind,
        stats,
        histogram,
    })
}

/// Analyse all three derivations of `bars`.
///
/// An empty window is the "no data" condition and is returned as
/// [`StatsError::InsufficientData`]. Otherwise every series gets its own
/// outcome, including a log-close series that is empty because only one bar
/// was supplied.
pub fn analyze_window(
    symbol: &str,
    bars: &[PriceBar],
    options: &WindowOptions,
) -> Result<WindowReport> {
    if bars.is_empty() {
        return Err(StatsError::insufficient(format!("{symbol} window")));
    }

    let run = |kind: ReturnKind| {
        let result = analyze_series(kind, bars, options);
        if let Err(err) = &result {
            warn!(symbol, series = %kind, error = %err, "series analysis failed");
        }
        SeriesOutcome { kind, result }
    };
    let series: Vec<SeriesOutcome> = if options.parallel {
        ReturnKind::ALL.par_iter().map(|&kind| run(kind)).collect()
    } else {
        ReturnKind::ALL.iter().map(|&kind| run(kind)).collect()
    };

    let total_return = window_return(bars);
    let label = total_return
        .as_ref()
        .ok()
        .map(|&total| total_return_label(symbol, total, options.display_precision));

    debug!(
        symbol,
        bars = bars.len(),
        failed = series.iter().filter(|o| o.result.is_err()).count(),
        "window analysis complete"
    );

    Ok(WindowReport {
        symbol: symbol.to_uppercase(),
        bar_count: bars.len(),
        total_return,
        label,
        series,
    })
}
