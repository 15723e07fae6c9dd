//! # Retdist
//!
//! Return-distribution statistics for daily OHLC bars.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use retdist::{PriceBar, ReturnKind, analyze, log_close_return};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let bars = vec![
//!     PriceBar::new(day(2), 100.0, 101.0, 99.0, 100.0),
//!     PriceBar::new(day(3), 100.0, 111.0, 99.5, 110.0),
//!     PriceBar::new(day(4), 110.0, 110.5, 98.0, 99.0),
//! ];
//!
//! let series = log_close_return(&bars).unwrap();
//! assert_eq!(series.kind(), ReturnKind::LogClose);
//!
//! let stats = analyze(&series).unwrap();
//! assert_eq!(stats.sign.count_total, 2);
//! assert_eq!(stats.sign.positive.count, 1);
//! ```
//!
//! ## Algorithm
//!
//! For each derived series (log close-to-close, high/low range, open/close):
//!
//! 1. **Sign partition**: strictly positive, strictly negative, exact zero
//! 2. **Moments**: mean and sample standard deviation (n - 1) over all observations
//! 3. **Subset means**: per-sign mean, frequency (0-100) and adjusted return
//! 4. **Band coverage**: observations inside mean ± k·stdev for k = 1, 2, 3
//!
//! Every operation is a pure function of borrowed input. Undefined results
//! (empty series, empty subsets, zero denominators) are reported explicitly,
//! never as `0`, `NaN` or infinity.

pub mod aggregate;
pub mod bands;
pub mod config;
pub mod csv_input;
pub mod errors;
pub mod histogram;
pub mod report;
pub mod series;
pub mod stats;
pub mod types;
pub mod units;

// Re-export commonly used types for convenience
pub use aggregate::{aggregate_return, total_return_label, window_return};
pub use bands::{BandCoverageStats, BandRow, SIGMA_LEVELS};
pub use config::{AnalysisConfig, OutputFormat};
pub use errors::{InputError, Result, StatsError};
pub use histogram::{BinSpec, Histogram};
pub use report::{SeriesOutcome, SeriesReport, WindowOptions, WindowReport, analyze_window};
pub use series::{
    ReturnKind, ReturnSeries, high_low_return, log_close_return, open_close_return,
};
pub use stats::{DistributionStats, Sign, SignConditionalStats, SignTally, SignedSubset, analyze};
pub use types::PriceBar;
pub use units::{AdjustedReturn, Fraction, Percent};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
