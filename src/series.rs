//! Return series derived from daily bars
//!
//! Three derivations share one shape: a pure function from `&[PriceBar]` to
//! an owned [`ReturnSeries`]. Nothing is appended to the input bars, so the
//! same slice can feed several derivations at once.

use crate::errors::{Result, StatsError};
use crate::types::PriceBar;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Which derivation produced a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// `ln(close[i] / close[i-1])`
    LogClose,
    /// `high / low - 1`
    HighLow,
    /// `open / close - 1`
    OpenClose,
}

impl ReturnKind {
    pub const ALL: [ReturnKind; 3] = [
        ReturnKind::LogClose,
        ReturnKind::HighLow,
        ReturnKind::OpenClose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReturnKind::LogClose => "log_close",
            ReturnKind::HighLow => "high_low",
            ReturnKind::OpenClose => "open_close",
        }
    }

    /// Human-readable title used by table renderers
    pub fn title(self) -> &'static str {
        match self {
            ReturnKind::LogClose => "Log Close Daily Return",
            ReturnKind::HighLow => "High to Low Daily Range",
            ReturnKind::OpenClose => "Open to Close Daily Return",
        }
    }

    pub fn derivation(self) -> fn(&[PriceBar]) -> Result<ReturnSeries> {
        match self {
            ReturnKind::LogClose => log_close_return,
            ReturnKind::HighLow => high_low_return,
            ReturnKind::OpenClose => open_close_return,
        }
    }

    pub fn derive(self, bars: &[PriceBar]) -> Result<ReturnSeries> {
        (self.derivation())(bars)
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered, finite observations of one derivation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    kind: ReturnKind,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Wrap precomputed observations, rejecting non-finite values
    pub fn new(kind: ReturnKind, values: Vec<f64>) -> Result<Self> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(StatsError::NonFinite {
                operation: kind.name(),
                index: Some(index),
                value,
            });
        }
        Ok(Self { kind, values })
    }

    pub fn kind(&self) -> ReturnKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Close-to-close log return. The first bar has no prior close and yields
/// no observation.
pub fn log_close_return(bars: &[PriceBar]) -> Result<ReturnSeries> {
    const OP: &str = "log_close_return";

    let mut values = Vec::with_capacity(bars.len().saturating_sub(1));
    for (i, pair) in bars.windows(2).enumerate() {
        let index = i + 1;
        let (prev, curr) = (pair[0].close, pair[1].close);
        check_finite(OP, index, prev)?;
        check_finite(OP, index, curr)?;
        if prev == 0.0 {
            return Err(StatsError::zero_denominator(OP, Some(index), "previous close"));
        }
        let value = (curr / prev).ln();
        check_finite(OP, index, value)?;
        values.push(value);
    }

    trace!(observations = values.len(), bars = bars.len(), "derived log close returns");
    Ok(ReturnSeries {
        kind: ReturnKind::LogClose,
        values,
    })
}

/// Intraday range `high / low - 1` per bar
pub fn high_low_return(bars: &[PriceBar]) -> Result<ReturnSeries> {
    ratio_series(bars, ReturnKind::HighLow, "high_low_return", "low", |b| {
        (b.high, b.low)
    })
}

/// `open / close - 1` per bar
pub fn open_close_return(bars: &[PriceBar]) -> Result<ReturnSeries> {
    ratio_series(bars, ReturnKind::OpenClose, "open_close_return", "close", |b| {
        (b.open, b.close)
    })
}

fn ratio_series(
    bars: &[PriceBar],
    kind: ReturnKind,
    operation: &'static str,
    denominator: &str,
    parts: impl Fn(&PriceBar) -> (f64, f64),
) -> Result<ReturnSeries> {
    let values = bars
        .iter()
        .enumerate()
        .map(|(index, bar)| {
            let (num, den) = parts(bar);
            check_finite(operation, index, num)?;
            check_finite(operation, index, den)?;
            if den == 0.0 {
                return Err(StatsError::zero_denominator(operation, Some(index), denominator));
            }
            let value = num / den - 1.0;
            check_finite(operation, index, value)?;
            Ok(value)
        })
        .collect::<Result<Vec<_>>>()?;

    trace!(series = %kind, observations = values.len(), "derived ratio returns");
    Ok(ReturnSeries { kind, values })
}

fn check_finite(operation: &'static str, index: usize, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StatsError::NonFinite {
            operation,
            index: Some(index),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::{bars, closes};

    #[test]
    fn test_log_close_drops_leading_bar() {
        let series = log_close_return(&closes(&[100.0, 110.0, 99.0])).unwrap();
        assert_eq!(series.kind(), ReturnKind::LogClose);
        assert_eq!(series.len(), 2);
        assert!((series.values()[0] - 1.1f64.ln()).abs() < 1e-12);
        assert!((series.values()[1] - (99.0f64 / 110.0).ln()).abs() < 1e-12);
        assert!((series.values()[0] - 0.09531).abs() < 1e-5);
        assert!((series.values()[1] + 0.10536).abs() < 1e-5);
    }

    #[test]
    fn test_log_close_single_or_no_bar_is_empty() {
        assert!(log_close_return(&closes(&[100.0])).unwrap().is_empty());
        assert!(log_close_return(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_log_close_zero_previous_close() {
        let err = log_close_return(&closes(&[0.0, 50.0])).unwrap_err();
        assert_eq!(
            err,
            StatsError::DivisionDomain {
                operation: "log_close_return",
                index: Some(1),
                message: "previous close is zero".to_string(),
            }
        );
    }

    #[test]
    fn test_log_close_zero_current_close_is_not_finite() {
        let err = log_close_return(&closes(&[100.0, 0.0])).unwrap_err();
        assert!(matches!(err, StatsError::NonFinite { index: Some(1), .. }));
    }

    #[test]
    fn test_high_low_per_bar() {
        let data = bars(&[(10.0, 11.0, 10.0, 10.5), (10.5, 12.0, 8.0, 9.0)]);
        let series = high_low_return(&data).unwrap();
        assert_eq!(series.len(), data.len());
        assert!((series.values()[0] - 0.1).abs() < 1e-12);
        assert!((series.values()[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_high_low_zero_low_is_domain_error() {
        let data = bars(&[(10.0, 11.0, 10.0, 10.5), (1.0, 2.0, 0.0, 1.0)]);
        let err = high_low_return(&data).unwrap_err();
        assert!(matches!(
            err,
            StatsError::DivisionDomain {
                operation: "high_low_return",
                index: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn test_open_close_sign_and_zero_close() {
        let data = bars(&[(11.0, 12.0, 9.0, 10.0), (9.0, 12.0, 9.0, 10.0)]);
        let series = open_close_return(&data).unwrap();
        assert!((series.values()[0] - 0.1).abs() < 1e-12);
        assert!((series.values()[1] + 0.1).abs() < 1e-12);

        let err = open_close_return(&bars(&[(1.0, 1.0, 0.0, 0.0)])).unwrap_err();
        assert!(matches!(err, StatsError::DivisionDomain { index: Some(0), .. }));
    }

    #[test]
    fn test_ratio_overflow_is_not_finite() {
        let data = bars(&[(1.0, 1e10, 1e-300, 1.0), (1.0, 2.0, 1.0, 1.5)]);
        let err = high_low_return(&data).unwrap_err();
        assert!(matches!(
            err,
            StatsError::NonFinite {
                operation: "high_low_return",
                index: Some(0),
                ..
            }
        ));

        let data = bars(&[(1e10, 1e10, 1e-300, 1e-300)]);
        let err = open_close_return(&data).unwrap_err();
        assert!(matches!(err, StatsError::NonFinite { index: Some(0), .. }));
    }

    #[test]
    fn test_nan_input_is_reported() {
        let data = bars(&[(f64::NAN, 12.0, 9.0, 10.0)]);
        let err = open_close_return(&data).unwrap_err();
        assert!(matches!(err, StatsError::NonFinite { index: Some(0), .. }));
    }

    #[test]
    fn test_derive_dispatches_by_kind() {
        let data = bars(&[(10.0, 11.0, 10.0, 10.5), (10.5, 12.0, 8.0, 9.0)]);
        for kind in ReturnKind::ALL {
            let series = kind.derive(&data).unwrap();
            assert_eq!(series.kind(), kind);
        }
    }

    #[test]
    fn test_new_rejects_infinity() {
        let err = ReturnSeries::new(ReturnKind::HighLow, vec![0.1, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, StatsError::NonFinite { index: Some(1), .. }));
    }
}
