//! Cumulative return over the requested window

use crate::errors::{Result, StatsError};
use crate::types::PriceBar;
use crate::units::Percent;

/// `(last / first - 1) * 100`
pub fn aggregate_return(first_close: f64, last_close: f64) -> Result<Percent> {
    const OP: &str = "aggregate_return";

    for value in [first_close, last_close] {
        if !value.is_finite() {
            return Err(StatsError::NonFinite {
                operation: OP,
                index: None,
                value,
            });
        }
    }
    if first_close == 0.0 {
        return Err(StatsError::zero_denominator(OP, None, "first close"));
    }
    let pct = (last_close / first_close - 1.0) * 100.0;
    if !pct.is_finite() {
        return Err(StatsError::NonFinite {
            operation: OP,
            index: None,
            value: pct,
        });
    }
    Ok(Percent::new(pct))
}

/// Aggregate return from the first to the last bar's close
pub fn window_return(bars: &[PriceBar]) -> Result<Percent> {
    match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => aggregate_return(first.close, last.close),
        _ => Err(StatsError::insufficient("window")),
    }
}

/// `"SPY Total Return : 12.34%"`, rounded to `places` decimals
pub fn total_return_label(symbol: &str, total: Percent, places: u32) -> String {
    format!(
        "{} Total Return : {:.*}%",
        symbol.to_uppercase(),
        places as usize,
        total.value()
    )
}
