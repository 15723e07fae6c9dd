//! Error types for return derivation and distribution analysis

use serde::Serialize;
use thiserror::Error;

/// Result type alias for core statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Failures of the pure statistics core.
///
/// Every public core operation returns one of these instead of letting a
/// zero denominator or `NaN` leak into downstream aggregates.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatsError {
    #[error("Insufficient data: {series} has no valid observations")]
    InsufficientData { series: String },

    #[error("Division domain error in {operation}{}: {message}", at_index(.index))]
    DivisionDomain {
        operation: &'static str,
        index: Option<usize>,
        message: String,
    },

    #[error("Non-finite value in {operation}{}: {value}", at_index(.index))]
    NonFinite {
        operation: &'static str,
        index: Option<usize>,
        value: f64,
    },

    #[error("Invalid histogram bins: {message}")]
    InvalidBins { message: String },
}

impl StatsError {
    pub(crate) fn insufficient(series: impl Into<String>) -> Self {
        StatsError::InsufficientData {
            series: series.into(),
        }
    }

    pub(crate) fn zero_denominator(
        operation: &'static str,
        index: Option<usize>,
        denominator: &str,
    ) -> Self {
        StatsError::DivisionDomain {
            operation,
            index,
            message: format!("{denominator} is zero"),
        }
    }

    /// True for the "no data" outcome, which callers usually render
    /// differently from a genuine domain failure.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, StatsError::InsufficientData { .. })
    }
}

fn at_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at bar {i}"),
        None => String::new(),
    }
}

/// Errors raised by the input adapters (CSV loading, configuration)
#[derive(Error, Debug)]
pub enum InputError {
    #[error("File I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("Invalid row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl From<config::ConfigError> for InputError {
    fn from(err: config::ConfigError) -> Self {
        InputError::ConfigError {
            message: err.to_string(),
        }
    }
}
