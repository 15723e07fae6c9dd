//! Daily bar loading from CSV exports
//!
//! Accepts the common market-data export layout
//! (`Date,Open,High,Low,Close[,Adj Close,Volume]`), header names matched
//! case-insensitively. Extra columns are ignored.

use crate::errors::InputError;
use crate::types::PriceBar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// CSV bar record format for deserialization
#[derive(Debug, Clone, Deserialize)]
struct CsvBar {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl CsvBar {
    fn into_bar(self, row: usize) -> Result<PriceBar, InputError> {
        let date = parse_date(&self.date).ok_or_else(|| InputError::InvalidRow {
            row,
            message: format!("unparseable date {:?}", self.date),
        })?;
        Ok(PriceBar::new(date, self.open, self.high, self.low, self.close))
    }
}

/// Accepts `2024-01-02` and `2024-01-02 00:00:00[+tz]` timestamps
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Read bars from a CSV file
pub fn read_bars<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>, InputError> {
    let file = File::open(path.as_ref())?;
    let bars = read_bars_from_reader(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), bars = bars.len(), "loaded price bars");
    Ok(bars)
}

/// Read bars from any CSV source, returned in chronological order
pub fn read_bars_from_reader<R: Read>(reader: R) -> Result<Vec<PriceBar>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let normalized: csv::StringRecord = headers.iter().map(normalize_header).collect();
    csv_reader.set_headers(normalized);

    let mut bars = Vec::new();
    for (i, result) in csv_reader.deserialize::<CsvBar>().enumerate() {
        // header is line 1
        let row = i + 2;
        let record = result?;
        bars.push(record.into_bar(row)?);
    }

    if !bars.is_sorted_by_key(|b| b.date) {
        bars.sort_by_key(|b| b.date);
    }
    Ok(bars)
}

fn normalize_header(name: &str) -> String {
    match name.trim().to_ascii_lowercase().as_str() {
        "datetime" | "timestamp" => "date".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXPORT: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-02,100.0,102.0,99.0,101.0,100.5,1000
2024-01-03,101.0,103.0,100.0,102.0,101.5,1100
2024-01-04,102.0,102.5,98.0,99.0,98.5,900
";

    #[test]
    fn test_reads_export_layout() {
        let bars = read_bars_from_reader(EXPORT.as_bytes()).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[2].close, 99.0);
        assert_eq!(bars[1].high, 103.0);
    }

    #[test]
    fn test_lowercase_headers_and_timestamps() {
        let csv = "datetime,open,high,low,close\n2024-01-03 00:00:00-05:00,1,2,0.5,1.5\n2024-01-02 00:00:00-05:00,1,2,0.5,1\n";
        let bars = read_bars_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].close, 1.5);
    }

    #[test]
    fn test_bad_date_names_row() {
        let csv = "Date,Open,High,Low,Close\n2024-01-02,1,2,0.5,1\nnot-a-date,1,2,0.5,1\n";
        let err = read_bars_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::InvalidRow { row: 3, .. }));
    }

    #[test]
    fn test_missing_price_is_csv_error() {
        let csv = "Date,Open,High,Low,Close\n2024-01-02,1,2,0.5,null\n";
        let err = read_bars_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::CsvError { .. }));
    }

    #[test]
    fn test_read_bars_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        file.flush().unwrap();

        let bars = read_bars(file.path()).unwrap();
        assert_eq!(bars.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_bars("/nonexistent/bars.csv").unwrap_err();
        assert!(matches!(err, InputError::IoError { .. }));
    }
}
