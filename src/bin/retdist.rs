//! Return distribution report for a daily bar CSV
//!
//! Loads bars, runs the three return derivations and prints either the
//! dashboard tables or the full JSON report.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL};
use retdist::{
    AnalysisConfig, OutputFormat, SeriesReport, WindowReport, analyze_window, csv_input,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "retdist", version, about = "Daily return distribution statistics")]
struct Cli {
    /// Daily bar CSV (Date,Open,High,Low,Close,...)
    input: Option<PathBuf>,

    /// Ticker shown in the total-return label
    #[arg(short, long)]
    symbol: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places for displayed values
    #[arg(long)]
    precision: Option<u32>,

    /// Analyse series one after another instead of on the rayon pool
    #[arg(long)]
    sequential: bool,

    /// Omit histogram bin counts from the report
    #[arg(long)]
    no_histograms: bool,
}

impl Cli {
    fn apply(self, config: &mut AnalysisConfig) {
        if let Some(input) = self.input {
            config.input = Some(input);
        }
        if let Some(symbol) = self.symbol {
            config.symbol = symbol;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(precision) = self.precision {
            config.display_precision = precision;
        }
        if self.sequential {
            config.parallel = false;
        }
        if self.no_histograms {
            config.histograms = false;
        }
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
}

fn display(value: Option<f64>, places: u32, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.*}{suffix}", places as usize),
        None => "n/a".to_string(),
    }
}

fn sign_table(report: &SeriesReport, places: u32) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["", "Mean", "Count", "Frequency %", "Adj Return"]);
    for row in report.sign_rows(places) {
        table.add_row(vec![
            row.label.to_string(),
            display(row.mean_pct, places, "%"),
            row.count.to_string(),
            display(Some(row.frequency_pct), places, "%"),
            display(row.adjusted, places, "%"),
        ]);
    }
    table
}

fn band_table(report: &SeriesReport, places: u32) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["", "Upper Bound", "Lower Bound", "Count", "Count %"]);
    for row in report.band_rows(places) {
        table.add_row(vec![
            row.label,
            display(Some(row.upper_pct), places, "%"),
            display(Some(row.lower_pct), places, "%"),
            row.count.to_string(),
            display(Some(row.count_pct), places, "%"),
        ]);
    }
    table
}

fn print_tables(report: &WindowReport, places: u32) {
    match (&report.label, &report.total_return) {
        (Some(label), _) => println!("{label}"),
        (None, Err(err)) => println!("{} Total Return : {err}", report.symbol),
        (None, Ok(_)) => {}
    }

    for outcome in &report.series {
        println!("\n{}", outcome.kind.title());
        match &outcome.result {
            Ok(series) => {
                println!("{}", sign_table(series, places));
                if series.stats.bands.is_some() {
                    println!("{}", band_table(series, places));
                } else {
                    println!("Standard deviation undefined for a single observation");
                }
            }
            Err(err) => println!("{err}"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AnalysisConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    init_tracing(&config.log_level)?;

    let Some(input) = config.input.clone() else {
        bail!("no input CSV given (positional argument or `input` in the config file)");
    };
    info!(input = %input.display(), symbol = %config.symbol, "loading bars");

    let bars = csv_input::read_bars(&input)
        .with_context(|| format!("failed to load bars from {}", input.display()))?;

    let report = match analyze_window(&config.symbol, &bars, &config.window_options()) {
        Ok(report) => report,
        Err(err) if err.is_insufficient_data() => {
            println!(
                "No data found for symbol '{}'. Please check the input.",
                config.symbol.to_uppercase()
            );
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_tables(&report, config.display_precision),
    }

    Ok(())
}
