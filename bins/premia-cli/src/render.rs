//! Output formats for sampled series.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use premia_decay::PriceSeries;
use serde::Serialize;

use crate::curve::TimeUnit;

/// Width of the bar column at the series maximum.
const BAR_WIDTH: f64 = 40.0;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table with a bar column
    Text,
    /// `elapsed,price` rows under a header
    Csv,
    /// Array of sample objects
    Json,
}

#[derive(Serialize)]
struct ChartPoint {
    /// Elapsed time in the chart unit.
    elapsed: f64,
    elapsed_seconds: f64,
    /// Price in whole units.
    price: f64,
}

/// Render `series` to `out`, with elapsed time expressed in `unit`.
pub fn render<W: Write>(
    series: &PriceSeries,
    unit: TimeUnit,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(series, unit, out),
        OutputFormat::Csv => {
            writeln!(out, "elapsed,price")?;
            write_rows(series, unit, out)?;
            Ok(())
        }
        OutputFormat::Json => {
            let points: Vec<ChartPoint> = series
                .iter()
                .map(|s| ChartPoint {
                    elapsed: s.elapsed_units(unit.seconds()),
                    elapsed_seconds: s.elapsed_seconds,
                    price: s.price_units(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &points)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn render_text<W: Write>(series: &PriceSeries, unit: TimeUnit, out: &mut W) -> Result<()> {
    let max = series.iter().map(|s| s.price).fold(0.0, f64::max);

    writeln!(out, "{:>10}  {:>16}", unit.name(), "price")?;
    for sample in series {
        let bar = if max > 0.0 {
            (sample.price / max * BAR_WIDTH).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "{:>10.2}  {:>16.6}  {}",
            sample.elapsed_units(unit.seconds()),
            sample.price_units(),
            "#".repeat(bar)
        )?;
    }
    Ok(())
}

/// `elapsed,price` lines, elapsed in `unit` and price in whole units.
fn write_rows<W: Write>(series: &PriceSeries, unit: TimeUnit, out: &mut W) -> Result<u64> {
    let mut rows = 0;
    for sample in series {
        writeln!(
            out,
            "{},{}",
            sample.elapsed_units(unit.seconds()),
            sample.price_units()
        )?;
        rows += 1;
    }
    Ok(rows)
}

/// Append the rows of `series` to the CSV file at `path`, creating it if
/// needed. Returns the number of rows written.
pub fn append_csv(path: &Path, series: &PriceSeries, unit: TimeUnit) -> Result<u64> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let rows = write_rows(series, unit, &mut out)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(rows)
}
