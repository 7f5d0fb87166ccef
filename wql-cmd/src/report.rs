//! Read-only commands: show, dates and download.

use anyhow::Context;
use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use wql_core::{aggregate, Location, Reading};
use wql_store::WorkbookStore;
use wql_utils::dates::format_date;

/// CSV layout of `show --csv`, matching the workbook columns.
#[derive(Debug, Serialize)]
struct CsvRow {
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
    #[serde(rename = "pH")]
    ph: Option<f64>,
    flow: Option<f64>,
    #[serde(rename = "monthly_mean_pH")]
    monthly_mean_ph: Option<f64>,
    date: Option<String>,
}

impl From<&Reading> for CsvRow {
    fn from(r: &Reading) -> Self {
        CsvRow {
            day: r.day,
            month: r.month,
            year: r.year,
            ph: r.ph,
            flow: r.flow,
            monthly_mean_ph: r.monthly_mean_ph,
            date: r.date().map(|d| format_date(&d)),
        }
    }
}

/// Print a location's readings ordered by date, as a table or as CSV.
pub fn run_show(
    store: &WorkbookStore,
    location: Location,
    as_csv: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let workbook = store.load_all()?;
    let rows = aggregate::sorted_for_display(workbook.partition(location));
    if rows.is_empty() {
        writeln!(out, "No data yet for {}.", location)?;
        return Ok(());
    }
    if as_csv {
        write_csv(&rows, out)
    } else {
        write_table(location, &rows, out)
    }
}

fn write_csv(rows: &[Reading], out: &mut impl Write) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_table(location: Location, rows: &[Reading], out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{} ({} readings)", location, rows.len())?;
    writeln!(
        out,
        "{:>4} {:>5} {:>5} {:>7} {:>9} {:>9}  {}",
        "day", "month", "year", "pH", "flow", "mean pH", "date"
    )?;
    for r in rows {
        writeln!(
            out,
            "{:>4} {:>5} {:>5} {:>7} {:>9} {:>9}  {}",
            cell(r.day),
            cell(r.month),
            cell(r.year),
            decimal(r.ph),
            decimal(r.flow),
            decimal(r.monthly_mean_ph),
            r.date().map(|d| format_date(&d)).unwrap_or_else(|| "-".to_string())
        )?;
    }
    Ok(())
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn decimal(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Print the distinct dates that can be chosen for deletion.
pub fn run_dates(store: &WorkbookStore, location: Location, out: &mut impl Write) -> anyhow::Result<()> {
    let workbook = store.load_all()?;
    let dates = aggregate::unique_dates(workbook.partition(location));
    if dates.is_empty() {
        writeln!(out, "No valid dates to delete for {}.", location)?;
    }
    for date in dates {
        writeln!(out, "{}", format_date(&date))?;
    }
    Ok(())
}

/// Copy the workbook byte for byte to `output`.
pub fn run_download(store: &WorkbookStore, output: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let download = store.download()?;
    std::fs::write(output, &download.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Downloaded {} to {}", store.path().display(), output.display());
    writeln!(
        out,
        "Wrote {} ({} bytes, {})",
        output.display(),
        download.bytes.len(),
        download.mime
    )?;
    Ok(())
}
