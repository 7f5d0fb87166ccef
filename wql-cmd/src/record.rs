//! Commands that write readings: init, add and recompute.

use chrono::NaiveDate;
use log::info;
use std::io::Write;
use wql_core::{aggregate, Location, NewReading};
use wql_store::WorkbookStore;

/// Create the workbook with empty location sheets unless it exists.
pub fn run_init(store: &WorkbookStore, out: &mut impl Write) -> anyhow::Result<()> {
    if store.initialize()? {
        writeln!(out, "Created workbook {}", store.path().display())?;
    } else {
        writeln!(out, "Workbook {} already exists", store.path().display())?;
    }
    Ok(())
}

/// Append one reading to its location and refresh that location's means.
///
/// pH and flow are clamped to their valid ranges before they are stored.
/// Returns the new monthly mean pH of the reading's month.
pub fn run_add(
    store: &WorkbookStore,
    location: Location,
    date: NaiveDate,
    ph: f64,
    flow: f64,
    out: &mut impl Write,
) -> anyhow::Result<Option<f64>> {
    let reading = NewReading::clamped(date, ph, flow);
    let mean = store.transact(|workbook| {
        let rows = aggregate::append_reading(workbook.partition(location), reading);
        let mean = rows.last().and_then(|r| r.monthly_mean_ph);
        workbook.set_partition(location, rows);
        Ok::<_, anyhow::Error>(mean)
    })?;
    info!(
        "Appended reading for {} on {} to {}",
        location,
        date,
        store.path().display()
    );
    writeln!(
        out,
        "Saved to sheet '{}' for {}: pH {:.3}, flow {:.3}",
        location,
        date.format("%d/%m/%Y"),
        reading.ph,
        reading.flow
    )?;
    if let Some(mean) = mean {
        writeln!(out, "Monthly mean pH is now {:.3}", mean)?;
    }
    Ok(mean)
}

/// Recompute monthly means for one location, or for all of them.
///
/// Returns the number of readings whose mean changed.
pub fn run_recompute(
    store: &WorkbookStore,
    location: Option<Location>,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let locations = match location {
        Some(location) => vec![location],
        None => Location::ALL.to_vec(),
    };
    let changed = store.transact(|workbook| {
        let mut changed = 0;
        for location in &locations {
            let rows = workbook.partition(*location);
            let refreshed = aggregate::recompute_monthly_mean(rows);
            changed += rows
                .iter()
                .zip(&refreshed)
                .filter(|(old, new)| old.monthly_mean_ph != new.monthly_mean_ph)
                .count();
            workbook.set_partition(*location, refreshed);
        }
        Ok::<_, anyhow::Error>(changed)
    })?;
    info!("Recomputed monthly means, {} readings changed", changed);
    writeln!(out, "Recomputed monthly means: {} readings updated", changed)?;
    Ok(changed)
}
