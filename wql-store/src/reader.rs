//! Decoding a persisted workbook into typed partitions.
//!
//! Sheets are matched to locations by name and columns to fields by header,
//! so both the current layout and the older Indonesian-labelled layout load.
//! Cells are coerced rather than rejected: blank, non-numeric or non-integral
//! date components become missing values.

use crate::error::{Result, StoreError};
use crate::schema::Column;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;
use wql_core::{Location, Reading, Workbook};

/// Read every location sheet of the workbook at `path`.
///
/// Sheets that are not named after a location are skipped; locations without
/// a sheet load as empty partitions.
pub(crate) fn read_workbook(path: &Path) -> Result<Workbook> {
    let mut xlsx: Xlsx<_> = open_workbook(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut workbook = Workbook::empty();
    for sheet_name in xlsx.sheet_names().to_owned() {
        let Some(location) = Location::from_sheet_name(&sheet_name) else {
            warn!("Ignoring sheet {:?}: not a monitored location", sheet_name);
            continue;
        };
        let range = xlsx
            .worksheet_range(&sheet_name)
            .map_err(|source| StoreError::Sheet {
                sheet: sheet_name.clone(),
                source,
            })?;
        let rows = read_sheet(&sheet_name, &range)?;
        debug!("reader: Loaded {} readings from {:?}", rows.len(), sheet_name);
        workbook.set_partition(location, rows);
    }
    Ok(workbook)
}

/// Decode one sheet: the first row is the header, the rest are readings.
fn read_sheet(sheet: &str, range: &Range<Data>) -> Result<Vec<Reading>> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns: HashMap<Column, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| match cell {
            Data::String(s) => Column::from_header(s).map(|c| (c, i)),
            _ => None,
        })
        .collect();
    if columns.is_empty() {
        return Err(StoreError::Corrupt {
            sheet: sheet.to_string(),
            reason: "first row has no recognised column headers".to_string(),
        });
    }

    let mut readings = Vec::new();
    let mut skipped = 0u32;
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            skipped += 1;
            continue;
        }
        let cell = |column: Column| columns.get(&column).and_then(|i| row.get(*i));
        readings.push(Reading {
            day: cell(Column::Day)
                .and_then(whole_number)
                .and_then(|v| u32::try_from(v).ok()),
            month: cell(Column::Month)
                .and_then(whole_number)
                .and_then(|v| u32::try_from(v).ok()),
            year: cell(Column::Year)
                .and_then(whole_number)
                .and_then(|v| i32::try_from(v).ok()),
            ph: cell(Column::Ph).and_then(number),
            flow: cell(Column::Flow).and_then(number),
            monthly_mean_ph: cell(Column::MonthlyMeanPh).and_then(number),
        });
    }
    if skipped > 0 {
        debug!("reader: Skipped {} blank rows in {:?}", skipped, sheet);
    }
    Ok(readings)
}

/// Numeric value of a cell, accepting numeric text.
fn number(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Integral value of a cell; fractional numbers count as missing.
fn whole_number(cell: &Data) -> Option<i64> {
    number(cell)
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as i64)
}
