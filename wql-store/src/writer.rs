//! Encoding partitions into an `.xlsx` document.

use crate::error::Result;
use crate::schema::{Column, DATE_NUM_FORMAT};
use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook, Worksheet};
use wql_core::{Reading, Workbook};

/// Serialize the whole workbook, one sheet per location in location order.
pub(crate) fn encode(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut book = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);

    for (location, rows) in workbook.partitions() {
        let sheet = book.add_worksheet();
        sheet.set_name(location.label())?;
        for column in Column::ALL {
            sheet.set_column_width(column.index(), column.width())?;
            sheet.write_string_with_format(0, column.index(), column.header(), &header_format)?;
        }
        for (i, reading) in rows.iter().enumerate() {
            write_reading(sheet, i as u32 + 1, reading, &date_format)?;
        }
    }
    Ok(book.save_to_buffer()?)
}

fn write_reading(sheet: &mut Worksheet, row: u32, reading: &Reading, date_format: &Format) -> Result<()> {
    let cells = [
        (Column::Day, reading.day.map(f64::from)),
        (Column::Month, reading.month.map(f64::from)),
        (Column::Year, reading.year.map(f64::from)),
        (Column::Ph, reading.ph),
        (Column::Flow, reading.flow),
        (Column::MonthlyMeanPh, reading.monthly_mean_ph),
    ];
    for (column, value) in cells {
        if let Some(value) = value {
            sheet.write_number(row, column.index(), value)?;
        }
    }
    // Rows that do not form a representable date leave the cell blank
    if let Some(date) = excel_date(reading) {
        sheet.write_datetime_with_format(row, Column::Date.index(), &date, date_format)?;
    }
    Ok(())
}

/// The reading's date as an Excel serial date, if it has one.
fn excel_date(reading: &Reading) -> Option<ExcelDateTime> {
    let date = reading.date()?;
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}
