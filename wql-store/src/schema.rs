//! Sheet layout of the persisted workbook.
//!
//! Every partition is written as one worksheet named after its location,
//! with a header row followed by one row per reading. Columns are written
//! in [`Column::ALL`] order and located by header name on read.

/// File name offered for downloads and used when no path is configured.
pub const DEFAULT_FILE_NAME: &str = "ph_debit_data.xlsx";

/// MIME type of the persisted file.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Excel number format of the full-date column.
pub const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

/// One column of a partition sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Day,
    Month,
    Year,
    Ph,
    Flow,
    MonthlyMeanPh,
    /// Derived from (year, month, day) on write; ignored on read.
    Date,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Day,
        Column::Month,
        Column::Year,
        Column::Ph,
        Column::Flow,
        Column::MonthlyMeanPh,
        Column::Date,
    ];

    /// Header written on save.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Day => "day",
            Column::Month => "month",
            Column::Year => "year",
            Column::Ph => "pH",
            Column::Flow => "flow",
            Column::MonthlyMeanPh => "monthly_mean_pH",
            Column::Date => "date",
        }
    }

    /// Headers of workbooks written by the earlier Indonesian-labelled form.
    fn legacy_header(&self) -> &'static str {
        match self {
            Column::Day => "tanggal",
            Column::Month => "bulan",
            Column::Year => "tahun",
            Column::Ph => "pH",
            Column::Flow => "debit",
            Column::MonthlyMeanPh => "ph_rata_rata_bulan",
            Column::Date => "tanggal_lengkap",
        }
    }

    /// Match a header cell, case-insensitively, against both header sets.
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| {
            c.header().eq_ignore_ascii_case(header) || c.legacy_header().eq_ignore_ascii_case(header)
        })
    }

    /// Zero-based column index on write.
    pub fn index(&self) -> u16 {
        match self {
            Column::Day => 0,
            Column::Month => 1,
            Column::Year => 2,
            Column::Ph => 3,
            Column::Flow => 4,
            Column::MonthlyMeanPh => 5,
            Column::Date => 6,
        }
    }

    /// Display width in Excel character units.
    pub fn width(&self) -> f64 {
        match self {
            Column::Day | Column::Month => 6.0,
            Column::Year => 8.0,
            Column::Ph | Column::Flow => 10.0,
            Column::MonthlyMeanPh => 18.0,
            Column::Date => 15.0,
        }
    }
}
