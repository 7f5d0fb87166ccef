//! Shared utility functions for WQL crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Datelike, NaiveDate};

    /// Display and input format for calendar dates: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| DateError(format!("{s:?} is not a YYYY-MM-DD date ({e})")))
    }

    /// Rebuild a calendar date from separately stored components.
    ///
    /// Returns `None` when any component is missing or the triple does not
    /// name a real day (e.g. 31 February).
    pub fn from_parts(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year?, month?, day?)
    }

    /// Split a date into its (day, month, year) components.
    pub fn to_parts(date: &NaiveDate) -> (u32, u32, i32) {
        (date.day(), date.month(), date.year())
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
