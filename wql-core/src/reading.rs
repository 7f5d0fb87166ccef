use chrono::naive::NaiveDate;
use log::warn;
use wql_utils::dates;

/// Lowest accepted pH.
pub const PH_MIN: f64 = 0.0;

/// Highest accepted pH.
pub const PH_MAX: f64 = 14.0;

/// Lowest accepted flow rate.
pub const FLOW_MIN: f64 = 0.0;

/// One pH / flow-rate measurement as stored in a partition.
///
/// The calendar date is kept as three separate components, mirroring the
/// sheet columns. Any field may be missing when the row came from a file
/// with blank or non-numeric cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reading {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub ph: Option<f64>,
    /// Flow rate, e.g. litres per second
    pub flow: Option<f64>,
    /// Derived: mean pH of all readings in the same partition and month.
    pub monthly_mean_ph: Option<f64>,
}

impl Reading {
    /// The calendar date, when the components form a real day.
    pub fn date(&self) -> Option<NaiveDate> {
        dates::from_parts(self.year, self.month, self.day)
    }

    /// The (year, month) group this reading contributes to.
    pub fn month_key(&self) -> Option<(i32, u32)> {
        Some((self.year?, self.month?))
    }

    /// Whether the stored components equal the given date.
    pub fn is_on(&self, date: &NaiveDate) -> bool {
        let (day, month, year) = dates::to_parts(date);
        self.day == Some(day) && self.month == Some(month) && self.year == Some(year)
    }
}

/// A reading as submitted by the user, before it joins a partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewReading {
    pub date: NaiveDate,
    pub ph: f64,
    pub flow: f64,
}

impl NewReading {
    /// Build a reading, clamping pH into [0, 14] and flow to be non-negative.
    /// A flow that is NaN or infinite is stored as 0.
    pub fn clamped(date: NaiveDate, ph: f64, flow: f64) -> NewReading {
        let clamped_ph = if ph.is_nan() { PH_MIN } else { ph.clamp(PH_MIN, PH_MAX) };
        let clamped_flow = if !flow.is_finite() { FLOW_MIN } else { flow.max(FLOW_MIN) };
        if clamped_ph != ph {
            warn!("pH {} out of range, clamped to {}", ph, clamped_ph);
        }
        if clamped_flow != flow {
            warn!("flow {} out of range, clamped to {}", flow, clamped_flow);
        }
        NewReading {
            date,
            ph: clamped_ph,
            flow: clamped_flow,
        }
    }
}

impl From<NewReading> for Reading {
    fn from(value: NewReading) -> Self {
        let (day, month, year) = dates::to_parts(&value.date);
        Reading {
            day: Some(day),
            month: Some(month),
            year: Some(year),
            ph: Some(value.ph),
            flow: Some(value.flow),
            monthly_mean_ph: None,
        }
    }
}
