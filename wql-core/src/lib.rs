//! Core types for the water quality log.
//!
//! A [`workbook::Workbook`] holds one partition of [`reading::Reading`]s per
//! monitored [`location::Location`]. The [`aggregate`] module owns every
//! transformation of a partition: appending, the derived monthly mean pH,
//! deleting by date and display ordering.

pub mod aggregate;
pub mod error;
pub mod location;
pub mod reading;
pub mod workbook;

pub use error::CoreError;
pub use location::Location;
pub use reading::{NewReading, Reading};
pub use workbook::Workbook;
