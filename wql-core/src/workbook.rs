use crate::{location::Location, reading::Reading};
use std::collections::BTreeMap;

/// The full set of partitions, one per [`Location`].
///
/// Every location is always present; a location without readings holds an
/// empty partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    partitions: BTreeMap<Location, Vec<Reading>>,
}

impl Workbook {
    /// A workbook with all five partitions present and empty.
    pub fn empty() -> Self {
        Self {
            partitions: Location::ALL.into_iter().map(|l| (l, Vec::new())).collect(),
        }
    }

    /// Rows of one partition, in stored order.
    pub fn partition(&self, location: Location) -> &[Reading] {
        self.partitions
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace the rows of one partition.
    pub fn set_partition(&mut self, location: Location, rows: Vec<Reading>) {
        self.partitions.insert(location, rows);
    }

    /// All partitions in sheet order.
    pub fn partitions(&self) -> impl Iterator<Item = (Location, &[Reading])> {
        self.partitions.iter().map(|(l, rows)| (*l, rows.as_slice()))
    }

    /// Number of readings across every partition.
    pub fn total_readings(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::empty()
    }
}
