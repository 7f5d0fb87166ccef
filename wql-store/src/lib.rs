//! Spreadsheet store for the water quality log.
//!
//! The whole [`Workbook`] round-trips through a single `.xlsx` file: one
//! worksheet per location, one row per reading. The dataset is small and
//! single-user, so every save rewrites the entire file.
//!
//! # Usage
//!
//! ```rust,no_run
//! use wql_core::{aggregate, Location, NewReading};
//! use wql_store::WorkbookStore;
//!
//! let store = WorkbookStore::new("ph_debit_data.xlsx");
//! let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! store.transact(|workbook| {
//!     let rows = aggregate::append_reading(
//!         workbook.partition(Location::DrainA),
//!         NewReading::clamped(date, 7.4, 2.0),
//!     );
//!     workbook.set_partition(Location::DrainA, rows);
//!     Ok::<_, wql_store::StoreError>(())
//! })?;
//! # Ok::<(), wql_store::StoreError>(())
//! ```
//!
//! # Consistency
//!
//! Saves write a temporary file next to the target and rename it into place,
//! so readers see either the old or the new workbook. [`WorkbookStore::transact`]
//! additionally holds an exclusive lock on `<path>.lock` across
//! load, mutate and save, so concurrent writers are serialized instead of
//! overwriting each other's updates.

pub mod error;
pub mod models;
mod reader;
pub mod schema;
mod writer;

pub use error::{Result, StoreError};
pub use models::Download;

use log::info;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use wql_core::Workbook;

/// Handle on the backing workbook file.
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    path: PathBuf,
}

impl WorkbookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file locked by [`WorkbookStore::transact`].
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load every partition.
    ///
    /// A missing file is not an error: it yields an empty workbook with all
    /// five partitions. A file that exists but cannot be decoded is reported
    /// as-is.
    pub fn load_all(&self) -> Result<Workbook> {
        if !self.exists() {
            info!("No workbook at {}, starting empty", self.path.display());
            return Ok(Workbook::empty());
        }
        let workbook = reader::read_workbook(&self.path)?;
        info!(
            "Loaded {} readings from {}",
            workbook.total_readings(),
            self.path.display()
        );
        Ok(workbook)
    }

    /// Replace the backing file with the serialized workbook.
    pub fn save_all(&self, workbook: &Workbook) -> Result<()> {
        let bytes = writer::encode(workbook)?;
        let mut staged = NamedTempFile::new_in(self.parent_dir())?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path)?;
        info!(
            "Saved {} readings to {}",
            workbook.total_readings(),
            self.path.display()
        );
        Ok(())
    }

    /// Create the file with empty location sheets unless it already exists.
    ///
    /// Returns whether a new file was written.
    pub fn initialize(&self) -> Result<bool> {
        let _lock = self.lock()?;
        if self.exists() {
            return Ok(false);
        }
        self.save_all(&Workbook::empty())?;
        Ok(true)
    }

    /// The current file contents, byte for byte. Initializes the file first
    /// when it does not exist yet.
    pub fn download(&self) -> Result<Download> {
        self.initialize()?;
        Ok(Download::new(fs::read(&self.path)?))
    }

    /// Run `load_all`, `mutate` and `save_all` while holding the write lock.
    ///
    /// Nothing is saved when `mutate` fails.
    pub fn transact<T, E>(&self, mutate: impl FnOnce(&mut Workbook) -> std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        E: From<StoreError>,
    {
        let _lock = self.lock()?;
        let mut workbook = self.load_all()?;
        let value = mutate(&mut workbook)?;
        self.save_all(&workbook)?;
        Ok(value)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn lock(&self) -> Result<WriteLock> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock()?;
        Ok(WriteLock { file })
    }
}

/// Exclusive lock on the sidecar file, released on drop.
struct WriteLock {
    file: File,
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
