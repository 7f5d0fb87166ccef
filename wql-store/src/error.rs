/// Error types for the workbook store
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading, writing or locking the backing file failed
    #[error("Workbook I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a readable workbook
    #[error("Failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        source: calamine::XlsxError,
    },

    /// A sheet could not be read
    #[error("Failed to read sheet {sheet:?}: {source}")]
    Sheet {
        sheet: String,
        source: calamine::XlsxError,
    },

    /// A sheet was readable but its layout is unusable
    #[error("Sheet {sheet:?} is corrupt: {reason}")]
    Corrupt { sheet: String, reason: String },

    /// Serializing the workbook failed
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Replacing the backing file with the new version failed
    #[error("Failed to replace workbook file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Type alias for Results using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
