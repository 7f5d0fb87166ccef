//! Values handed out by the store.

use crate::schema::{DEFAULT_FILE_NAME, XLSX_MIME};

/// A byte-identical copy of the persisted workbook, ready to be served or
/// written elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    /// Suggested file name for the copy.
    pub file_name: &'static str,
    /// MIME type for spreadsheet documents.
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME,
            mime: XLSX_MIME,
            bytes,
        }
    }
}
