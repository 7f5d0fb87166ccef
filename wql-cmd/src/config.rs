//! Where the workbook and the pending delete confirmations live.

use clap::Args;
use std::path::PathBuf;
use wql_store::{schema::DEFAULT_FILE_NAME, WorkbookStore};

#[derive(Args, Debug, Clone, PartialEq)]
pub struct Config {
    /// Path of the workbook file
    #[arg(short = 'w', long, global = true, env = "WQL_WORKBOOK", default_value = DEFAULT_FILE_NAME)]
    pub workbook: PathBuf,

    /// File holding pending delete confirmations [default: <WORKBOOK>.sessions.json]
    #[arg(long, global = true, env = "WQL_SESSIONS")]
    pub sessions: Option<PathBuf>,
}

impl Config {
    pub fn new(workbook: impl Into<PathBuf>) -> Self {
        Self {
            workbook: workbook.into(),
            sessions: None,
        }
    }

    pub fn store(&self) -> WorkbookStore {
        WorkbookStore::new(&self.workbook)
    }

    pub fn sessions_path(&self) -> PathBuf {
        match &self.sessions {
            Some(path) => path.clone(),
            None => {
                let mut name = self.workbook.clone().into_os_string();
                name.push(".sessions.json");
                PathBuf::from(name)
            }
        }
    }
}
