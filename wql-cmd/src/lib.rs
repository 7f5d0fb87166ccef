//! Command implementations for WQL CLI.
//!
//! Provides subcommands for recording pH and flow-rate readings per
//! location, reviewing them, deleting a day's readings behind a two-step
//! confirmation, and exporting the workbook.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use std::path::PathBuf;
use wql_core::Location;
use wql_utils::dates::parse_date;

pub mod config;
pub mod confirm;
pub mod delete;
pub mod record;
pub mod report;

pub use config::Config;
use confirm::SessionId;

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create the workbook with an empty sheet per location if it does not exist
    Init,

    /// Record a pH and flow-rate reading
    Add {
        /// Location label, e.g. "Drain A" or drain-a
        #[arg(short, long)]
        location: Location,

        /// Measurement date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// pH, clamped to 0-14
        #[arg(long, allow_negative_numbers = true)]
        ph: f64,

        /// Flow rate, e.g. L/s; negative values are clamped to 0
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        flow: f64,
    },

    /// Show a location's readings ordered by date
    Show {
        #[arg(short, long)]
        location: Location,

        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// List the dates that have readings at a location
    Dates {
        #[arg(short, long)]
        location: Location,
    },

    /// Recompute monthly mean pH for one location, or all of them
    Recompute {
        #[arg(short, long)]
        location: Option<Location>,
    },

    /// Delete all readings of a location on one date, with confirmation
    #[command(subcommand)]
    Delete(DeleteCommand),

    /// Write a byte-identical copy of the workbook
    Download {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum DeleteCommand {
    /// Mark a date for deletion and print the session id to confirm with
    Mark {
        #[arg(short, long)]
        location: Location,

        /// Date to delete (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Delete what the session marked
    Confirm {
        #[arg(short, long)]
        session: SessionId,
    },

    /// Forget what the session marked
    Cancel {
        #[arg(short, long)]
        session: SessionId,
    },

    /// List sessions with a pending delete
    Pending,
}

pub fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    let store = config.store();
    let mut out = std::io::stdout().lock();
    match command {
        Command::Init => record::run_init(&store, &mut out),
        Command::Add {
            location,
            date,
            ph,
            flow,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            record::run_add(&store, location, date, ph, flow, &mut out).map(|_| ())
        }
        Command::Show { location, csv } => report::run_show(&store, location, csv, &mut out),
        Command::Dates { location } => report::run_dates(&store, location, &mut out),
        Command::Recompute { location } => {
            record::run_recompute(&store, location, &mut out).map(|_| ())
        }
        Command::Delete(DeleteCommand::Mark { location, date }) => {
            delete::run_mark(config, location, date, &mut out).map(|_| ())
        }
        Command::Delete(DeleteCommand::Confirm { session }) => {
            delete::run_confirm(config, session, &mut out).map(|_| ())
        }
        Command::Delete(DeleteCommand::Cancel { session }) => {
            delete::run_cancel(config, session, &mut out)
        }
        Command::Delete(DeleteCommand::Pending) => delete::run_pending(config, &mut out),
        Command::Download { output } => report::run_download(&store, &output, &mut out),
    }
}
