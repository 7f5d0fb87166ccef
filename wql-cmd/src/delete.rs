//! Delete-by-date behind a mark / confirm handshake.
//!
//! `mark` records what a session wants to delete and hands back its id;
//! nothing is removed until `confirm` is called with that id. Confirming
//! removes every reading of the location on that date and recomputes the
//! monthly means of what remains.

use crate::config::Config;
use crate::confirm::{DeleteConfirmations, PendingDelete, SessionId};
use anyhow::bail;
use chrono::NaiveDate;
use log::{info, warn};
use std::io::Write;
use wql_core::{aggregate, Location};
use wql_utils::dates::format_date;

/// Mark a location's readings on `date` for deletion.
pub fn run_mark(
    config: &Config,
    location: Location,
    date: NaiveDate,
    out: &mut impl Write,
) -> anyhow::Result<SessionId> {
    let workbook = config.store().load_all()?;
    let matching = workbook
        .partition(location)
        .iter()
        .filter(|r| r.is_on(&date))
        .count();
    if matching == 0 {
        bail!("No readings on {} for {}", format_date(&date), location);
    }

    let sessions_path = config.sessions_path();
    let mut sessions = DeleteConfirmations::load(&sessions_path)?;
    let session = sessions.mark(PendingDelete { location, date });
    sessions.save(&sessions_path)?;

    warn!(
        "Marked {} readings on {} from '{}' for deletion",
        matching, date, location
    );
    writeln!(
        out,
        "Marked {} reading(s) on {} from '{}' for deletion.",
        matching,
        format_date(&date),
        location
    )?;
    writeln!(out, "Confirm with: delete confirm --session {}", session)?;
    Ok(session)
}

/// Perform the delete held by `session`. Returns the number of readings
/// removed.
///
/// The session stays pending if the workbook cannot be updated.
pub fn run_confirm(config: &Config, session: SessionId, out: &mut impl Write) -> anyhow::Result<usize> {
    let sessions_path = config.sessions_path();
    let mut sessions = DeleteConfirmations::load(&sessions_path)?;
    let PendingDelete { location, date } = sessions.confirm(session)?;

    let removed = config.store().transact(|workbook| {
        let rows = workbook.partition(location);
        let kept = aggregate::delete_by_date(rows, date);
        let removed = rows.len() - kept.len();
        workbook.set_partition(location, aggregate::recompute_monthly_mean(&kept));
        Ok::<_, anyhow::Error>(removed)
    })?;
    sessions.save(&sessions_path)?;

    info!("Deleted {} readings on {} from {}", removed, date, location);
    writeln!(
        out,
        "Deleted {} reading(s) on {} from '{}'.",
        removed,
        format_date(&date),
        location
    )?;
    Ok(removed)
}

/// Drop the pending delete of `session` without touching the workbook.
pub fn run_cancel(config: &Config, session: SessionId, out: &mut impl Write) -> anyhow::Result<()> {
    let sessions_path = config.sessions_path();
    let mut sessions = DeleteConfirmations::load(&sessions_path)?;
    if sessions.cancel(session) {
        sessions.save(&sessions_path)?;
        writeln!(out, "Cancelled pending delete for session {}", session)?;
    } else {
        writeln!(out, "Session {} has no pending delete", session)?;
    }
    Ok(())
}

/// List every session with a pending delete.
pub fn run_pending(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let sessions = DeleteConfirmations::load(&config.sessions_path())?;
    let mut any = false;
    for (session, target) in sessions.pending() {
        any = true;
        writeln!(
            out,
            "{}  {}  {}",
            session,
            target.location,
            format_date(&target.date)
        )?;
    }
    if !any {
        writeln!(out, "No pending deletes.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::DeleteState;
    use crate::record::run_add;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn seeded_config(dir: &std::path::Path) -> Config {
        let config = Config::new(dir.join("book.xlsx"));
        let store = config.store();
        for (day, ph) in [(1, 7.0), (15, 7.4), (20, 7.0), (15, 7.8)] {
            run_add(&store, Location::DrainA, date(day), ph, 1.0, &mut Vec::new()).unwrap();
        }
        run_add(&store, Location::DrainB, date(15), 6.0, 1.0, &mut Vec::new()).unwrap();
        config
    }

    #[test]
    fn mark_then_confirm_deletes_and_recomputes() {
        let dir = tempfile::tempdir().unwrap();
        let config = seeded_config(dir.path());
        let mut out = Vec::new();

        let session = run_mark(&config, Location::DrainA, date(15), &mut out).unwrap();
        // Nothing removed yet
        assert_eq!(config.store().load_all().unwrap().partition(Location::DrainA).len(), 4);

        let removed = run_confirm(&config, session, &mut out).unwrap();
        assert_eq!(removed, 2);

        let workbook = config.store().load_all().unwrap();
        let rows = workbook.partition(Location::DrainA);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.monthly_mean_ph == Some(7.0)));
        // Other locations are untouched
        assert_eq!(workbook.partition(Location::DrainB).len(), 1);

        let sessions = DeleteConfirmations::load(&config.sessions_path()).unwrap();
        assert_eq!(sessions.state(session), DeleteState::Idle);
    }

    #[test]
    fn confirm_requires_a_mark() {
        let dir = tempfile::tempdir().unwrap();
        let config = seeded_config(dir.path());
        let mut table = DeleteConfirmations::default();
        let stray = table.mark(PendingDelete {
            location: Location::DrainA,
            date: date(1),
        });
        assert!(run_confirm(&config, stray, &mut Vec::new()).is_err());
        assert_eq!(config.store().load_all().unwrap().partition(Location::DrainA).len(), 4);
    }

    #[test]
    fn cancelled_mark_deletes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = seeded_config(dir.path());
        let session = run_mark(&config, Location::DrainA, date(20), &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        run_pending(&config, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains(&session.to_string()));

        run_cancel(&config, session, &mut Vec::new()).unwrap();
        assert!(run_confirm(&config, session, &mut Vec::new()).is_err());
        assert_eq!(config.store().load_all().unwrap().partition(Location::DrainA).len(), 4);

        let mut out = Vec::new();
        run_pending(&config, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No pending deletes.\n");
    }

    #[test]
    fn mark_rejects_dates_without_readings() {
        let dir = tempfile::tempdir().unwrap();
        let config = seeded_config(dir.path());
        assert!(run_mark(&config, Location::DrainA, date(2), &mut Vec::new()).is_err());
        assert!(!config.sessions_path().exists());
    }
}
