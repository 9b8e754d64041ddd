// src/db/confirmations.rs
//
// The confirmation ledger: at most one row per (report, identity, kind).
// Counts are always read live from here, never cached on the report.

use rusqlite::{params, Connection};

use crate::domain::report::ConfirmationKind;
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// New row written; `count` includes it.
    Recorded { count: i64 },
    /// Same identity already confirmed this kind; nothing written.
    AlreadyRecorded { count: i64 },
}

impl LedgerOutcome {
    pub fn count(self) -> i64 {
        match self {
            LedgerOutcome::Recorded { count } | LedgerOutcome::AlreadyRecorded { count } => count,
        }
    }
}

/// Record a confirmation unless the (report, identity, kind) tuple exists.
/// The unique index makes the existence check and the insert one step.
pub fn record_confirmation(
    conn: &Connection,
    report_id: i64,
    user_hash: &str,
    kind: ConfirmationKind,
    now: i64,
) -> Result<LedgerOutcome, ServerError> {
    let inserted = conn
        .execute(
            "insert or ignore into report_confirmations (report_id, user_hash, kind, created_at)
             values (?, ?, ?, ?)",
            params![report_id, user_hash, kind, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert confirmation failed: {e}")))?;

    let count = count_by_kind(conn, report_id, kind)?;
    Ok(if inserted == 1 {
        LedgerOutcome::Recorded { count }
    } else {
        LedgerOutcome::AlreadyRecorded { count }
    })
}

pub fn count_by_kind(
    conn: &Connection,
    report_id: i64,
    kind: ConfirmationKind,
) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from report_confirmations where report_id = ? and kind = ?",
        params![report_id, kind],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count confirmations failed: {e}")))
}
