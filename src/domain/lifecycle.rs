// src/domain/lifecycle.rs

//! Report status machine: `open -> resolved` by community vote,
//! `open -> outdated` by inactivity. Both targets are terminal.
//! Severity escalation rides along on problem confirmations.

use crate::domain::report::{ReportStatus, Severity};
use crate::domain::DAY_SECS;
use crate::errors::ServerError;

/// Inactivity after which an open report goes stale.
pub const STALE_AFTER_SECS: i64 = 30 * DAY_SECS;

pub const RESOLVED_CONFIRMATIONS_TO_CLOSE: i64 = 3;
pub const PROBLEM_CONFIRMATIONS_FOR_MEDIUM: i64 = 3;
pub const PROBLEM_CONFIRMATIONS_FOR_HIGH: i64 = 5;

/// Only forward moves out of `open` exist.
pub fn transition(from: ReportStatus, to: ReportStatus) -> Result<ReportStatus, ServerError> {
    match (from, to) {
        (ReportStatus::Open, ReportStatus::Resolved | ReportStatus::Outdated) => Ok(to),
        _ => Err(ServerError::InvalidState(format!(
            "report cannot move from {from} to {to}"
        ))),
    }
}

/// Strictly more than 30 days since the last activity.
pub fn is_stale(status: ReportStatus, last_activity: i64, now: i64) -> bool {
    status == ReportStatus::Open && now - last_activity > STALE_AFTER_SECS
}

/// New severity after a problem confirmation brought the count to
/// `problem_count`, or `None` when nothing changes. One tier per call.
pub fn escalated_severity(
    status: ReportStatus,
    severity: Severity,
    problem_count: i64,
) -> Option<Severity> {
    if status != ReportStatus::Open {
        return None;
    }
    if problem_count >= PROBLEM_CONFIRMATIONS_FOR_HIGH && severity == Severity::Medium {
        Some(Severity::High)
    } else if problem_count >= PROBLEM_CONFIRMATIONS_FOR_MEDIUM && severity == Severity::Low {
        Some(Severity::Medium)
    } else {
        None
    }
}

/// Guard for the "resolved" vote.
pub fn ensure_open_for_resolution(status: ReportStatus) -> Result<(), ServerError> {
    if status == ReportStatus::Open {
        Ok(())
    } else {
        Err(ServerError::InvalidState("report is already closed".into()))
    }
}

pub fn should_resolve(status: ReportStatus, resolved_count: i64) -> bool {
    status == ReportStatus::Open && resolved_count >= RESOLVED_CONFIRMATIONS_TO_CLOSE
}
