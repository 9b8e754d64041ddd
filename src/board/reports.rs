// src/board/reports.rs
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::Board;
use crate::db::buildings as db_buildings;
use crate::db::confirmations::{self as ledger, LedgerOutcome};
use crate::db::connection::{commit, write_tx};
use crate::db::reports as db_reports;
use crate::domain::lifecycle;
use crate::domain::report::{ConfirmationKind, Report, ReportDraft, ReportStatus};
use crate::domain::validation::{check_length, REPORT_TEXT_LEN};
use crate::errors::ServerError;
use crate::identity::short;
use crate::images::{ImagePayload, ImageStore};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProblemConfirmed {
    pub confirmations: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedConfirmed {
    pub confirmations: i64,
    pub status: ReportStatus,
}

impl Board {
    /// Create a report after the building check and all three rate limits.
    /// The image, if any, is checked and stored only once the limits pass.
    pub fn submit_report(
        &self,
        conn: &mut Connection,
        images: &dyn ImageStore,
        client_addr: &str,
        draft: ReportDraft,
        image: Option<&ImagePayload>,
        now: i64,
    ) -> Result<Report, ServerError> {
        check_length("text", &draft.text, REPORT_TEXT_LEN)?;

        let tx = write_tx(conn)?;
        db_buildings::require_building(&tx, draft.building_id)?;

        let user_hash = self.identity.derive(client_addr, draft.building_id);
        let history = db_reports::submission_history(
            &tx,
            &user_hash,
            draft.building_id,
            self.policy.window_start(now),
        )?;

        if let Err(kind) = self.policy.check(&history, now) {
            warn!(
                identity = short(&user_hash),
                building_id = draft.building_id,
                ?kind,
                "report rejected"
            );
            return Err(ServerError::RateLimited(kind));
        }

        let image_path = match image {
            Some(payload) => Some(images.put(&payload.decode()?)?),
            None => None,
        };

        let id = db_reports::insert_report(&tx, &draft, &user_hash, image_path.as_deref(), now)?;
        let report = db_reports::require_report(&tx, id)?;
        commit(tx)?;

        info!(
            report_id = id,
            building_id = draft.building_id,
            category = %draft.category,
            severity = %draft.severity,
            identity = short(&user_hash),
            "report created"
        );
        Ok(report)
    }

    /// Record a "problem persists" vote and escalate severity when a
    /// threshold is crossed. A repeat vote by the same identity is rejected.
    pub fn confirm_problem(
        &self,
        conn: &mut Connection,
        report_id: i64,
        client_addr: &str,
        now: i64,
    ) -> Result<ProblemConfirmed, ServerError> {
        let tx = write_tx(conn)?;
        let report = db_reports::require_report(&tx, report_id)?;
        let user_hash = self.identity.derive(client_addr, report.building_id);

        let outcome =
            ledger::record_confirmation(&tx, report_id, &user_hash, ConfirmationKind::Problem, now)?;
        let LedgerOutcome::Recorded { count } = outcome else {
            debug!(
                report_id,
                count = outcome.count(),
                identity = short(&user_hash),
                "duplicate problem confirmation"
            );
            return Err(ServerError::Duplicate("you already confirmed this problem".into()));
        };

        if let Some(next) = lifecycle::escalated_severity(report.status, report.severity, count) {
            db_reports::set_severity(&tx, report_id, next)?;
            info!(report_id, from = %report.severity, to = %next, count, "severity escalated");
        }

        commit(tx)?;
        Ok(ProblemConfirmed { confirmations: count })
    }

    /// Record a "fixed" vote; the third distinct vote resolves the report.
    pub fn confirm_resolved(
        &self,
        conn: &mut Connection,
        report_id: i64,
        client_addr: &str,
        now: i64,
    ) -> Result<ResolvedConfirmed, ServerError> {
        let tx = write_tx(conn)?;
        let report = db_reports::require_report(&tx, report_id)?;
        lifecycle::ensure_open_for_resolution(report.status)?;

        let user_hash = self.identity.derive(client_addr, report.building_id);

        let outcome =
            ledger::record_confirmation(&tx, report_id, &user_hash, ConfirmationKind::Resolved, now)?;
        let LedgerOutcome::Recorded { count } = outcome else {
            debug!(
                report_id,
                count = outcome.count(),
                identity = short(&user_hash),
                "duplicate resolved confirmation"
            );
            return Err(ServerError::Duplicate("you already confirmed this was resolved".into()));
        };

        let mut status = report.status;
        if lifecycle::should_resolve(status, count) {
            status = lifecycle::transition(status, ReportStatus::Resolved)?;
            db_reports::close_report(&tx, report_id, status)?;
            info!(report_id, count, "report resolved by community");
        }

        commit(tx)?;
        Ok(ResolvedConfirmed {
            confirmations: count,
            status,
        })
    }
}

/// All reports of a building, newest first. Open reports with no activity
/// for more than 30 days are moved to `outdated` and saved before returning.
pub fn list_reports_for_building(
    conn: &mut Connection,
    building_id: i64,
    now: i64,
) -> Result<Vec<Report>, ServerError> {
    let tx = write_tx(conn)?;

    let mut reports = db_reports::list_for_building(&tx, building_id)?;
    for report in reports.iter_mut() {
        if !lifecycle::is_stale(report.status, report.last_activity(), now) {
            continue;
        }
        let next = lifecycle::transition(report.status, ReportStatus::Outdated)?;
        if db_reports::close_report(&tx, report.id, next)? {
            info!(
                report_id = report.id,
                last_activity = report.last_activity(),
                "report outdated after inactivity"
            );
        }
        report.status = next;
    }

    commit(tx)?;
    Ok(reports)
}
