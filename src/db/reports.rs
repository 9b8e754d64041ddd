// src/db/reports.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::rate_limit::SubmissionHistory;
use crate::domain::report::{Report, ReportDraft, ReportStatus, Severity};
use crate::errors::ServerError;

/// Report columns plus ledger counts, computed on every read.
const REPORT_SELECT: &str = r#"
    select
        r.id, r.building_id, r.category, r.body, r.severity, r.periodicity,
        r.user_hash, r.created_at, r.status, r.image_path,
        (select count(*) from report_confirmations c
          where c.report_id = r.id),
        (select count(*) from report_confirmations c
          where c.report_id = r.id and c.kind = 'problem'),
        (select count(*) from report_confirmations c
          where c.report_id = r.id and c.kind = 'resolved'),
        (select max(c.created_at) from report_confirmations c
          where c.report_id = r.id and c.kind = 'problem')
    from reports r
"#;

fn report_from_row(r: &Row<'_>) -> rusqlite::Result<Report> {
    Ok(Report {
        id: r.get(0)?,
        building_id: r.get(1)?,
        category: r.get(2)?,
        body: r.get(3)?,
        severity: r.get(4)?,
        periodicity: r.get(5)?,
        user_hash: r.get(6)?,
        created_at: r.get(7)?,
        status: r.get(8)?,
        image_path: r.get(9)?,
        confirmations: r.get(10)?,
        problem_confirmations: r.get(11)?,
        resolved_confirmations: r.get(12)?,
        last_problem_at: r.get(13)?,
    })
}

pub fn insert_report(
    conn: &Connection,
    draft: &ReportDraft,
    user_hash: &str,
    image_path: Option<&str>,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into reports
            (building_id, category, body, severity, periodicity, user_hash, created_at, status, image_path)
        values (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            draft.building_id,
            draft.category,
            draft.text,
            draft.severity,
            draft.periodicity,
            user_hash,
            now,
            ReportStatus::Open,
            image_path,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert report failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn find_report(conn: &Connection, id: i64) -> Result<Option<Report>, ServerError> {
    conn.query_row(
        &format!("{REPORT_SELECT} where r.id = ?"),
        params![id],
        report_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select report failed: {e}")))
}

pub fn require_report(conn: &Connection, id: i64) -> Result<Report, ServerError> {
    find_report(conn, id)?.ok_or(ServerError::NotFound("report"))
}

/// Newest first.
pub fn list_for_building(conn: &Connection, building_id: i64) -> Result<Vec<Report>, ServerError> {
    let mut stmt = conn
        .prepare(&format!("{REPORT_SELECT} where r.building_id = ? order by r.id desc"))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![building_id], report_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Everything the rate-limit policy needs about `user_hash`.
pub fn submission_history(
    conn: &Connection,
    user_hash: &str,
    building_id: i64,
    window_start: i64,
) -> Result<SubmissionHistory, ServerError> {
    conn.query_row(
        r#"
        select
            (select count(*) from reports
              where user_hash = ?1 and created_at >= ?3),
            exists(select 1 from reports
              where user_hash = ?1 and building_id = ?2 and created_at >= ?3),
            (select max(created_at) from reports where user_hash = ?1)
        "#,
        params![user_hash, building_id, window_start],
        |r| {
            Ok(SubmissionHistory {
                reports_in_window: r.get(0)?,
                building_report_in_window: r.get(1)?,
                last_report_at: r.get(2)?,
            })
        },
    )
    .map_err(|e| ServerError::DbError(format!("submission history failed: {e}")))
}

/// Moves an open report to `status`. Returns false if it was no longer open.
pub fn close_report(conn: &Connection, id: i64, status: ReportStatus) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update reports set status = ? where id = ? and status = 'open'",
            params![status, id],
        )
        .map_err(|e| ServerError::DbError(format!("update report status failed: {e}")))?;
    Ok(updated == 1)
}

pub fn set_severity(conn: &Connection, id: i64, severity: Severity) -> Result<(), ServerError> {
    conn.execute(
        "update reports set severity = ? where id = ?",
        params![severity, id],
    )
    .map_err(|e| ServerError::DbError(format!("update report severity failed: {e}")))?;
    Ok(())
}
