// src/db/help.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::help::{HelpDraft, HelpRequest, HelpStatus};
use crate::errors::ServerError;

const HELP_COLUMNS: &str =
    "id, building_id, title, description, category, contact, status, created_at, user_hash";

fn help_from_row(r: &Row<'_>) -> rusqlite::Result<HelpRequest> {
    Ok(HelpRequest {
        id: r.get(0)?,
        building_id: r.get(1)?,
        title: r.get(2)?,
        description: r.get(3)?,
        category: r.get(4)?,
        contact: r.get(5)?,
        status: r.get(6)?,
        created_at: r.get(7)?,
        user_hash: r.get(8)?,
    })
}

pub fn insert_help(
    conn: &Connection,
    draft: &HelpDraft,
    user_hash: &str,
    now: i64,
) -> Result<HelpRequest, ServerError> {
    conn.execute(
        r#"
        insert into neighbor_help
            (building_id, title, category, description, contact, status, user_hash, created_at)
        values (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            draft.building_id,
            draft.title,
            draft.category,
            draft.description,
            draft.contact,
            HelpStatus::Open,
            user_hash,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert help failed: {e}")))?;

    require_help(conn, conn.last_insert_rowid())
}

pub fn find_help(conn: &Connection, id: i64) -> Result<Option<HelpRequest>, ServerError> {
    conn.query_row(
        &format!("select {HELP_COLUMNS} from neighbor_help where id = ?"),
        params![id],
        help_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select help failed: {e}")))
}

pub fn require_help(conn: &Connection, id: i64) -> Result<HelpRequest, ServerError> {
    find_help(conn, id)?.ok_or(ServerError::NotFound("help request"))
}

/// Newest first, optionally for one building.
pub fn list_help(
    conn: &Connection,
    building_id: Option<i64>,
) -> Result<Vec<HelpRequest>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {HELP_COLUMNS} from neighbor_help
             where ?1 is null or building_id = ?1
             order by id desc"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![building_id], help_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn count_open_for_building(conn: &Connection, building_id: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from neighbor_help where building_id = ? and status = 'open'",
        params![building_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count open help failed: {e}")))
}

/// Returns true when the request was open and is now closed.
pub fn close_help(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update neighbor_help set status = ? where id = ? and status = 'open'",
            params![HelpStatus::Closed, id],
        )
        .map_err(|e| ServerError::DbError(format!("close help failed: {e}")))?;
    Ok(updated == 1)
}

/// Returns false when this responder already answered.
pub fn insert_response(
    conn: &Connection,
    help_id: i64,
    responder_hash: &str,
    now: i64,
) -> Result<bool, ServerError> {
    let inserted = conn
        .execute(
            "insert or ignore into help_responses (help_id, responder_hash, created_at)
             values (?, ?, ?)",
            params![help_id, responder_hash, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert help response failed: {e}")))?;
    Ok(inserted == 1)
}

pub fn count_responses(conn: &Connection, help_id: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from help_responses where help_id = ?",
        params![help_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count help responses failed: {e}")))
}
