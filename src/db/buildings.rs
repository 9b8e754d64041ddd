// src/db/buildings.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::building::{BoundingBox, Building};
use crate::domain::report::Severity;
use crate::errors::ServerError;

const BUILDING_COLUMNS: &str =
    "id, lat, lng, address, created_at, positive_count, last_positive_at";

fn building_from_row(r: &Row<'_>) -> rusqlite::Result<Building> {
    Ok(Building {
        id: r.get(0)?,
        lat: r.get(1)?,
        lng: r.get(2)?,
        address: r.get(3)?,
        created_at: r.get(4)?,
        positive_count: r.get(5)?,
        last_positive_at: r.get(6)?,
    })
}

pub fn insert_building(
    conn: &Connection,
    lat: f64,
    lng: f64,
    address: Option<&str>,
    now: i64,
) -> Result<Building, ServerError> {
    conn.execute(
        "insert into buildings (lat, lng, address, created_at) values (?, ?, ?, ?)",
        params![lat, lng, address, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert building failed: {e}")))?;

    require_building(conn, conn.last_insert_rowid())
}

pub fn find_building(conn: &Connection, id: i64) -> Result<Option<Building>, ServerError> {
    conn.query_row(
        &format!("select {BUILDING_COLUMNS} from buildings where id = ?"),
        params![id],
        building_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select building failed: {e}")))
}

pub fn require_building(conn: &Connection, id: i64) -> Result<Building, ServerError> {
    find_building(conn, id)?.ok_or(ServerError::NotFound("building"))
}

pub fn list_buildings(
    conn: &Connection,
    bbox: Option<BoundingBox>,
) -> Result<Vec<Building>, ServerError> {
    let mut stmt = match bbox {
        Some(_) => conn.prepare(&format!(
            "select {BUILDING_COLUMNS} from buildings
             where lat >= ?1 and lat <= ?3 and lng >= ?2 and lng <= ?4
             order by id"
        )),
        None => conn.prepare(&format!("select {BUILDING_COLUMNS} from buildings order by id")),
    }
    .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = match bbox {
        Some(b) => stmt.query_map(params![b.south, b.west, b.north, b.east], building_from_row),
        None => stmt.query_map([], building_from_row),
    }
    .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Returns the number of rows touched (0 when the id is unknown).
pub fn update_position(
    conn: &Connection,
    id: i64,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<usize, ServerError> {
    conn.execute(
        "update buildings set lat = coalesce(?, lat), lng = coalesce(?, lng) where id = ?",
        params![lat, lng, id],
    )
    .map_err(|e| ServerError::DbError(format!("update building position failed: {e}")))
}

/// Bump `positive_count` unless the last bump is younger than `cooldown_secs`.
/// The guard lives in the UPDATE so only one caller per window wins.
/// Returns false when nothing was updated (unknown id or cooling down).
pub fn record_positive(
    conn: &Connection,
    id: i64,
    now: i64,
    cooldown_secs: i64,
) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update buildings
             set positive_count = positive_count + 1, last_positive_at = ?
             where id = ? and (last_positive_at is null or last_positive_at <= ?)",
            params![now, id, now - cooldown_secs],
        )
        .map_err(|e| ServerError::DbError(format!("record positive failed: {e}")))?;
    Ok(updated == 1)
}

/// Severities of every report on the building, any status.
pub fn severities_for_building(
    conn: &Connection,
    building_id: i64,
) -> Result<Vec<Severity>, ServerError> {
    let mut stmt = conn
        .prepare_cached("select severity from reports where building_id = ?")
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![building_id], |row| row.get::<_, Severity>(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
