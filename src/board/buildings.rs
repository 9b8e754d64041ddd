// src/board/buildings.rs
use rusqlite::Connection;
use tracing::{debug, info};

use crate::db::buildings as db_buildings;
use crate::db::connection::{commit, write_tx};
use crate::db::help as db_help;
use crate::domain::building::{
    building_status, BoundingBox, Building, BuildingSummary, POSITIVE_COOLDOWN_SECS,
};
use crate::domain::validation::check_coordinates;
use crate::errors::{RateLimitKind, ServerError};

pub fn create_building(
    conn: &Connection,
    lat: f64,
    lng: f64,
    address: Option<&str>,
    now: i64,
) -> Result<Building, ServerError> {
    check_coordinates(lat, lng)?;
    let address = address.map(str::trim).filter(|a| !a.is_empty());

    let building = db_buildings::insert_building(conn, lat, lng, address, now)?;
    info!(building_id = building.id, lat, lng, "building created");
    Ok(building)
}

/// Move a building pin. Either coordinate may be omitted and keeps its value.
pub fn update_building_position(
    conn: &mut Connection,
    id: i64,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Building, ServerError> {
    let tx = write_tx(conn)?;
    let current = db_buildings::require_building(&tx, id)?;
    check_coordinates(lat.unwrap_or(current.lat), lng.unwrap_or(current.lng))?;

    db_buildings::update_position(&tx, id, lat, lng)?;
    let updated = db_buildings::require_building(&tx, id)?;
    commit(tx)?;

    info!(building_id = id, lat = updated.lat, lng = updated.lng, "building moved");
    Ok(updated)
}

/// Map listing with a derived status per building. The box applies only
/// when all four edges are known.
pub fn list_buildings(
    conn: &mut Connection,
    bbox: Option<BoundingBox>,
) -> Result<Vec<BuildingSummary>, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let buildings = db_buildings::list_buildings(&tx, bbox)?;
    let mut out = Vec::with_capacity(buildings.len());
    for b in buildings {
        let severities = db_buildings::severities_for_building(&tx, b.id)?;
        let help_count = db_help::count_open_for_building(&tx, b.id)?;
        out.push(BuildingSummary {
            id: b.id,
            lat: b.lat,
            lng: b.lng,
            address: b.address,
            status: building_status(severities),
            positive_count: b.positive_count,
            help_count,
        });
    }

    commit(tx)?;
    debug!(count = out.len(), filtered = bbox.is_some(), "listed buildings");
    Ok(out)
}

/// "All good here" vote. One per building per 24 hours, across all clients.
pub fn confirm_building_positive(
    conn: &mut Connection,
    id: i64,
    now: i64,
) -> Result<Building, ServerError> {
    let tx = write_tx(conn)?;
    if !db_buildings::record_positive(&tx, id, now, POSITIVE_COOLDOWN_SECS)? {
        db_buildings::require_building(&tx, id)?;
        return Err(ServerError::RateLimited(RateLimitKind::PositiveCooldown));
    }
    let building = db_buildings::require_building(&tx, id)?;
    commit(tx)?;

    info!(building_id = id, positive_count = building.positive_count, "positive confirmation");
    Ok(building)
}
