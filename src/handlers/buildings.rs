// src/handlers/buildings.rs
use astra::Request;
use serde::Deserialize;
use serde_json::json;

use super::{query_params, query_value, read_json};
use crate::board::buildings as board_buildings;
use crate::domain::building::BoundingBox;
use crate::responses::{json_response, ResultResp};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct NewBuilding {
    lat: f64,
    lng: f64,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PositionUpdate {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

pub fn list(req: &Request, state: &AppState) -> ResultResp {
    let params = query_params(req);
    let bbox = BoundingBox::from_parts(
        query_value(&params, "south")?,
        query_value(&params, "west")?,
        query_value(&params, "north")?,
        query_value(&params, "east")?,
    );

    let buildings = state
        .db
        .with_conn(|conn| board_buildings::list_buildings(conn, bbox))?;
    json_response(&buildings)
}

pub fn create(req: Request, state: &AppState, now: i64) -> ResultResp {
    let body: NewBuilding = read_json(req)?;
    let building = state.db.with_conn(|conn| {
        board_buildings::create_building(conn, body.lat, body.lng, body.address.as_deref(), now)
    })?;
    json_response(&building)
}

pub fn update_position(req: Request, id: i64, state: &AppState) -> ResultResp {
    let body: PositionUpdate = read_json(req)?;
    let building = state
        .db
        .with_conn(|conn| board_buildings::update_building_position(conn, id, body.lat, body.lng))?;
    json_response(&building)
}

pub fn confirm_positive(id: i64, state: &AppState, now: i64) -> ResultResp {
    state
        .db
        .with_conn(|conn| board_buildings::confirm_building_positive(conn, id, now))?;
    json_response(&json!({ "success": true }))
}
