// src/handlers/analytics.rs
use crate::db::analytics;
use crate::domain::DAY_SECS;
use crate::responses::{json_response, ResultResp};
use crate::state::AppState;

const TOP_BUILDINGS: i64 = 10;
const REPORTS_BY_DAY_WINDOW: i64 = 30 * DAY_SECS;

pub fn top_buildings(state: &AppState) -> ResultResp {
    let rows = state
        .db
        .with_conn(|conn| analytics::top_buildings(conn, TOP_BUILDINGS))?;
    json_response(&rows)
}

pub fn severity_stats(state: &AppState) -> ResultResp {
    let rows = state.db.with_conn(|conn| analytics::severity_stats(conn))?;
    json_response(&rows)
}

pub fn reports_by_day(state: &AppState, now: i64) -> ResultResp {
    let rows = state
        .db
        .with_conn(|conn| analytics::reports_by_day(conn, now - REPORTS_BY_DAY_WINDOW))?;
    json_response(&rows)
}
