// src/handlers/help.rs
use astra::Request;
use serde::Deserialize;
use serde_json::json;

use super::{header_value, query_params, query_value, read_json};
use crate::board::help as board_help;
use crate::domain::help::HelpDraft;
use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};
use crate::state::AppState;

/// Header carrying the responder's self-chosen identity.
pub const USER_HASH_HEADER: &str = "x-user-hash";

#[derive(Debug, Deserialize)]
struct NewHelp {
    building_id: i64,
    title: String,
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    contact: Option<String>,
}

pub fn list(req: &Request, state: &AppState) -> ResultResp {
    let params = query_params(req);
    let building_id: Option<i64> = query_value(&params, "building_id")?;

    let items = state
        .db
        .with_conn(|conn| board_help::list_help_requests(conn, building_id))?;
    json_response(&items)
}

pub fn create(req: Request, client_addr: &str, state: &AppState, now: i64) -> ResultResp {
    let body: NewHelp = read_json(req)?;
    let draft = HelpDraft {
        building_id: body.building_id,
        title: body.title,
        description: body.description,
        category: body.category,
        contact: body.contact,
    };

    let help = state
        .db
        .with_conn(|conn| state.board.create_help_request(conn, client_addr, draft, now))?;
    json_response(&help)
}

pub fn close(help_id: i64, state: &AppState) -> ResultResp {
    let help = state
        .db
        .with_conn(|conn| board_help::close_help_request(conn, help_id))?;
    json_response(&json!({ "status": help.status }))
}

pub fn respond(req: &Request, help_id: i64, state: &AppState, now: i64) -> ResultResp {
    let responder = header_value(req, USER_HASH_HEADER)
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ServerError::BadRequest("no user hash".into()))?;

    let outcome = state
        .db
        .with_conn(|conn| board_help::respond_to_help(conn, help_id, responder, now))?;
    json_response(&json!({ "message": outcome.message() }))
}

pub fn responses(help_id: i64, state: &AppState) -> ResultResp {
    let count = state
        .db
        .with_conn(|conn| board_help::count_help_responses(conn, help_id))?;
    json_response(&json!({ "count": count }))
}
