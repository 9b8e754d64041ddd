// src/handlers/reports.rs
use astra::Request;
use serde::Deserialize;

use super::read_json;
use crate::board::reports as board_reports;
use crate::domain::report::{Category, Periodicity, ReportDraft, Severity};
use crate::images::ImagePayload;
use crate::responses::{json_response, ResultResp};
use crate::state::AppState;

/// `POST /reports` body. Enum fields reject unknown values at decode time.
#[derive(Debug, Deserialize)]
struct NewReport {
    building_id: i64,
    category: Category,
    severity: Severity,
    periodicity: Periodicity,
    text: String,
    #[serde(default)]
    image: Option<ImagePayload>,
}

pub fn submit(req: Request, client_addr: &str, state: &AppState, now: i64) -> ResultResp {
    let body: NewReport = read_json(req)?;
    let draft = ReportDraft {
        building_id: body.building_id,
        category: body.category,
        severity: body.severity,
        periodicity: body.periodicity,
        text: body.text,
    };

    let report = state.db.with_conn(|conn| {
        state.board.submit_report(
            conn,
            &state.images,
            client_addr,
            draft,
            body.image.as_ref(),
            now,
        )
    })?;
    json_response(&report)
}

pub fn list_for_building(building_id: i64, state: &AppState, now: i64) -> ResultResp {
    let reports = state
        .db
        .with_conn(|conn| board_reports::list_reports_for_building(conn, building_id, now))?;
    json_response(&reports)
}

pub fn confirm_problem(report_id: i64, client_addr: &str, state: &AppState, now: i64) -> ResultResp {
    let confirmed = state
        .db
        .with_conn(|conn| state.board.confirm_problem(conn, report_id, client_addr, now))?;
    json_response(&confirmed)
}

pub fn confirm_resolved(report_id: i64, client_addr: &str, state: &AppState, now: i64) -> ResultResp {
    let confirmed = state
        .db
        .with_conn(|conn| state.board.confirm_resolved(conn, report_id, client_addr, now))?;
    json_response(&confirmed)
}
