// src/router.rs
use astra::{Request, Response};
use http::Method;
use serde_json::json;
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::time::now_unix;
use crate::errors::ServerError;
use crate::handlers::{self, parse_id};
use crate::responses::{
    apply_cors, error_to_response, json_response, preflight_response, ResultResp,
};
use crate::state::AppState;

/// Entry point for the server loop: routes, converts errors once,
/// and adds CORS headers to whatever comes out.
pub fn serve(req: Request, peer: Option<SocketAddr>, state: &AppState) -> Response {
    let origin = handlers::header_value(&req, "origin").map(str::to_owned);
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let mut resp = if method == Method::OPTIONS {
        preflight_response()
    } else {
        let client_ip = peer.map(|p| p.ip().to_string()).unwrap_or_default();
        match handle(req, &client_ip, state) {
            Ok(resp) => resp,
            Err(err) => {
                if err.is_internal() {
                    error!(%method, %path, error = %err, "request failed");
                } else {
                    debug!(%method, %path, status = err.status(), error = %err, "request rejected");
                }
                error_to_response(&err)
            }
        }
    };

    apply_cors(&mut resp, origin.as_deref(), &state.cors_origins);
    resp
}

pub fn handle(req: Request, client_ip: &str, state: &AppState) -> ResultResp {
    if client_ip.is_empty() {
        return Err(ServerError::BadRequest("unknown client address".into()));
    }

    let now = now_unix();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let segments: Vec<&str> = path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();

    match (&method, segments.as_slice()) {
        (&Method::GET, []) => json_response(&json!({ "ok": true })),

        (&Method::GET, ["buildings"]) => handlers::buildings::list(&req, state),
        (&Method::POST, ["buildings"]) => handlers::buildings::create(req, state, now),
        (&Method::PATCH, ["buildings", id, "position"]) => {
            handlers::buildings::update_position(req, parse_id(id)?, state)
        }
        (&Method::POST, ["buildings", id, "confirm-positive"]) => {
            handlers::buildings::confirm_positive(parse_id(id)?, state, now)
        }
        (&Method::GET, ["buildings", id, "reports"])
        | (&Method::GET, ["reports", "buildings", id, "reports"]) => {
            handlers::reports::list_for_building(parse_id(id)?, state, now)
        }

        (&Method::POST, ["reports"]) => handlers::reports::submit(req, client_ip, state, now),
        (&Method::POST, ["reports", id, "confirm-problem"]) => {
            handlers::reports::confirm_problem(parse_id(id)?, client_ip, state, now)
        }
        (&Method::POST, ["reports", id, "confirm-resolved"]) => {
            handlers::reports::confirm_resolved(parse_id(id)?, client_ip, state, now)
        }

        (&Method::GET, ["help"]) => handlers::help::list(&req, state),
        (&Method::POST, ["help"]) => handlers::help::create(req, client_ip, state, now),
        (&Method::POST, ["help", id, "close"]) => handlers::help::close(parse_id(id)?, state),
        (&Method::POST, ["help", id, "respond"]) => {
            handlers::help::respond(&req, parse_id(id)?, state, now)
        }
        (&Method::GET, ["help", id, "responses"]) => {
            handlers::help::responses(parse_id(id)?, state)
        }

        (&Method::GET, ["analytics", "top-buildings"]) => handlers::analytics::top_buildings(state),
        (&Method::GET, ["analytics", "severity-stats"]) => handlers::analytics::severity_stats(state),
        (&Method::GET, ["analytics", "reports-by-day"]) => {
            handlers::analytics::reports_by_day(state, now)
        }

        (&Method::GET, ["uploads", name]) => handlers::uploads::serve(name, state),

        _ => Err(ServerError::NotFound("route")),
    }
}
