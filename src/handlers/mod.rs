// src/handlers/mod.rs
//
// One function per route. Handlers parse the request, call into `board`
// through a pooled connection, and shape the JSON answer.

pub mod analytics;
pub mod buildings;
pub mod help;
pub mod reports;
pub mod uploads;

use astra::Request;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

use crate::errors::ServerError;
use crate::images::MAX_IMAGE_BYTES;

/// Largest accepted JSON body; leaves room for a base64 image.
pub const MAX_BODY_BYTES: u64 = (MAX_IMAGE_BYTES as u64) * 3 / 2 + 64 * 1024;

/// Read and decode a JSON body. Malformed or mistyped input is a
/// validation failure, an oversized body a bad request.
pub fn read_json<T: DeserializeOwned>(req: Request) -> Result<T, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".into()));
    }

    serde_json::from_slice(&buf).map_err(|e| ServerError::Validation(format!("invalid body: {e}")))
}

pub fn query_params(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Optional typed query value; present but unparsable is an error.
pub fn query_value<T: FromStr>(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ServerError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ServerError::Validation(format!("invalid query parameter '{key}'"))),
    }
}

pub fn header_value<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Path ids are positive integers; anything else cannot name a row.
pub fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServerError::Validation(format!("invalid id '{raw}'")))
}
