// src/domain/help.rs

use serde::Serialize;

use crate::domain::time::rfc3339;
use crate::errors::ServerError;

/// Open help requests a single building may carry at once.
pub const MAX_OPEN_HELP_PER_BUILDING: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpStatus {
    Open,
    Closed,
}

text_enum!(HelpStatus, "help status" {
    Open => "open",
    Closed => "closed",
});

#[derive(Debug, Clone, Serialize)]
pub struct HelpRequest {
    pub id: i64,
    pub building_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub contact: Option<String>,
    pub status: HelpStatus,
    #[serde(serialize_with = "rfc3339")]
    pub created_at: i64,
    #[serde(skip)]
    pub user_hash: String,
}

#[derive(Debug, Clone)]
pub struct HelpDraft {
    pub building_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub contact: Option<String>,
}

/// A repeated response is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Ok,
    AlreadyResponded,
}

impl ResponseOutcome {
    pub fn message(self) -> &'static str {
        match self {
            ResponseOutcome::Ok => "ok",
            ResponseOutcome::AlreadyResponded => "already responded",
        }
    }
}

pub fn ensure_capacity(open_count: i64) -> Result<(), ServerError> {
    if open_count >= MAX_OPEN_HELP_PER_BUILDING {
        return Err(ServerError::Capacity(
            "this building already has too many open help requests".into(),
        ));
    }
    Ok(())
}
