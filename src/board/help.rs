// src/board/help.rs
use rusqlite::Connection;
use tracing::{debug, info, warn};

use super::Board;
use crate::db::buildings as db_buildings;
use crate::db::connection::{commit, write_tx};
use crate::db::help as db_help;
use crate::domain::help::{ensure_capacity, HelpDraft, HelpRequest, ResponseOutcome};
use crate::domain::validation::{
    check_length, normalize_contact, normalize_help_category, HELP_DESCRIPTION_LEN,
    HELP_TITLE_LEN,
};
use crate::errors::ServerError;
use crate::identity::short;

impl Board {
    /// Open a neighbor-help request. A building carries at most three open
    /// ones; the count and the insert share one write transaction.
    pub fn create_help_request(
        &self,
        conn: &mut Connection,
        client_addr: &str,
        draft: HelpDraft,
        now: i64,
    ) -> Result<HelpRequest, ServerError> {
        let title = draft.title.trim().to_string();
        let description = draft.description.trim().to_string();
        check_length("title", &title, HELP_TITLE_LEN)?;
        check_length("description", &description, HELP_DESCRIPTION_LEN)?;
        let draft = HelpDraft {
            title,
            description,
            category: normalize_help_category(&draft.category)?,
            contact: normalize_contact(draft.contact.as_deref())?,
            ..draft
        };

        let tx = write_tx(conn)?;
        db_buildings::require_building(&tx, draft.building_id)?;

        let open = db_help::count_open_for_building(&tx, draft.building_id)?;
        if let Err(e) = ensure_capacity(open) {
            warn!(building_id = draft.building_id, open, "help request rejected, building full");
            return Err(e);
        }

        let user_hash = self.identity.derive(client_addr, draft.building_id);
        let help = db_help::insert_help(&tx, &draft, &user_hash, now)?;
        commit(tx)?;

        info!(
            help_id = help.id,
            building_id = help.building_id,
            category = %help.category,
            identity = short(&user_hash),
            "help request created"
        );
        Ok(help)
    }
}

pub fn list_help_requests(
    conn: &Connection,
    building_id: Option<i64>,
) -> Result<Vec<HelpRequest>, ServerError> {
    db_help::list_help(conn, building_id)
}

/// Closing twice is fine and returns the closed request.
pub fn close_help_request(conn: &mut Connection, id: i64) -> Result<HelpRequest, ServerError> {
    let tx = write_tx(conn)?;
    let help = db_help::require_help(&tx, id)?;
    if db_help::close_help(&tx, id)? {
        info!(help_id = id, author = short(&help.user_hash), "help request closed");
    }
    let help = db_help::require_help(&tx, id)?;
    commit(tx)?;
    Ok(help)
}

/// Record that `responder` offered help. The caller supplies the identity.
pub fn respond_to_help(
    conn: &mut Connection,
    help_id: i64,
    responder: &str,
    now: i64,
) -> Result<ResponseOutcome, ServerError> {
    let responder = responder.trim();
    if responder.is_empty() {
        return Err(ServerError::BadRequest("responder identity is required".into()));
    }

    let tx = write_tx(conn)?;
    db_help::require_help(&tx, help_id)?;
    let outcome = if db_help::insert_response(&tx, help_id, responder, now)? {
        info!(help_id, identity = short(responder), "help response recorded");
        ResponseOutcome::Ok
    } else {
        debug!(help_id, identity = short(responder), "repeat help response");
        ResponseOutcome::AlreadyResponded
    };
    commit(tx)?;
    Ok(outcome)
}

pub fn count_help_responses(conn: &Connection, help_id: i64) -> Result<i64, ServerError> {
    db_help::require_help(conn, help_id)?;
    db_help::count_responses(conn, help_id)
}
