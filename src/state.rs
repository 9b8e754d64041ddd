// src/state.rs
use tracing::{info, warn};

use crate::board::Board;
use crate::config::Args;
use crate::db::Database;
use crate::errors::ServerError;
use crate::identity::IdentityDeriver;
use crate::images::DiskImageStore;

/// Everything a request handler needs, shared by all workers.
pub struct AppState {
    pub db: Database,
    pub board: Board,
    pub images: DiskImageStore,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn from_args(args: &Args) -> Result<Self, ServerError> {
        let identity = match &args.identity_secret {
            Some(secret) => IdentityDeriver::keyed(secret.as_bytes())?,
            None => IdentityDeriver::unkeyed(),
        };
        if identity.is_keyed() {
            info!("identity derivation keyed with server secret");
        } else {
            warn!("IDENTITY_SECRET unset, identities are plain SHA-256 of address and building");
        }

        Ok(Self {
            db: Database::new(args.database.clone()),
            board: Board::new(identity),
            images: DiskImageStore::new(args.uploads_dir.clone())?,
            cors_origins: args.cors_origins.clone(),
        })
    }
}
