use astra::Server;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Args;
use crate::db::connection::init_db;
use crate::state::AppState;

mod board;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod identity;
mod images;
mod responses;
mod router;
mod state;

#[cfg(test)]
mod tests;

fn main() {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("building_board={log_level},info").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {e}");
        std::process::exit(1);
    }

    let state = match AppState::from_args(&args) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_db(&state.db) {
        error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    info!(
        listen = %args.listen,
        database = %args.database,
        uploads = %args.uploads_dir.display(),
        workers = args.max_workers,
        "starting building board"
    );

    let server = Server::bind(&args.listen).max_workers(args.max_workers);
    let result = server.serve(move |req, info: astra::ConnectionInfo| {
        router::serve(req, info.peer_addr(), &state)
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
