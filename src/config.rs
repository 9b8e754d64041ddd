//! Command line and environment configuration.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Building board - pseudonymous building-level issue reporting
#[derive(Parser, Debug, Clone)]
#[command(name = "building_board")]
#[command(about = "Community issue board for buildings on a map")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "board.sqlite3")]
    pub database: String,

    /// Directory attached report images are written to
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Worker threads serving requests
    #[arg(long, env = "MAX_WORKERS", default_value = "8")]
    pub max_workers: usize,

    /// Secret for keyed (HMAC) identity derivation.
    /// Unset keeps the plain SHA-256 derivation.
    #[arg(long, env = "IDENTITY_SECRET")]
    pub identity_secret: Option<String>,

    /// Origins allowed by CORS, comma separated
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,http://127.0.0.1:5173"
    )]
    pub cors_origins: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_workers == 0 {
            return Err("MAX_WORKERS must be at least 1".into());
        }
        if matches!(&self.identity_secret, Some(s) if s.trim().is_empty()) {
            return Err("IDENTITY_SECRET is set but empty".into());
        }
        Ok(())
    }
}
