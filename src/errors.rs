// errors.rs
use astra::Response;
use thiserror::Error;

/// Which abuse-control rule turned a write away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitKind {
    /// Too many reports from one identity in the last 24h.
    DailyCap,
    /// Same identity already reported this building in the last 24h.
    BuildingDedup,
    /// Last report from this identity was under a minute ago.
    Cooldown,
    /// The building was confirmed fine less than 24h ago.
    PositiveCooldown,
}

impl RateLimitKind {
    pub fn message(self) -> &'static str {
        match self {
            RateLimitKind::DailyCap => "too many reports from your address today",
            RateLimitKind::BuildingDedup => "you already reported this building in the last 24 hours",
            RateLimitKind::Cooldown => "too frequent, wait a minute",
            RateLimitKind::PositiveCooldown => {
                "this building was already confirmed fine in the last 24 hours"
            }
        }
    }

    /// Dedup-style rejections answer as client errors, throttling as 429.
    pub fn status(self) -> u16 {
        match self {
            RateLimitKind::DailyCap | RateLimitKind::Cooldown => 429,
            RateLimitKind::BuildingDedup | RateLimitKind::PositiveCooldown => 400,
        }
    }
}

/// Errors originating from either the board rules
/// (validation, limits, state guards) or downstream layers (DB, disk).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{}", .0.message())]
    RateLimited(RateLimitKind),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Capacity(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("IO Error: {0}")]
    Io(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::Validation(_) => 422,
            ServerError::BadRequest(_)
            | ServerError::Duplicate(_)
            | ServerError::InvalidState(_)
            | ServerError::Capacity(_) => 400,
            ServerError::NotFound(_) => 404,
            ServerError::RateLimited(kind) => kind.status(),
            ServerError::DbError(_) | ServerError::Io(_) | ServerError::InternalError => 500,
        }
    }

    /// Store and disk failures are ours, everything else is the caller's.
    pub fn is_internal(&self) -> bool {
        self.status() >= 500
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
