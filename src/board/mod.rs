// src/board/mod.rs
//
// The operations the HTTP layer calls. Each one takes a connection and
// `now`, derives identities where needed, and runs its checks and writes
// inside one store transaction.

pub mod buildings;
pub mod help;
pub mod reports;

use crate::domain::rate_limit::RateLimitPolicy;
use crate::identity::IdentityDeriver;

/// Holds what the identity-aware operations share.
#[derive(Clone)]
pub struct Board {
    identity: IdentityDeriver,
    policy: RateLimitPolicy,
}

impl Board {
    pub fn new(identity: IdentityDeriver) -> Self {
        Self {
            identity,
            policy: RateLimitPolicy::default(),
        }
    }
}
