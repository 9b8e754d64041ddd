// src/identity.rs
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::errors::ServerError;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded SHA-256 of `"{address}-{resource_id}"`.
/// Anyone who knows the address can recompute it.
pub fn derive_identity(address: &str, resource_id: i64) -> String {
    let digest = Sha256::digest(identity_input(address, resource_id).as_bytes());
    hex::encode(digest)
}

fn identity_input(address: &str, resource_id: i64) -> String {
    format!("{address}-{resource_id}")
}

/// Turns a client address plus a building id into the pseudonymous
/// user hash stored on reports, confirmations and help requests.
#[derive(Clone)]
pub struct IdentityDeriver {
    mac: Option<HmacSha256>,
}

impl IdentityDeriver {
    /// Plain SHA-256, reproducible by third parties.
    pub fn unkeyed() -> Self {
        Self { mac: None }
    }

    /// HMAC-SHA-256 under a server-held secret.
    pub fn keyed(secret: &[u8]) -> Result<Self, ServerError> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| ServerError::InternalError)?;
        Ok(Self { mac: Some(mac) })
    }

    pub fn is_keyed(&self) -> bool {
        self.mac.is_some()
    }

    pub fn derive(&self, address: &str, resource_id: i64) -> String {
        match &self.mac {
            None => derive_identity(address, resource_id),
            Some(proto) => {
                let mut mac = proto.clone();
                mac.update(identity_input(address, resource_id).as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
        }
    }
}

/// Short prefix for log lines.
pub fn short(identity: &str) -> &str {
    identity.get(..12).unwrap_or(identity)
}
