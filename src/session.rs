//! Session gate.
//!
//! Simple password gate in front of the dashboard. The gate stores only a
//! SHA-256 digest of the expected password; unlocking hashes the attempt and
//! compares hex digests. Unlock state lasts for the lifetime of the gate
//! value (one session), there is no persistence across restarts.
//!
//! This is an access convenience for a shared screen, not a security
//! boundary; the data behind it is not encrypted.

use sha2::{Digest, Sha256};

use crate::error::DashboardError;

/// Password gate guarding dashboard construction.
#[derive(Debug, Clone)]
pub struct SessionGate {
    expected_digest: String,
    unlocked: bool,
}

impl SessionGate {
    /// Gate expecting `password`. Only the digest is retained.
    pub fn new(password: &str) -> Self {
        Self {
            expected_digest: digest(password),
            unlocked: false,
        }
    }

    /// Gate built from an already-computed SHA-256 hex digest.
    pub fn from_digest(expected_digest: impl Into<String>) -> Self {
        Self {
            expected_digest: expected_digest.into(),
            unlocked: false,
        }
    }

    /// Attempt to unlock. A wrong password leaves the gate locked and
    /// reports [`DashboardError::Locked`].
    pub fn unlock(&mut self, attempt: &str) -> Result<(), DashboardError> {
        if digest(attempt) == self.expected_digest {
            self.unlocked = true;
            Ok(())
        } else {
            log::warn!("Session unlock attempt rejected");
            Err(DashboardError::Locked)
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Re-lock the session (sign out).
    pub fn lock(&mut self) {
        self.unlocked = false;
    }
}

fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
