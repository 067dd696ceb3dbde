//! PIN confirmation for editing and destructive actions.
//!
//! Only the SHA-256 digest of the PIN is configured; the clear-text PIN is
//! hashed on each attempt and compared against it.

use sha2::{Digest, Sha256};

/// Why a gated action was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    #[error("this action requires a PIN (pass --pin)")]
    Required,
    #[error("wrong PIN")]
    Rejected,
}

/// SHA-256 of a PIN as lowercase hex, the form stored in `pin_sha256`.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.trim().as_bytes()))
}

/// Gate built from the configured digest. Without a digest every action passes.
#[derive(Debug, Clone, Default)]
pub struct PinGate {
    digest: Option<String>,
}

impl PinGate {
    pub fn new(digest: Option<&str>) -> Self {
        Self {
            digest: digest
                .map(|d| d.trim().to_ascii_lowercase())
                .filter(|d| !d.is_empty()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.digest.is_none()
    }

    pub fn verify(&self, pin: Option<&str>) -> Result<(), PinError> {
        let Some(expected) = &self.digest else {
            return Ok(());
        };
        let pin = pin.ok_or(PinError::Required)?;
        if hash_pin(pin) == *expected {
            Ok(())
        } else {
            tracing::warn!("PIN rejected");
            Err(PinError::Rejected)
        }
    }
}
