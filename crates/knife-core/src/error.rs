//! Error types for the knife core.

use thiserror::Error;

/// Core errors that can occur while building or decoding events and keys.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error("bech32 error: {0}")]
    Bech32(String),

    #[error("unexpected bech32 prefix: expected {expected}, got {got}")]
    UnexpectedPrefix { expected: String, got: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons an event fails verification.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("event has no id")]
    MissingId,

    #[error("event has no signature")]
    MissingSignature,

    #[error("event has no pubkey")]
    MissingPubkey,

    #[error("invalid .id, expected {computed}, got {claimed}")]
    IdMismatch { computed: String, claimed: String },

    #[error("signature verification failed")]
    SignatureFailed,

    #[error("malformed field: {0}")]
    MalformedField(String),
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSignature | CoreError::InvalidPublicKey => {
                ValidationError::SignatureFailed
            }
            CoreError::InvalidHex { field, reason } => {
                ValidationError::MalformedField(format!("{field}: {reason}"))
            }
            other => ValidationError::MalformedField(other.to_string()),
        }
    }
}
