//! Error types for knife.

use knife_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur during knife operations.
///
/// The display pipeline itself never fails; these surface from the strict
/// helpers that callers use outside a render pass.
#[derive(Debug, Error)]
pub enum KnifeError {
    /// Core primitive error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Verification error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input was not recognized as anything.
    #[error("unrecognized input")]
    Unrecognized,

    /// Signing was requested without a configured key.
    #[error("no signing key configured")]
    MissingSigningKey,

    /// A background derivation did not complete.
    #[error("derivation task failed: {0}")]
    TaskFailed(String),
}

/// Result type for knife operations.
pub type Result<T> = std::result::Result<T, KnifeError>;
